use std::io;

use banlist::config::ScanConfig;
use banlist::directory::SlackClient;
use banlist::persistence::FileStore;
use banlist::report::{LogPresenter, PanelPresenter, Presenter};
use banlist::run_scan;
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banlist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = ScanConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let store = FileStore::new(&config.state_dir);
    let client = SlackClient::new(config.token.as_str(), config.api_base.as_str())?;

    let outcome = match run_scan(&store, &client, Utc::now()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(
                error = %e,
                status = e.status_code(),
                "Scan aborted; stored snapshot left unchanged"
            );
            return Err(e.into());
        }
    };

    LogPresenter.present(&outcome.messages)?;

    let mut panel = PanelPresenter::new(io::stdout().lock());
    panel.present(&outcome.messages)?;
    if config.interactive {
        panel.wait_for_dismissal(io::stdin().lock())?;
    }

    Ok(())
}
