//! Displaying report messages.
//!
//! The core only produces message strings; a [`Presenter`] decides where
//! they go. `LogPresenter` sends them to the tracing subscriber and
//! `PanelPresenter` draws a dismissible box on a terminal.

use std::io::{self, BufRead, Write};

use unicode_width::UnicodeWidthStr;

/// Something that can show an ordered list of messages.
pub trait Presenter {
    fn present(&mut self, messages: &[String]) -> io::Result<()>;
}

/// Emits each message as an `info` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn present(&mut self, messages: &[String]) -> io::Result<()> {
        for message in messages {
            tracing::info!("{message}");
        }
        Ok(())
    }
}

/// Marker drawn in the panel's top-right corner.
const DISMISS_MARKER: &str = "[x]";

/// Draws messages inside a bordered panel.
///
/// Lines are padded by terminal column width, so wide glyphs such as the
/// report emoji keep the right border aligned.
///
/// ```text
/// +------------------------------+
/// |                          [x] |
/// | 🚫 Goodbye: alice            |
/// | No new active users since... |
/// +------------------------------+
/// ```
#[derive(Debug)]
pub struct PanelPresenter<W> {
    out: W,
}

impl<W: Write> PanelPresenter<W> {
    pub fn new(out: W) -> Self {
        PanelPresenter { out }
    }

    /// Prints a dismiss prompt and blocks until a line (or EOF) is read
    /// from `input`.
    pub fn wait_for_dismissal(&mut self, mut input: impl BufRead) -> io::Result<()> {
        write!(self.out, "Press Enter to dismiss {DISMISS_MARKER} ")?;
        self.out.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for PanelPresenter<W> {
    fn present(&mut self, messages: &[String]) -> io::Result<()> {
        let width = messages
            .iter()
            .map(|m| m.width())
            .chain(std::iter::once(DISMISS_MARKER.len()))
            .max()
            .unwrap_or(DISMISS_MARKER.len());
        let border = format!("+{}+", "-".repeat(width + 2));

        writeln!(self.out, "{border}")?;
        writeln!(self.out, "| {DISMISS_MARKER:>width$} |")?;
        for message in messages {
            let pad = width - message.width();
            writeln!(self.out, "| {message}{} |", " ".repeat(pad))?;
        }
        writeln!(self.out, "{border}")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(messages: &[&str]) -> String {
        let messages: Vec<String> = messages.iter().map(|m| m.to_string()).collect();
        let mut panel = PanelPresenter::new(Vec::new());
        panel.present(&messages).unwrap();
        String::from_utf8(panel.into_inner()).unwrap()
    }

    #[test]
    fn panel_draws_border_marker_and_lines() {
        let out = render(&["First scan!", "Found 0 banned users"]);

        assert_eq!(
            out,
            "\
+----------------------+
|                  [x] |
| First scan!          |
| Found 0 banned users |
+----------------------+
"
        );
    }

    #[test]
    fn panel_pads_wide_glyphs_by_column_width() {
        let out = render(&["🚫 Goodbye: alice", "👋 Welcome: bob", "No new bans"]);

        assert_eq!(
            out,
            "\
+-------------------+
|               [x] |
| 🚫 Goodbye: alice |
| 👋 Welcome: bob   |
| No new bans       |
+-------------------+
"
        );
        let widths: Vec<usize> = out.lines().map(UnicodeWidthStr::width).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "ragged panel: {widths:?}");
    }

    #[test]
    fn panel_with_no_messages_still_has_marker() {
        let out = render(&[]);

        assert_eq!(out, "+-----+\n| [x] |\n+-----+\n");
    }

    #[test]
    fn dismissal_consumes_one_line() {
        let mut panel = PanelPresenter::new(Vec::new());
        let mut input = io::Cursor::new(b"\nleftover\n".to_vec());

        panel.wait_for_dismissal(&mut input).unwrap();

        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "leftover\n");
        let out = String::from_utf8(panel.into_inner()).unwrap();
        assert!(out.contains("[x]"));
    }

    #[test]
    fn log_presenter_accepts_messages() {
        LogPresenter.present(&["hello".to_string()]).unwrap();
    }
}
