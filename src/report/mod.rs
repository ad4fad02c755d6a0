//! Report rendering.
//!
//! Formatting turns a [`ChangeReport`](crate::reconcile::ChangeReport) into
//! plain-text lines; presenters display those lines and are the boundary to
//! whatever surface the user is looking at.

pub mod format;
pub mod present;

pub use format::format_messages;
pub use present::{LogPresenter, PanelPresenter, Presenter};
