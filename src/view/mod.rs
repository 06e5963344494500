//! Output sinks for the controllers.
//!
//! The controllers describe *what* changed (rows replaced, panel shown,
//! entry appended, notice raised); a view decides how that reaches the
//! operator.
//!
//! # Structure
//!
//! - [`ViewRenderer`]: notices, blocking confirmation, pending indicator
//! - [`AdminView`]: document table, replace panel, file inputs, navigation
//! - [`ChatView`]: chat input and transcript
//! - [`render`]: view models and formatting shared by every view
//! - [`html`]: escaped HTML fragments
//! - [`PageView`]: in-memory page model rendered as HTML (browser host, tests)
//! - [`TerminalView`]: stdout/stderr rendering with interactive prompts

pub mod html;
mod page;
pub mod render;
mod terminal;

pub use page::PageView;
pub use render::{AnswerCard, DocumentRow, EntryBody, Role, TranscriptEntry};
pub use terminal::TerminalView;

use std::fmt;

use url::Url;

use crate::error::Error;

/// Severity of an operator notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// An operation completed.
    Success,
    /// A guard rejected the action before any request.
    Validation,
    /// A request failed.
    Failure,
}

/// A message for the operator (the browser's `alert`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn validation(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Validation,
            text: text.into(),
        }
    }

    /// Generic "operation failed" notice carrying the error.
    pub fn failure(action: Action, err: &Error) -> Self {
        Self {
            kind: NoticeKind::Failure,
            text: format!("{} failed: {err}", action.label()),
        }
    }
}

/// A request-issuing operation, reported to views while it is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Upload,
    Delete,
    Replace,
    Ask,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Self::Refresh => "Loading the document list",
            Self::Upload => "Upload",
            Self::Delete => "Delete",
            Self::Replace => "Replace",
            Self::Ask => "Query",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Surface shared by every view.
pub trait ViewRenderer {
    /// Show a notice to the operator.
    fn notify(&mut self, notice: Notice);

    /// Blocking yes/no prompt.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// `Some(action)` before a request is issued, `None` once it settled.
    fn set_pending(&mut self, action: Option<Action>);
}

/// The document admin panel.
pub trait AdminView: ViewRenderer {
    /// Replace every rendered row with `rows`, in order.
    fn render_rows(&mut self, rows: &[DocumentRow]);

    /// Reveal the replace panel with the given status line.
    fn show_replace_panel(&mut self, status_line: &str);

    fn hide_replace_panel(&mut self);

    fn reset_upload_input(&mut self);

    fn reset_replace_input(&mut self);

    /// Open `url` in a new viewing context.
    fn open_url(&mut self, url: &Url);
}

/// The chat widget.
pub trait ChatView: ViewRenderer {
    /// Current contents of the chat input.
    fn input_value(&self) -> String;

    fn clear_input(&mut self);

    /// Append one entry to the rendered transcript.
    fn append_entry(&mut self, entry: &TranscriptEntry);

    fn scroll_to_end(&mut self);
}
