//! Chat widget.
//!
//! - [`ChatWidget`]: submits one query per round trip and renders the answer
//! - [`Transcript`]: append-only record of the conversation

mod transcript;
mod widget;

pub use transcript::Transcript;
pub use widget::ChatWidget;
