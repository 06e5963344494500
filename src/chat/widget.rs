//! Chat widget controller.

use tracing::{debug, info, warn};

use super::Transcript;
use crate::error::Result;
use crate::gateway::BackendGateway;
use crate::view::{Action, AnswerCard, ChatView, Notice, PageView, TranscriptEntry};

/// Controller of the chat widget.
///
/// Each submission appends exactly one user entry and, once the backend
/// answered, exactly one bot entry. The input is cleared only after a
/// successful answer so a failed query can be resent as typed.
#[derive(Debug)]
pub struct ChatWidget<G, V> {
    gateway: G,
    view: V,
    transcript: Transcript,
}

impl<G: BackendGateway, V: ChatView> ChatWidget<G, V> {
    pub fn new(gateway: G, view: V) -> Self {
        Self {
            gateway,
            view,
            transcript: Transcript::new(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Submit the current input.
    ///
    /// Returns `Ok(false)` without touching anything when the input is blank.
    pub async fn send_message(&mut self) -> Result<bool> {
        let text = self.view.input_value().trim().to_string();
        if text.is_empty() {
            debug!(name: "chat.blank_input", "Ignoring blank chat input");
            return Ok(false);
        }

        self.append(TranscriptEntry::user(text.as_str()));

        self.view.set_pending(Some(Action::Ask));
        let result = self.gateway.ask(&text).await;
        self.view.set_pending(None);

        let answer = result.inspect_err(|err| {
            warn!(name: "chat.ask.failed", error = %err, "Query failed");
            self.view.notify(Notice::failure(Action::Ask, err));
        })?;

        info!(
            name: "chat.answered",
            source = %answer.fuente,
            article = %answer.articulo,
            score = answer.score,
            "Answer received"
        );

        self.view.clear_input();
        self.append(TranscriptEntry::bot(AnswerCard::from(&answer)));
        self.view.scroll_to_end();
        Ok(true)
    }

    fn append(&mut self, entry: TranscriptEntry) {
        self.view.append_entry(&entry);
        self.transcript.push(entry);
    }
}

impl<G: BackendGateway> ChatWidget<G, PageView> {
    /// The chat panel rendered from this widget's transcript.
    pub fn panel_html(&mut self) -> String {
        self.view.chat_panel_html(self.transcript.entries())
    }
}
