//! In-memory page model.

use std::collections::VecDeque;

use url::Url;

use super::html::{entry_html, html_escape, notices_html, row_html};
use super::render::{DocumentRow, TranscriptEntry};
use super::{Action, AdminView, ChatView, Notice, ViewRenderer};

/// The state of the admin and chat pages, as the browser would hold it.
///
/// The browser host renders it into HTML fragments after each operation;
/// tests inspect it directly. Confirmation answers are queued up front
/// (the browser asks the operator before the request reaches the host).
/// The chat transcript is not kept here: the panel is rendered from the
/// widget's own transcript.
#[derive(Debug, Default)]
pub struct PageView {
    rows: Vec<DocumentRow>,
    row_renders: usize,
    replace_status: Option<String>,
    replace_panel_visible: bool,
    upload_input_resets: usize,
    replace_input_resets: usize,
    opened: Vec<Url>,
    notices: Vec<Notice>,
    confirm_prompts: Vec<String>,
    confirm_answers: VecDeque<bool>,
    pending: Option<Action>,
    chat_input: String,
    scrolled_to_end: bool,
}

impl PageView {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operator input
    // ─────────────────────────────────────────────────────────────────────────

    /// Answer the next confirmation prompt. Unanswered prompts are declined.
    pub fn queue_confirmation(&mut self, answer: bool) {
        self.confirm_answers.push_back(answer);
    }

    pub fn set_chat_input(&mut self, value: impl Into<String>) {
        self.chat_input = value.into();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn rows(&self) -> &[DocumentRow] {
        &self.rows
    }

    /// How many times the table body was rebuilt.
    pub fn row_renders(&self) -> usize {
        self.row_renders
    }

    pub fn replace_status(&self) -> Option<&str> {
        self.replace_status.as_deref()
    }

    pub fn replace_panel_visible(&self) -> bool {
        self.replace_panel_visible
    }

    pub fn upload_input_resets(&self) -> usize {
        self.upload_input_resets
    }

    pub fn replace_input_resets(&self) -> usize {
        self.replace_input_resets
    }

    pub fn opened(&self) -> &[Url] {
        &self.opened
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain notices once they have been shown.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn confirm_prompts(&self) -> &[String] {
        &self.confirm_prompts
    }

    pub fn pending(&self) -> Option<Action> {
        self.pending
    }

    pub fn chat_input(&self) -> &str {
        &self.chat_input
    }

    pub fn scrolled_to_end(&self) -> bool {
        self.scrolled_to_end
    }

    // ─────────────────────────────────────────────────────────────────────────
    // HTML
    // ─────────────────────────────────────────────────────────────────────────

    pub fn rows_html(&self) -> String {
        self.rows.iter().map(row_html).collect::<Vec<_>>().join("\n")
    }

    /// The admin panel, including (and draining) pending notices.
    pub fn admin_panel_html(&mut self) -> String {
        let notices = notices_html(&self.take_notices());
        let replace_style = if self.replace_panel_visible {
            "block"
        } else {
            "none"
        };
        let replace_target = self
            .replace_status
            .as_deref()
            .map(html_escape)
            .unwrap_or_default();
        format!(
            r#"<section id="admin-panel" hx-target="this" hx-swap="outerHTML">
    <div id="notices">{notices}</div>
    <form id="upload-form" hx-post="/ui/admin/upload" hx-encoding="multipart/form-data" hx-disabled-elt="find button">
        <input type="file" id="upload-file" name="file" accept="application/pdf">
        <button type="submit">Upload</button>
    </form>
    <div id="replace-box" style="display:{replace_style}">
        <p id="replace-target">{replace_target}</p>
        <form hx-post="/ui/admin/replace-confirm" hx-encoding="multipart/form-data" hx-disabled-elt="find button">
            <input type="file" id="replace-file" name="file" accept="application/pdf">
            <button type="submit">Confirm replacement</button>
        </form>
        <button hx-post="/ui/admin/replace-cancel">Cancel</button>
    </div>
    <table>
        <thead><tr><th>Name</th><th>Size</th><th>Modified</th><th>Actions</th></tr></thead>
        <tbody id="docs-body">
{rows}
        </tbody>
    </table>
    <button hx-get="/ui/admin/list">Refresh</button>
</section>"#,
            rows = self.rows_html(),
        )
    }

    /// The chat panel showing `transcript`, including (and draining) pending
    /// notices. The input keeps its value when the last query failed.
    pub fn chat_panel_html(&mut self, transcript: &[TranscriptEntry]) -> String {
        let notices = notices_html(&self.take_notices());
        format!(
            r#"<section id="chat-panel" hx-target="this" hx-swap="outerHTML">
    <div id="notices">{notices}</div>
    <div id="chat-window">
{transcript}
    </div>
    <form id="chat-form" hx-post="/ui/chat" hx-disabled-elt="find button">
        <input type="text" id="user-input" name="query" value="{input}" placeholder="Ask about the documents..." autocomplete="off">
        <button type="submit">Send</button>
    </form>
    <script>document.getElementById("chat-window").scrollTop = document.getElementById("chat-window").scrollHeight;</script>
</section>"#,
            transcript = transcript_html(transcript),
            input = html_escape(&self.chat_input),
        )
    }
}

fn transcript_html(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(entry_html)
        .collect::<Vec<_>>()
        .join("\n")
}

impl ViewRenderer for PageView {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.confirm_prompts.push(prompt.to_string());
        self.confirm_answers.pop_front().unwrap_or(false)
    }

    fn set_pending(&mut self, action: Option<Action>) {
        self.pending = action;
    }
}

impl AdminView for PageView {
    fn render_rows(&mut self, rows: &[DocumentRow]) {
        self.rows = rows.to_vec();
        self.row_renders += 1;
    }

    fn show_replace_panel(&mut self, status_line: &str) {
        self.replace_status = Some(status_line.to_string());
        self.replace_panel_visible = true;
    }

    fn hide_replace_panel(&mut self) {
        self.replace_panel_visible = false;
    }

    fn reset_upload_input(&mut self) {
        self.upload_input_resets += 1;
    }

    fn reset_replace_input(&mut self) {
        self.replace_input_resets += 1;
    }

    fn open_url(&mut self, url: &Url) {
        self.opened.push(url.clone());
    }
}

impl ChatView for PageView {
    fn input_value(&self) -> String {
        self.chat_input.clone()
    }

    fn clear_input(&mut self) {
        self.chat_input.clear();
    }

    fn append_entry(&mut self, _entry: &TranscriptEntry) {
        self.scrolled_to_end = false;
    }

    fn scroll_to_end(&mut self) {
        self.scrolled_to_end = true;
    }
}
