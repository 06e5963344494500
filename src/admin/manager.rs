//! Document admin controller.

use std::collections::HashSet;

use tracing::{info, warn};
use url::Url;

use super::ReplaceSession;
use crate::config::DEFAULT_DATETIME_FORMAT;
use crate::error::{Error, Result};
use crate::gateway::BackendGateway;
use crate::model::{AdminReply, FileUpload};
use crate::view::{Action, AdminView, DocumentRow, Notice};

const SELECT_UPLOAD: &str = "Select a PDF file.";
const SELECT_REPLACEMENT: &str = "Select a PDF file to replace the document with.";

/// Controller of the document admin panel.
///
/// Every mutation is followed by a full list refresh; nothing is updated
/// optimistically. Failed requests raise a failure notice and leave the
/// table, the file inputs and the replace session as they were.
#[derive(Debug)]
pub struct DocumentManager<G, V> {
    gateway: G,
    view: V,
    replace: ReplaceSession,
    datetime_format: String,
}

impl<G: BackendGateway, V: AdminView> DocumentManager<G, V> {
    pub fn new(gateway: G, view: V) -> Self {
        Self {
            gateway,
            view,
            replace: ReplaceSession::default(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }

    /// Format used for the modification column (`chrono` strftime syntax).
    #[must_use]
    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = format.into();
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn replace_session(&self) -> &ReplaceSession {
        &self.replace
    }

    /// Fetch the listing and rebuild every row. Returns the row count.
    pub async fn refresh_list(&mut self) -> Result<usize> {
        self.view.set_pending(Some(Action::Refresh));
        let result = self.gateway.list_documents().await;
        self.view.set_pending(None);

        let docs = result.inspect_err(|err| {
            warn!(name: "documents.refresh.failed", error = %err, "Document list refresh failed");
            self.view.notify(Notice::failure(Action::Refresh, err));
        })?;

        let mut seen = HashSet::new();
        for doc in &docs {
            if !seen.insert(doc.name.as_str()) {
                warn!(name: "documents.duplicate", document = %doc.name, "Listing repeats a document name");
            }
        }

        let rows: Vec<DocumentRow> = docs
            .iter()
            .map(|doc| DocumentRow::from_entry(doc, &self.datetime_format))
            .collect();
        self.view.render_rows(&rows);

        info!(name: "documents.refreshed", count = rows.len(), "Document list refreshed");
        Ok(rows.len())
    }

    /// Open the stored PDF in a new viewing context. No request is made.
    pub fn open_document(&mut self, name: &str) -> Result<Url> {
        let url = self.gateway.document_url(name)?;
        self.view.open_url(&url);
        Ok(url)
    }

    pub async fn upload_document(&mut self, file: Option<FileUpload>) -> Result<()> {
        let Some(file) = file else {
            self.view.notify(Notice::validation(SELECT_UPLOAD));
            return Err(Error::Validation(SELECT_UPLOAD.to_string()));
        };

        self.view.set_pending(Some(Action::Upload));
        let result = self.gateway.upload_document(&file).await;
        let reply = self.settle(Action::Upload, result)?;

        self.view
            .notify(success_notice(&reply, "PDF uploaded and reindexed"));
        self.view.reset_upload_input();
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Returns `false` when the operator declined the confirmation.
    pub async fn delete_document(&mut self, name: &str) -> Result<bool> {
        if !self.view.confirm(&format!("Delete {name}?")) {
            return Ok(false);
        }

        self.view.set_pending(Some(Action::Delete));
        let result = self.gateway.delete_document(name).await;
        let reply = self.settle(Action::Delete, result)?;

        info!(name: "documents.deleted", document = %name, "Document deleted");
        self.view.notify(success_notice(&reply, "PDF deleted"));
        self.refresh_after_mutation().await;
        Ok(true)
    }

    /// Target `name` for replacement, discarding any previous target.
    pub fn begin_replace(&mut self, name: &str) {
        if let Some(previous) = self.replace.begin(name) {
            info!(name: "documents.replace.retargeted", from = %previous, to = %name, "Replace target changed");
        }
        let status = self.replace.status_line().unwrap_or_default();
        self.view.show_replace_panel(&status);
    }

    pub async fn confirm_replace(&mut self, file: Option<FileUpload>) -> Result<()> {
        let Some(file) = file else {
            self.view.notify(Notice::validation(SELECT_REPLACEMENT));
            return Err(Error::Validation(SELECT_REPLACEMENT.to_string()));
        };
        let Some(target) = self.replace.target().map(str::to_string) else {
            self.view.notify(Notice::validation(Error::NoReplaceTarget.to_string()));
            return Err(Error::NoReplaceTarget);
        };

        self.view.set_pending(Some(Action::Replace));
        let result = self.gateway.replace_document(&target, &file).await;
        let reply = self.settle(Action::Replace, result)?;

        info!(name: "documents.replaced", document = %target, "Document replaced");
        self.view
            .notify(success_notice(&reply, "Document replaced and reindexed"));
        self.cancel_replace();
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Hide the panel, reset its input and clear the target. Idempotent.
    pub fn cancel_replace(&mut self) {
        self.view.hide_replace_panel();
        self.view.reset_replace_input();
        self.replace.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Clear the pending indicator and turn a failed request into a notice.
    fn settle(&mut self, action: Action, result: Result<AdminReply>) -> Result<AdminReply> {
        self.view.set_pending(None);
        result.inspect_err(|err| {
            warn!(name: "documents.request.failed", action = %action, error = %err, "Admin request failed");
            self.view.notify(Notice::failure(action, err));
        })
    }

    async fn refresh_after_mutation(&mut self) {
        // The failure notice is already on screen; the mutation itself succeeded.
        let _ = self.refresh_list().await;
    }
}

fn success_notice(reply: &AdminReply, fallback: &str) -> Notice {
    Notice::success(
        reply
            .msg
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback),
    )
}
