//! Backend access.
//!
//! The controllers never talk HTTP directly: they go through
//! [`BackendGateway`], which covers the six endpoints of the document-QA
//! backend. [`HttpGateway`] is the reqwest implementation used by the
//! binary; tests substitute in-memory fakes.

mod http;

pub use http::HttpGateway;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::model::{AdminReply, AnswerResult, DocumentEntry, FileUpload};

/// The backend contract consumed by the admin panel and the chat widget.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// `GET /admin/list`.
    async fn list_documents(&self) -> Result<Vec<DocumentEntry>>;

    /// `POST /admin/upload` with a multipart `file` field.
    async fn upload_document(&self, file: &FileUpload) -> Result<AdminReply>;

    /// `DELETE /admin/delete/{name}`.
    async fn delete_document(&self, name: &str) -> Result<AdminReply>;

    /// `POST /admin/replace/{name}` with a multipart `file` field.
    async fn replace_document(&self, name: &str, file: &FileUpload) -> Result<AdminReply>;

    /// `POST /ask` with `{"query": ...}`.
    async fn ask(&self, query: &str) -> Result<AnswerResult>;

    /// Browser URL of a stored document (`/docs/{name}`). No request is made.
    fn document_url(&self, name: &str) -> Result<Url>;
}

/// Relative endpoint path for a document-keyed route, with `name` encoded as
/// a single path segment.
pub(crate) fn keyed_path(prefix: &str, name: &str) -> String {
    format!("{prefix}/{}", urlencoding::encode(name))
}
