//! Wire types for the document-QA backend.
//!
//! These mirror the backend's JSON payloads. Field names on the wire are the
//! backend's (`nombre`, `tamano`, `fecha_mod`, `articulo`, ...); the Rust side
//! uses descriptive names where the two differ.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

// =============================================================================
// Admin API Types
// =============================================================================

/// One document in the listing returned by `GET /admin/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// File name, unique within one listing.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Size on disk in bytes.
    #[serde(rename = "tamano")]
    pub size_bytes: u64,
    /// Last modification time, whole seconds since the Unix epoch.
    #[serde(rename = "fecha_mod", deserialize_with = "epoch_seconds")]
    pub modified_at_epoch_seconds: i64,
}

/// Accepts integer or fractional epoch timestamps (file mtimes carry
/// sub-second precision) and truncates to whole seconds.
#[allow(clippy::cast_possible_truncation)]
fn epoch_seconds<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.trunc() as i64)
}

/// Optional acknowledgement body of the mutating admin endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdminReply {
    /// `"ok"` or `"error"`.
    #[serde(default)]
    pub status: Option<String>,
    /// Human-readable message.
    #[serde(default)]
    pub msg: Option<String>,
}

impl AdminReply {
    /// Parse a response body, tolerating empty or non-JSON bodies.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

/// A file chosen by the operator for upload or replacement.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// File name sent in the multipart part.
    pub file_name: String,
    /// MIME type of the part.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Build an upload from in-memory bytes, guessing the MIME type from the name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload.pdf".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(file_name, bytes))
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

// =============================================================================
// Ask API Types
// =============================================================================

/// Body of `POST /ask`.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest {
    /// The operator's question.
    pub query: String,
}

/// Page reference of an answer.
///
/// The backend sends a page number when the excerpt came from a paginated
/// chunk and a text marker (e.g. `"No disponible"`) otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageRef {
    Number(i64),
    Text(String),
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Structured answer returned by `POST /ask`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Article identified in the excerpt.
    pub articulo: String,
    /// Source document name.
    pub fuente: String,
    /// Page of the excerpt, when known.
    #[serde(default)]
    pub pagina: Option<PageRef>,
    /// Excerpt used as evidence.
    pub fragmento_original: String,
    /// Relevance score in `0.0..=1.0`, when the backend reports it.
    #[serde(default)]
    pub score: Option<f64>,
    /// Summarized answer, when the backend produces one.
    #[serde(default)]
    pub respuesta: Option<String>,
}
