//! HTTP implementation of the backend gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;
use url::Url;

use super::{BackendGateway, keyed_path};
use crate::config::BackendConfig;
use crate::error::{Error, Result};
use crate::model::{AdminReply, AnswerResult, AskRequest, DocumentEntry, FileUpload};

/// HTTP client for the document-QA backend.
///
/// # Example
///
/// ```rust,no_run
/// use docdesk::gateway::{BackendGateway, HttpGateway};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = HttpGateway::new("http://127.0.0.1:5000")?;
///
/// for doc in gateway.list_documents().await? {
///     println!("{} ({} bytes)", doc.name, doc.size_bytes);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpGateway {
    /// Create a gateway with a default reqwest client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The backend root (e.g., "http://127.0.0.1:5000"). A
    ///   path prefix is kept: endpoints resolve below it.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a gateway with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, http })
    }

    /// Create a gateway from the `[backend]` configuration section.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        Self::with_client(&config.base_url, builder.build()?)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn file_form(file: &FileUpload) -> Result<Form> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        Ok(Form::new().part("file", part))
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::api_error(response).await)
        }
    }

    async fn handle_reply(response: reqwest::Response) -> Result<AdminReply> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            Ok(AdminReply::from_body(&body))
        } else {
            Err(Self::api_error(response).await)
        }
    }

    async fn api_error(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".into());
        Error::Api {
            status,
            message: error_message(&body),
        }
    }
}

/// Extract the backend's message from an error body: the JSON `msg` or
/// `error` field when present, else the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("msg")
                .or_else(|| value.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn list_documents(&self) -> Result<Vec<DocumentEntry>> {
        let response = self.http.get(self.url("admin/list")?).send().await?;
        Self::handle_response(response).await
    }

    async fn upload_document(&self, file: &FileUpload) -> Result<AdminReply> {
        debug!(
            name: "gateway.upload",
            file = %file.file_name,
            bytes = file.bytes.len(),
            "Uploading document"
        );
        let response = self
            .http
            .post(self.url("admin/upload")?)
            .multipart(Self::file_form(file)?)
            .send()
            .await?;
        Self::handle_reply(response).await
    }

    async fn delete_document(&self, name: &str) -> Result<AdminReply> {
        let response = self
            .http
            .delete(self.url(&keyed_path("admin/delete", name))?)
            .send()
            .await?;
        Self::handle_reply(response).await
    }

    async fn replace_document(&self, name: &str, file: &FileUpload) -> Result<AdminReply> {
        debug!(
            name: "gateway.replace",
            target = %name,
            file = %file.file_name,
            "Replacing document"
        );
        let response = self
            .http
            .post(self.url(&keyed_path("admin/replace", name))?)
            .multipart(Self::file_form(file)?)
            .send()
            .await?;
        Self::handle_reply(response).await
    }

    async fn ask(&self, query: &str) -> Result<AnswerResult> {
        let req = AskRequest {
            query: query.to_string(),
        };
        let response = self.http.post(self.url("ask")?).json(&req).send().await?;
        Self::handle_response(response).await
    }

    fn document_url(&self, name: &str) -> Result<Url> {
        self.url(&keyed_path("docs", name))
    }
}
