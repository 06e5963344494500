#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url::Url;

use docdesk::error::{Error, Result};
use docdesk::gateway::BackendGateway;
use docdesk::model::{AdminReply, AnswerResult, DocumentEntry, FileUpload, PageRef};

pub const MTIME: i64 = 1_700_000_000;

/// A request the fake backend received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Upload(String),
    Delete(String),
    Replace(String, String),
    Ask(String),
}

#[derive(Debug, Default)]
struct State {
    documents: Vec<DocumentEntry>,
    answer: Option<AnswerResult>,
    fail_list: bool,
    fail_mutations: bool,
    fail_ask: bool,
    calls: Vec<Call>,
}

/// In-memory backend that stores documents by name like the real one.
#[derive(Debug, Clone, Default)]
pub struct FakeGateway {
    state: Arc<Mutex<State>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(docs: &[(&str, u64)]) -> Self {
        let gateway = Self::new();
        gateway.state.lock().unwrap().documents =
            docs.iter().map(|(name, size)| entry(name, *size)).collect();
        gateway
    }

    /// Replace the stored documents, as another operator would.
    pub fn set_documents(&self, docs: &[(&str, u64)]) {
        self.state.lock().unwrap().documents =
            docs.iter().map(|(name, size)| entry(name, *size)).collect();
    }

    pub fn set_answer(&self, answer: AnswerResult) {
        self.state.lock().unwrap().answer = Some(answer);
    }

    pub fn fail_list(&self, fail: bool) {
        self.state.lock().unwrap().fail_list = fail;
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.state.lock().unwrap().fail_mutations = fail;
    }

    pub fn fail_ask(&self, fail: bool) {
        self.state.lock().unwrap().fail_ask = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn document_names(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .documents
            .iter()
            .map(|d| d.name.clone())
            .collect()
    }
}

pub fn entry(name: &str, size: u64) -> DocumentEntry {
    DocumentEntry {
        name: name.to_string(),
        size_bytes: size,
        modified_at_epoch_seconds: MTIME,
    }
}

pub fn pdf(name: &str) -> FileUpload {
    FileUpload::new(name, b"%PDF-1.4 test".to_vec())
}

pub fn penalty_answer() -> AnswerResult {
    AnswerResult {
        articulo: "Art. 12".into(),
        fuente: "Contract A".into(),
        pagina: Some(PageRef::Number(4)),
        fragmento_original: "The penalty is...".into(),
        score: Some(0.87),
        respuesta: None,
    }
}

fn backend_down() -> Error {
    Error::Api {
        status: 500,
        message: "backend unavailable".into(),
    }
}

fn ok(msg: &str) -> AdminReply {
    AdminReply {
        status: Some("ok".into()),
        msg: Some(msg.into()),
    }
}

#[async_trait]
impl BackendGateway for FakeGateway {
    async fn list_documents(&self) -> Result<Vec<DocumentEntry>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List);
        if state.fail_list {
            return Err(backend_down());
        }
        Ok(state.documents.clone())
    }

    async fn upload_document(&self, file: &FileUpload) -> Result<AdminReply> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Upload(file.file_name.clone()));
        if state.fail_mutations {
            return Err(backend_down());
        }
        state.documents.retain(|d| d.name != file.file_name);
        state
            .documents
            .push(entry(&file.file_name, file.bytes.len() as u64));
        Ok(ok("Documento agregado"))
    }

    async fn delete_document(&self, name: &str) -> Result<AdminReply> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Delete(name.to_string()));
        if state.fail_mutations {
            return Err(backend_down());
        }
        let before = state.documents.len();
        state.documents.retain(|d| d.name != name);
        if state.documents.len() == before {
            return Err(Error::Api {
                status: 404,
                message: "No existe".into(),
            });
        }
        Ok(ok("Documento eliminado"))
    }

    async fn replace_document(&self, name: &str, file: &FileUpload) -> Result<AdminReply> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(Call::Replace(name.to_string(), file.file_name.clone()));
        if state.fail_mutations {
            return Err(backend_down());
        }
        // Stored under the target's name, whatever the upload was called.
        state.documents.retain(|d| d.name != name);
        state.documents.push(entry(name, file.bytes.len() as u64));
        Ok(ok("Documento reemplazado"))
    }

    async fn ask(&self, query: &str) -> Result<AnswerResult> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Ask(query.to_string()));
        if state.fail_ask {
            return Err(backend_down());
        }
        Ok(state.answer.clone().unwrap_or_else(penalty_answer))
    }

    fn document_url(&self, name: &str) -> Result<Url> {
        let base = Url::parse("http://backend.test/")?;
        Ok(base.join(&format!("docs/{}", urlencoding::encode(name)))?)
    }
}
