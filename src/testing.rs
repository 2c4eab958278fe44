//! Test doubles shared by the unit tests.

use crate::backend::Backend;
use crate::config::Config;
use crate::error::BackendError;
use crate::models::{AskRequest, AskResponse, Paper, SelectedFile};
use crate::{lock, AppState};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

pub fn paper(id: &str, title: &str) -> Paper {
    Paper {
        id: id.to_string(),
        title: title.to_string(),
        authors: "Unknown Authors".to_string(),
        organizations: "Unknown Organizations".to_string(),
        emails: "No email information".to_string(),
    }
}

pub fn pdf(name: &str) -> SelectedFile {
    SelectedFile {
        file_name: name.to_string(),
        content_type: "application/pdf".to_string(),
        data: b"%PDF-1.4\n".to_vec(),
    }
}

pub fn test_state(backend: Arc<ScriptedBackend>) -> Arc<AppState> {
    let config = Config::from_lookup(|_| None).unwrap();
    Arc::new(AppState::new(config, backend))
}

fn status(endpoint: &str, code: u16) -> BackendError {
    BackendError::Status {
        endpoint: endpoint.to_string(),
        status: code,
    }
}

/// In-memory backend whose responses are scripted per test.
#[derive(Default)]
pub struct ScriptedBackend {
    documents: Mutex<Option<Vec<Paper>>>,
    documents_fail: Mutex<bool>,
    upload_status: Mutex<Option<u16>>,
    upload_delay: Mutex<Duration>,
    uploads: Mutex<Vec<SelectedFile>>,
    ask_fail: Mutex<bool>,
    ask_gates: Mutex<HashMap<String, oneshot::Receiver<String>>>,
    asks: Mutex<Vec<AskRequest>>,
    delete_status: Mutex<Option<u16>>,
    deleted: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_documents(&self, papers: Vec<Paper>) {
        *lock(&self.documents) = Some(papers);
    }

    pub fn fail_documents(&self) {
        *lock(&self.documents_fail) = true;
    }

    pub fn fail_upload(&self, code: u16) {
        *lock(&self.upload_status) = Some(code);
    }

    pub fn recover_upload(&self) {
        *lock(&self.upload_status) = None;
    }

    pub fn delay_upload(&self, delay: Duration) {
        *lock(&self.upload_delay) = delay;
    }

    pub fn uploads(&self) -> usize {
        lock(&self.uploads).len()
    }

    pub fn fail_ask(&self) {
        *lock(&self.ask_fail) = true;
    }

    /// Hold the answer to `question` until the returned sender fires.
    pub fn gate_answer(&self, question: &str) -> oneshot::Sender<String> {
        let (tx, rx) = oneshot::channel();
        lock(&self.ask_gates).insert(question.to_string(), rx);
        tx
    }

    pub fn ask_calls(&self) -> usize {
        lock(&self.asks).len()
    }

    pub fn ask_requests(&self) -> Vec<AskRequest> {
        lock(&self.asks).clone()
    }

    pub fn fail_delete(&self, code: u16) {
        *lock(&self.delete_status) = Some(code);
    }

    pub fn deleted(&self) -> Vec<String> {
        lock(&self.deleted).clone()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn list_documents(&self) -> Result<Vec<Paper>, BackendError> {
        if *lock(&self.documents_fail) {
            return Err(BackendError::Decode {
                endpoint: "documents".to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        Ok(lock(&self.documents).clone().unwrap_or_default())
    }

    async fn upload(&self, file: &SelectedFile) -> Result<Paper, BackendError> {
        lock(&self.uploads).push(file.clone());
        let delay = *lock(&self.upload_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if let Some(code) = *lock(&self.upload_status) {
            return Err(status("upload", code));
        }
        let n = lock(&self.uploads).len();
        let mut record = paper(&format!("upload-{n}"), "Extracted Title");
        record.authors = "Ada Lovelace, Alan Turing".to_string();
        record.organizations = "Analytical Engines Ltd".to_string();
        record.emails = "ada@example.org".to_string();
        Ok(record)
    }

    async fn ask(&self, request: &AskRequest) -> Result<AskResponse, BackendError> {
        lock(&self.asks).push(request.clone());
        let gate = lock(&self.ask_gates).remove(&request.question);
        let answer = match gate {
            Some(rx) => rx.await.unwrap_or_default(),
            None => format!("answer to: {}", request.question),
        };
        if *lock(&self.ask_fail) {
            return Err(status("ask", 500));
        }
        Ok(AskResponse {
            answer,
            conversation_id: request.conversation_id.clone(),
        })
    }

    async fn delete_conversation(&self, conversation_id: &str) -> Result<(), BackendError> {
        lock(&self.deleted).push(conversation_id.to_string());
        match *lock(&self.delete_status) {
            Some(code) => Err(status(&format!("conversations/{conversation_id}"), code)),
            None => Ok(()),
        }
    }
}
