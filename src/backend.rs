//! Client for the paper storage / question-answering backend.
//!
//! The dashboard depends only on the [`Backend`] trait; [`HttpBackend`] is the
//! production implementation speaking the backend's four JSON endpoints.

use crate::config::Config;
use crate::error::BackendError;
use crate::models::{AskRequest, AskResponse, Paper, SelectedFile};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

#[async_trait]
pub trait Backend: Send + Sync {
    /// GET /documents
    async fn list_documents(&self) -> Result<Vec<Paper>, BackendError>;

    /// POST /upload (multipart field `file`)
    async fn upload(&self, file: &SelectedFile) -> Result<Paper, BackendError>;

    /// POST /ask
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse, BackendError>;

    /// DELETE /conversations/{id}. Only the status code is inspected.
    async fn delete_conversation(&self, conversation_id: &str) -> Result<(), BackendError>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("scichat/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|_| BackendError::InvalidUrl(path.to_string()))
    }

    /// Send a request and decode a JSON body, mapping every failure mode.
    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = request.send().await.map_err(|source| BackendError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| BackendError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|e| BackendError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_documents(&self) -> Result<Vec<Paper>, BackendError> {
        let url = self.endpoint("documents")?;
        self.send_json("documents", self.client.get(url)).await
    }

    async fn upload(&self, file: &SelectedFile) -> Result<Paper, BackendError> {
        let url = self.endpoint("upload")?;
        let part = Part::bytes(file.data.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|source| BackendError::Transport {
                endpoint: "upload".to_string(),
                source,
            })?;
        let form = Form::new().part("file", part);

        tracing::info!(file = %file.file_name, bytes = file.data.len(), "uploading paper");
        self.send_json("upload", self.client.post(url).multipart(form))
            .await
    }

    async fn ask(&self, request: &AskRequest) -> Result<AskResponse, BackendError> {
        let url = self.endpoint("ask")?;
        self.send_json("ask", self.client.post(url).json(request))
            .await
    }

    async fn delete_conversation(&self, conversation_id: &str) -> Result<(), BackendError> {
        let path = format!("conversations/{}", urlencoding::encode(conversation_id));
        let url = self.endpoint(&path)?;

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                endpoint: path.clone(),
                source,
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(BackendError::Status {
                endpoint: path,
                status: response.status().as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Json, Multipart},
        http::{StatusCode, Uri},
        routing::{delete, get, post},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    fn backend(base: &str) -> HttpBackend {
        let config = Config::from_lookup(|key| {
            (key == crate::config::ENV_BACKEND_URL).then(|| base.to_string())
        })
        .unwrap();
        HttpBackend::new(&config).unwrap()
    }

    #[test]
    fn test_endpoints_join_under_base_path() {
        let b = backend("http://localhost:8000/scichat");
        assert_eq!(
            b.endpoint("ask").unwrap().as_str(),
            "http://localhost:8000/scichat/ask"
        );
    }

    #[test]
    fn test_conversation_id_is_path_encoded() {
        let b = backend("http://localhost:8000");
        let path = format!("conversations/{}", urlencoding::encode("a b/c"));
        assert_eq!(
            b.endpoint(&path).unwrap().as_str(),
            "http://localhost:8000/conversations/a%20b%2Fc"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_transport_error() {
        // Port 9 (discard) is essentially never listening on loopback.
        let b = backend("http://127.0.0.1:9");
        let err = b.list_documents().await.unwrap_err();
        assert!(matches!(err, BackendError::Transport { .. }));
    }

    /// Serve a stand-in backend on an ephemeral port and return its base URL.
    async fn mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api")
    }

    fn paper_json(id: &str) -> Value {
        json!({
            "id": id,
            "title": "Attention Is All You Need",
            "authors": "Vaswani et al.",
            "organizations": "Google Brain",
            "emails": "avaswani@google.com"
        })
    }

    #[tokio::test]
    async fn test_list_documents_decodes_records() {
        let router = Router::new().route(
            "/api/documents",
            get(|| async { Json(json!([paper_json("a1"), paper_json("a2")])) }),
        );
        let b = backend(&mock(router).await);

        let papers = b.list_documents().await.unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[1].id, "a2");
        assert_eq!(papers[0].organizations, "Google Brain");
    }

    #[tokio::test]
    async fn test_upload_sends_file_field() {
        let seen: Arc<Mutex<Vec<(String, String, String, usize)>>> = Arc::default();
        let record = seen.clone();
        let router = Router::new().route(
            "/api/upload",
            post(move |mut multipart: Multipart| {
                let record = record.clone();
                async move {
                    while let Some(field) = multipart.next_field().await.unwrap() {
                        let name = field.name().unwrap_or_default().to_string();
                        let file_name = field.file_name().unwrap_or_default().to_string();
                        let content_type = field.content_type().unwrap_or_default().to_string();
                        let len = field.bytes().await.unwrap().len();
                        record.lock().unwrap().push((name, file_name, content_type, len));
                    }
                    Json(paper_json("new-1"))
                }
            }),
        );
        let b = backend(&mock(router).await);

        let file = SelectedFile {
            file_name: "paper.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: b"%PDF-1.4 body".to_vec(),
        };
        let paper = b.upload(&file).await.unwrap();
        assert_eq!(paper.id, "new-1");

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![(
                "file".to_string(),
                "paper.pdf".to_string(),
                "application/pdf".to_string(),
                13
            )]
        );
    }

    #[tokio::test]
    async fn test_ask_posts_json_body() {
        let seen: Arc<Mutex<Option<Value>>> = Arc::default();
        let record = seen.clone();
        let router = Router::new().route(
            "/api/ask",
            post(move |Json(body): Json<Value>| {
                let record = record.clone();
                async move {
                    let conversation_id = body["conversation_id"].clone();
                    *record.lock().unwrap() = Some(body);
                    Json(json!({ "answer": "Transformers.", "conversation_id": conversation_id }))
                }
            }),
        );
        let b = backend(&mock(router).await);

        let response = b
            .ask(&AskRequest {
                question: "What architecture?".to_string(),
                conversation_id: "c-1".to_string(),
                metadata_only: false,
            })
            .await
            .unwrap();
        assert_eq!(response.answer, "Transformers.");
        assert_eq!(response.conversation_id, "c-1");
        assert_eq!(
            seen.lock().unwrap().clone(),
            Some(json!({
                "question": "What architecture?",
                "conversation_id": "c-1",
                "metadata_only": false
            }))
        );
    }

    #[tokio::test]
    async fn test_delete_uses_encoded_path() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::default();
        let record = seen.clone();
        let router = Router::new().route(
            "/api/conversations/{id}",
            delete(move |uri: Uri| {
                let record = record.clone();
                async move {
                    record.lock().unwrap().push(uri.path().to_string());
                    StatusCode::NO_CONTENT
                }
            }),
        );
        let b = backend(&mock(router).await);

        b.delete_conversation("a b").await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["/api/conversations/a%20b".to_string()]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let router = Router::new()
            .route("/api/ask", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route(
                "/api/conversations/{id}",
                delete(|| async { StatusCode::NOT_FOUND }),
            );
        let b = backend(&mock(router).await);

        let err = b
            .ask(&AskRequest {
                question: "q".to_string(),
                conversation_id: "c".to_string(),
                metadata_only: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 500, .. }));
        assert_eq!(err.to_string(), "ask returned HTTP 500");

        let err = b.delete_conversation("gone").await.unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_error() {
        let router = Router::new().route("/api/documents", get(|| async { "<html>oops</html>" }));
        let b = backend(&mock(router).await);

        let err = b.list_documents().await.unwrap_err();
        assert!(matches!(err, BackendError::Decode { ref endpoint, .. } if endpoint == "documents"));
    }
}
