//! HTTP route handlers for the dashboard.
//!
//! Every page is rendered server-side from the in-memory stores. Actions are
//! plain form posts that redirect back to a section; long-running work
//! (questions, uploads) is spawned so the redirect returns immediately and
//! the browser picks up the result from `/events`.

use crate::chat;
use crate::conversations::RECENT_QUESTIONS;
use crate::events::events_ws;
use crate::lock;
use crate::models::{DeleteOutcome, SelectedFile};
use crate::papers::RECENT_PAPERS;
use crate::router::{activate, Section};
use crate::templates::{
    base_html, render_chat, render_dashboard, render_paper_details, render_papers, render_upload,
    ChatNotice,
};
use crate::upload::{run_upload, validate};
use crate::AppState;
use axum::{
    extract::{DefaultBodyLimit, Form, Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the full route table.
pub fn app(state: Arc<AppState>) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(dashboard))
        .route("/section/{name}", get(section))
        // Papers
        .route("/papers", get(papers))
        .route("/papers/{id}", get(paper_details))
        .route("/papers/{id}/chat", post(paper_chat))
        // Chat
        .route("/chat", get(chat_page))
        .route("/chat/new", post(new_conversation))
        .route("/chat/send", post(send_message))
        .route("/chat/{id}/select", post(select_conversation))
        .route("/chat/{id}/delete", post(delete_conversation))
        // Upload
        .route(
            "/upload",
            get(upload_page).post(upload_paper).layer(upload_limit),
        )
        .route("/upload/retry", post(retry_upload))
        // Live state
        .route("/api/stats", get(stats_api))
        .route("/events", get(events_ws))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Dashboard
// ============================================================================

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    let stats = state.stats();
    let content = {
        let papers = lock(&state.papers);
        let questions = lock(&state.conversations).recent_questions(RECENT_QUESTIONS);
        render_dashboard(&stats, &papers.recent(RECENT_PAPERS), &questions)
    };
    Html(base_html(&activate(Section::Dashboard), &content))
}

/// GET /section/{name} - navigate by section name.
pub async fn section(Path(name): Path<String>) -> Response {
    match name.parse::<Section>() {
        Ok(section) => Redirect::to(section.href()).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

pub async fn stats_api(State(state): State<Arc<AppState>>) -> Response {
    Json(state.stats()).into_response()
}

// ============================================================================
// Papers
// ============================================================================

#[derive(Deserialize)]
pub struct PapersQuery {
    #[serde(default)]
    q: String,
}

pub async fn papers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PapersQuery>,
) -> Html<String> {
    let content = {
        let papers = lock(&state.papers);
        render_papers(&papers.filter(&params.q), &params.q)
    };
    Html(base_html(&activate(Section::Papers), &content))
}

pub async fn paper_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let content = match lock(&state.papers).get(&id) {
        Some(paper) => render_paper_details(paper),
        None => return (StatusCode::NOT_FOUND, "Paper not found").into_response(),
    };
    Html(base_html(&activate(Section::Papers), &content)).into_response()
}

/// POST /papers/{id}/chat - open a conversation about one paper.
pub async fn paper_chat(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let paper = match lock(&state.papers).get(&id) {
        Some(paper) => paper.clone(),
        None => return (StatusCode::NOT_FOUND, "Paper not found").into_response(),
    };
    chat::start_paper_chat(&state, &paper);
    Redirect::to(Section::Chat.href()).into_response()
}

// ============================================================================
// Chat
// ============================================================================

#[derive(Deserialize)]
pub struct ChatQuery {
    notice: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    message: String,
}

pub async fn chat_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChatQuery>,
) -> Html<String> {
    let notice = match params.notice.as_deref() {
        Some("unsynced") => Some(ChatNotice::DeleteUnconfirmed),
        _ => None,
    };

    let (content, created) = {
        let mut conversations = lock(&state.conversations);
        let created = conversations.is_empty();
        conversations.ensure_current();
        (render_chat(&conversations, notice), created)
    };
    if created {
        state.publish_stats();
    }
    Html(base_html(&activate(Section::Chat), &content))
}

pub async fn new_conversation(State(state): State<Arc<AppState>>) -> Redirect {
    chat::new_conversation(&state);
    Redirect::to(Section::Chat.href())
}

/// POST /chat/send - record the question now, answer in the background.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ChatForm>,
) -> Redirect {
    if let Some(pending) = chat::submit_question(&state, &form.message) {
        let state = state.clone();
        tokio::spawn(async move {
            chat::await_answer(&state, pending).await;
        });
    }
    Redirect::to(Section::Chat.href())
}

pub async fn select_conversation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    if !lock(&state.conversations).select(&id) {
        return (StatusCode::NOT_FOUND, "Conversation not found").into_response();
    }
    Redirect::to(Section::Chat.href()).into_response()
}

pub async fn delete_conversation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Redirect {
    match chat::delete_conversation(&state, &id).await {
        DeleteOutcome::Confirmed => Redirect::to(Section::Chat.href()),
        DeleteOutcome::LocalOnly { .. } => Redirect::to("/chat?notice=unsynced"),
    }
}

// ============================================================================
// Upload
// ============================================================================

pub async fn upload_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let content = render_upload(&lock(&state.upload), None);
    Html(base_html(&activate(Section::Upload), &content))
}

/// Pull the `file` field out of the form. A missing or empty field counts
/// as no selection; a body that cannot be parsed is an error.
async fn read_selected_file(mut multipart: Multipart) -> Result<Option<SelectedFile>, String> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => return Err(format!("Failed to read upload: {}", e)),
        };
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| format!("Failed to read upload: {}", e))?;
        if file_name.is_empty() && data.is_empty() {
            return Ok(None);
        }
        return Ok(Some(SelectedFile {
            file_name,
            content_type,
            data: data.to_vec(),
        }));
    }
}

fn upload_rejected(state: &AppState, message: &str) -> Response {
    let content = render_upload(&lock(&state.upload), Some(message));
    (
        StatusCode::BAD_REQUEST,
        Html(base_html(&activate(Section::Upload), &content)),
    )
        .into_response()
}

fn start_upload(state: Arc<AppState>, file: SelectedFile) {
    tokio::spawn(async move {
        if let Err(e) = run_upload(&state, Some(file)).await {
            tracing::debug!("upload did not complete: {e}");
        }
    });
}

pub async fn upload_paper(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let selected = match read_selected_file(multipart).await {
        Ok(selected) => selected,
        Err(msg) => return upload_rejected(&state, &msg),
    };
    let file = match validate(selected.as_ref()) {
        Ok(file) => file.clone(),
        Err(e) => return upload_rejected(&state, &e.to_string()),
    };

    tracing::info!(file = %file.file_name, bytes = file.data.len(), "starting upload");
    start_upload(state.clone(), file);
    Redirect::to(Section::Upload.href()).into_response()
}

/// POST /upload/retry - resend the file kept from the last failure.
pub async fn retry_upload(State(state): State<Arc<AppState>>) -> Response {
    let candidate = lock(&state.upload).retry_candidate();
    match candidate {
        Some(file) => {
            tracing::info!(file = %file.file_name, "retrying upload");
            start_upload(state.clone(), file);
            Redirect::to(Section::Upload.href()).into_response()
        }
        None => upload_rejected(&state, "There is no failed upload to retry."),
    }
}
