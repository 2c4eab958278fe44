//! Section renderers.
//!
//! Each function renders the body of one section from borrowed store state;
//! handlers wrap the result with `base_html`.

use crate::conversations::ConversationStore;
use crate::models::{Paper, RecentQuestion, Stats};
use crate::papers::PaperRow;
use crate::upload::{UploadFlow, UploadPhase};

use super::components::{alert_box, stat_slots};
use super::{format_date, format_time, html_escape};

// ============================================================================
// Dashboard
// ============================================================================

pub fn render_dashboard(
    stats: &Stats,
    recent_papers: &[&Paper],
    recent_questions: &[RecentQuestion],
) -> String {
    let papers_html = if recent_papers.is_empty() {
        r#"<div class="empty">No papers uploaded yet</div>"#.to_string()
    } else {
        let mut html = String::from(r#"<ul class="list-group" id="recent-papers-list">"#);
        for paper in recent_papers {
            html.push_str(&format!(
                r#"<li class="list-group-item paper-list-item">
                    <a href="/papers/{id}"><strong>{title}</strong></a>
                    <div class="text-muted">{authors}</div>
                </li>"#,
                id = urlencoding::encode(&paper.id),
                title = html_escape(&paper.title),
                authors = html_escape(&paper.authors),
            ));
        }
        html.push_str("</ul>");
        html
    };

    let questions_html = if recent_questions.is_empty() {
        r#"<div class="empty">No questions asked yet</div>"#.to_string()
    } else {
        let mut html = String::from(r#"<ul class="list-group" id="recent-questions-list">"#);
        for question in recent_questions {
            html.push_str(&format!(
                r#"<li class="list-group-item">
                    <form class="inline" method="post" action="/chat/{id}/select">
                        <button class="btn small secondary" type="submit">Open</button>
                    </form>
                    {text} <small class="text-muted">{date}</small>
                </li>"#,
                id = urlencoding::encode(&question.conversation_id),
                text = html_escape(&question.text),
                date = format_date(&question.timestamp),
            ));
        }
        html.push_str("</ul>");
        html
    };

    format!(
        r#"{stats}
        <div class="cards">
            <div class="card"><h2>Recent Papers</h2>{papers}</div>
            <div class="card"><h2>Recent Questions</h2>{questions}</div>
        </div>"#,
        stats = stat_slots(stats),
        papers = papers_html,
        questions = questions_html,
    )
}

// ============================================================================
// Papers
// ============================================================================

pub fn render_papers(rows: &[PaperRow<'_>], query: &str) -> String {
    let mut html = format!(
        r#"<form class="search-box" action="/papers" method="get">
            <input type="text" id="paper-search" name="q" placeholder="Search papers..." value="{}">
            <button class="btn" type="submit">Search</button>
        </form>
        <table>
            <thead><tr><th>Title</th><th>Authors</th><th>Organizations</th><th></th></tr></thead>
            <tbody id="papers-table-body">"#,
        html_escape(query)
    );

    if rows.is_empty() {
        html.push_str(r#"<tr><td colspan="4" class="empty">No papers uploaded yet</td></tr>"#);
    }

    for row in rows {
        let style = if row.visible { "" } else { r#" style="display:none""# };
        let id = urlencoding::encode(&row.paper.id);
        html.push_str(&format!(
            r#"<tr{style}>
                <td>{title}</td>
                <td>{authors}</td>
                <td>{orgs}</td>
                <td class="actions">
                    <a class="btn small" href="/papers/{id}">View</a>
                    <form class="inline" method="post" action="/papers/{id}/chat">
                        <button class="btn small success" type="submit">Chat</button>
                    </form>
                </td>
            </tr>"#,
            style = style,
            title = html_escape(&row.paper.title),
            authors = html_escape(&row.paper.authors),
            orgs = html_escape(&row.paper.organizations),
            id = id,
        ));
    }

    html.push_str("</tbody></table>");
    html
}

pub fn render_paper_details(paper: &Paper) -> String {
    format!(
        r#"<h2 id="paper-modal-title">{title}</h2>
        <div id="paper-modal-body">
            <div class="paper-info"><h3>Authors</h3><p>{authors}</p></div>
            <div class="paper-info"><h3>Organizations</h3><p>{orgs}</p></div>
            <div class="paper-info"><h3>Email Contacts</h3><p>{emails}</p></div>
        </div>
        <form method="post" action="/papers/{id}/chat">
            <button class="btn success" id="chat-about-paper" type="submit">Chat about this paper</button>
        </form>
        <p><a href="/papers">&larr; Back to papers</a></p>"#,
        title = html_escape(&paper.title),
        authors = html_escape(&paper.authors),
        orgs = html_escape(&paper.organizations),
        emails = html_escape(&paper.emails),
        id = urlencoding::encode(&paper.id),
    )
}

// ============================================================================
// Chat
// ============================================================================

/// One-off message shown above the chat after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatNotice {
    /// Deleted locally but the backend did not confirm.
    DeleteUnconfirmed,
}

pub fn render_chat(conversations: &ConversationStore, notice: Option<ChatNotice>) -> String {
    let current = conversations.current_id();

    let mut list_html = String::from(
        r#"<div class="list-group" id="conversations-list">
            <form method="post" action="/chat/new" id="new-conversation">
                <button class="btn" type="submit">+ New Conversation</button>
            </form>"#,
    );
    for conversation in conversations.list() {
        let id = urlencoding::encode(&conversation.id);
        let active = if current == Some(conversation.id.as_str()) {
            " active"
        } else {
            ""
        };
        list_html.push_str(&format!(
            r#"<div class="list-group-item{active}">
                <div class="conversation-item">
                    <form class="inline" method="post" action="/chat/{id}/select">
                        <button class="btn small secondary" type="submit">{title}</button>
                    </form>
                    <form class="inline" method="post" action="/chat/{id}/delete"
                          onsubmit="return confirm('Are you sure you want to delete this conversation?')">
                        <button class="btn small danger delete-conversation-btn" type="submit">&times;</button>
                    </form>
                </div>
                <small class="text-muted">{date}</small>
            </div>"#,
            active = active,
            id = id,
            title = html_escape(&conversations.title_for(&conversation.id)),
            date = format_date(&conversation.created_at),
        ));
    }
    list_html.push_str("</div>");

    let mut messages_html = String::from(r#"<div class="chat-messages" id="chat-messages">"#);
    if let Some(conversation) = current.and_then(|id| conversations.get(id)) {
        for message in &conversation.messages {
            messages_html.push_str(&format!(
                r#"<div class="chat-message {class}"><div>{text}</div><div class="message-time">{time}</div></div>"#,
                class = message.sender.css_class(),
                text = html_escape(&message.text),
                time = format_time(&message.timestamp),
            ));
        }
        if conversations.is_typing(&conversation.id) {
            messages_html.push_str(
                r#"<div class="chat-message bot-message typing-indicator"><div class="typing-dots"><span></span><span></span><span></span></div></div>"#,
            );
        }
    }
    messages_html.push_str("</div>");

    let notice_html = match notice {
        Some(ChatNotice::DeleteUnconfirmed) => alert_box(
            "error",
            "The conversation was removed here, but the server did not confirm the deletion.",
        ),
        None => String::new(),
    };

    format!(
        r#"{notice}
        <div class="chat-layout">
            <div>{list}</div>
            <div>
                {messages}
                <form class="chat-input" method="post" action="/chat/send">
                    <input type="text" id="chat-input" name="message" placeholder="Ask a question about your papers..." autocomplete="off" autofocus>
                    <button class="btn" id="send-message" type="submit">Send</button>
                </form>
            </div>
        </div>"#,
        notice = notice_html,
        list = list_html,
        messages = messages_html,
    )
}

// ============================================================================
// Upload
// ============================================================================

pub fn render_upload(flow: &UploadFlow, alert: Option<&str>) -> String {
    let alert_html = alert.map(|msg| alert_box("error", msg)).unwrap_or_default();

    let bar = match flow.phase() {
        UploadPhase::Idle => None,
        UploadPhase::Uploading => Some(("progress-bar", "Uploading...")),
        UploadPhase::Complete(_) => Some(("progress-bar", "Upload complete!")),
        UploadPhase::Failed(msg) => Some(("progress-bar bg-danger", msg.as_str())),
    };
    let progress_html = bar
        .map(|(class, status)| {
            format!(
                r#"<div id="upload-progress-container">
                    <div class="progress"><div class="{class}" id="upload-progress" style="width: {pct}%">{pct}%</div></div>
                    <div class="upload-status" id="upload-status">{status}</div>
                </div>"#,
                class = class,
                pct = flow.progress(),
                status = html_escape(status),
            )
        })
        .unwrap_or_default();

    let result_html = match flow.phase() {
        UploadPhase::Complete(paper) => format!(
            r#"<div class="card" id="upload-results">
                <h2>Extracted Details</h2>
                <div id="paper-details">
                    <p><strong>Title:</strong> {title}</p>
                    <p><strong>Authors:</strong> {authors}</p>
                    <p><strong>Organizations:</strong> {orgs}</p>
                    <p><strong>Email Contacts:</strong> {emails}</p>
                </div>
            </div>"#,
            title = html_escape(&paper.title),
            authors = html_escape(&paper.authors),
            orgs = html_escape(&paper.organizations),
            emails = html_escape(&paper.emails),
        ),
        UploadPhase::Failed(_) => match flow.selected() {
            Some(file) => format!(
                r#"<form method="post" action="/upload/retry">
                    <button class="btn secondary" type="submit">Retry {name}</button>
                </form>"#,
                name = html_escape(&file.file_name),
            ),
            None => String::new(),
        },
        _ => String::new(),
    };

    format!(
        r#"{alert}
        <form id="upload-form" method="post" action="/upload" enctype="multipart/form-data">
            <input type="file" id="file-upload" name="file" accept="application/pdf">
            <button class="btn" type="submit">Upload</button>
        </form>
        {progress}
        {result}"#,
        alert = alert_html,
        progress = progress_html,
        result = result_html,
    )
}
