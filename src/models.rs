//! Data models for the dashboard.
//!
//! Papers mirror the backend's document records. Conversations and their
//! messages exist only on this side; the backend sees nothing but the
//! conversation id attached to each question.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Papers
// ============================================================================

/// Metadata the backend extracted from an uploaded PDF.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paper {
    /// Server-assigned; compared lexically as a recency proxy.
    pub id: String,
    pub title: String,
    pub authors: String,
    pub organizations: String,
    pub emails: String,
}

/// A file picked in the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

// ============================================================================
// Conversations
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// CSS class used for a message bubble.
    pub fn css_class(&self) -> &'static str {
        match self {
            Sender::User => "user-message",
            Sender::Bot => "bot-message",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn user_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.sender == Sender::User)
    }
}

/// A user question as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentQuestion {
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub conversation_id: String,
}

/// Result of deleting a conversation.
///
/// The conversation is always gone locally; this says whether the backend
/// agreed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Confirmed,
    LocalOnly { reason: String },
}

impl DeleteOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, DeleteOutcome::Confirmed)
    }
}

// ============================================================================
// Backend Wire Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskRequest {
    pub question: String,
    pub conversation_id: String,
    pub metadata_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskResponse {
    pub answer: String,
    pub conversation_id: String,
}

// ============================================================================
// Dashboard Stats
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub paper_count: usize,
    pub conversation_count: usize,
    pub question_count: usize,
}
