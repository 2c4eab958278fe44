//! Chat engine: question round-trips and conversation lifecycle.
//!
//! A question goes `idle -> awaiting-response -> idle`. There is no retry,
//! cancellation or deduplication. Two questions sent before either is
//! answered race, and the answers are appended in arrival order.

use crate::lock;
use crate::models::{AskRequest, DeleteOutcome, Paper, Sender};
use crate::AppState;

pub const APOLOGY: &str = "Sorry, there was an error processing your question.";

/// A question that has been recorded and is waiting for its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    pub conversation_id: String,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Empty or whitespace-only input. Nothing was recorded or sent.
    Ignored,
    Answered {
        conversation_id: String,
        answer: String,
    },
}

/// Record a question in the current conversation and raise the typing
/// indicator. Returns `None` for blank input.
pub fn submit_question(state: &AppState, text: &str) -> Option<PendingQuestion> {
    let question = text.trim();
    if question.is_empty() {
        return None;
    }

    let conversation_id = {
        let mut conversations = lock(&state.conversations);
        let id = conversations.ensure_current();
        conversations.append_message(&id, Sender::User, question);
        conversations.begin_pending(&id);
        id
    };
    state.publish_stats();

    Some(PendingQuestion {
        conversation_id,
        question: question.to_string(),
    })
}

/// Ask the backend and append its answer to the conversation the question
/// came from. Any failure becomes a canned apology.
pub async fn await_answer(state: &AppState, pending: PendingQuestion) -> String {
    let request = AskRequest {
        question: pending.question,
        conversation_id: pending.conversation_id.clone(),
        metadata_only: false,
    };

    let answer = match state.backend.ask(&request).await {
        Ok(response) => response.answer,
        Err(e) => {
            tracing::warn!(conversation_id = %request.conversation_id, "Error asking question: {e}");
            APOLOGY.to_string()
        }
    };

    {
        let mut conversations = lock(&state.conversations);
        conversations.end_pending(&pending.conversation_id);
        if conversations
            .append_message(&pending.conversation_id, Sender::Bot, &answer)
            .is_none()
        {
            tracing::debug!(
                conversation_id = %pending.conversation_id,
                "answer arrived for a deleted conversation"
            );
        }
    }
    state.publish_stats();

    answer
}

/// Submit and wait in one step.
pub async fn send_message(state: &AppState, text: &str) -> SendOutcome {
    let Some(pending) = submit_question(state, text) else {
        return SendOutcome::Ignored;
    };
    let conversation_id = pending.conversation_id.clone();
    let answer = await_answer(state, pending).await;
    SendOutcome::Answered {
        conversation_id,
        answer,
    }
}

/// Start a new conversation about `paper`.
pub fn start_paper_chat(state: &AppState, paper: &Paper) -> String {
    let id = {
        let mut conversations = lock(&state.conversations);
        let id = conversations.create();
        conversations.append_message(
            &id,
            Sender::Bot,
            &format!(
                "You're now chatting about the paper: \"{}\". What would you like to know?",
                paper.title
            ),
        );
        id
    };
    state.publish_stats();
    id
}

/// Start a new conversation and make it current.
pub fn new_conversation(state: &AppState) -> String {
    let id = lock(&state.conversations).create();
    state.publish_stats();
    id
}

/// Tell the backend to forget a conversation, then drop it locally
/// whatever the backend said.
///
/// When the deleted conversation was current, a replacement is created so
/// the chat section always has somewhere to post.
pub async fn delete_conversation(state: &AppState, conversation_id: &str) -> DeleteOutcome {
    let outcome = match state.backend.delete_conversation(conversation_id).await {
        Ok(()) => DeleteOutcome::Confirmed,
        Err(e) => {
            tracing::warn!(conversation_id, "Error deleting conversation: {e}");
            DeleteOutcome::LocalOnly {
                reason: e.to_string(),
            }
        }
    };

    {
        let mut conversations = lock(&state.conversations);
        let was_current = conversations.current_id() == Some(conversation_id);
        conversations.remove(conversation_id);
        if was_current {
            conversations.create();
        }
    }
    state.publish_stats();

    outcome
}
