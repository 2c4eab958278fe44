//! Client-side conversation threads.
//!
//! Conversations live only here. The backend learns about a conversation id
//! when a question is asked and is told to forget it on deletion (see
//! `chat::delete_conversation`).

use crate::events::{EventBus, StateEvent};
use crate::models::{Conversation, Message, RecentQuestion, Sender};
use chrono::Utc;
use std::collections::HashMap;

pub const GREETING: &str = "Hello! How can I help you with your scientific papers today?";
pub const UNTITLED: &str = "Conversation";
pub const TITLE_CHARS: usize = 30;
pub const RECENT_QUESTIONS: usize = 5;

pub struct ConversationStore {
    /// Creation order.
    conversations: Vec<Conversation>,
    current: Option<String>,
    /// Questions awaiting an answer, per conversation. Non-zero shows the
    /// typing indicator.
    pending: HashMap<String, usize>,
    events: EventBus,
}

impl ConversationStore {
    pub fn new(events: EventBus) -> Self {
        Self {
            conversations: Vec::new(),
            current: None,
            pending: HashMap::new(),
            events,
        }
    }

    /// Start a fresh conversation, make it current and greet the user.
    pub fn create(&mut self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.conversations.push(Conversation {
            id: id.clone(),
            created_at: Utc::now(),
            messages: Vec::new(),
        });
        self.current = Some(id.clone());
        tracing::debug!(conversation_id = %id, "created conversation");
        self.events.emit(StateEvent::ConversationsChanged);

        self.append_message(&id, Sender::Bot, GREETING);
        id
    }

    /// The current conversation, created on first use.
    pub fn ensure_current(&mut self) -> String {
        match self.current_id() {
            Some(id) => id.to_string(),
            None => self.create(),
        }
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Switch to an existing conversation. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.current = Some(id.to_string());
        self.events.emit(StateEvent::ConversationsChanged);
        true
    }

    /// Append a timestamped message. Returns `None` when the conversation
    /// has been deleted in the meantime.
    pub fn append_message(&mut self, id: &str, sender: Sender, text: &str) -> Option<&Message> {
        let conversation = self.conversations.iter_mut().find(|c| c.id == id)?;
        conversation.messages.push(Message {
            sender,
            text: text.to_string(),
            timestamp: Utc::now(),
        });
        self.events.emit(StateEvent::MessageAppended {
            conversation_id: id.to_string(),
        });
        conversation.messages.last()
    }

    /// Drop a conversation locally. Returns whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.conversations.len();
        self.conversations.retain(|c| c.id != id);
        self.pending.remove(id);
        if self.current.as_deref() == Some(id) {
            self.current = None;
        }
        let removed = self.conversations.len() != before;
        if removed {
            self.events.emit(StateEvent::ConversationsChanged);
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn list(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// First user message, cut to 30 characters with `...`, or a placeholder.
    pub fn title_for(&self, id: &str) -> String {
        self.get(id)
            .and_then(|c| c.user_messages().next())
            .map(|m| truncate_title(&m.text))
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn question_count(&self) -> usize {
        self.conversations
            .iter()
            .map(|c| c.user_messages().count())
            .sum()
    }

    /// User questions across all conversations, newest first.
    pub fn recent_questions(&self, n: usize) -> Vec<RecentQuestion> {
        let mut questions: Vec<RecentQuestion> = self
            .conversations
            .iter()
            .flat_map(|c| {
                c.user_messages().map(move |m| RecentQuestion {
                    text: m.text.clone(),
                    timestamp: m.timestamp,
                    conversation_id: c.id.clone(),
                })
            })
            .collect();
        // Later messages win timestamp ties.
        questions.reverse();
        questions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        questions.truncate(n);
        questions
    }

    // ------------------------------------------------------------------------
    // Typing indicator
    // ------------------------------------------------------------------------

    pub fn begin_pending(&mut self, id: &str) {
        if self.get(id).is_none() {
            return;
        }
        *self.pending.entry(id.to_string()).or_insert(0) += 1;
        self.events.emit(StateEvent::Typing {
            conversation_id: id.to_string(),
            active: true,
        });
    }

    pub fn end_pending(&mut self, id: &str) {
        let Some(count) = self.pending.get_mut(id) else {
            return;
        };
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.pending.remove(id);
            self.events.emit(StateEvent::Typing {
                conversation_id: id.to_string(),
                active: false,
            });
        }
    }

    pub fn is_typing(&self, id: &str) -> bool {
        self.pending.get(id).is_some_and(|n| *n > 0)
    }
}

fn truncate_title(text: &str) -> String {
    if text.chars().count() > TITLE_CHARS {
        let head: String = text.chars().take(TITLE_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
