//! SciChat dashboard - a web front-end for a scientific paper Q&A backend.
//!
//! The dashboard keeps an in-memory mirror of the backend's papers plus the
//! user's chat conversations, renders four sections (dashboard, papers,
//! chat, upload) as server-side HTML, and forwards questions and uploads to
//! the backend over HTTP.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub mod backend;
pub mod chat;
pub mod config;
pub mod conversations;
pub mod error;
pub mod events;
pub mod handlers;
pub mod models;
pub mod papers;
pub mod router;
pub mod stats;
pub mod templates;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

use backend::Backend;
use config::Config;
use conversations::ConversationStore;
use events::{EventBus, StateEvent};
use papers::PaperStore;
use upload::UploadFlow;

// ============================================================================
// Application State
// ============================================================================

/// Everything the dashboard knows, shared by all handlers.
///
/// Lock order when more than one store is needed: papers, conversations,
/// upload. No lock is held across an `.await`.
pub struct AppState {
    pub config: Config,
    pub backend: Arc<dyn Backend>,
    pub papers: Mutex<PaperStore>,
    pub conversations: Mutex<ConversationStore>,
    pub upload: Mutex<UploadFlow>,
    pub events: EventBus,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn Backend>) -> Self {
        let events = EventBus::new();
        Self {
            config,
            backend,
            papers: Mutex::new(PaperStore::new(events.clone())),
            conversations: Mutex::new(ConversationStore::new(events.clone())),
            upload: Mutex::new(UploadFlow::new(events.clone())),
            events,
        }
    }

    /// Populate the paper store from the backend. Failures leave it empty.
    pub async fn load_papers(&self) -> usize {
        let count = papers::load_all(self.backend.as_ref(), &self.papers).await;
        self.publish_stats();
        count
    }

    pub fn stats(&self) -> models::Stats {
        let papers = lock(&self.papers);
        let conversations = lock(&self.conversations);
        stats::collect(&papers, &conversations)
    }

    /// Recompute the counters and tell subscribers.
    pub fn publish_stats(&self) {
        self.events.emit(StateEvent::StatsChanged(self.stats()));
    }
}

/// Lock a store, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub use backend::HttpBackend;
pub use error::{BackendError, UploadError};
pub use models::{
    AskRequest, AskResponse, Conversation, DeleteOutcome, Message, Paper, RecentQuestion,
    SelectedFile, Sender, Stats,
};
pub use router::{activate, Section, View};
