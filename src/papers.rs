//! In-memory mirror of the backend's paper collection.

use crate::backend::Backend;
use crate::events::{EventBus, StateEvent};
use crate::lock;
use crate::models::Paper;
use std::sync::Mutex;

/// Number of papers on the dashboard's "Recent Papers" card.
pub const RECENT_PAPERS: usize = 5;

pub struct PaperStore {
    papers: Vec<Paper>,
    events: EventBus,
}

/// One table row: the record plus whether the current search shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaperRow<'a> {
    pub paper: &'a Paper,
    pub visible: bool,
}

impl PaperStore {
    pub fn new(events: EventBus) -> Self {
        Self {
            papers: Vec::new(),
            events,
        }
    }

    /// Replace the whole collection.
    pub fn replace(&mut self, papers: Vec<Paper>) {
        self.papers = papers;
        self.events.emit(StateEvent::PapersChanged);
    }

    /// Append one record. Identifiers are not deduplicated.
    pub fn add(&mut self, paper: Paper) {
        self.papers.push(paper);
        self.events.emit(StateEvent::PapersChanged);
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Paper> {
        self.papers.iter().find(|p| p.id == id)
    }

    /// Case-insensitive substring search over title, authors and
    /// organizations. Every record is returned; non-matches are hidden.
    pub fn filter(&self, query: &str) -> Vec<PaperRow<'_>> {
        let needle = query.trim().to_lowercase();
        self.papers
            .iter()
            .map(|paper| PaperRow {
                paper,
                visible: needle.is_empty() || matches_query(paper, &needle),
            })
            .collect()
    }

    /// The `n` records with the greatest identifiers, ties in insertion order.
    pub fn recent(&self, n: usize) -> Vec<&Paper> {
        let mut sorted: Vec<&Paper> = self.papers.iter().collect();
        // Stable sort keeps insertion order among equal identifiers.
        sorted.sort_by(|a, b| b.id.cmp(&a.id));
        sorted.truncate(n);
        sorted
    }
}

fn matches_query(paper: &Paper, needle: &str) -> bool {
    [&paper.title, &paper.authors, &paper.organizations]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Fetch the full collection from the backend and replace the store.
///
/// Transport and decode failures are logged and leave the store untouched,
/// so callers always see a (possibly empty) list.
pub async fn load_all(backend: &dyn Backend, store: &Mutex<PaperStore>) -> usize {
    match backend.list_documents().await {
        Ok(papers) => {
            let count = papers.len();
            lock(store).replace(papers);
            tracing::info!(count, "loaded papers from backend");
            count
        }
        Err(e) => {
            tracing::warn!("Error loading papers: {e}");
            lock(store).len()
        }
    }
}
