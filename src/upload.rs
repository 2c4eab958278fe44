//! Paper upload flow.
//!
//! `idle -> uploading -> complete | failed`. The progress bar is cosmetic:
//! it creeps forward on a fixed timer while the request is in flight, stops
//! at 90%, and jumps to 100% once the backend accepts the paper.

use crate::error::UploadError;
use crate::events::{EventBus, StateEvent};
use crate::lock;
use crate::models::{Paper, SelectedFile, PDF_MEDIA_TYPE};
use crate::AppState;
use std::sync::Arc;
use std::time::Duration;

pub const PROGRESS_TICK: Duration = Duration::from_millis(200);
pub const PROGRESS_STEP: u8 = 5;
pub const PROGRESS_CAP: u8 = 90;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Uploading,
    Complete(Paper),
    Failed(String),
}

pub struct UploadFlow {
    phase: UploadPhase,
    progress: u8,
    /// Bumped by every `begin`. Updates from an older upload are ignored.
    generation: u64,
    /// Cleared on success only, so a failed upload can be retried.
    selected: Option<SelectedFile>,
    events: EventBus,
}

impl UploadFlow {
    pub fn new(events: EventBus) -> Self {
        Self {
            phase: UploadPhase::Idle,
            progress: 0,
            generation: 0,
            selected: None,
            events,
        }
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// The retained selection after a failure, if any.
    pub fn retry_candidate(&self) -> Option<SelectedFile> {
        match self.phase {
            UploadPhase::Failed(_) => self.selected.clone(),
            _ => None,
        }
    }

    fn begin(&mut self, file: SelectedFile) -> u64 {
        self.generation += 1;
        self.phase = UploadPhase::Uploading;
        self.progress = 0;
        self.selected = Some(file);
        self.events.emit(StateEvent::UploadProgress { percent: 0 });
        self.generation
    }

    /// Advance the cosmetic progress by one step. Returns false once the
    /// ticker should stop.
    fn tick(&mut self, generation: u64) -> bool {
        if generation != self.generation
            || self.phase != UploadPhase::Uploading
            || self.progress >= PROGRESS_CAP
        {
            return false;
        }
        self.progress = (self.progress + PROGRESS_STEP).min(PROGRESS_CAP);
        self.events.emit(StateEvent::UploadProgress {
            percent: self.progress,
        });
        self.progress < PROGRESS_CAP
    }

    fn complete(&mut self, generation: u64, paper: Paper) {
        if generation != self.generation {
            return;
        }
        self.progress = 100;
        self.phase = UploadPhase::Complete(paper);
        self.selected = None;
        self.events.emit(StateEvent::UploadProgress { percent: 100 });
        self.events.emit(StateEvent::UploadFinished { ok: true });
    }

    fn fail(&mut self, generation: u64, message: String) {
        if generation != self.generation {
            return;
        }
        self.phase = UploadPhase::Failed(message);
        self.events.emit(StateEvent::UploadFinished { ok: false });
    }
}

/// Check a selection before anything goes over the network.
pub fn validate(file: Option<&SelectedFile>) -> Result<&SelectedFile, UploadError> {
    let file = file.ok_or(UploadError::NoFileSelected)?;
    if file.content_type != PDF_MEDIA_TYPE {
        return Err(UploadError::NotPdf {
            content_type: file.content_type.clone(),
        });
    }
    Ok(file)
}

/// Validate, upload, and merge the returned record into the paper store.
///
/// Validation failures return before touching the network or the flow's
/// state. Backend failures leave the selection in place for a retry.
pub async fn run_upload(
    state: &Arc<AppState>,
    file: Option<SelectedFile>,
) -> Result<Paper, UploadError> {
    let file = validate(file.as_ref())?.clone();

    let generation = lock(&state.upload).begin(file.clone());
    let ticker = spawn_progress_ticker(state.clone(), generation);

    let result = state.backend.upload(&file).await;
    ticker.abort();

    match result {
        Ok(paper) => {
            tracing::info!(paper_id = %paper.id, title = %paper.title, "upload complete");
            lock(&state.papers).add(paper.clone());
            lock(&state.upload).complete(generation, paper.clone());
            state.publish_stats();
            Ok(paper)
        }
        Err(e) => {
            tracing::warn!(file = %file.file_name, "Error uploading paper: {e}");
            let err = UploadError::from(e);
            lock(&state.upload).fail(generation, err.to_string());
            Err(err)
        }
    }
}

fn spawn_progress_ticker(state: Arc<AppState>, generation: u64) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(PROGRESS_TICK).await;
            if !lock(&state.upload).tick(generation) {
                break;
            }
        }
    })
}
