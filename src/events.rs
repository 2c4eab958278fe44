//! State change notifications.
//!
//! Stores publish a [`StateEvent`] after every mutation instead of touching
//! any rendering code. Open dashboard pages subscribe through the `/events`
//! WebSocket and reload when something they show has changed.

use crate::models::Stats;
use crate::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};

const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateEvent {
    PapersChanged,
    ConversationsChanged,
    MessageAppended { conversation_id: String },
    Typing { conversation_id: String, active: bool },
    UploadProgress { percent: u8 },
    UploadFinished { ok: bool },
    StatsChanged(Stats),
}

/// Cheap-to-clone handle to the broadcast channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StateEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn emit(&self, event: StateEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Next event as JSON text. A lagged receiver skips to the oldest event
/// still buffered; `None` once the bus is gone.
async fn next_json(rx: &mut broadcast::Receiver<StateEvent>) -> Option<String> {
    loop {
        let event = match rx.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "event subscriber lagged");
                continue;
            }
            Err(RecvError::Closed) => return None,
        };
        match serde_json::to_string(&event) {
            Ok(json) => return Some(json),
            Err(e) => tracing::warn!("failed to encode state event: {e}"),
        }
    }
}

// ============================================================================
// WebSocket Handler
// ============================================================================

/// GET /events - stream every state event to the browser as JSON.
pub async fn events_ws(State(state): State<Arc<AppState>>, ws: WebSocketUpgrade) -> Response {
    let rx = state.events.subscribe();
    ws.on_upgrade(move |socket| handle_ws(socket, rx))
}

async fn handle_ws(socket: WebSocket, mut rx: broadcast::Receiver<StateEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let mut forward_task = tokio::spawn(async move {
        while let Some(json) = next_json(&mut rx).await {
            if ws_tx.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Only watch for the client going away; incoming text is ignored.
    let mut read_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = ws_rx.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut forward_task => read_task.abort(),
        _ = &mut read_task => forward_task.abort(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.emit(StateEvent::PapersChanged);
    }

    #[tokio::test]
    async fn test_subscribers_receive_in_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.emit(StateEvent::UploadProgress { percent: 5 });
        bus.emit(StateEvent::UploadFinished { ok: true });
        assert_eq!(rx.recv().await.unwrap(), StateEvent::UploadProgress { percent: 5 });
        assert_eq!(rx.recv().await.unwrap(), StateEvent::UploadFinished { ok: true });
    }

    #[test]
    fn test_event_json_is_tagged() {
        let json = serde_json::to_value(StateEvent::Typing {
            conversation_id: "c1".to_string(),
            active: true,
        })
        .unwrap();
        assert_eq!(json["type"], "typing");
        assert_eq!(json["active"], true);

        let stats = serde_json::to_value(StateEvent::StatsChanged(Stats {
            paper_count: 2,
            conversation_count: 1,
            question_count: 3,
        }))
        .unwrap();
        assert_eq!(stats["type"], "stats_changed");
        assert_eq!(stats["question_count"], 3);
    }

    #[tokio::test]
    async fn test_lagged_subscriber_skips_ahead() {
        let (tx, mut rx) = broadcast::channel(2);
        for percent in 0..5 {
            tx.send(StateEvent::UploadProgress { percent }).unwrap();
        }

        let json = next_json(&mut rx).await.unwrap();
        assert_eq!(json, r#"{"type":"upload_progress","percent":3}"#);
        let json = next_json(&mut rx).await.unwrap();
        assert_eq!(json, r#"{"type":"upload_progress","percent":4}"#);

        drop(tx);
        assert_eq!(next_json(&mut rx).await, None);
    }
}
