// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live lot streaming for dashboards and mobile clients.
//!
//! Every successful mutation publishes a full snapshot of the lot. Observers
//! replace their whole view with each snapshot instead of applying deltas,
//! so a dropped or lagging message is repaired by the next one.
//!
//! # Architecture
//!
//! - Snapshots are broadcast to all connected clients
//! - No commands are executed over WebSocket connections
//! - No audit events are emitted for streaming activity

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use parkit_api::SlotView;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of events to buffer in the broadcast channel.
/// If clients cannot keep up, older events will be dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// Events pushed to live observers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (RFC 3339).
        timestamp: String,
    },
    /// The complete current state of every slot.
    SlotsSnapshot {
        /// Every slot with its active booking.
        slots: Vec<SlotView>,
    },
}

/// Broadcaster for live lot events.
///
/// This is a lightweight wrapper around `tokio::sync::broadcast` that allows
/// multiple WebSocket clients to receive snapshots.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// If no clients are connected, the event is silently dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!("No receivers for live event");
            }
        }
    }

    /// Subscribes to the event stream.
    ///
    /// Events sent before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles WebSocket upgrade requests for live event streaming.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

/// Sends a connection confirmation, then streams events until the client
/// disconnects or an error occurs.
async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event: LiveEvent = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            let event: LiveEvent = match rx.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // The next snapshot supersedes whatever was dropped
                    debug!(skipped, "Live client lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize live event");
                }
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use parkit_domain::{Slot, SlotId};

    fn snapshot() -> LiveEvent {
        LiveEvent::SlotsSnapshot {
            slots: vec![SlotView {
                slot: Slot::new(SlotId::parse("A1").unwrap()),
                booking: None,
            }],
        }
    }

    #[test]
    fn test_broadcaster_creation() {
        let broadcaster: LiveEventBroadcaster = LiveEventBroadcaster::new();
        assert_eq!(broadcaster.tx.receiver_count(), 0);
    }

    #[test]
    fn test_broadcast_no_receivers() {
        let broadcaster: LiveEventBroadcaster = LiveEventBroadcaster::new();
        broadcaster.broadcast(&snapshot());
    }

    #[test]
    fn test_multiple_receivers() {
        let broadcaster: LiveEventBroadcaster = LiveEventBroadcaster::new();
        let mut rx1: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();
        let mut rx2: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

        broadcaster.broadcast(&snapshot());

        assert!(matches!(rx1.try_recv(), Ok(LiveEvent::SlotsSnapshot { .. })));
        assert!(matches!(rx2.try_recv(), Ok(LiveEvent::SlotsSnapshot { .. })));
    }

    #[test]
    fn test_event_serialization() {
        let json: serde_json::Value = serde_json::to_value(snapshot()).unwrap();

        assert_eq!(json["type"], "slots_snapshot");
        assert_eq!(json["slots"][0]["id"], "A1");
        assert_eq!(json["slots"][0]["status"], "AVAILABLE");

        let decoded: LiveEvent = serde_json::from_value(json).unwrap();
        match decoded {
            LiveEvent::SlotsSnapshot { slots } => assert_eq!(slots.len(), 1),
            LiveEvent::Connected { .. } => panic!("Wrong event type"),
        }
    }
}
