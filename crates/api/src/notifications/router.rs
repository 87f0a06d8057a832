//! Event-to-notification routing engine.
//!
//! [`NotificationRouter`] subscribes to the complaint event bus and pushes
//! each event to the WebSocket connections that should see it: admins see
//! every event, citizens see events for complaints they reported, and
//! employees see events for complaints assigned to them.

use std::sync::Arc;

use axum::extract::ws::Message;
use civiclink_events::ComplaintEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Routes complaint lifecycle events to connected WebSocket clients.
///
/// Consumes events from the broadcast channel and, for each event, pushes a
/// JSON frame to every interested connection. Targeting is resolved from the
/// connection metadata held by [`WsManager`], so no database lookup is
/// needed on the delivery path.
pub struct NotificationRouter {
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    /// Create a new router backed by the given WebSocket manager.
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](civiclink_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<ComplaintEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    self.route_event(&event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Push a single event to every interested connection.
    async fn route_event(&self, event: &ComplaintEvent) {
        let msg = serde_json::json!({
            "type": "complaint_event",
            "event_type": event.event_type,
            "complaint_id": event.complaint_id,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        let ws_msg = Message::Text(msg.to_string().into());

        let delivered = self
            .ws_manager
            .send_for_complaint(event.reporter_id, event.assignee_email.as_deref(), ws_msg)
            .await;

        tracing::debug!(
            event_type = %event.event_type,
            complaint_id = event.complaint_id,
            delivered,
            "Routed complaint event"
        );
    }
}
