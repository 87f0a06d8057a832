//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`ComplaintEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use civiclink_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event type names
// ---------------------------------------------------------------------------

/// A citizen submitted a new complaint.
pub const EVENT_CREATED: &str = "complaint.created";
/// An admin assigned the complaint to an employee.
pub const EVENT_ASSIGNED: &str = "complaint.assigned";
/// An admin changed the complaint's priority.
pub const EVENT_PRIORITIZED: &str = "complaint.prioritized";
/// The assigned employee resolved the complaint.
pub const EVENT_RESOLVED: &str = "complaint.resolved";
/// An admin deleted the complaint.
pub const EVENT_DELETED: &str = "complaint.deleted";

// ---------------------------------------------------------------------------
// ComplaintEvent
// ---------------------------------------------------------------------------

/// A feed event describing one complaint mutation.
///
/// Constructed via [`ComplaintEvent::new`] and enriched with the builder
/// methods [`with_actor`](ComplaintEvent::with_actor) and
/// [`with_payload`](ComplaintEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintEvent {
    /// Dot-separated event name, e.g. `"complaint.resolved"`.
    pub event_type: String,

    /// The complaint this event concerns.
    pub complaint_id: DbId,

    /// The complaint's reporter. Used by scoring and per-user feed routing.
    pub reporter_id: DbId,

    /// The complaint's current assignee, if any.
    pub assignee_email: Option<String>,

    /// Id of the user that triggered the event, if known.
    pub actor_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl ComplaintEvent {
    /// Create a new event for a complaint.
    ///
    /// Optional fields default to `None` / empty object.
    pub fn new(event_type: impl Into<String>, complaint_id: DbId, reporter_id: DbId) -> Self {
        Self {
            event_type: event_type.into(),
            complaint_id,
            reporter_id,
            assignee_email: None,
            actor_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the acting user to the event.
    pub fn with_actor(mut self, actor_id: DbId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    /// Attach the complaint's current assignee, if any.
    ///
    /// Feed routing targets the assignee with this field, so every mutation
    /// event on an assigned complaint should carry it.
    pub fn with_assignee(mut self, email: Option<&str>) -> Self {
        self.assignee_email = email.map(str::to_string);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`ComplaintEvent`].
pub struct EventBus {
    sender: broadcast::Sender<ComplaintEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    /// The persistence layer (when subscribed) ensures database capture.
    pub fn publish(&self, event: ComplaintEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ComplaintEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
