//! Notification routing infrastructure.
//!
//! The [`NotificationRouter`] subscribes to the event bus and pushes
//! complaint lifecycle events to connected WebSocket clients based on
//! their relationship to the complaint.

pub mod router;

pub use router::NotificationRouter;
