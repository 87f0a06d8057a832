//! Event bus and background consumers for the complaint feed.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ComplaintEvent`] — the canonical feed event envelope, one per
//!   complaint mutation.
//! - [`EventPersistence`] — background service that durably writes every
//!   event to the `events` table.
//! - [`ScoringHandler`] — credits the reporter's score when one of their
//!   complaints is resolved.
//!
//! Delivery over the bus is at-least-once and best-effort: a lagging
//! consumer loses the oldest buffered events and a reconnecting dashboard
//! re-fetches full state instead of relying on catch-up delivery.

pub mod bus;
pub mod persistence;
pub mod scoring;

pub use bus::{ComplaintEvent, EventBus};
pub use persistence::EventPersistence;
pub use scoring::ScoringHandler;
