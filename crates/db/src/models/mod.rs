//! Entity models and DTOs, one module per table.

pub mod complaint;
pub mod event;
pub mod profile;
pub mod session;
