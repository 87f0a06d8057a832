//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod complaint_repo;
pub mod event_repo;
pub mod profile_repo;
pub mod session_repo;

pub use complaint_repo::ComplaintRepo;
pub use event_repo::EventRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
