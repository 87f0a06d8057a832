//! Domain logic for the civic complaint platform.
//!
//! This crate is dependency-light by design: it holds the complaint
//! lifecycle state machine, the role-based authorization policy, and the
//! validation helpers shared by the DB and API layers. Nothing in here
//! touches the network or the database.

pub mod complaint;
pub mod error;
pub mod media;
pub mod policy;
pub mod roles;
pub mod search;
pub mod types;
