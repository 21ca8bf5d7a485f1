//! Persistence adapter contracts and implementations.
//!
//! # Responsibility
//! - Mirror whole in-memory collections into a local key-value store.
//! - Isolate SQLite and JSON encoding details from the services.
//!
//! # Invariants
//! - Writes are full-snapshot overwrites, never incremental diffs.
//! - Malformed stored data is reported as absent, never as an error.

pub mod snapshot_repo;
