//! Core use-case services.
//!
//! # Responsibility
//! - Hold the in-memory collections and the rules that mutate them.
//! - Stay storage-agnostic: persistence is driven by the composition root.

pub mod notification_engine;
pub mod reminder;
pub mod resource_directory;
pub mod session;
pub mod task_store;
