//! Domain model for the task/notification/resource feeds.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the persisted wire shape compatible with exported backup files
//!   (camelCase field names, ISO date strings).
//!
//! # Invariants
//! - Task and notification ids are unique within their live collection.
//! - Due dates are calendar dates; timestamps are local wall-clock values.

pub mod id;
pub mod notification;
pub mod resource;
pub mod settings;
pub mod task;
pub mod user;
pub(crate) mod wire_time;
