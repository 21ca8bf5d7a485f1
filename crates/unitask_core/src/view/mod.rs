//! View projection: plain display models derived from core state.
//!
//! # Responsibility
//! - Turn (tasks, filter, sort), the notification feed, the resource catalog
//!   and the calendar cursor into ordered, pre-formatted view models.
//! - Stay free of any rendering technology; renderers consume these models
//!   and repaint fully after every state change.

pub mod calendar;
pub mod format;
pub mod projection;
pub mod status;
