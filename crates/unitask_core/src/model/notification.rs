//! Notification domain model.
//!
//! # Invariants
//! - `read` is the only field mutated after creation.
//! - Presentation hints (`icon`, `color`) are derived from `kind`; records
//!   loaded without them fall back to the kind defaults.

use crate::model::wire_time;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type NotificationId = i64;

/// Severity/category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "fas fa-check-circle",
            Self::Error => "fas fa-exclamation-circle",
            Self::Warning => "fas fa-exclamation-triangle",
            Self::Info => "fas fa-info-circle",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Success => "#34C759",
            Self::Error => "#FF3B30",
            Self::Warning => "#FF9500",
            Self::Info => "#007AFF",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// One feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    /// Serialized as `type` to match exported backup files.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    #[serde(with = "wire_time")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

impl Notification {
    /// Creates an unread notification with kind-derived presentation hints.
    pub fn new(
        id: NotificationId,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            message: message.into(),
            kind,
            read: false,
            date,
            icon: kind.icon().to_string(),
            color: kind.color().to_string(),
        }
    }

    /// Icon hint, falling back to the kind default when unset.
    pub fn icon(&self) -> &str {
        if self.icon.is_empty() {
            self.kind.icon()
        } else {
            self.icon.as_str()
        }
    }

    /// Color hint, falling back to the kind default when unset.
    pub fn color(&self) -> &str {
        if self.color.is_empty() {
            self.kind.color()
        } else {
            self.color.as_str()
        }
    }
}
