//! Short feedback messages shown after user actions.

use crate::model::notification::NotificationKind;
use std::fmt::{Display, Formatter};

/// One transient status line for the renderer. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: NotificationKind,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NotificationKind::Error,
        }
    }

    pub fn task_added() -> Self {
        Self::success("Task added successfully!")
    }

    pub fn task_toggled(completed: bool) -> Self {
        if completed {
            Self::success("Task completed!")
        } else {
            Self::success("Task marked as pending!")
        }
    }

    pub fn task_deleted() -> Self {
        Self::success("Task deleted successfully!")
    }

    pub fn all_read() -> Self {
        Self::success("All notifications marked as read")
    }

    pub fn settings_updated() -> Self {
        Self::success("Settings updated")
    }

    pub fn profile_updated() -> Self {
        Self::success("Profile updated")
    }

    pub fn data_exported() -> Self {
        Self::success("Data exported successfully")
    }

    pub fn data_imported() -> Self {
        Self::success("Data imported successfully")
    }

    pub fn invalid_data_file() -> Self {
        Self::error("Invalid data file")
    }

    pub fn data_cleared() -> Self {
        Self::success("All data cleared")
    }

    pub fn login_succeeded() -> Self {
        Self::success("Login successful!")
    }

    pub fn registration_succeeded() -> Self {
        Self::success("Registration successful!")
    }

    pub fn logged_out() -> Self {
        Self::success("Logged out successfully")
    }
}

impl Display for StatusMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
