//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record tracked by the task store.
//! - Validate user-submitted task input before it becomes a record.
//!
//! # Invariants
//! - `id` is unique across the live task collection.
//! - `due_date` is always a valid calendar date, so date comparison is
//!   chronological.
//! - A freshly created task is never completed.

use crate::model::wire_time;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Creation-timestamp-based task identifier.
pub type TaskId = i64;

/// Task urgency bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Numeric weight used by priority sort: high(3) > medium(2) > low(1).
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Capitalized label for display badges.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(TaskValidationError::InvalidPriority(other.to_string())),
        }
    }
}

/// Validation failures for task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    InvalidDueDate(String),
    InvalidPriority(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::InvalidDueDate(value) => {
                write!(f, "invalid due date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidPriority(value) => {
                write!(f, "invalid priority `{value}`; expected low|medium|high")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Parses a date-only ISO 8601 string (`YYYY-MM-DD`).
pub fn parse_due_date(value: &str) -> Result<NaiveDate, TaskValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| TaskValidationError::InvalidDueDate(trimmed.to_string()))
}

/// User-submitted input for creating one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub category: String,
    /// Schedules a one-shot "due tomorrow" reminder when set.
    pub reminder: bool,
}

impl NewTask {
    /// Creates input with empty description/category and no reminder.
    pub fn new(title: impl Into<String>, due_date: NaiveDate, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date,
            priority,
            category: String::new(),
            reminder: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_reminder(mut self, reminder: bool) -> Self {
        self.reminder = reminder;
        self
    }

    /// Rejects input that cannot become a task.
    ///
    /// Past due dates are accepted; only the UI constrains them.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub reminder: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "wire_time")]
    pub created_at: NaiveDateTime,
}

impl Task {
    /// Builds a pending task from validated input.
    pub fn from_input(id: TaskId, input: NewTask, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            due_date: input.due_date,
            priority: input.priority,
            category: input.category.trim().to_string(),
            reminder: input.reminder,
            completed: false,
            created_at,
        }
    }

    /// Incomplete and due strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date < today
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.due_date == date
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }
}
