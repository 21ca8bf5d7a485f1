//! Task store and task derivations.
//!
//! # Responsibility
//! - Own the live task collection: create, toggle, delete.
//! - Provide pure filter/sort/search/statistics derivations over any task
//!   sequence.
//!
//! # Invariants
//! - Ids are unique within the collection; new tasks are appended at the end.
//! - Operations addressed by an unknown id are silent no-ops.
//! - Derivations never mutate their input and always return a new sequence.
//! - All sorts are stable.

use crate::model::id::IdAllocator;
use crate::model::task::{NewTask, Task, TaskId, TaskValidationError};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Days ahead (inclusive) counted as "due this week" on the dashboard.
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Named task predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
    /// Incomplete with a due date strictly before today.
    Overdue,
}

impl TaskFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    pub fn matches(self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
            Self::Overdue => task.is_overdue(today),
        }
    }
}

impl FromStr for TaskFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "overdue" => Ok(Self::Overdue),
            other => Err(format!(
                "unsupported filter `{other}`; expected all|pending|completed|overdue"
            )),
        }
    }
}

impl Display for TaskFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    /// Earliest due date first.
    #[default]
    DueDate,
    /// High, then medium, then low.
    Priority,
    /// Case-insensitive ascending.
    Title,
    /// Newest creation time first.
    Created,
}

impl TaskSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DueDate => "dueDate",
            Self::Priority => "priority",
            Self::Title => "title",
            Self::Created => "created",
        }
    }
}

impl FromStr for TaskSort {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| *ch != '_' && *ch != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "duedate" | "due" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "title" => Ok(Self::Title),
            "created" | "createdat" => Ok(Self::Created),
            _ => Err(format!(
                "unsupported sort `{}`; expected dueDate|priority|title|created",
                value.trim()
            )),
        }
    }
}

impl Display for TaskSort {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard counters.
///
/// `pending + completed == total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub overdue: usize,
    /// Incomplete with `today <= due_date <= today + 7 days`.
    pub due_within_week: usize,
}

/// Owner of the live task collection.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    ids: IdAllocator,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts a previously persisted collection, keeping its order.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut ids = IdAllocator::new();
        ids.observe(tasks.iter().map(|task| task.id));
        Self { tasks, ids }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Validates input and appends a new pending task.
    ///
    /// # Errors
    /// - Returns `TaskValidationError::EmptyTitle` for a blank title; the
    ///   collection is left unchanged.
    pub fn create(
        &mut self,
        input: NewTask,
        now: NaiveDateTime,
    ) -> Result<&Task, TaskValidationError> {
        input.validate()?;
        let id = self.ids.next(now);
        self.tasks.push(Task::from_input(id, input, now));
        let index = self.tasks.len() - 1;
        Ok(&self.tasks[index])
    }

    /// Flips `completed` on the matching task.
    ///
    /// Returns the updated task, or `None` when no task has `id`.
    pub fn toggle_completion(&mut self, id: TaskId) -> Option<&Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.toggle_completed();
        Some(&*task)
    }

    /// Removes the matching task and returns it; `None` when absent.
    pub fn delete(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Replaces the whole collection (import).
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.ids.observe(tasks.iter().map(|task| task.id));
        self.tasks = tasks;
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

/// Keeps the tasks matching `filter`, preserving input order.
pub fn filter_tasks<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    filter: TaskFilter,
    today: NaiveDate,
) -> Vec<&'a Task> {
    tasks
        .into_iter()
        .filter(|task| filter.matches(task, today))
        .collect()
}

/// Returns a stably sorted copy of `tasks`.
pub fn sort_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>, sort: TaskSort) -> Vec<&'a Task> {
    let mut sorted: Vec<&Task> = tasks.into_iter().collect();
    match sort {
        TaskSort::DueDate => sorted.sort_by_key(|task| task.due_date),
        TaskSort::Priority => sorted.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        TaskSort::Title => {
            sorted.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        TaskSort::Created => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    sorted
}

/// Case-insensitive substring match on title or description.
///
/// A blank term matches every task.
pub fn search_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>, term: &str) -> Vec<&'a Task> {
    let needle = term.trim().to_lowercase();
    tasks
        .into_iter()
        .filter(|task| {
            needle.is_empty()
                || task.title.to_lowercase().contains(needle.as_str())
                || task.description.to_lowercase().contains(needle.as_str())
        })
        .collect()
}

/// Incomplete tasks due today or later, earliest first, capped at `limit`.
pub fn upcoming_tasks(tasks: &[Task], today: NaiveDate, limit: usize) -> Vec<&Task> {
    let pending = tasks
        .iter()
        .filter(|task| !task.completed && task.due_date >= today);
    sort_tasks(pending, TaskSort::DueDate)
        .into_iter()
        .take(limit)
        .collect()
}

/// Tasks due on exactly `date`, in collection order.
pub fn tasks_due_on(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|task| task.is_due_on(date)).collect()
}

pub fn compute_dashboard_stats(tasks: &[Task], today: NaiveDate) -> DashboardStats {
    let week_end = today + Duration::days(DUE_SOON_WINDOW_DAYS);
    let mut stats = DashboardStats {
        total: tasks.len(),
        ..DashboardStats::default()
    };

    for task in tasks {
        if task.completed {
            stats.completed += 1;
            continue;
        }
        stats.pending += 1;
        if task.due_date < today {
            stats.overdue += 1;
        } else if task.due_date <= week_end {
            stats.due_within_week += 1;
        }
    }

    stats
}
