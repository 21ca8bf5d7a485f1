//! Task, notification, resource and dashboard view models.
//!
//! # Invariants
//! - Projections are pure: same inputs, same output; inputs are never
//!   mutated.
//! - Task lists apply the filter first, then the stable sort.
//! - Feeds are ordered by notification date, newest first.

use crate::model::notification::{Notification, NotificationId, NotificationKind};
use crate::model::resource::{Resource, ResourceId};
use crate::model::task::{Priority, Task, TaskId};
use crate::service::notification_engine::NotificationEngine;
use crate::service::task_store::{
    compute_dashboard_stats, filter_tasks, search_tasks, sort_tasks, upcoming_tasks,
    DashboardStats, TaskFilter, TaskSort,
};
use crate::view::format::{format_due_label, format_relative_time};
use chrono::{NaiveDate, NaiveDateTime};

/// Entries shown in the notification center popover.
pub const RECENT_NOTIFICATION_LIMIT: usize = 5;
/// Upcoming tasks shown on the dashboard.
pub const UPCOMING_TASK_LIMIT: usize = 5;
/// Resource cards shown on the dashboard.
pub const DASHBOARD_RESOURCE_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    /// `None` when the task has no description.
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub due_label: String,
    pub priority: Priority,
    pub priority_label: &'static str,
    pub category: String,
    pub completed: bool,
    pub overdue: bool,
}

impl TaskRow {
    pub fn from_task(task: &Task, today: NaiveDate) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: (!task.description.is_empty()).then(|| task.description.clone()),
            due_date: task.due_date,
            due_label: format_due_label(task.due_date, today),
            priority: task.priority,
            priority_label: task.priority.label(),
            category: task.category.clone(),
            completed: task.completed,
            overdue: task.is_overdue(today),
        }
    }
}

/// How the rows of a [`TaskListView`] were selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListScope {
    Filtered { filter: TaskFilter, sort: TaskSort },
    /// Matches for `term` in collection order; filter and sort not applied.
    Search { term: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    pub scope: TaskListScope,
    pub rows: Vec<TaskRow>,
}

impl TaskListView {
    /// True when the renderer should show its empty state.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn project_task_list(
    tasks: &[Task],
    filter: TaskFilter,
    sort: TaskSort,
    today: NaiveDate,
) -> TaskListView {
    let filtered = filter_tasks(tasks, filter, today);
    let rows = sort_tasks(filtered, sort)
        .into_iter()
        .map(|task| TaskRow::from_task(task, today))
        .collect();
    TaskListView {
        scope: TaskListScope::Filtered { filter, sort },
        rows,
    }
}

/// Search results in collection order; a blank term falls back to the
/// regular filtered and sorted list.
pub fn project_task_search(
    tasks: &[Task],
    term: &str,
    filter: TaskFilter,
    sort: TaskSort,
    today: NaiveDate,
) -> TaskListView {
    if term.trim().is_empty() {
        return project_task_list(tasks, filter, sort, today);
    }
    let rows = search_tasks(tasks, term)
        .into_iter()
        .map(|task| TaskRow::from_task(task, today))
        .collect();
    TaskListView {
        scope: TaskListScope::Search {
            term: term.trim().to_string(),
        },
        rows,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRow {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub icon: String,
    pub color: String,
    pub unread: bool,
    pub time_label: String,
}

impl NotificationRow {
    pub fn from_notification(notification: &Notification, now: NaiveDateTime) -> Self {
        Self {
            id: notification.id,
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind,
            icon: notification.icon().to_string(),
            color: notification.color().to_string(),
            unread: !notification.read,
            time_label: format_relative_time(notification.date, now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFeedView {
    /// Every notification, newest first.
    pub items: Vec<NotificationRow>,
    /// First [`RECENT_NOTIFICATION_LIMIT`] entries of `items`.
    pub recent: Vec<NotificationRow>,
    pub unread_count: usize,
}

impl NotificationFeedView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn project_notification_feed(
    engine: &NotificationEngine,
    now: NaiveDateTime,
) -> NotificationFeedView {
    let items: Vec<NotificationRow> = engine
        .display_order()
        .into_iter()
        .map(|notification| NotificationRow::from_notification(notification, now))
        .collect();
    let recent = items
        .iter()
        .take(RECENT_NOTIFICATION_LIMIT)
        .cloned()
        .collect();
    NotificationFeedView {
        items,
        recent,
        unread_count: engine.unread_count(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCard {
    pub id: ResourceId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub icon: String,
    pub url: String,
    pub color: String,
}

impl From<&Resource> for ResourceCard {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id,
            title: resource.title.clone(),
            description: resource.description.clone(),
            category: resource.category.clone(),
            icon: resource.icon.clone(),
            url: resource.url.clone(),
            color: resource.color.clone(),
        }
    }
}

pub fn project_resource_cards<'a>(
    resources: impl IntoIterator<Item = &'a Resource>,
) -> Vec<ResourceCard> {
    resources.into_iter().map(ResourceCard::from).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub upcoming: Vec<TaskRow>,
    pub recent_resources: Vec<ResourceCard>,
    pub unread_notifications: usize,
}

pub fn project_dashboard(
    tasks: &[Task],
    resources: &[Resource],
    unread_notifications: usize,
    today: NaiveDate,
) -> DashboardView {
    DashboardView {
        stats: compute_dashboard_stats(tasks, today),
        upcoming: upcoming_tasks(tasks, today, UPCOMING_TASK_LIMIT)
            .into_iter()
            .map(|task| TaskRow::from_task(task, today))
            .collect(),
        recent_resources: project_resource_cards(resources.iter().take(DASHBOARD_RESOURCE_LIMIT)),
        unread_notifications,
    }
}
