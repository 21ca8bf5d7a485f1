//! Plain-text rendering of core view models.
//!
//! Every function returns the full text including the trailing newline so
//! callers can `print!` it directly and tests can compare strings.

use unitask_core::model::notification::Notification;
use unitask_core::view::calendar::{CalendarEvent, CalendarMonthView, WEEKDAY_HEADERS};
use unitask_core::view::projection::{
    DashboardView, NotificationFeedView, ResourceCard, TaskListScope, TaskListView, TaskRow,
};
use unitask_core::service::resource_directory::ALL_CATEGORIES;
use unitask_core::{Settings, UserProfile};

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

pub fn task_row(row: &TaskRow) -> String {
    let check = if row.completed { "[x]" } else { "[ ]" };
    let overdue = if row.overdue { " OVERDUE" } else { "" };
    let category = if row.category.is_empty() {
        String::new()
    } else {
        format!(" #{}", row.category)
    };
    format!(
        "{check} {:>13}  {:<6}  {}  ({}){category}{overdue}",
        row.id, row.priority_label, row.title, row.due_label
    )
}

pub fn task_list(view: &TaskListView) -> String {
    if view.is_empty() {
        return finish(vec!["No tasks found".to_string()]);
    }
    let header = match &view.scope {
        TaskListScope::Filtered { filter, sort } => {
            format!("{} tasks (filter={filter}, sort={sort})", view.rows.len())
        }
        TaskListScope::Search { term } => {
            format!("{} tasks matching \"{term}\"", view.rows.len())
        }
    };
    let mut lines = vec![header];
    lines.extend(view.rows.iter().map(task_row));
    finish(lines)
}

pub fn notification_feed(view: &NotificationFeedView) -> String {
    if view.is_empty() {
        return finish(vec!["No notifications".to_string()]);
    }
    let mut lines = vec![format!("{} unread", view.unread_count)];
    lines.extend(view.items.iter().map(|row| {
        let marker = if row.unread { "*" } else { " " };
        format!(
            "{marker} {:>13}  [{}] {}: {}  ({})",
            row.id,
            row.kind.as_str(),
            row.title,
            row.message,
            row.time_label
        )
    }));
    finish(lines)
}

/// Notifications posted by a reminder tick; empty text when none fired.
pub fn posted_notifications(posted: &[Notification]) -> String {
    if posted.is_empty() {
        return String::new();
    }
    finish(
        posted
            .iter()
            .map(|notification| {
                format!(
                    "[{}] {}: {}",
                    notification.kind.as_str(),
                    notification.title,
                    notification.message
                )
            })
            .collect(),
    )
}

/// Cards followed by the categories accepted by `--category`.
pub fn resource_cards(cards: &[ResourceCard], categories: &[&str]) -> String {
    let mut lines: Vec<String> = if cards.is_empty() {
        vec!["No resources found".to_string()]
    } else {
        cards
            .iter()
            .map(|card| {
                format!(
                    "{} [{}] {}\n    {}",
                    card.title, card.category, card.url, card.description
                )
            })
            .collect()
    };
    let mut choices = vec![ALL_CATEGORIES];
    choices.extend_from_slice(categories);
    lines.push(format!("Categories: {}", choices.join(", ")));
    finish(lines)
}

pub fn dashboard(view: &DashboardView) -> String {
    let stats = view.stats;
    let mut lines = vec![
        format!(
            "Tasks: {} total, {} pending, {} completed, {} overdue, {} due this week",
            stats.total, stats.pending, stats.completed, stats.overdue, stats.due_within_week
        ),
        format!("Unread notifications: {}", view.unread_notifications),
        String::new(),
        "Upcoming".to_string(),
    ];
    if view.upcoming.is_empty() {
        lines.push("  No upcoming tasks".to_string());
    } else {
        lines.extend(view.upcoming.iter().map(|row| format!("  {}", task_row(row))));
    }
    lines.push(String::new());
    lines.push("Resources".to_string());
    lines.extend(
        view.recent_resources
            .iter()
            .map(|card| format!("  {} ({})", card.title, card.url)),
    );
    finish(lines)
}

/// Month grid, one week per line; days with tasks are marked with `*`.
pub fn calendar(view: &CalendarMonthView) -> String {
    let mut lines = vec![view.title.clone(), WEEKDAY_HEADERS.map(|h| format!("{h:>4}")).concat()];

    let mut week = "    ".repeat(view.leading_blanks as usize);
    let mut column = view.leading_blanks;
    for day in &view.days {
        let marker = if day.is_today {
            '>'
        } else if day.events.is_empty() {
            ' '
        } else {
            '*'
        };
        week.push_str(&format!("{marker}{:>3}", day.day));
        column += 1;
        if column == 7 {
            lines.push(std::mem::take(&mut week));
            column = 0;
        }
    }
    if !week.is_empty() {
        lines.push(week);
    }

    for day in view.days.iter().filter(|day| !day.events.is_empty()) {
        for event in &day.events {
            lines.push(format!("{}  {}", day.date.format("%b %-d"), event.title));
        }
    }
    finish(lines)
}

pub fn today_events(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return finish(vec!["No tasks scheduled for today".to_string()]);
    }
    finish(
        events
            .iter()
            .map(|event| format!("{:>13}  {}", event.task_id, event.title))
            .collect(),
    )
}

pub fn settings(settings: &Settings) -> String {
    finish(vec![
        format!("theme            {}", settings.theme),
        format!("task-reminders   {}", on_off(settings.task_reminders)),
        format!("resource-updates {}", on_off(settings.resource_updates)),
        format!("daily-digest     {}", on_off(settings.daily_digest)),
    ])
}

pub fn profile(user: &UserProfile) -> String {
    let mut lines = vec![format!("{} ({})", user.name, user.initials()), user.email.clone()];
    if !user.student_id.is_empty() {
        lines.push(format!("Student ID: {}", user.student_id));
    }
    finish(lines)
}
