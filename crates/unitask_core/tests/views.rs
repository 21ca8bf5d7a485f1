use chrono::{Duration, NaiveDate};
use unitask_core::view::calendar::project_calendar_month;
use unitask_core::view::projection::{
    project_dashboard, project_task_list, project_task_search, TaskListScope,
    RECENT_NOTIFICATION_LIMIT,
};
use unitask_core::{
    default_resources, open_db_in_memory, CalendarCursor, ManualClock, NewTask, NotificationKind,
    Priority, SqliteSnapshotRepository, Task, TaskFilter, TaskSort, UniTaskApp,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task(id: i64, title: &str, due: NaiveDate, priority: Priority) -> Task {
    Task::from_input(
        id,
        NewTask::new(title, due, priority),
        date(2024, 1, 1).and_hms_opt(8, 0, 0).unwrap(),
    )
}

#[test]
fn task_list_filters_then_sorts_and_labels_rows() {
    let today = date(2024, 1, 10);
    let mut done = task(3, "Done", date(2024, 1, 10), Priority::High);
    done.completed = true;
    let tasks = vec![
        task(1, "Later", date(2024, 1, 11), Priority::Low),
        task(2, "Late", date(2024, 1, 8), Priority::High),
        done,
    ];

    let view = project_task_list(&tasks, TaskFilter::Pending, TaskSort::DueDate, today);

    let titles: Vec<&str> = view.rows.iter().map(|row| row.title.as_str()).collect();
    assert_eq!(titles, vec!["Late", "Later"]);
    assert!(view.rows[0].overdue);
    assert_eq!(view.rows[0].due_label, "Jan 8");
    assert_eq!(view.rows[1].due_label, "Tomorrow");
    assert_eq!(view.rows[1].priority_label, "Low");
    assert!(view.rows[1].description.is_none());
}

#[test]
fn search_view_reports_its_term_instead_of_filter_and_sort() {
    let today = date(2024, 1, 10);
    let mut done = task(1, "Essay draft", date(2024, 1, 12), Priority::Low);
    done.completed = true;
    let tasks = vec![
        done,
        task(2, "Quiz", date(2024, 1, 11), Priority::High),
        task(3, "Essay final", date(2024, 1, 9), Priority::High),
    ];

    let view = project_task_search(&tasks, " essay ", TaskFilter::Pending, TaskSort::Priority, today);
    assert_eq!(
        view.scope,
        TaskListScope::Search {
            term: "essay".to_string()
        }
    );
    let ids: Vec<i64> = view.rows.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let blank = project_task_search(&tasks, "  ", TaskFilter::Pending, TaskSort::Priority, today);
    assert_eq!(
        blank.scope,
        TaskListScope::Filtered {
            filter: TaskFilter::Pending,
            sort: TaskSort::Priority
        }
    );
    assert_eq!(blank.rows.len(), 2);
}

#[test]
fn empty_filter_result_reports_empty_state() {
    let tasks = vec![task(1, "Later", date(2024, 1, 11), Priority::Low)];
    let view = project_task_list(&tasks, TaskFilter::Completed, TaskSort::Title, date(2024, 1, 10));
    assert!(view.is_empty());
}

#[test]
fn dashboard_caps_upcoming_and_resources() {
    let today = date(2024, 1, 10);
    let tasks: Vec<Task> = (0..8)
        .map(|offset| {
            task(
                offset + 1,
                &format!("T{offset}"),
                today + Duration::days(offset),
                Priority::Medium,
            )
        })
        .collect();

    let view = project_dashboard(&tasks, &default_resources(), 3, today);

    assert_eq!(view.stats.total, 8);
    assert_eq!(view.stats.due_within_week, 8);
    assert_eq!(view.upcoming.len(), 5);
    assert_eq!(view.upcoming[0].title, "T0");
    assert_eq!(view.upcoming[0].due_label, "Today");
    assert_eq!(view.recent_resources.len(), 4);
    assert_eq!(view.unread_notifications, 3);
}

#[test]
fn calendar_places_events_on_due_dates() {
    let tasks = vec![
        task(1, "Essay", date(2024, 2, 14), Priority::High),
        task(2, "Quiz", date(2024, 2, 14), Priority::Low),
        task(3, "March", date(2024, 3, 1), Priority::Low),
    ];
    let cursor = CalendarCursor::new(2024, 2).unwrap();

    let view = project_calendar_month(&tasks, cursor, date(2024, 2, 1));

    assert_eq!(view.title, "February 2024");
    // 2024-02-01 is a Thursday.
    assert_eq!(view.leading_blanks, 4);
    assert_eq!(view.days.len(), 29);
    assert!(view.days[0].is_today);
    let valentines = &view.days[13];
    assert_eq!(valentines.day, 14);
    let titles: Vec<&str> = valentines
        .events
        .iter()
        .map(|event| event.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Essay", "Quiz"]);
    assert!(view.days.iter().all(|day| day.date.format("%m").to_string() == "02"));
}

#[test]
fn feed_view_orders_newest_first_and_limits_recent() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::at(2024, 1, 10, 9, 0).unwrap();
    let mut app = UniTaskApp::load(SqliteSnapshotRepository::new(&conn), &clock).unwrap();
    for index in 0..7 {
        app.add_notification(format!("N{index}"), "", NotificationKind::Info)
            .unwrap();
        clock.advance(Duration::minutes(10));
    }
    app.mark_notification_read(app.notifications()[0].id)
        .unwrap();

    let feed = app.notification_feed_view();

    assert_eq!(feed.items.len(), 7);
    assert_eq!(feed.recent.len(), RECENT_NOTIFICATION_LIMIT);
    assert_eq!(feed.items[0].title, "N6");
    assert!(!feed.items[0].unread);
    assert_eq!(feed.items[0].time_label, "10 minutes ago");
    assert_eq!(feed.items[6].time_label, "1 hour ago");
    assert_eq!(feed.unread_count, 6);
}

#[test]
fn resource_cards_filter_by_category_and_term() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::at(2024, 1, 10, 9, 0).unwrap();
    let app = UniTaskApp::load(SqliteSnapshotRepository::new(&conn), &clock).unwrap();

    assert_eq!(app.resource_cards("all", None).len(), 6);
    let library = app.resource_cards("library", None);
    assert!(!library.is_empty());
    assert!(library.iter().all(|card| card.category == "library"));

    let searched = app.resource_cards("all", Some("library"));
    let titles: Vec<&str> = searched.iter().map(|card| card.title.as_str()).collect();
    // Category matches count too.
    assert_eq!(titles, vec!["University Library", "Research Database"]);
    assert!(app.resource_cards("tools", Some("zzz-no-match")).is_empty());
    assert_eq!(app.resource_categories(), vec!["library", "study", "tools"]);
}
