use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use unitask_core::service::reminder::{DUE_TOMORROW_TITLE, OVERDUE_TITLE, TASK_REMINDER_TITLE};
use unitask_core::{
    open_db_in_memory, ManualClock, NewTask, NotificationKind, Priority, SettingUpdate,
    SqliteSnapshotRepository, UniTaskApp,
};

type TestApp<'a> = UniTaskApp<SqliteSnapshotRepository<'a>, &'a ManualClock>;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn load<'a>(conn: &'a Connection, clock: &'a ManualClock) -> TestApp<'a> {
    UniTaskApp::load(SqliteSnapshotRepository::new(conn), clock).unwrap()
}

fn count_titled(app: &TestApp<'_>, title: &str) -> usize {
    app.notifications()
        .iter()
        .filter(|notification| notification.title == title)
        .count()
}

#[test]
fn overdue_aggregate_fires_once_per_day() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::at(2024, 1, 10, 9, 0).unwrap();
    let mut app = load(&conn, &clock);
    app.create_task(NewTask::new("Lab report", date(2024, 1, 9), Priority::Medium))
        .unwrap();

    let first = app.tick().unwrap();
    clock.advance(Duration::minutes(1));
    let second = app.tick().unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first[0].title, OVERDUE_TITLE);
    assert_eq!(first[0].message, "You have 1 overdue task");
    assert_eq!(first[0].kind, NotificationKind::Warning);
    assert!(second.is_empty());
    assert_eq!(count_titled(&app, OVERDUE_TITLE), 1);
}

#[test]
fn daily_flags_reset_even_when_midnight_tick_is_missed() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::at(2024, 1, 10, 23, 58).unwrap();
    let mut app = load(&conn, &clock);
    app.create_task(NewTask::new("Lab report", date(2024, 1, 9), Priority::Medium))
        .unwrap();

    app.tick().unwrap();
    assert!(app.reminders().overdue_notified());

    // Next tick lands well after midnight.
    clock.advance(Duration::hours(10));
    let posted = app.tick().unwrap();

    assert_eq!(posted.len(), 1);
    assert_eq!(count_titled(&app, OVERDUE_TITLE), 2);
}

#[test]
fn due_tomorrow_aggregate_counts_only_pending_tasks() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::at(2024, 1, 10, 9, 0).unwrap();
    let mut app = load(&conn, &clock);
    app.create_task(NewTask::new("Quiz", date(2024, 1, 11), Priority::High))
        .unwrap();
    app.create_task(NewTask::new("Slides", date(2024, 1, 11), Priority::Low))
        .unwrap();
    let done = app
        .create_task(NewTask::new("Done", date(2024, 1, 11), Priority::Low))
        .unwrap();
    app.toggle_task(done.id).unwrap();

    let posted = app.tick().unwrap();

    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].title, DUE_TOMORROW_TITLE);
    assert_eq!(posted[0].message, "You have 2 tasks due tomorrow");
    assert_eq!(posted[0].kind, NotificationKind::Info);
}

#[test]
fn disabled_task_reminders_skip_the_aggregate_check() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::at(2024, 1, 10, 9, 0).unwrap();
    let mut app = load(&conn, &clock);
    app.update_setting(SettingUpdate::TaskReminders(false))
        .unwrap();
    app.create_task(NewTask::new("Lab report", date(2024, 1, 9), Priority::Medium))
        .unwrap();

    assert!(app.tick().unwrap().is_empty());
    assert!(app.notifications().is_empty());
}

#[test]
fn one_shot_reminder_fires_at_start_of_previous_day() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::at(2024, 1, 10, 9, 0).unwrap();
    let mut app = load(&conn, &clock);
    let task = app
        .create_task(
            NewTask::new("Essay", date(2024, 1, 13), Priority::High).with_reminder(true),
        )
        .unwrap();

    let pending = app.reminders().pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].task_id, task.id);
    assert_eq!(pending[0].fire_at, date(2024, 1, 12).and_hms_opt(0, 0, 0).unwrap());

    clock.set(date(2024, 1, 11).and_hms_opt(23, 59, 0).unwrap());
    assert_eq!(count_titled(&app, TASK_REMINDER_TITLE), 0);
    app.tick().unwrap();
    assert_eq!(count_titled(&app, TASK_REMINDER_TITLE), 0);

    clock.set(date(2024, 1, 12).and_hms_opt(0, 0, 0).unwrap());
    app.tick().unwrap();
    assert_eq!(count_titled(&app, TASK_REMINDER_TITLE), 1);
    let reminder = app
        .notifications()
        .iter()
        .find(|notification| notification.title == TASK_REMINDER_TITLE)
        .unwrap();
    assert_eq!(reminder.message, "Essay is due tomorrow!");
    assert!(app.reminders().pending().is_empty());

    clock.advance(Duration::hours(1));
    app.tick().unwrap();
    assert_eq!(count_titled(&app, TASK_REMINDER_TITLE), 1);
}

#[test]
fn deleting_a_task_cancels_its_reminder() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::at(2024, 1, 10, 9, 0).unwrap();
    let mut app = load(&conn, &clock);
    let task = app
        .create_task(
            NewTask::new("Essay", date(2024, 1, 13), Priority::High).with_reminder(true),
        )
        .unwrap();

    assert!(app.delete_task(task.id).unwrap());
    assert!(app.reminders().pending().is_empty());

    clock.set(date(2024, 1, 12).and_hms_opt(8, 0, 0).unwrap());
    app.tick().unwrap();
    assert_eq!(count_titled(&app, TASK_REMINDER_TITLE), 0);
}

#[test]
fn reminder_for_completed_task_is_dropped_at_fire_time() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::at(2024, 1, 10, 9, 0).unwrap();
    let mut app = load(&conn, &clock);
    let task = app
        .create_task(
            NewTask::new("Essay", date(2024, 1, 13), Priority::High).with_reminder(true),
        )
        .unwrap();
    app.toggle_task(task.id).unwrap();

    clock.set(date(2024, 1, 12).and_hms_opt(0, 0, 0).unwrap());
    app.tick().unwrap();

    assert_eq!(count_titled(&app, TASK_REMINDER_TITLE), 0);
    assert!(app.reminders().pending().is_empty());
}

#[test]
fn reminder_is_not_scheduled_when_fire_time_has_passed() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::at(2024, 1, 10, 9, 0).unwrap();
    let mut app = load(&conn, &clock);
    app.create_task(
        NewTask::new("Quiz", date(2024, 1, 11), Priority::High).with_reminder(true),
    )
    .unwrap();

    assert!(app.reminders().pending().is_empty());
}
