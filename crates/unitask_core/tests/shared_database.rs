use chrono::{Duration, NaiveDate};
use std::path::Path;
use unitask_core::service::reminder::{OVERDUE_TITLE, TASK_REMINDER_TITLE};
use unitask_core::{
    open_db, ManualClock, NewTask, NotificationKind, Priority, SqliteSnapshotRepository,
    UniTaskApp,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn db_path(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join("unitask.sqlite3")
}

fn add_task_in_own_session(path: &Path, clock: &ManualClock, input: NewTask) -> i64 {
    let conn = open_db(path).unwrap();
    let mut app = UniTaskApp::load(SqliteSnapshotRepository::new(&conn), clock).unwrap();
    app.create_task(input).unwrap().id
}

#[test]
fn reload_keeps_tasks_written_by_another_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = db_path(&dir);
    let clock = ManualClock::at(2024, 1, 10, 9, 0).unwrap();

    let watch_conn = open_db(&path).unwrap();
    let mut watcher =
        UniTaskApp::load(SqliteSnapshotRepository::new(&watch_conn), &clock).unwrap();

    let essay = add_task_in_own_session(
        &path,
        &clock,
        NewTask::new("Essay", date(2024, 1, 20), Priority::High),
    );

    watcher.reload().unwrap();
    assert!(watcher.task(essay).is_some());
    watcher
        .add_notification("Heads up", "", NotificationKind::Info)
        .unwrap();

    let conn = open_db(&path).unwrap();
    let reopened = UniTaskApp::load(SqliteSnapshotRepository::new(&conn), &clock).unwrap();
    assert_eq!(reopened.tasks().len(), 1);
    assert_eq!(reopened.tasks()[0].title, "Essay");
    assert_eq!(reopened.notifications().len(), 1);
}

#[test]
fn reload_preserves_daily_summary_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = db_path(&dir);
    let clock = ManualClock::at(2024, 1, 10, 9, 0).unwrap();
    add_task_in_own_session(
        &path,
        &clock,
        NewTask::new("Lab report", date(2024, 1, 8), Priority::Medium),
    );

    let watch_conn = open_db(&path).unwrap();
    let mut watcher =
        UniTaskApp::load(SqliteSnapshotRepository::new(&watch_conn), &clock).unwrap();
    assert_eq!(watcher.tick().unwrap().len(), 1);

    add_task_in_own_session(
        &path,
        &clock,
        NewTask::new("Worksheet", date(2024, 1, 9), Priority::Low),
    );
    clock.advance(Duration::minutes(1));
    watcher.reload().unwrap();

    assert!(watcher.tick().unwrap().is_empty());
    let overdue = watcher
        .notifications()
        .iter()
        .filter(|notification| notification.title == OVERDUE_TITLE)
        .count();
    assert_eq!(overdue, 1);
}

#[test]
fn reminder_flag_set_in_one_session_fires_in_a_later_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = db_path(&dir);
    let clock = ManualClock::at(2024, 1, 10, 9, 0).unwrap();
    let essay = add_task_in_own_session(
        &path,
        &clock,
        NewTask::new("Essay", date(2024, 1, 13), Priority::High).with_reminder(true),
    );

    let watch_conn = open_db(&path).unwrap();
    let mut watcher =
        UniTaskApp::load(SqliteSnapshotRepository::new(&watch_conn), &clock).unwrap();
    assert_eq!(watcher.reminders().pending().len(), 1);
    assert_eq!(watcher.reminders().pending()[0].task_id, essay);

    clock.set(date(2024, 1, 12).and_hms_opt(0, 0, 0).unwrap());
    watcher.reload().unwrap();
    let posted = watcher.tick().unwrap();

    let fired: Vec<_> = posted
        .iter()
        .filter(|notification| notification.title == TASK_REMINDER_TITLE)
        .collect();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].message, "Essay is due tomorrow!");

    // Fired reminders are not rebuilt by later reloads.
    clock.advance(Duration::minutes(1));
    watcher.reload().unwrap();
    assert!(watcher.reminders().pending().is_empty());
}

#[test]
fn reload_drops_reminders_for_tasks_removed_elsewhere() {
    let dir = tempfile::tempdir().unwrap();
    let path = db_path(&dir);
    let clock = ManualClock::at(2024, 1, 10, 9, 0).unwrap();
    let essay = add_task_in_own_session(
        &path,
        &clock,
        NewTask::new("Essay", date(2024, 1, 13), Priority::High).with_reminder(true),
    );
    add_task_in_own_session(
        &path,
        &clock,
        NewTask::new("Done already", date(2024, 1, 14), Priority::Low).with_reminder(true),
    );

    let watch_conn = open_db(&path).unwrap();
    let mut watcher =
        UniTaskApp::load(SqliteSnapshotRepository::new(&watch_conn), &clock).unwrap();
    assert_eq!(watcher.reminders().pending().len(), 2);

    {
        let conn = open_db(&path).unwrap();
        let mut other = UniTaskApp::load(SqliteSnapshotRepository::new(&conn), &clock).unwrap();
        assert!(other.delete_task(essay).unwrap());
        let remaining = other.tasks()[0].id;
        other.toggle_task(remaining).unwrap();
    }

    watcher.reload().unwrap();
    assert!(watcher.reminders().pending().is_empty());
}
