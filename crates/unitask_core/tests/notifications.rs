use chrono::{Duration, NaiveDate};
use std::cell::RefCell;
use unitask_core::{
    open_db_in_memory, AlertSink, ManualClock, Notification, NotificationEngine, NotificationKind,
    SettingUpdate, SqliteSnapshotRepository, UniTaskApp,
};

fn start() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

#[test]
fn add_increments_unread_by_one_and_mark_all_read_clears_it() {
    let mut engine = NotificationEngine::new();
    engine.add("A", "first", NotificationKind::Info, start());
    let before = engine.unread_count();

    let added = engine
        .add("B", "second", NotificationKind::Success, start())
        .clone();
    assert_eq!(engine.unread_count(), before + 1);
    assert!(!added.read);
    assert_eq!(engine.notifications()[0].id, added.id);

    assert_eq!(engine.mark_all_read(), 2);
    assert_eq!(engine.unread_count(), 0);
    assert_eq!(engine.mark_all_read(), 0);
}

#[test]
fn mark_read_of_unknown_id_changes_nothing() {
    let mut engine = NotificationEngine::new();
    engine.add("A", "first", NotificationKind::Info, start());

    assert!(!engine.mark_read(7));
    assert_eq!(engine.unread_count(), 1);
}

#[test]
fn display_order_is_newest_first_and_stable_for_equal_dates() {
    let mut engine = NotificationEngine::from_notifications(vec![
        Notification::new(1, "old", "", NotificationKind::Info, start()),
        Notification::new(2, "same-a", "", NotificationKind::Info, start() + Duration::hours(1)),
        Notification::new(3, "same-b", "", NotificationKind::Info, start() + Duration::hours(1)),
    ]);
    engine.add("newest", "", NotificationKind::Warning, start() + Duration::hours(2));

    let titles: Vec<&str> = engine
        .display_order()
        .into_iter()
        .map(|notification| notification.title.as_str())
        .collect();
    assert_eq!(titles, vec!["newest", "same-a", "same-b", "old"]);
}

#[test]
fn kind_derives_icon_and_color_hints() {
    let notification = Notification::new(1, "Saved", "", NotificationKind::Success, start());
    assert_eq!(notification.icon(), "fas fa-check-circle");
    assert_eq!(notification.color(), "#34C759");
    assert_eq!(NotificationKind::Error.color(), "#FF3B30");
}

#[derive(Default)]
struct RecordingAlerts {
    alerts: RefCell<Vec<String>>,
    sounds: RefCell<usize>,
}

impl AlertSink for RecordingAlerts {
    fn desktop_alert(&self, notification: &Notification) {
        self.alerts.borrow_mut().push(notification.title.clone());
    }

    fn play_sound(&self) {
        *self.sounds.borrow_mut() += 1;
    }
}

#[test]
fn alert_hooks_follow_the_task_reminders_setting() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(start());
    let alerts = RecordingAlerts::default();
    let mut app =
        UniTaskApp::load_with_alerts(SqliteSnapshotRepository::new(&conn), &clock, &alerts)
            .unwrap();

    app.add_notification("Heads up", "one", NotificationKind::Info)
        .unwrap();
    app.update_setting(SettingUpdate::TaskReminders(false))
        .unwrap();
    app.add_notification("Quiet", "two", NotificationKind::Info)
        .unwrap();

    assert_eq!(alerts.alerts.borrow().as_slice(), ["Heads up".to_string()]);
    assert_eq!(*alerts.sounds.borrow(), 1);
    assert_eq!(app.unread_count(), 2);
}

#[test]
fn app_mark_read_persists_and_ignores_unknown_ids() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(start());
    let mut app = UniTaskApp::load(SqliteSnapshotRepository::new(&conn), &clock).unwrap();
    let posted = app
        .add_notification("Heads up", "one", NotificationKind::Info)
        .unwrap();

    assert!(!app.mark_notification_read(posted.id + 1000).unwrap());
    assert!(app.mark_notification_read(posted.id).unwrap());
    drop(app);

    let reloaded = UniTaskApp::load(SqliteSnapshotRepository::new(&conn), &clock).unwrap();
    assert_eq!(reloaded.unread_count(), 0);
    assert!(reloaded.notifications()[0].read);
}
