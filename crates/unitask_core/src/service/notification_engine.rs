//! Notification feed engine.
//!
//! # Responsibility
//! - Create notifications, flip read state, and derive unread counts.
//! - Define the alert hook seam (desktop alert, sound) fired on creation.
//!
//! # Invariants
//! - New notifications are inserted at the head of the stored sequence.
//! - Display order is always recomputed by `date` descending; insertion
//!   order is never trusted as display order.
//! - Notifications are never deleted individually, only bulk-cleared.

use crate::model::id::IdAllocator;
use crate::model::notification::{Notification, NotificationId, NotificationKind};
use chrono::NaiveDateTime;
use log::debug;

/// Side-effect hooks fired for each new notification while task reminders
/// are enabled.
pub trait AlertSink {
    fn desktop_alert(&self, notification: &Notification);
    fn play_sound(&self);
}

impl<A: AlertSink + ?Sized> AlertSink for &A {
    fn desktop_alert(&self, notification: &Notification) {
        (**self).desktop_alert(notification);
    }

    fn play_sound(&self) {
        (**self).play_sound();
    }
}

/// Alert sink that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAlertSink;

impl AlertSink for NoopAlertSink {
    fn desktop_alert(&self, _notification: &Notification) {}

    fn play_sound(&self) {}
}

/// Alert sink that only records metadata-only log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn desktop_alert(&self, notification: &Notification) {
        debug!(
            "event=alert_desktop module=notification status=ok notification_id={} kind={}",
            notification.id,
            notification.kind.as_str()
        );
    }

    fn play_sound(&self) {
        debug!("event=alert_sound module=notification status=ok");
    }
}

/// Owner of the notification feed.
#[derive(Debug, Clone, Default)]
pub struct NotificationEngine {
    notifications: Vec<Notification>,
    ids: IdAllocator,
}

impl NotificationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts a previously persisted feed, keeping its stored order.
    pub fn from_notifications(notifications: Vec<Notification>) -> Self {
        let mut ids = IdAllocator::new();
        ids.observe(notifications.iter().map(|notification| notification.id));
        Self { notifications, ids }
    }

    /// Stored sequence, most recently inserted first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.notifications
            .iter()
            .find(|notification| notification.id == id)
    }

    /// Creates an unread notification stamped `now` and inserts it first.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        now: NaiveDateTime,
    ) -> &Notification {
        let id = self.ids.next(now);
        self.notifications
            .insert(0, Notification::new(id, title, message, kind, now));
        &self.notifications[0]
    }

    /// Marks one notification read. Returns `false` when `id` is unknown.
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self
            .notifications
            .iter_mut()
            .find(|notification| notification.id == id)
        {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    /// Marks every notification read and returns how many were unread.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for notification in &mut self.notifications {
            if !notification.read {
                notification.read = true;
                changed += 1;
            }
        }
        changed
    }

    pub fn unread_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|notification| !notification.read)
            .count()
    }

    /// Feed in display order: newest `date` first, stable for equal dates.
    pub fn display_order(&self) -> Vec<&Notification> {
        let mut ordered: Vec<&Notification> = self.notifications.iter().collect();
        ordered.sort_by(|a, b| b.date.cmp(&a.date));
        ordered
    }

    /// Replaces the whole feed (import).
    pub fn replace_all(&mut self, notifications: Vec<Notification>) {
        self.ids
            .observe(notifications.iter().map(|notification| notification.id));
        self.notifications = notifications;
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::NotificationEngine;
    use crate::model::notification::NotificationKind;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn display_order_follows_date_not_insertion() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut engine = NotificationEngine::new();
        engine.add("later", "b", NotificationKind::Info, base);
        // Clock stepped backwards: inserted first in storage, but older.
        let older_id = engine
            .add("earlier", "a", NotificationKind::Info, base - Duration::hours(1))
            .id;

        assert_eq!(engine.notifications()[0].id, older_id);
        let display = engine.display_order();
        assert_eq!(display[0].title, "later");
        assert_eq!(display[1].title, "earlier");
    }

    #[test]
    fn ids_stay_unique_when_clock_steps_backwards() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut engine = NotificationEngine::new();
        let first = engine.add("a", "a", NotificationKind::Info, base).id;
        let second = engine
            .add("b", "b", NotificationKind::Info, base - Duration::minutes(5))
            .id;
        assert!(second > first);
    }
}
