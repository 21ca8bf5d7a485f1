//! Reminder scheduler.
//!
//! # Responsibility
//! - Decide, on each periodic tick, whether the aggregate "overdue" and
//!   "due tomorrow" notifications should be emitted.
//! - Hold one-shot per-task reminders until their fire time.
//!
//! # Invariants
//! - Each aggregate notification fires at most once per local calendar day.
//!   Flags reset whenever the tick's date differs from the stored reset date,
//!   so a delayed or skipped tick around midnight cannot suppress the reset.
//! - A one-shot reminder fires at most once and is never persisted. A new
//!   session rebuilds pending reminders from the tasks' `reminder` flags;
//!   fire times that passed while no session was running are lost.
//! - A one-shot reminder is dropped instead of fired when its task was
//!   deleted or is completed at fire time.

use crate::model::notification::NotificationKind;
use crate::model::task::{Task, TaskId};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;

pub const OVERDUE_TITLE: &str = "Overdue Tasks";
pub const DUE_TOMORROW_TITLE: &str = "Tasks Due Tomorrow";
pub const TASK_REMINDER_TITLE: &str = "Task Reminder";

/// Notification the scheduler asks the app to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotice {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    /// Set for per-task reminders; `None` for aggregates.
    pub task_id: Option<TaskId>,
}

/// A scheduled single-shot reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneShotReminder {
    pub task_id: TaskId,
    pub fire_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DayFlags {
    day: Option<NaiveDate>,
    overdue_notified: bool,
    tomorrow_notified: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ReminderScheduler {
    flags: DayFlags,
    pending: Vec<OneShotReminder>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overdue_notified(&self) -> bool {
        self.flags.overdue_notified
    }

    pub fn tomorrow_notified(&self) -> bool {
        self.flags.tomorrow_notified
    }

    /// Runs the aggregate check for the tick at `now`.
    ///
    /// Idempotent within one day: a second call on the same date with the
    /// same tasks returns nothing.
    pub fn check(&mut self, tasks: &[Task], now: NaiveDateTime) -> Vec<ReminderNotice> {
        let today = now.date();
        self.roll_day(today);

        let mut notices = Vec::new();

        let overdue = tasks.iter().filter(|task| task.is_overdue(today)).count();
        if overdue > 0 && !self.flags.overdue_notified {
            notices.push(ReminderNotice {
                title: OVERDUE_TITLE.to_string(),
                message: format!("You have {overdue} overdue {}", plural(overdue, "task")),
                kind: NotificationKind::Warning,
                task_id: None,
            });
            self.flags.overdue_notified = true;
        }

        if let Some(tomorrow) = today.succ_opt() {
            let due_tomorrow = tasks
                .iter()
                .filter(|task| !task.completed && task.is_due_on(tomorrow))
                .count();
            if due_tomorrow > 0 && !self.flags.tomorrow_notified {
                notices.push(ReminderNotice {
                    title: DUE_TOMORROW_TITLE.to_string(),
                    message: format!(
                        "You have {due_tomorrow} {} due tomorrow",
                        plural(due_tomorrow, "task")
                    ),
                    kind: NotificationKind::Info,
                    task_id: None,
                });
                self.flags.tomorrow_notified = true;
            }
        }

        notices
    }

    fn roll_day(&mut self, today: NaiveDate) {
        if self.flags.day != Some(today) {
            if self.flags.day.is_some() {
                debug!("event=reminder_day_reset module=reminder status=ok");
            }
            self.flags = DayFlags {
                day: Some(today),
                ..DayFlags::default()
            };
        }
    }

    /// Schedules a reminder for local midnight at the start of the day before
    /// `task.due_date`.
    ///
    /// Returns the fire time, or `None` when that instant is not in the
    /// future. Rescheduling the same task replaces its earlier reminder.
    pub fn schedule(&mut self, task: &Task, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let fire_at = task.due_date.pred_opt()?.and_time(NaiveTime::MIN);
        if fire_at <= now {
            return None;
        }
        self.pending.retain(|reminder| reminder.task_id != task.id);
        self.pending.push(OneShotReminder {
            task_id: task.id,
            fire_at,
        });
        Some(fire_at)
    }

    /// Drops the pending reminder for `task_id`. Returns whether one existed.
    pub fn cancel(&mut self, task_id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|reminder| reminder.task_id != task_id);
        self.pending.len() != before
    }

    /// Aligns pending reminders with a freshly loaded task list.
    ///
    /// Reminders whose task is gone, completed or no longer flagged are
    /// dropped. Flagged pending tasks without a reminder are scheduled when
    /// their fire time is still ahead. Returns how many were added.
    pub fn sync_tasks(&mut self, tasks: &[Task], now: NaiveDateTime) -> usize {
        self.pending.retain(|reminder| {
            tasks
                .iter()
                .any(|task| task.id == reminder.task_id && task.reminder && !task.completed)
        });

        let mut added = 0;
        for task in tasks.iter().filter(|task| task.reminder && !task.completed) {
            if self.pending.iter().any(|reminder| reminder.task_id == task.id) {
                continue;
            }
            if self.schedule(task, now).is_some() {
                added += 1;
            }
        }
        added
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn pending(&self) -> &[OneShotReminder] {
        &self.pending
    }

    /// Removes every reminder whose fire time has passed and returns the
    /// notices for those whose task is still present and incomplete.
    pub fn take_due(&mut self, tasks: &[Task], now: NaiveDateTime) -> Vec<ReminderNotice> {
        let (due, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|reminder| reminder.fire_at <= now);
        self.pending = waiting;

        due.into_iter()
            .filter_map(|reminder| {
                let Some(task) = tasks.iter().find(|task| task.id == reminder.task_id) else {
                    debug!(
                        "event=reminder_drop module=reminder status=skipped reason=task_missing task_id={}",
                        reminder.task_id
                    );
                    return None;
                };
                if task.completed {
                    debug!(
                        "event=reminder_drop module=reminder status=skipped reason=task_completed task_id={}",
                        reminder.task_id
                    );
                    return None;
                }
                Some(ReminderNotice {
                    title: TASK_REMINDER_TITLE.to_string(),
                    message: format!("{} is due tomorrow!", task.title),
                    kind: NotificationKind::Warning,
                    task_id: Some(task.id),
                })
            })
            .collect()
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::plural;

    #[test]
    fn plural_only_adds_suffix_for_counts_other_than_one() {
        assert_eq!(plural(1, "task"), "task");
        assert_eq!(plural(0, "task"), "tasks");
        assert_eq!(plural(3, "task"), "tasks");
    }
}
