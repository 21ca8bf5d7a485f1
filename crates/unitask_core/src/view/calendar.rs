//! Month calendar projection.
//!
//! Weeks start on Sunday. Tasks appear as all-day events on their due date.

use crate::model::task::{Task, TaskId};
use crate::service::task_store::tasks_due_on;
use chrono::{Datelike, NaiveDate};

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month currently shown by the calendar page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    year: i32,
    /// 1-based.
    month: u32,
}

impl CalendarCursor {
    /// Cursor on the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns `None` when `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// Moves by `months` (negative goes back), rolling the year over.
    ///
    /// Returns `None` when the target month is outside the supported date
    /// range.
    pub fn navigate(self, months: i32) -> Option<Self> {
        let zero_based = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        let year = i32::try_from(zero_based.div_euclid(12)).ok()?;
        let month = u32::try_from(zero_based.rem_euclid(12)).ok()? + 1;
        let target = Self { year, month };
        target.first_day().map(|_| target)
    }

    /// `January 2024`.
    pub fn title(self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    fn days_in_month(self) -> u32 {
        let next = self.navigate(1).and_then(Self::first_day);
        match (self.first_day(), next) {
            (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
            // Only December of the last supported year has no successor.
            (Some(_), None) => 31,
            (None, _) => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub task_id: TaskId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: u32,
    pub date: NaiveDate,
    pub is_today: bool,
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonthView {
    pub title: String,
    /// Empty cells before day 1 so that it lands under its weekday header.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

/// Tasks due on `date`, as all-day events.
pub fn events_for_date(tasks: &[Task], date: NaiveDate) -> Vec<CalendarEvent> {
    tasks_due_on(tasks, date)
        .into_iter()
        .map(|task| CalendarEvent {
            task_id: task.id,
            title: task.title.clone(),
        })
        .collect()
}

pub fn project_calendar_month(
    tasks: &[Task],
    cursor: CalendarCursor,
    today: NaiveDate,
) -> CalendarMonthView {
    let leading_blanks = cursor
        .first_day()
        .map_or(0, |first| first.weekday().num_days_from_sunday());

    let days = (1..=cursor.days_in_month())
        .filter_map(|day| NaiveDate::from_ymd_opt(cursor.year, cursor.month, day))
        .map(|date| CalendarDay {
            day: date.day(),
            date,
            is_today: date == today,
            events: events_for_date(tasks, date),
        })
        .collect();

    CalendarMonthView {
        title: cursor.title(),
        leading_blanks,
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::CalendarCursor;

    #[test]
    fn navigation_rolls_years_in_both_directions() {
        let january = CalendarCursor::new(2024, 1).unwrap();
        let december = january.navigate(-1).unwrap();
        assert_eq!((december.year(), december.month()), (2023, 12));
        assert_eq!(december.navigate(1), Some(january));
        assert_eq!(january.navigate(14), CalendarCursor::new(2025, 3));
    }

    #[test]
    fn navigation_past_the_date_range_yields_none() {
        let january = CalendarCursor::new(2024, 1).unwrap();
        assert!(january.navigate(i32::MAX).is_none());
        assert!(january.navigate(i32::MIN).is_none());
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(CalendarCursor::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(CalendarCursor::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(CalendarCursor::new(2023, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn rejects_out_of_range_month() {
        assert!(CalendarCursor::new(2024, 0).is_none());
        assert!(CalendarCursor::new(2024, 13).is_none());
    }
}
