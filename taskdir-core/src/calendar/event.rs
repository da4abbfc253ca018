//! Calendar event built from a task.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::EVENT_REMINDER_MINUTES;
use crate::model::{Category, Task};

/// What a provider is asked to insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    /// Stable per task, so re-syncing the same task targets the same event.
    pub uid: String,
    pub title: String,
    pub notes: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    pub status: EventStatus,
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    /// All-day; as in iCalendar an all-day end date is exclusive.
    Date(NaiveDate),
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Confirmed,
}

/// A reminder/alarm for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Minutes before the event to trigger
    pub minutes: i64,
}

/// Default end of a timed event when only a start time is given.
const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

impl EventPayload {
    /// Event for a task in its category.
    ///
    /// Without any clock time the event is all-day from the start date
    /// through the end date. Otherwise it is timed in `timezone`, a missing
    /// start time meaning 00:00 and a missing end time 23:59.
    pub fn for_task(task: &Task, category: &Category, timezone: Tz) -> Self {
        let (start, end) = match (task.start_time, task.end_time) {
            (None, None) => (
                EventTime::Date(task.start_date),
                EventTime::Date(task.end_date + Duration::days(1)),
            ),
            (start_time, end_time) => {
                let tzid = timezone.name().to_string();
                let start = task
                    .start_date
                    .and_time(hours_minutes(start_time.unwrap_or(NaiveTime::MIN)));
                let end = task
                    .end_date
                    .and_time(hours_minutes(end_time.unwrap_or(END_OF_DAY)));
                (
                    EventTime::DateTimeZoned {
                        datetime: start,
                        tzid: tzid.clone(),
                    },
                    EventTime::DateTimeZoned { datetime: end, tzid },
                )
            }
        };

        EventPayload {
            uid: format!("{}@taskdir", task.id),
            title: format!("{} | {}", task.title, category.title),
            notes: task.description.clone(),
            start,
            end,
            status: EventStatus::Confirmed,
            reminders: EVENT_REMINDER_MINUTES
                .iter()
                .map(|&minutes| Reminder { minutes })
                .collect(),
        }
    }

    /// True when the event would end before it starts.
    pub fn ends_before_start(&self) -> bool {
        match (&self.start, &self.end) {
            (EventTime::Date(start), EventTime::Date(end)) => end <= start,
            (
                EventTime::DateTimeZoned { datetime: start, .. },
                EventTime::DateTimeZoned { datetime: end, .. },
            ) => end < start,
            _ => false,
        }
    }
}

/// Keep hours and minutes, drop seconds.
fn hours_minutes(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
