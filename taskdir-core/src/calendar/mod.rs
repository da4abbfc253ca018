//! Best-effort mirroring of new tasks into a calendar.
//!
//! The bridge never touches the task store: callers save the task first and
//! then hand it to [`CalendarBridge::sync`], whose outcome is informational.

mod bridge;
mod event;
pub mod ics;
mod local;
mod provider;

pub use bridge::{CalendarBridge, SyncOutcome};
pub use event::{EventPayload, EventStatus, EventTime, Reminder};
pub use local::{LocalCalendarProvider, PermissionPrompt};
pub use provider::{AccessLevel, CalendarProvider, CalendarSpec, PermissionStatus};
