//! The contract a calendar backend fulfils for the bridge.

use serde::{Deserialize, Serialize};

use super::event::EventPayload;
use crate::constants::{APP_CALENDAR_NAME, APP_CALENDAR_OWNER};
use crate::error::TaskDirResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Full control, events may be written.
    Owner,
    Read,
}

/// How to create a calendar when it does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSpec {
    pub name: String,
    pub owner_account: String,
    pub access_level: AccessLevel,
}

impl CalendarSpec {
    /// The calendar taskdir owns and writes task events into.
    pub fn app_calendar() -> Self {
        CalendarSpec {
            name: APP_CALENDAR_NAME.to_string(),
            owner_account: APP_CALENDAR_OWNER.to_string(),
            access_level: AccessLevel::Owner,
        }
    }
}

/// A calendar backend reached through permission-gated calls.
///
/// Any `Err` is treated by the bridge as "sync failed"; providers do not
/// need to classify their errors further.
#[allow(async_fn_in_trait)]
pub trait CalendarProvider {
    async fn request_permission(&self) -> TaskDirResult<PermissionStatus>;

    /// Id of the calendar called `name`, if there is one.
    async fn find_calendar_by_name(&self, name: &str) -> TaskDirResult<Option<String>>;

    /// Create a calendar and return its id.
    async fn create_calendar(&self, spec: &CalendarSpec) -> TaskDirResult<String>;

    /// Insert an event and return its id.
    async fn create_event(&self, calendar_id: &str, event: &EventPayload) -> TaskDirResult<String>;
}
