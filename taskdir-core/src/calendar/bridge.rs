//! Permission-gated creation of a calendar event for a new task.

use chrono_tz::Tz;

use super::event::EventPayload;
use super::provider::{CalendarProvider, CalendarSpec, PermissionStatus};
use crate::error::TaskDirError;
use crate::model::{Category, Task};

/// How a sync attempt ended. Every variant is meant to be shown to the user.
#[derive(Debug)]
pub enum SyncOutcome {
    Done {
        calendar_id: String,
        event_id: String,
    },
    /// The task was incomplete; the provider was never contacted.
    RejectedLocally(TaskDirError),
    PermissionDenied,
    /// Something went wrong after access was granted.
    Failed(TaskDirError),
}

impl SyncOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, SyncOutcome::Done { .. })
    }

    fn name(&self) -> &'static str {
        match self {
            SyncOutcome::Done { .. } => "done",
            SyncOutcome::RejectedLocally(_) => "rejected_locally",
            SyncOutcome::PermissionDenied => "permission_denied",
            SyncOutcome::Failed(_) => "failed",
        }
    }
}

/// Steps of one sync attempt. `Finished` is terminal.
#[derive(Debug)]
enum SyncState {
    Idle,
    PermissionRequested,
    CalendarResolution,
    EventCreation { calendar_id: String },
    Finished(SyncOutcome),
}

impl SyncState {
    fn name(&self) -> &'static str {
        match self {
            SyncState::Idle => "idle",
            SyncState::PermissionRequested => "permission_requested",
            SyncState::CalendarResolution => "calendar_resolution",
            SyncState::EventCreation { .. } => "event_creation",
            SyncState::Finished(outcome) => outcome.name(),
        }
    }
}

/// Mirrors newly created tasks into the application calendar.
///
/// There is no retry: a denied or failed attempt is final for that task.
pub struct CalendarBridge<P> {
    provider: P,
    timezone: Tz,
    calendar: CalendarSpec,
}

impl<P: CalendarProvider> CalendarBridge<P> {
    pub fn new(provider: P, timezone: Tz) -> Self {
        CalendarBridge {
            provider,
            timezone,
            calendar: CalendarSpec::app_calendar(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run one sync attempt for `task`, which belongs to `category`.
    pub async fn sync(&self, task: &Task, category: &Category) -> SyncOutcome {
        let mut state = SyncState::Idle;

        loop {
            tracing::debug!(
                target: "taskdir::calendar",
                task = %task.id,
                state = state.name(),
                "Calendar sync step"
            );

            state = match state {
                SyncState::Idle => match check_syncable(task, category) {
                    Ok(()) => SyncState::PermissionRequested,
                    Err(e) => SyncState::Finished(SyncOutcome::RejectedLocally(e)),
                },
                SyncState::PermissionRequested => match self.provider.request_permission().await {
                    Ok(PermissionStatus::Granted) => SyncState::CalendarResolution,
                    Ok(PermissionStatus::Denied) => {
                        SyncState::Finished(SyncOutcome::PermissionDenied)
                    }
                    Err(e) => SyncState::Finished(failed(e)),
                },
                SyncState::CalendarResolution => match self.resolve_calendar().await {
                    Ok(calendar_id) => SyncState::EventCreation { calendar_id },
                    Err(e) => SyncState::Finished(failed(e)),
                },
                SyncState::EventCreation { calendar_id } => {
                    let payload = EventPayload::for_task(task, category, self.timezone);
                    match self.provider.create_event(&calendar_id, &payload).await {
                        Ok(event_id) => SyncState::Finished(SyncOutcome::Done {
                            calendar_id,
                            event_id,
                        }),
                        Err(e) => SyncState::Finished(failed(e)),
                    }
                }
                SyncState::Finished(outcome) => {
                    match &outcome {
                        SyncOutcome::Failed(e) => tracing::warn!(
                            target: "taskdir::calendar",
                            task = %task.id,
                            error = %e,
                            "Calendar sync failed"
                        ),
                        other => tracing::info!(
                            target: "taskdir::calendar",
                            task = %task.id,
                            outcome = other.name(),
                            "Calendar sync finished"
                        ),
                    }
                    return outcome;
                }
            };
        }
    }

    /// Find the application calendar, creating it on first use.
    async fn resolve_calendar(&self) -> Result<String, TaskDirError> {
        if let Some(id) = self.provider.find_calendar_by_name(&self.calendar.name).await? {
            return Ok(id);
        }

        let id = self.provider.create_calendar(&self.calendar).await?;
        tracing::info!(
            target: "taskdir::calendar",
            calendar = %self.calendar.name,
            id = %id,
            "Created application calendar"
        );
        Ok(id)
    }
}

/// The fields an event needs must all be present.
fn check_syncable(task: &Task, category: &Category) -> Result<(), TaskDirError> {
    if task.title.trim().is_empty() {
        return Err(TaskDirError::Validation("Task has no title".into()));
    }
    if task.category_id != category.id || category.title.trim().is_empty() {
        return Err(TaskDirError::Validation(format!(
            "Task '{}' has no valid category",
            task.title
        )));
    }
    Ok(())
}

fn failed(e: TaskDirError) -> SyncOutcome {
    match e {
        TaskDirError::CalendarSync(_) => SyncOutcome::Failed(e),
        other => SyncOutcome::Failed(TaskDirError::CalendarSync(other.to_string())),
    }
}
