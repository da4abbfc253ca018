//! Calendars as directories of .ics files.
//!
//! Layout under the calendar directory:
//!
//! ```text
//! <calendar_dir>/
//!   task-manager/
//!     .taskdir/calendar.toml
//!     2025-03-20T0900__write-report-work.ics
//! ```
//!
//! The calendar id is the directory name.

use std::path::{Path, PathBuf};

use super::event::{EventPayload, EventTime};
use super::ics::generate_ics;
use super::provider::{AccessLevel, CalendarProvider, CalendarSpec, PermissionStatus};
use crate::config::{CalendarAccess, TaskdirConfig};
use crate::error::{TaskDirError, TaskDirResult};
use crate::utils::slugify;

/// Asks the user whether calendar access is allowed.
pub type PermissionPrompt = Box<dyn Fn() -> bool + Send + Sync>;

pub struct LocalCalendarProvider {
    root: PathBuf,
    access: CalendarAccess,
    prompt: Option<PermissionPrompt>,
}

impl LocalCalendarProvider {
    pub fn new(root: impl Into<PathBuf>, access: CalendarAccess) -> Self {
        LocalCalendarProvider {
            root: root.into(),
            access,
            prompt: None,
        }
    }

    pub fn from_config(config: &TaskdirConfig) -> Self {
        Self::new(config.calendar_path(), config.calendar_access)
    }

    /// Prompt used when access is configured as `ask`. Without one, `ask`
    /// behaves like `denied`.
    pub fn with_prompt(mut self, prompt: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.prompt = Some(Box::new(prompt));
        self
    }

    pub fn calendar_path(&self, calendar_id: &str) -> PathBuf {
        self.root.join(calendar_id)
    }

    fn spec_path(calendar_dir: &Path) -> PathBuf {
        calendar_dir.join(".taskdir/calendar.toml")
    }

    async fn load_spec(calendar_dir: &Path) -> TaskDirResult<Option<CalendarSpec>> {
        let path = Self::spec_path(calendar_dir);
        if !tokio::fs::try_exists(&path).await? {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&path).await?;
        let spec = toml::from_str(&content).map_err(|e| {
            TaskDirError::Provider(format!("Invalid calendar config {}: {}", path.display(), e))
        })?;

        Ok(Some(spec))
    }

    /// Directory name for a new calendar that doesn't clash with an existing one.
    async fn unique_slug_for(&self, name: &str) -> TaskDirResult<String> {
        let base = match slugify(name) {
            s if s.is_empty() => "calendar".to_string(),
            s => s,
        };

        if !tokio::fs::try_exists(self.root.join(&base)).await? {
            return Ok(base);
        }

        for n in 2..=100 {
            let suffixed = format!("{}-{}", base, n);
            if !tokio::fs::try_exists(self.root.join(&suffixed)).await? {
                return Ok(suffixed);
            }
        }

        Err(TaskDirError::Provider(format!(
            "Too many calendar name collisions for '{}'",
            base
        )))
    }

    /// File stem for an event, with a numeric suffix on collision.
    async fn unique_event_filename(dir: &Path, event: &EventPayload) -> TaskDirResult<String> {
        let base = base_slug_for(event);

        if !tokio::fs::try_exists(dir.join(format!("{}.ics", base))).await? {
            return Ok(format!("{}.ics", base));
        }

        for n in 2..=100 {
            let suffixed = format!("{}-{}.ics", base, n);
            if !tokio::fs::try_exists(dir.join(&suffixed)).await? {
                return Ok(suffixed);
            }
        }

        Err(TaskDirError::Provider(format!(
            "Too many filename collisions for {}",
            base
        )))
    }
}

impl CalendarProvider for LocalCalendarProvider {
    async fn request_permission(&self) -> TaskDirResult<PermissionStatus> {
        let granted = match self.access {
            CalendarAccess::Granted => true,
            CalendarAccess::Denied => false,
            CalendarAccess::Ask => self.prompt.as_ref().is_some_and(|ask| ask()),
        };

        Ok(if granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        })
    }

    async fn find_calendar_by_name(&self, name: &str) -> TaskDirResult<Option<String>> {
        if !tokio::fs::try_exists(&self.root).await? {
            return Ok(None);
        }

        let mut candidates = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                candidates.push(entry.path());
            }
        }
        candidates.sort();

        for dir in candidates {
            let Some(spec) = Self::load_spec(&dir).await? else {
                continue;
            };
            if spec.name == name {
                return Ok(dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned()));
            }
        }

        Ok(None)
    }

    async fn create_calendar(&self, spec: &CalendarSpec) -> TaskDirResult<String> {
        let slug = self.unique_slug_for(&spec.name).await?;
        let dir = self.calendar_path(&slug);

        tokio::fs::create_dir_all(dir.join(".taskdir")).await?;

        let content = toml::to_string_pretty(spec)
            .map_err(|e| TaskDirError::Provider(e.to_string()))?;
        tokio::fs::write(Self::spec_path(&dir), content).await?;

        Ok(slug)
    }

    async fn create_event(&self, calendar_id: &str, event: &EventPayload) -> TaskDirResult<String> {
        let dir = self.calendar_path(calendar_id);

        let spec = Self::load_spec(&dir)
            .await?
            .ok_or_else(|| TaskDirError::Provider(format!("Calendar not found: {}", calendar_id)))?;

        if spec.access_level != AccessLevel::Owner {
            return Err(TaskDirError::Provider(format!(
                "Calendar '{}' is read-only",
                spec.name
            )));
        }

        if event.ends_before_start() {
            return Err(TaskDirError::Provider(format!(
                "Event '{}' ends before it starts",
                event.title
            )));
        }

        let content = generate_ics(event)?;
        let filename = Self::unique_event_filename(&dir, event).await?;
        tokio::fs::write(dir.join(&filename), content).await?;

        tracing::debug!(
            target: "taskdir::calendar",
            calendar = calendar_id,
            file = %filename,
            "Wrote event"
        );

        Ok(event.uid.clone())
    }
}

/// Timed events: `YYYY-MM-DDTHHMM__slug`
/// All-day events: `YYYY-MM-DD__slug`
fn base_slug_for(event: &EventPayload) -> String {
    let slug = slugify(&event.title);

    let date = match &event.start {
        EventTime::Date(d) => d.format("%Y-%m-%d").to_string(),
        EventTime::DateTimeZoned { datetime, .. } => datetime.format("%Y-%m-%dT%H%M").to_string(),
    };

    format!("{}__{}", date, slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::event::{EventStatus, Reminder};
    use chrono::NaiveDate;

    fn make_test_event() -> EventPayload {
        EventPayload {
            uid: "t1@taskdir".to_string(),
            title: "Write report | Work".to_string(),
            notes: None,
            start: EventTime::Date(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()),
            end: EventTime::Date(NaiveDate::from_ymd_opt(2025, 3, 21).unwrap()),
            status: EventStatus::Confirmed,
            reminders: vec![Reminder { minutes: 1 }],
        }
    }

    #[test]
    fn test_base_slug_for_all_day() {
        assert_eq!(
            base_slug_for(&make_test_event()),
            "2025-03-20__write-report-work"
        );
    }

    #[tokio::test]
    async fn permission_follows_configured_access() {
        let dir = tempfile::tempdir().unwrap();

        let granted = LocalCalendarProvider::new(dir.path(), CalendarAccess::Granted);
        assert_eq!(granted.request_permission().await.unwrap(), PermissionStatus::Granted);

        let denied = LocalCalendarProvider::new(dir.path(), CalendarAccess::Denied)
            .with_prompt(|| true);
        assert_eq!(denied.request_permission().await.unwrap(), PermissionStatus::Denied);

        let ask_without_prompt = LocalCalendarProvider::new(dir.path(), CalendarAccess::Ask);
        assert_eq!(
            ask_without_prompt.request_permission().await.unwrap(),
            PermissionStatus::Denied
        );

        let ask_yes =
            LocalCalendarProvider::new(dir.path(), CalendarAccess::Ask).with_prompt(|| true);
        assert_eq!(ask_yes.request_permission().await.unwrap(), PermissionStatus::Granted);
    }

    #[tokio::test]
    async fn created_calendar_is_found_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let provider =
            LocalCalendarProvider::new(dir.path().join("calendars"), CalendarAccess::Granted);

        assert_eq!(provider.find_calendar_by_name("Task Manager").await.unwrap(), None);

        let id = provider
            .create_calendar(&CalendarSpec::app_calendar())
            .await
            .unwrap();
        assert_eq!(id, "task-manager");
        assert_eq!(
            provider.find_calendar_by_name("Task Manager").await.unwrap(),
            Some("task-manager".to_string())
        );

        let content = std::fs::read_to_string(
            dir.path().join("calendars/task-manager/.taskdir/calendar.toml"),
        )
        .unwrap();
        assert!(content.contains("owner_account = \"personal\""), "{content}");
        assert!(content.contains("access_level = \"owner\""), "{content}");
    }

    #[tokio::test]
    async fn calendar_slug_avoids_unrelated_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("task-manager")).unwrap();
        let provider = LocalCalendarProvider::new(dir.path(), CalendarAccess::Granted);

        // A plain directory without calendar config is not our calendar
        assert_eq!(provider.find_calendar_by_name("Task Manager").await.unwrap(), None);

        let id = provider
            .create_calendar(&CalendarSpec::app_calendar())
            .await
            .unwrap();
        assert_eq!(id, "task-manager-2");
    }

    #[tokio::test]
    async fn events_get_unique_files() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalCalendarProvider::new(dir.path(), CalendarAccess::Granted);
        let id = provider
            .create_calendar(&CalendarSpec::app_calendar())
            .await
            .unwrap();

        let event = make_test_event();
        assert_eq!(provider.create_event(&id, &event).await.unwrap(), "t1@taskdir");
        provider.create_event(&id, &event).await.unwrap();

        let cal_dir = dir.path().join(&id);
        assert!(cal_dir.join("2025-03-20__write-report-work.ics").exists());
        assert!(cal_dir.join("2025-03-20__write-report-work-2.ics").exists());
    }

    #[tokio::test]
    async fn event_into_unknown_calendar_fails() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalCalendarProvider::new(dir.path(), CalendarAccess::Granted);

        let err = provider
            .create_event("nope", &make_test_event())
            .await
            .unwrap_err();
        assert!(matches!(err, TaskDirError::Provider(msg) if msg.contains("nope")));
    }

    #[tokio::test]
    async fn read_only_calendar_refuses_events() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalCalendarProvider::new(dir.path(), CalendarAccess::Granted);
        let spec = CalendarSpec {
            access_level: AccessLevel::Read,
            ..CalendarSpec::app_calendar()
        };
        let id = provider.create_calendar(&spec).await.unwrap();

        let err = provider
            .create_event(&id, &make_test_event())
            .await
            .unwrap_err();

        assert!(matches!(err, TaskDirError::Provider(msg) if msg.contains("read-only")));
        assert_eq!(std::fs::read_dir(dir.path().join(&id)).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn inverted_event_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalCalendarProvider::new(dir.path(), CalendarAccess::Granted);
        let id = provider
            .create_calendar(&CalendarSpec::app_calendar())
            .await
            .unwrap();

        let mut event = make_test_event();
        event.end = EventTime::Date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());

        assert!(provider.create_event(&id, &event).await.is_err());
        assert_eq!(std::fs::read_dir(dir.path().join(&id)).unwrap().count(), 1);
    }
}
