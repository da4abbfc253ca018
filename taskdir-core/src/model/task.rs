use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::TASKS_COLLECTION;
use crate::error::{TaskDirError, TaskDirResult};
use crate::store::Record;

/// A task with its checklist and date range.
///
/// Fields introduced after the first stored schema fall back to their
/// defaults when absent, so older records still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Id of the owning category.
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kept for compatibility with stored data; progress is tracked per
    /// checklist item instead.
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub to_do: Vec<ChecklistItem>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

/// One entry of a task's checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    #[serde(rename = "task")]
    pub label: String,
    #[serde(default)]
    pub status: ChecklistStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistStatus {
    #[default]
    NotStarted,
    Done,
}

impl ChecklistStatus {
    pub fn toggled(self) -> Self {
        match self {
            ChecklistStatus::NotStarted => ChecklistStatus::Done,
            ChecklistStatus::Done => ChecklistStatus::NotStarted,
        }
    }

    pub fn is_done(self) -> bool {
        self == ChecklistStatus::Done
    }
}

/// How many checklist items of a task are done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistProgress {
    pub done: usize,
    pub total: usize,
}

impl ChecklistProgress {
    /// Whole-number percentage; an empty checklist counts as 0%.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.done * 100) / self.total) as u8
    }
}

impl Task {
    pub fn checklist_item(&self, item_id: &str) -> Option<&ChecklistItem> {
        self.to_do.iter().find(|item| item.id == item_id)
    }

    /// Copy of this task with one checklist entry's status replaced.
    ///
    /// Other entries keep their position and contents.
    pub fn with_checklist_status(
        &self,
        item_id: &str,
        status: ChecklistStatus,
    ) -> TaskDirResult<Task> {
        if self.checklist_item(item_id).is_none() {
            return Err(TaskDirError::ChecklistItemNotFound(item_id.to_string()));
        }

        let to_do = self
            .to_do
            .iter()
            .map(|item| {
                if item.id == item_id {
                    ChecklistItem {
                        status,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();

        Ok(Task {
            to_do,
            ..self.clone()
        })
    }

    pub fn progress(&self) -> ChecklistProgress {
        ChecklistProgress {
            done: self.to_do.iter().filter(|i| i.status.is_done()).count(),
            total: self.to_do.len(),
        }
    }

    /// Start of the task as a wall-clock time, midnight when no start time
    /// was given. Used for chronological ordering.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.start_date
            .and_time(self.start_time.unwrap_or(NaiveTime::MIN))
    }
}

impl Record for Task {
    const COLLECTION: &'static str = TASKS_COLLECTION;

    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
