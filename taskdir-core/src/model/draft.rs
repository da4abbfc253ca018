//! Raw user input for new records, validated before anything is stored.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{TaskDirError, TaskDirResult};
use crate::model::{Category, ChecklistItem, ChecklistStatus, Task};
use crate::utils::new_id;

#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    pub title: String,
}

impl CategoryDraft {
    pub fn new(title: impl Into<String>) -> Self {
        CategoryDraft {
            title: title.into(),
        }
    }

    pub fn validate(&self) -> TaskDirResult<Category> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(missing_fields(&["title"]));
        }
        Ok(Category::new(title))
    }
}

/// Input collected by the add-task flow.
///
/// Title, category, start date and end date are required; everything else
/// is optional.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub category_id: Option<String>,
    pub description: Option<String>,
    pub checklist: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl TaskDraft {
    /// Validate and build a task stamped with the current time.
    pub fn validate(&self) -> TaskDirResult<Task> {
        self.validate_at(Utc::now())
    }

    /// Validate and build a task with an explicit creation timestamp.
    ///
    /// All missing required fields are reported together.
    pub fn validate_at(&self, created_at: DateTime<Utc>) -> TaskDirResult<Task> {
        let title = self.title.trim();
        let category_id = self
            .category_id
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let mut missing = Vec::new();
        if title.is_empty() {
            missing.push("title");
        }
        if category_id.is_none() {
            missing.push("category");
        }
        if self.start_date.is_none() {
            missing.push("start date");
        }
        if self.end_date.is_none() {
            missing.push("end date");
        }

        let (Some(category_id), Some(start_date), Some(end_date), false) = (
            category_id,
            self.start_date,
            self.end_date,
            title.is_empty(),
        ) else {
            return Err(missing_fields(&missing));
        };

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        // Blank checklist entries are ignored, as the add form does.
        let to_do = self
            .checklist
            .iter()
            .map(|label| label.trim())
            .filter(|label| !label.is_empty())
            .map(|label| ChecklistItem {
                id: new_id(),
                label: label.to_string(),
                status: ChecklistStatus::NotStarted,
            })
            .collect();

        Ok(Task {
            id: new_id(),
            title: title.to_string(),
            category_id: category_id.to_string(),
            description,
            completed: false,
            to_do,
            start_date,
            end_date,
            start_time: self.start_time,
            end_time: self.end_time,
            created_at,
        })
    }
}

fn missing_fields(fields: &[&str]) -> TaskDirError {
    TaskDirError::Validation(format!(
        "Some required fields are empty: {}",
        fields.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> TaskDraft {
        TaskDraft {
            title: "  Write report ".to_string(),
            category_id: Some("c1".to_string()),
            description: Some("Quarterly numbers".to_string()),
            checklist: vec!["Outline".to_string(), "   ".to_string(), "Draft".to_string()],
            start_date: NaiveDate::from_ymd_opt(2025, 3, 20),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 21),
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: None,
        }
    }

    #[test]
    fn valid_draft_builds_task_matching_input() {
        let created_at = Utc::now();
        let task = complete_draft().validate_at(created_at).unwrap();

        assert_eq!(task.title, "Write report");
        assert_eq!(task.category_id, "c1");
        assert_eq!(task.description.as_deref(), Some("Quarterly numbers"));
        assert_eq!(task.start_date, NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert_eq!(task.end_date, NaiveDate::from_ymd_opt(2025, 3, 21).unwrap());
        assert_eq!(task.start_time, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(task.end_time, None);
        assert_eq!(task.created_at, created_at);
        assert!(!task.completed);

        let labels: Vec<_> = task.to_do.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Outline", "Draft"]);
        assert!(task.to_do.iter().all(|i| i.status == ChecklistStatus::NotStarted));
        assert_ne!(task.to_do[0].id, task.to_do[1].id);
    }

    #[test]
    fn empty_title_is_rejected() {
        let draft = TaskDraft {
            title: "   ".to_string(),
            ..complete_draft()
        };
        let err = draft.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn every_missing_field_is_reported() {
        let err = TaskDraft::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Some required fields are empty: title, category, start date, end date"
        );
    }

    #[test]
    fn category_title_is_trimmed_and_required() {
        assert_eq!(CategoryDraft::new("  Work ").validate().unwrap().title, "Work");
        assert!(CategoryDraft::new("").validate().unwrap_err().is_validation());
    }
}
