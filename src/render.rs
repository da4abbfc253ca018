//! Colored terminal rendering for taskdir-core types.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use taskdir_core::calendar::SyncOutcome;
use taskdir_core::model::{Category, ChecklistProgress, ChecklistStatus, Task};
use taskdir_core::views::CategorySummary;

pub trait Render {
    fn render(&self) -> String;
}

/// Dates are shown day first.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// "20/03/2025" or "20/03/2025 - 22/03/2025", with times when set.
pub fn format_period(task: &Task) -> String {
    let start = match task.start_time {
        Some(t) => format!("{} {}", format_date(task.start_date), t.format("%H:%M")),
        None => format_date(task.start_date),
    };
    let end = match task.end_time {
        Some(t) => format!("{} {}", format_date(task.end_date), t.format("%H:%M")),
        None => format_date(task.end_date),
    };

    if start == end {
        start
    } else {
        format!("{} - {}", start, end)
    }
}

impl Render for ChecklistProgress {
    fn render(&self) -> String {
        if self.total == 0 {
            return String::new();
        }

        let text = format!("{}/{} ({}%)", self.done, self.total, self.percent());
        if self.done == self.total {
            text.green().to_string()
        } else {
            text.yellow().to_string()
        }
    }
}

impl Render for Task {
    fn render(&self) -> String {
        let mut line = format!("{} {}", self.title, format_period(self).dimmed());

        let progress = self.progress().render();
        if !progress.is_empty() {
            line.push(' ');
            line.push_str(&progress);
        }

        line
    }
}

impl Render for Category {
    fn render(&self) -> String {
        format!("🗂  {}", self.title.bold())
    }
}

impl Render for CategorySummary {
    fn render(&self) -> String {
        let count = format!(
            "{} {}",
            self.task_count,
            if self.task_count == 1 { "task" } else { "tasks" }
        );
        format!("{} {}", self.category.render(), count.dimmed())
    }
}

impl Render for SyncOutcome {
    fn render(&self) -> String {
        match self {
            SyncOutcome::Done { calendar_id, .. } => {
                format!("📅 Added to calendar '{}'", calendar_id).green().to_string()
            }
            SyncOutcome::RejectedLocally(e) => {
                format!("Not added to calendar: {}", e).yellow().to_string()
            }
            SyncOutcome::PermissionDenied => {
                "Calendar access denied. The task was saved without an event."
                    .yellow()
                    .to_string()
            }
            SyncOutcome::Failed(e) => format!("Could not add to calendar: {}", e).red().to_string(),
        }
    }
}

/// Full details of one task, one line per field.
pub fn render_task_details(task: &Task, category: &Category) -> Vec<String> {
    let mut lines = vec![
        task.title.bold().to_string(),
        format!("   {} {}", "Category:".dimmed(), category.title),
        format!("   {} {}", "When:".dimmed(), format_period(task)),
        format!("   {} {}", "Id:".dimmed(), task.id.dimmed()),
    ];

    if let Some(ref description) = task.description {
        lines.push(format!("   {} {}", "Notes:".dimmed(), description));
    }

    if !task.to_do.is_empty() {
        lines.push(format!(
            "   {} {}",
            "Checklist:".dimmed(),
            task.progress().render()
        ));
        for (i, item) in task.to_do.iter().enumerate() {
            let mark = match item.status {
                ChecklistStatus::Done => "[x]".green().to_string(),
                ChecklistStatus::NotStarted => "[ ]".to_string(),
            };
            lines.push(format!("   {:>3}. {} {}", i + 1, mark, item.label));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};

    fn make_test_task() -> Task {
        Task {
            id: "t1".to_string(),
            title: "Write report".to_string(),
            category_id: "c1".to_string(),
            description: None,
            completed: false,
            to_do: vec![],
            start_date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            start_time: None,
            end_time: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_date_is_day_first() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(format_date(date), "05/03/2025");
    }

    #[test]
    fn test_format_period() {
        let mut task = make_test_task();
        assert_eq!(format_period(&task), "20/03/2025");

        task.end_date = NaiveDate::from_ymd_opt(2025, 3, 22).unwrap();
        assert_eq!(format_period(&task), "20/03/2025 - 22/03/2025");

        task.start_time = NaiveTime::from_hms_opt(9, 0, 0);
        assert_eq!(format_period(&task), "20/03/2025 09:00 - 22/03/2025");
    }

    #[test]
    fn test_empty_checklist_renders_nothing() {
        let progress = ChecklistProgress { done: 0, total: 0 };
        assert_eq!(progress.render(), "");
    }
}
