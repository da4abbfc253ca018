//! Read-only projections of the stored collections for display.

use crate::model::{Category, Task};

/// A category together with the number of tasks filed under it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: Category,
    pub task_count: usize,
}

/// Most recently created tasks first.
pub fn in_progress(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

/// Every category in stored order with its task count.
pub fn category_summaries(categories: &[Category], tasks: &[Task]) -> Vec<CategorySummary> {
    categories
        .iter()
        .map(|category| CategorySummary {
            category: category.clone(),
            task_count: tasks
                .iter()
                .filter(|t| t.category_id == category.id)
                .count(),
        })
        .collect()
}

/// Tasks of one category, in stored order.
pub fn tasks_in_category(tasks: &[Task], category_id: &str) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| t.category_id == category_id)
        .cloned()
        .collect()
}

/// Tasks ordered by when they start. Ties keep stored order.
pub fn chronological(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|t| t.starts_at());
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    fn task(id: &str, category_id: &str, day: u32, created_hour: u32) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            category_id: category_id.to_string(),
            description: None,
            completed: false,
            to_do: vec![],
            start_date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            start_time: None,
            end_time: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, created_hour, 0, 0).unwrap(),
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn in_progress_is_newest_first() {
        let tasks = vec![task("a", "c1", 1, 8), task("b", "c1", 2, 10), task("c", "c2", 3, 9)];
        assert_eq!(ids(&in_progress(&tasks)), vec!["b", "c", "a"]);
    }

    #[test]
    fn summaries_count_tasks_per_category() {
        let categories = vec![
            Category {
                id: "c1".to_string(),
                title: "Work".to_string(),
            },
            Category {
                id: "c2".to_string(),
                title: "Home".to_string(),
            },
        ];
        let tasks = vec![task("a", "c1", 1, 8), task("b", "c1", 2, 10)];

        let summaries = category_summaries(&categories, &tasks);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].task_count, 2);
        assert_eq!(summaries[1].task_count, 0);
    }

    #[test]
    fn tasks_in_category_keeps_order() {
        let tasks = vec![task("a", "c1", 5, 8), task("b", "c2", 2, 10), task("c", "c1", 1, 9)];
        assert_eq!(ids(&tasks_in_category(&tasks, "c1")), vec!["a", "c"]);
    }

    #[test]
    fn chronological_orders_by_start_then_time() {
        let mut late = task("late", "c1", 2, 8);
        late.start_time = NaiveTime::from_hms_opt(18, 0, 0);
        let mut early = task("early", "c1", 2, 8);
        early.start_time = NaiveTime::from_hms_opt(7, 30, 0);
        let tasks = vec![late, task("first", "c1", 1, 8), early];

        assert_eq!(ids(&chronological(&tasks)), vec!["first", "early", "late"]);
    }
}
