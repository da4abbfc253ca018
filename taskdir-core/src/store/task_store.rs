//! Domain operations over the task and category collections.

use std::collections::HashSet;

use super::{KeyValueStore, collection};
use crate::error::{TaskDirError, TaskDirResult};
use crate::model::{Category, CategoryDraft, ChecklistStatus, Task, TaskDraft};

/// The application's single entry point to persisted tasks and categories.
///
/// Construct it once at startup with [`TaskStore::open`] and hand it to
/// whatever drives the user flows. Every method re-reads storage, so the
/// store holds no cached state of its own.
pub struct TaskStore<S> {
    kv: S,
}

/// What a category removal took with it.
#[derive(Debug, Clone)]
pub struct CategoryRemoval {
    pub category: Category,
    pub removed_tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Open the store and repair any tasks left behind by an interrupted
    /// category removal.
    pub fn open(kv: S) -> TaskDirResult<Self> {
        let store = TaskStore { kv };
        store.reconcile()?;
        Ok(store)
    }

    /// Drop tasks whose category no longer exists and return how many were
    /// dropped. `tasks` is rewritten only when something changed.
    pub fn reconcile(&self) -> TaskDirResult<usize> {
        let category_ids: HashSet<String> =
            self.categories()?.into_iter().map(|c| c.id).collect();

        let orphans = collection::remove_where::<Task, _, _>(&self.kv, |t| {
            !category_ids.contains(&t.category_id)
        })?;

        if !orphans.is_empty() {
            tracing::warn!(
                target: "taskdir::store",
                count = orphans.len(),
                "Removed tasks whose category no longer exists"
            );
        }

        Ok(orphans.len())
    }

    // CATEGORIES:

    pub fn categories(&self) -> TaskDirResult<Vec<Category>> {
        collection::load(&self.kv)
    }

    pub fn category(&self, id: &str) -> TaskDirResult<Category> {
        self.categories()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| TaskDirError::CategoryNotFound(id.to_string()))
    }

    /// Resolve a category from user input: an exact id, or a title compared
    /// case-insensitively.
    pub fn find_category(&self, id_or_title: &str) -> TaskDirResult<Category> {
        let categories = self.categories()?;

        categories
            .iter()
            .find(|c| c.id == id_or_title)
            .or_else(|| categories.iter().find(|c| c.has_title(id_or_title)))
            .cloned()
            .ok_or_else(|| TaskDirError::CategoryNotFound(id_or_title.to_string()))
    }

    pub fn add_category(&self, draft: &CategoryDraft) -> TaskDirResult<Category> {
        let category = draft.validate()?;

        if self.categories()?.iter().any(|c| c.has_title(&category.title)) {
            return Err(TaskDirError::Validation(format!(
                "A category named '{}' already exists",
                category.title
            )));
        }

        collection::add(&self.kv, category.clone())?;

        tracing::info!(
            target: "taskdir::store",
            id = %category.id,
            title = %category.title,
            "Added category"
        );

        Ok(category)
    }

    /// Remove a category and every task in it.
    ///
    /// The two collections are written one after the other, not atomically.
    /// If the task write fails the category is already gone; the error is
    /// reported as [`TaskDirError::CascadeIncomplete`] and the leftover tasks
    /// are dropped by the next [`reconcile`](Self::reconcile).
    pub fn remove_category(&self, id: &str) -> TaskDirResult<CategoryRemoval> {
        let category = self.category(id)?;

        collection::remove_where::<Category, _, _>(&self.kv, |c| c.id == category.id)?;

        let removed_tasks =
            collection::remove_where::<Task, _, _>(&self.kv, |t| t.category_id == category.id)
                .map_err(|e| {
                    tracing::error!(
                        target: "taskdir::store",
                        category = %category.title,
                        error = %e,
                        "Category removed but its tasks were not"
                    );
                    TaskDirError::CascadeIncomplete {
                        category: category.title.clone(),
                        source: Box::new(e),
                    }
                })?;

        tracing::info!(
            target: "taskdir::store",
            id = %category.id,
            title = %category.title,
            tasks = removed_tasks.len(),
            "Removed category"
        );

        Ok(CategoryRemoval {
            category,
            removed_tasks,
        })
    }

    // TASKS:

    pub fn tasks(&self) -> TaskDirResult<Vec<Task>> {
        collection::load(&self.kv)
    }

    pub fn task(&self, id: &str) -> TaskDirResult<Task> {
        self.tasks()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskDirError::TaskNotFound(id.to_string()))
    }

    /// Validate a draft and append the resulting task.
    ///
    /// Missing input is rejected before storage is touched. The category must
    /// exist at write time.
    pub fn add_task(&self, draft: &TaskDraft) -> TaskDirResult<Task> {
        let task = draft.validate()?;

        if !self.categories()?.iter().any(|c| c.id == task.category_id) {
            return Err(TaskDirError::Validation(format!(
                "Category '{}' does not exist",
                task.category_id
            )));
        }

        collection::add(&self.kv, task.clone())?;

        tracing::info!(
            target: "taskdir::store",
            id = %task.id,
            title = %task.title,
            "Added task"
        );

        Ok(task)
    }

    pub fn remove_task(&self, id: &str) -> TaskDirResult<Task> {
        let removed = collection::remove_where::<Task, _, _>(&self.kv, |t| t.id == id)?;

        let task = removed
            .into_iter()
            .next()
            .ok_or_else(|| TaskDirError::TaskNotFound(id.to_string()))?;

        tracing::info!(target: "taskdir::store", id = %task.id, "Removed task");

        Ok(task)
    }

    /// Replace one task with the result of `update`, keeping its position
    /// and id. Moving a task to a category that does not exist is rejected.
    pub fn update_task<F>(&self, id: &str, update: F) -> TaskDirResult<Task>
    where
        F: FnOnce(&Task) -> TaskDirResult<Task>,
    {
        let category_ids: HashSet<String> =
            self.categories()?.into_iter().map(|c| c.id).collect();

        collection::update_by_id::<Task, _, _>(&self.kv, id, |current| {
            let updated = update(current)?;
            if !category_ids.contains(&updated.category_id) {
                return Err(TaskDirError::Validation(format!(
                    "Category '{}' does not exist",
                    updated.category_id
                )));
            }
            Ok(updated)
        })?
        .ok_or_else(|| TaskDirError::TaskNotFound(id.to_string()))
    }

    pub fn set_checklist_status(
        &self,
        task_id: &str,
        item_id: &str,
        status: ChecklistStatus,
    ) -> TaskDirResult<Task> {
        self.update_task(task_id, |task| task.with_checklist_status(item_id, status))
    }

    /// Flip one checklist entry between not started and done.
    pub fn toggle_checklist_item(&self, task_id: &str, item_id: &str) -> TaskDirResult<Task> {
        self.update_task(task_id, |task| {
            let current = task
                .checklist_item(item_id)
                .ok_or_else(|| TaskDirError::ChecklistItemNotFound(item_id.to_string()))?
                .status;
            task.with_checklist_status(item_id, current.toggled())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{DateTime, NaiveDate};

    fn task(id: &str, category_id: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            category_id: category_id.to_string(),
            description: None,
            completed: false,
            to_do: vec![],
            start_date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            start_time: None,
            end_time: None,
            created_at: DateTime::default(),
        }
    }

    fn category(id: &str, title: &str) -> Category {
        Category {
            id: id.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn open_prunes_orphaned_tasks() {
        let kv = MemoryStore::new();
        collection::save(&kv, &[category("c1", "Work")]).unwrap();
        collection::save(&kv, &[task("t1", "c1"), task("t2", "gone"), task("t3", "c1")])
            .unwrap();

        let store = TaskStore::open(&kv).unwrap();
        let ids: Vec<_> = store.tasks().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["t1", "t3"]);
    }

    #[test]
    fn open_on_consistent_data_writes_nothing() {
        let kv = MemoryStore::new();
        collection::save(&kv, &[category("c1", "Work")]).unwrap();
        collection::save(&kv, &[task("t1", "c1")]).unwrap();
        kv.fail_writes("tasks");

        let store = TaskStore::open(&kv).unwrap();
        assert_eq!(store.reconcile().unwrap(), 0);
    }

    #[test]
    fn duplicate_category_title_is_rejected() {
        let store = TaskStore::open(MemoryStore::new()).unwrap();
        store.add_category(&CategoryDraft::new("Work")).unwrap();

        let err = store.add_category(&CategoryDraft::new("work")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.categories().unwrap().len(), 1);
    }

    #[test]
    fn find_category_by_id_or_title() {
        let kv = MemoryStore::new();
        collection::save(&kv, &[category("c1", "Work"), category("c2", "Home")]).unwrap();
        let store = TaskStore::open(&kv).unwrap();

        assert_eq!(store.find_category("c2").unwrap().title, "Home");
        assert_eq!(store.find_category("WORK").unwrap().id, "c1");
        assert!(matches!(
            store.find_category("Gym"),
            Err(TaskDirError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn add_task_requires_existing_category() {
        let store = TaskStore::open(MemoryStore::new()).unwrap();
        let draft = TaskDraft {
            title: "Report".to_string(),
            category_id: Some("missing".to_string()),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 20),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 21),
            ..TaskDraft::default()
        };

        let err = store.add_task(&draft).unwrap_err();
        assert!(err.is_validation());
        assert!(store.tasks().unwrap().is_empty());
    }

    #[test]
    fn remove_unknown_task() {
        let store = TaskStore::open(MemoryStore::new()).unwrap();
        assert!(matches!(
            store.remove_task("nope"),
            Err(TaskDirError::TaskNotFound(_))
        ));
    }

    #[test]
    fn update_task_cannot_point_at_missing_category() {
        let kv = MemoryStore::new();
        collection::save(&kv, &[category("c1", "Work")]).unwrap();
        collection::save(&kv, &[task("t1", "c1")]).unwrap();
        let store = TaskStore::open(&kv).unwrap();

        let err = store
            .update_task("t1", |t| {
                Ok(Task {
                    category_id: "c9".to_string(),
                    ..t.clone()
                })
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.task("t1").unwrap().category_id, "c1");
    }

    #[test]
    fn failed_cascade_is_reported_and_repaired_on_open() {
        let kv = MemoryStore::new();
        collection::save(&kv, &[category("c1", "Work"), category("c2", "Home")]).unwrap();
        collection::save(&kv, &[task("t1", "c1"), task("t2", "c2")]).unwrap();
        let store = TaskStore::open(&kv).unwrap();

        kv.fail_writes("tasks");
        let err = store.remove_category("c1").unwrap_err();
        assert!(
            matches!(&err, TaskDirError::CascadeIncomplete { category, .. } if category == "Work"),
            "unexpected error: {err:?}"
        );

        // Category is gone, its task lingers until the next open
        assert_eq!(store.categories().unwrap(), vec![category("c2", "Home")]);
        assert_eq!(store.tasks().unwrap().len(), 2);

        kv.restore_writes("tasks");
        let reopened = TaskStore::open(&kv).unwrap();
        let ids: Vec<_> = reopened.tasks().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["t2"]);
    }
}
