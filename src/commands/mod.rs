pub mod category;
pub mod home;
pub mod task;

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use taskdir_core::config::TaskdirConfig;
use taskdir_core::model::{Task, titles_match};
use taskdir_core::store::{FileStore, TaskStore};

/// Everything a command needs: configuration and the opened store.
pub struct Context {
    pub config: TaskdirConfig,
    pub store: TaskStore<FileStore>,
}

impl Context {
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let config = TaskdirConfig::load().context("Failed to load config")?;
        let data_dir = data_dir.unwrap_or_else(|| config.data_path());

        let store = TaskStore::open(FileStore::new(&data_dir))
            .with_context(|| format!("Failed to open task data in {}", data_dir.display()))?;

        Ok(Context { config, store })
    }

    /// Look a task up by exact id, unique id prefix, or unique title.
    pub fn resolve_task(&self, key: &str) -> Result<Task> {
        if key.trim().is_empty() {
            bail!("Task id or title must not be empty");
        }

        let tasks = self.store.tasks()?;

        if let Some(task) = tasks.iter().find(|t| t.id == key) {
            return Ok(task.clone());
        }

        let by_prefix: Vec<&Task> = tasks.iter().filter(|t| t.id.starts_with(key)).collect();
        let by_title: Vec<&Task> = tasks
            .iter()
            .filter(|t| titles_match(&t.title, key))
            .collect();

        let matches = if by_prefix.is_empty() { by_title } else { by_prefix };

        match matches.as_slice() {
            [task] => Ok((*task).clone()),
            [] => bail!("Task '{}' not found", key),
            many => bail!(
                "'{}' matches {} tasks. Use the task id instead:\n{}",
                key,
                many.len(),
                many.iter()
                    .map(|t| format!("  {}  {}", t.id, t.title))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use taskdir_core::model::{CategoryDraft, TaskDraft};

    fn context_with_task(dir: &std::path::Path, title: &str) -> (Context, Task) {
        let store = TaskStore::open(FileStore::new(dir)).unwrap();
        let work = store.add_category(&CategoryDraft::new("Work")).unwrap();
        let task = store
            .add_task(&TaskDraft {
                title: title.to_string(),
                category_id: Some(work.id),
                start_date: NaiveDate::from_ymd_opt(2025, 3, 20),
                end_date: NaiveDate::from_ymd_opt(2025, 3, 20),
                ..Default::default()
            })
            .unwrap();
        let ctx = Context {
            config: TaskdirConfig::default(),
            store,
        };
        (ctx, task)
    }

    #[test]
    fn test_blank_key_matches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _) = context_with_task(dir.path(), "Consulta médica");

        assert!(ctx.resolve_task("").is_err());
        assert!(ctx.resolve_task("   ").is_err());
        assert_eq!(ctx.store.tasks().unwrap().len(), 1);
    }

    #[test]
    fn test_resolve_task_by_prefix_or_title() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, task) = context_with_task(dir.path(), "Consulta médica");

        assert_eq!(ctx.resolve_task(&task.id[..8]).unwrap(), task);
        assert_eq!(ctx.resolve_task("CONSULTA MÉDICA").unwrap(), task);
        assert!(ctx.resolve_task("other").is_err());
    }
}
