//! Error types for taskdir.

use thiserror::Error;

/// Errors that can occur in taskdir operations.
///
/// Every variant is scoped to the single user action that produced it; none
/// of them is fatal to the process.
#[derive(Error, Debug)]
pub enum TaskDirError {
    /// Required user input is missing or invalid. Nothing was written.
    #[error("{0}")]
    Validation(String),

    #[error("Could not read '{collection}': {reason}")]
    StorageRead { collection: String, reason: String },

    #[error("Could not write '{collection}': {reason}")]
    StorageWrite { collection: String, reason: String },

    /// The category was removed but writing the filtered task list failed.
    /// The orphaned tasks are pruned the next time the store is opened.
    #[error(
        "Category '{category}' was removed but its tasks could not be: {source}. \
         They will be cleaned up on next start"
    )]
    CascadeIncomplete {
        category: String,
        #[source]
        source: Box<TaskDirError>,
    },

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Checklist item not found: {0}")]
    ChecklistItemNotFound(String),

    #[error("Calendar sync failed: {0}")]
    CalendarSync(String),

    #[error("Calendar provider error: {0}")]
    Provider(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TaskDirError {
    pub fn storage_read(collection: &str, reason: impl ToString) -> Self {
        TaskDirError::StorageRead {
            collection: collection.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn storage_write(collection: &str, reason: impl ToString) -> Self {
        TaskDirError::StorageWrite {
            collection: collection.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether the failure left nothing behind and the user can simply retry
    /// with corrected input.
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskDirError::Validation(_))
    }
}

/// Result type alias for taskdir operations.
pub type TaskDirResult<T> = Result<T, TaskDirError>;
