//! Task and category records as they are persisted.

mod category;
mod draft;
mod task;

pub use category::{Category, titles_match};
pub use draft::{CategoryDraft, TaskDraft};
pub use task::{ChecklistItem, ChecklistProgress, ChecklistStatus, Task};
