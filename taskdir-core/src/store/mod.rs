//! Local persistence for tasks and categories.
//!
//! Each collection is a JSON array stored whole under a string key. There is
//! no partial update: every mutation loads the full collection, transforms it
//! in memory, and writes it back. Concurrent writers are not coordinated, so
//! the last save wins.

mod collection;
mod file;
mod memory;
mod task_store;

pub use collection::{add, load, remove_where, save, update_by_id};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use task_store::{CategoryRemoval, TaskStore};

use crate::error::TaskDirResult;

/// A record that lives in a named collection and is addressed by id.
pub trait Record {
    /// Storage key of the collection holding this record type.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

/// Whole-value string storage addressed by key.
///
/// `set` replaces the previous value entirely; readers never observe a
/// partially written value.
pub trait KeyValueStore {
    /// Value stored under `key`, or `None` if nothing was ever stored.
    fn get(&self, key: &str) -> TaskDirResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> TaskDirResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> TaskDirResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> TaskDirResult<()> {
        (**self).set(key, value)
    }
}
