//! JSON files on disk, one per key.

use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use super::KeyValueStore;
use crate::error::{TaskDirError, TaskDirResult};

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes land in a temporary file in the same directory which is then
/// renamed over the target, so a reader sees either the old or the new value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> TaskDirResult<Option<String>> {
        let path = self.path_for(key);

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TaskDirError::storage_read(
                key,
                format!("{}: {}", path.display(), e),
            )),
        }
    }

    fn set(&self, key: &str, value: &str) -> TaskDirResult<()> {
        let path = self.path_for(key);
        let write_err = |e: std::io::Error| {
            TaskDirError::storage_write(key, format!("{}: {}", path.display(), e))
        };

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(value.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        tracing::trace!(
            target: "taskdir::store",
            path = %path.display(),
            bytes = value.len(),
            "Wrote key"
        );

        Ok(())
    }
}
