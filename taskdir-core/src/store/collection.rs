//! Load-all / save-all primitives shared by every collection.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KeyValueStore, Record};
use crate::error::{TaskDirError, TaskDirResult};

/// Load every record of a collection, in stored order.
///
/// An absent key is an empty collection. A payload that is not a valid JSON
/// array of records is a read error, never "empty".
pub fn load<T, S>(kv: &S) -> TaskDirResult<Vec<T>>
where
    T: Record + DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = kv.get(T::COLLECTION)? else {
        return Ok(Vec::new());
    };

    serde_json::from_str(&raw).map_err(|e| TaskDirError::storage_read(T::COLLECTION, e))
}

/// Serialize the full collection and overwrite whatever was stored.
pub fn save<T, S>(kv: &S, records: &[T]) -> TaskDirResult<()>
where
    T: Record + Serialize,
    S: KeyValueStore + ?Sized,
{
    let json =
        serde_json::to_string(records).map_err(|e| TaskDirError::storage_write(T::COLLECTION, e))?;

    kv.set(T::COLLECTION, &json)?;

    tracing::debug!(
        target: "taskdir::store",
        collection = T::COLLECTION,
        records = records.len(),
        "Saved collection"
    );

    Ok(())
}

/// Append a record at the tail of its collection.
pub fn add<T, S>(kv: &S, record: T) -> TaskDirResult<()>
where
    T: Record + Serialize + DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let mut records: Vec<T> = load(kv)?;
    records.push(record);
    save(kv, &records)
}

/// Drop every record matching `predicate` and return the removed ones.
///
/// Survivors keep their relative order. Nothing is written when no record
/// matches.
pub fn remove_where<T, S, F>(kv: &S, predicate: F) -> TaskDirResult<Vec<T>>
where
    T: Record + Serialize + DeserializeOwned,
    S: KeyValueStore + ?Sized,
    F: Fn(&T) -> bool,
{
    let records: Vec<T> = load(kv)?;
    let (removed, kept): (Vec<T>, Vec<T>) = records.into_iter().partition(|r| predicate(r));

    if !removed.is_empty() {
        save(kv, &kept)?;
    }

    Ok(removed)
}

/// Replace the record with `id` by the result of `update`, in place.
///
/// Returns `None` without writing when no record has that id. The id of the
/// replacement is forced back to `id`.
pub fn update_by_id<T, S, F>(kv: &S, id: &str, update: F) -> TaskDirResult<Option<T>>
where
    T: Record + Clone + Serialize + DeserializeOwned,
    S: KeyValueStore + ?Sized,
    F: FnOnce(&T) -> TaskDirResult<T>,
{
    let mut records: Vec<T> = load(kv)?;

    let Some(position) = records.iter().position(|r| r.id() == id) else {
        return Ok(None);
    };

    let updated = update(&records[position])?;
    if updated.id() != id {
        return Err(TaskDirError::Validation(format!(
            "Record id is immutable (tried to change '{}' to '{}')",
            id,
            updated.id()
        )));
    }

    records[position] = updated.clone();
    save(kv, &records)?;

    Ok(Some(updated))
}
