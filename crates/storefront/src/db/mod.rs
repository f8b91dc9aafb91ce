//! Persistence for the storefront.
//!
//! Everything durable lives in a [`KeyValueStore`] under two keys:
//!
//! - `mrdaebak_users` - The member registry, a JSON array of users
//! - `mrdaebak_orders` - The order ledger, a JSON array of orders
//!
//! Each repository loads the whole list, changes it and writes it back.
//! Reads are forgiving: a missing or unparseable list loads as empty, and a
//! single malformed record is skipped with a warning instead of failing the
//! whole list. Skipped records are still written back verbatim when the list
//! is rewritten, so a record this build cannot read is never lost.

pub mod orders;
pub mod store;
pub mod users;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use orders::OrderRepository;
pub use store::{FileStore, MemoryStore};
pub use users::UserRepository;

/// Storage key of the member registry.
pub const USERS_KEY: &str = "mrdaebak_users";

/// Storage key of the order ledger.
pub const ORDERS_KEY: &str = "mrdaebak_orders";

/// Failure of the underlying key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store lock poisoned")]
    Poisoned,

    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store itself failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Data could not be encoded for storage.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// String-keyed, string-valued durable storage.
///
/// Each call is atomic on its own; a get followed by a set is not.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One stored record, parsed or kept as it was found.
#[derive(Serialize)]
#[serde(untagged)]
enum Entry<T> {
    Parsed(T),
    Raw(serde_json::Value),
}

/// A stored JSON list opened for a read-modify-write.
struct StoredList<T> {
    entries: Vec<Entry<T>>,
}

impl<T: Serialize + DeserializeOwned> StoredList<T> {
    /// Load the list under `key`, keeping records that do not parse as raw JSON.
    fn load(store: &dyn KeyValueStore, key: &str) -> Result<Self, RepositoryError> {
        let Some(raw) = store.get(key)? else {
            return Ok(Self {
                entries: Vec::new(),
            });
        };

        let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored list is not a JSON array, treating as empty");
                Vec::new()
            }
        };

        let entries = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match serde_json::from_value(value.clone()) {
                Ok(item) => Entry::Parsed(item),
                Err(e) => {
                    tracing::warn!(key, index, error = %e, "skipping malformed record");
                    Entry::Raw(value)
                }
            })
            .collect();
        Ok(Self { entries })
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Parsed(item) => Some(item),
            Entry::Raw(_) => None,
        })
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().filter_map(|entry| match entry {
            Entry::Parsed(item) => Some(item),
            Entry::Raw(_) => None,
        })
    }

    /// Whether any unreadable record carries `value` under `field`.
    fn raw_field_matches(&self, field: &str, value: &str) -> bool {
        self.entries.iter().any(|entry| match entry {
            Entry::Raw(raw) => {
                raw.get(field).and_then(serde_json::Value::as_str) == Some(value)
            }
            Entry::Parsed(_) => false,
        })
    }

    fn push(&mut self, item: T) {
        self.entries.push(Entry::Parsed(item));
    }

    fn into_records(self) -> Vec<T> {
        self.entries
            .into_iter()
            .filter_map(|entry| match entry {
                Entry::Parsed(item) => Some(item),
                Entry::Raw(_) => None,
            })
            .collect()
    }

    /// Write every entry back, unreadable ones unchanged.
    fn save(&self, store: &dyn KeyValueStore, key: &str) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(&self.entries)
            .map_err(|e| RepositoryError::DataCorruption(format!("failed to encode {key}: {e}")))?;
        store.set(key, &raw)?;
        Ok(())
    }
}

/// Load the readable records of a JSON list.
fn load_list<T: Serialize + DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, RepositoryError> {
    StoredList::load(store, key).map(StoredList::into_records)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Row {
        n: u32,
    }

    #[test]
    fn test_missing_key_loads_empty() {
        let store = MemoryStore::new();
        let rows: Vec<Row> = load_list(&store, "nothing").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_corrupt_list_loads_empty() {
        let store = MemoryStore::new();
        store.set("rows", "{not json").unwrap();
        let rows: Vec<Row> = load_list(&store, "rows").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_malformed_record_is_skipped() {
        let store = MemoryStore::new();
        store
            .set("rows", r#"[{"n":1},{"n":"two"},{"n":3}]"#)
            .unwrap();
        let rows: Vec<Row> = load_list(&store, "rows").unwrap();
        assert_eq!(rows, vec![Row { n: 1 }, Row { n: 3 }]);
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let mut list = StoredList::load(&store, "rows").unwrap();
        list.push(Row { n: 7 });
        list.save(&store, "rows").unwrap();
        let rows: Vec<Row> = load_list(&store, "rows").unwrap();
        assert_eq!(rows, vec![Row { n: 7 }]);
    }

    #[test]
    fn test_rewrite_keeps_malformed_records() {
        let store = MemoryStore::new();
        store
            .set("rows", r#"[{"n":1},{"n":"two"},{"n":3}]"#)
            .unwrap();

        let mut list: StoredList<Row> = StoredList::load(&store, "rows").unwrap();
        for row in list.iter_mut() {
            row.n *= 10;
        }
        list.push(Row { n: 4 });
        list.save(&store, "rows").unwrap();

        assert_eq!(
            store.get("rows").unwrap().unwrap(),
            r#"[{"n":10},{"n":"two"},{"n":30},{"n":4}]"#
        );
        assert!(list.raw_field_matches("n", "two"));
        assert_eq!(list.iter().count(), 3);
    }
}
