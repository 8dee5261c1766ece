//! Key-value persistence boundary.
//!
//! Everything campus-events persists goes through a [`KeyValueStore`]: a flat
//! map from string keys to serialized JSON text. Values are always replaced
//! whole; there is no partial update and no locking, so only one writer may
//! use a store at a time.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{CampusError, CampusResult};

/// Key holding the active session (a user record without password).
pub const CURRENT_USER_KEY: &str = "campus-events-user";

/// Key holding every registered user, passwords included.
pub const REGISTERED_USERS_KEY: &str = "campus-events-users";

/// Key holding the full event collection.
pub const EVENTS_KEY: &str = "campus-events";

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> CampusResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> CampusResult<()>;
    fn remove(&mut self, key: &str) -> CampusResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> CampusResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> CampusResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> CampusResult<()> {
        (**self).remove(key)
    }
}

/// Read and parse a JSON value stored under `key`.
///
/// Absent keys and malformed JSON come back as `Ok(None)`; callers substitute
/// their own empty value. A failing store read is returned as an error.
pub fn read_json<T, S>(store: &S, key: &str) -> CampusResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed stored value, treating as absent");
            Ok(None)
        }
    }
}

/// [`read_json`] for display-only reads: a failing read is logged and treated
/// as absent.
pub fn read_json_lossy<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    read_json(store, key).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "could not read stored value, treating as absent");
        None
    })
}

/// Serialize `value` as JSON and store it under `key`.
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> CampusResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let content =
        serde_json::to_string(value).map_err(|e| CampusError::Serialization(e.to_string()))?;
    store.set(key, &content)
}

/// A [`MemoryStore`] whose reads or writes can be made to fail.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_reads: bool,
    /// Key whose `set` fails
    pub fail_writes_to: Option<&'static str>,
}

#[cfg(test)]
impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> CampusResult<Option<String>> {
        if self.fail_reads {
            return Err(std::io::Error::other("read failed").into());
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> CampusResult<()> {
        if self.fail_writes_to == Some(key) {
            return Err(std::io::Error::other("write failed").into());
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> CampusResult<()> {
        self.inner.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn test_read_json_absent_key() {
        let store = MemoryStore::new();
        assert_eq!(read_json::<Sample, _>(&store, "missing").unwrap(), None);
    }

    #[test]
    fn test_read_json_malformed_value() {
        let mut store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        assert_eq!(read_json::<Sample, _>(&store, "k").unwrap(), None);

        store.set("k", r#"{"other": 1}"#).unwrap();
        assert_eq!(read_json::<Sample, _>(&store, "k").unwrap(), None);
    }

    #[test]
    fn test_write_then_read_json() {
        let mut store = MemoryStore::new();
        let sample = Sample {
            name: "Ana".to_string(),
        };
        write_json(&mut store, "k", &sample).unwrap();
        assert_eq!(read_json::<Sample, _>(&store, "k").unwrap(), Some(sample));
    }

    #[test]
    fn test_read_failure_is_an_error() {
        let mut store = FlakyStore::default();
        store.set("k", r#"{"name": "Ana"}"#).unwrap();
        store.fail_reads = true;

        assert!(matches!(
            read_json::<Sample, _>(&store, "k"),
            Err(CampusError::Io(_))
        ));
        assert_eq!(read_json_lossy::<Sample, _>(&store, "k"), None);
    }

    #[test]
    fn test_mut_ref_store_writes_through() {
        fn put<S: KeyValueStore>(mut store: S) {
            store.set("k", "v").unwrap();
        }

        let mut store = MemoryStore::new();
        put(&mut store);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
