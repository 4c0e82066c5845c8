//! Web-storage facades
//!
//! Cookies, local storage and session storage from the web container world,
//! reduced to what they are in an SDK: three isolated string-only stores
//! that export their contents into the payload. The only difference between
//! them besides the namespace is the record label their keys travel under
//! (`name` for cookies, `key` for the other two).

use std::sync::Arc;

use serde_json::{Map, Value};
use sstkit_core::ports::preference_store::IPreferenceStore;

use crate::kv::{KvStore, StringCodec};
use crate::{COOKIE_NAMESPACE, LOCAL_NAMESPACE, SESSION_NAMESPACE};

/// A string-only store with a payload export shape.
#[derive(Clone)]
pub struct StringStore {
    store: KvStore<StringCodec>,
    name_key: &'static str,
}

impl StringStore {
    /// The cookie-equivalent store; exports records as `{"name": …, "value": …}`.
    pub fn cookies(backend: Arc<dyn IPreferenceStore>) -> Self {
        Self {
            store: KvStore::new(backend, COOKIE_NAMESPACE),
            name_key: "name",
        }
    }

    /// The local-storage equivalent; exports records as `{"key": …, "value": …}`.
    pub fn local(backend: Arc<dyn IPreferenceStore>) -> Self {
        Self {
            store: KvStore::new(backend, LOCAL_NAMESPACE),
            name_key: "key",
        }
    }

    /// The session-storage equivalent; same record shape as local storage.
    pub fn session(backend: Arc<dyn IPreferenceStore>) -> Self {
        Self {
            store: KvStore::new(backend, SESSION_NAMESPACE),
            name_key: "key",
        }
    }

    pub fn add(&self, key: &str, value: &str) {
        self.store.set(key, &value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.store.contains(key)
    }

    pub fn remove(&self, key: &str) -> bool {
        self.store.remove(key)
    }

    pub fn clear(&self) {
        self.store.clear()
    }

    /// Payload export: `None` when the store is empty, otherwise one record
    /// per entry in the backend's enumeration order.
    ///
    /// Empty and absent are different things to a collection endpoint, so
    /// the distinction is part of the contract here.
    pub fn event_data(&self) -> Option<Vec<Value>> {
        let entries = self.store.entries();
        if entries.is_empty() {
            return None;
        }
        Some(
            entries
                .into_iter()
                .map(|(key, value)| {
                    let mut record = Map::new();
                    record.insert(self.name_key.to_string(), Value::from(key));
                    record.insert("value".to_string(), Value::from(value));
                    Value::Object(record)
                })
                .collect(),
        )
    }
}
