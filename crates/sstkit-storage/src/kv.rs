//! Codec-parameterized key-value store
//!
//! [`KvStore`] composes a backend, a namespace and a [`ValueCodec`] into a
//! typed store. Composition replaces the inheritance hierarchy such SDKs
//! usually grow: the data layer and the three web-storage facades are all
//! the same store with a different codec and namespace.
//!
//! Every persisted string is the JSON wrapper `{"value": …}`; the codec
//! decides what the inner payload is.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{json, Value};
use sstkit_core::ports::preference_store::IPreferenceStore;

/// Converts typed values to and from the wrapped `{"value": …}` strings
/// kept in the preference store.
pub trait ValueCodec {
    type Value;

    /// Encode into the stored wrapper string.
    fn encode(value: &Self::Value) -> Result<String, String>;

    /// Decode from the stored wrapper string. `None` for foreign or
    /// damaged content.
    fn decode(stored: &str) -> Option<Self::Value>;
}

/// Codec for arbitrary JSON values (the data layer).
pub struct JsonCodec;

impl ValueCodec for JsonCodec {
    type Value = Value;

    fn encode(value: &Value) -> Result<String, String> {
        serde_json::to_string(&json!({ "value": value })).map_err(|e| e.to_string())
    }

    fn decode(stored: &str) -> Option<Value> {
        let wrapper: Value = serde_json::from_str(stored).ok()?;
        wrapper.get("value").cloned()
    }
}

/// Codec for plain strings (cookies, local/session storage, identity).
pub struct StringCodec;

impl ValueCodec for StringCodec {
    type Value = String;

    fn encode(value: &String) -> Result<String, String> {
        serde_json::to_string(&json!({ "value": value })).map_err(|e| e.to_string())
    }

    fn decode(stored: &str) -> Option<String> {
        let wrapper: Value = serde_json::from_str(stored).ok()?;
        wrapper.get("value")?.as_str().map(str::to_string)
    }
}

/// A namespaced, typed view over an [`IPreferenceStore`] backend.
pub struct KvStore<C: ValueCodec> {
    backend: Arc<dyn IPreferenceStore>,
    namespace: String,
    _codec: PhantomData<C>,
}

impl<C: ValueCodec> KvStore<C> {
    pub fn new(backend: Arc<dyn IPreferenceStore>, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
            _codec: PhantomData,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn get(&self, key: &str) -> Option<C::Value> {
        let stored = self.backend.get(&self.namespace, key)?;
        let decoded = C::decode(&stored);
        if decoded.is_none() {
            tracing::warn!(namespace = %self.namespace, key = %key, "Undecodable stored value");
        }
        decoded
    }

    /// Store a value. Encode failures are logged and swallowed, matching
    /// the backend's own infallible contract.
    pub fn set(&self, key: &str, value: &C::Value) {
        match C::encode(value) {
            Ok(stored) => self.backend.set(&self.namespace, key, &stored),
            Err(e) => {
                tracing::warn!(
                    namespace = %self.namespace,
                    key = %key,
                    error = %e,
                    "Failed to encode value, not stored"
                );
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.backend.get(&self.namespace, key).is_some()
    }

    pub fn remove(&self, key: &str) -> bool {
        self.backend.remove(&self.namespace, key)
    }

    pub fn clear(&self) {
        self.backend.clear(&self.namespace);
    }

    /// All decodable entries, in the backend's enumeration order (sorted by
    /// key for the built-in backends).
    pub fn entries(&self) -> Vec<(String, C::Value)> {
        self.backend
            .entries(&self.namespace)
            .into_iter()
            .filter_map(|(key, stored)| C::decode(&stored).map(|value| (key, value)))
            .collect()
    }
}

impl<C: ValueCodec> Clone for KvStore<C> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            namespace: self.namespace.clone(),
            _codec: PhantomData,
        }
    }
}
