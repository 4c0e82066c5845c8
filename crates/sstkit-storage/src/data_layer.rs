//! Data layer
//!
//! Persistent key-value context merged into every outbound payload. `add`
//! accepts any `serde::Serialize` value and follows the absorb-and-report
//! rule: a value with no JSON form is logged, reported once through the
//! diagnostics sink (best-effort), and simply not stored. Callers never see
//! an error from the data layer.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use sstkit_core::ports::diagnostics::IDiagnosticsSink;
use sstkit_core::ports::preference_store::IPreferenceStore;

use crate::kv::{JsonCodec, KvStore};
use crate::DATA_LAYER_NAMESPACE;

/// Persistent JSON context exported with every request.
#[derive(Clone)]
pub struct DataLayer {
    store: KvStore<JsonCodec>,
    diagnostics: Option<Arc<dyn IDiagnosticsSink>>,
}

impl DataLayer {
    pub fn new(
        backend: Arc<dyn IPreferenceStore>,
        diagnostics: Option<Arc<dyn IDiagnosticsSink>>,
    ) -> Self {
        Self {
            store: KvStore::new(backend, DATA_LAYER_NAMESPACE),
            diagnostics,
        }
    }

    /// Persist `value` under `key`.
    ///
    /// A value that cannot be represented as JSON is not stored; the
    /// failure is logged and reported through the diagnostics sink, and the
    /// previous value for `key` (if any) stays untouched.
    pub fn add(&self, key: &str, value: impl Serialize) {
        match serde_json::to_value(value) {
            Ok(json) => self.store.set(key, &json),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Data layer value is not serializable, not stored");
                if let Some(sink) = &self.diagnostics {
                    sink.report(
                        &format!("data layer key '{key}': {e}"),
                        "DataLayer.add",
                        "SerializationError",
                    );
                }
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
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

    /// Everything currently stored, sorted by key.
    pub fn all(&self) -> BTreeMap<String, Value> {
        self.store.entries().into_iter().collect()
    }
}
