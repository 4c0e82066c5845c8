//! Per-install identity
//!
//! One UUID v4, created lazily on first use, persisted in its own
//! namespace, and clearable at any time. Consulted once per tracked event;
//! events flagged with the opt-out parameter skip it entirely, so clearing
//! plus opting out leaves no identifier anywhere.

use std::sync::Arc;

use sstkit_core::ports::preference_store::IPreferenceStore;
use uuid::Uuid;

use crate::kv::{KvStore, StringCodec};
use crate::IDENTITY_NAMESPACE;

const UUID_KEY: &str = "uuid";

/// The lazy per-install UUID.
#[derive(Clone)]
pub struct IdentityManager {
    store: KvStore<StringCodec>,
}

impl IdentityManager {
    pub fn new(backend: Arc<dyn IPreferenceStore>) -> Self {
        Self {
            store: KvStore::new(backend, IDENTITY_NAMESPACE),
        }
    }

    /// The current identity, `None` until one has been generated.
    pub fn get_uuid(&self) -> Option<String> {
        self.store.get(UUID_KEY)
    }

    /// The current identity, generating and persisting a fresh UUID v4 if
    /// none exists yet.
    pub fn ensure_uuid(&self) -> String {
        if let Some(existing) = self.get_uuid() {
            return existing;
        }
        let fresh = Uuid::new_v4().to_string();
        self.store.set(UUID_KEY, &fresh);
        fresh
    }

    /// Forget the identity. Unconditional and idempotent; the next
    /// [`ensure_uuid`](Self::ensure_uuid) starts over.
    pub fn clear_uuid(&self) {
        self.store.remove(UUID_KEY);
    }
}
