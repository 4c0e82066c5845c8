//! Preference store backends
//!
//! Two `IPreferenceStore` implementations: an in-memory one for tests and
//! ephemeral embedding, and a JSON-file one for real installs. Both
//! enumerate entries sorted by key so exported payloads stay byte-stable,
//! and both follow the port contract of never surfacing I/O errors to
//! callers: failures are logged via `tracing::warn!` and swallowed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use dashmap::DashMap;
use sstkit_core::ports::preference_store::IPreferenceStore;

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Ephemeral in-memory backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    namespaces: DashMap<String, BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IPreferenceStore for MemoryStore {
    fn get(&self, namespace: &str, key: &str) -> Option<String> {
        self.namespaces.get(namespace)?.get(key).cloned()
    }

    fn set(&self, namespace: &str, key: &str, value: &str) {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, namespace: &str, key: &str) -> bool {
        self.namespaces
            .get_mut(namespace)
            .map(|mut entries| entries.remove(key).is_some())
            .unwrap_or(false)
    }

    fn entries(&self, namespace: &str) -> Vec<(String, String)> {
        self.namespaces
            .get(namespace)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn clear(&self, namespace: &str) {
        self.namespaces.remove(namespace);
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// File-backed backend: one JSON object file per namespace under `dir`.
///
/// Writes are serialized through a single mutex; each operation is a
/// read-modify-write of the whole namespace file, which is fine for the
/// handful of small entries these stores hold.
pub struct FileStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            lock: Mutex::new(()),
        }
    }

    /// Platform-appropriate default directory, typically
    /// `~/.local/share/sstkit/`.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("sstkit")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn namespace_path(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{namespace}.json"))
    }

    fn load(&self, namespace: &str) -> BTreeMap<String, String> {
        let path = self.namespace_path(namespace);
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Corrupt namespace file, starting empty"
                );
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        }
    }

    fn persist(&self, namespace: &str, entries: &BTreeMap<String, String>) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            tracing::warn!(dir = %self.dir.display(), error = %e, "Failed to create store directory");
            return;
        }
        let path = self.namespace_path(namespace);
        match serde_json::to_string_pretty(entries) {
            Ok(content) => {
                if let Err(e) = std::fs::write(&path, content) {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to persist namespace");
                }
            }
            Err(e) => {
                tracing::warn!(namespace = %namespace, error = %e, "Failed to encode namespace")
            }
        }
    }
}

impl IPreferenceStore for FileStore {
    fn get(&self, namespace: &str, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load(namespace).remove(key)
    }

    fn set(&self, namespace: &str, key: &str, value: &str) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load(namespace);
        entries.insert(key.to_string(), value.to_string());
        self.persist(namespace, &entries);
    }

    fn remove(&self, namespace: &str, key: &str) -> bool {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load(namespace);
        let removed = entries.remove(key).is_some();
        if removed {
            self.persist(namespace, &entries);
        }
        removed
    }

    fn entries(&self, namespace: &str) -> Vec<(String, String)> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load(namespace).into_iter().collect()
    }

    fn clear(&self, namespace: &str) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let path = self.namespace_path(namespace);
        if let Err(e) = std::fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "Failed to clear namespace");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(store: &dyn IPreferenceStore) {
        assert_eq!(store.get("ns", "k"), None);
        store.set("ns", "k", "v1");
        assert_eq!(store.get("ns", "k"), Some("v1".to_string()));
        store.set("ns", "k", "v2");
        assert_eq!(store.get("ns", "k"), Some("v2".to_string()));
        assert!(store.remove("ns", "k"));
        assert!(!store.remove("ns", "k"));
        assert_eq!(store.get("ns", "k"), None);
    }

    #[test]
    fn test_memory_store_roundtrip() {
        roundtrip(&MemoryStore::new());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        roundtrip(&FileStore::new(dir.path().to_path_buf()));
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let store = MemoryStore::new();
        store.set("a", "k", "from-a");
        store.set("b", "k", "from-b");

        assert_eq!(store.get("a", "k"), Some("from-a".to_string()));
        assert_eq!(store.get("b", "k"), Some("from-b".to_string()));

        store.clear("a");
        assert_eq!(store.get("a", "k"), None);
        assert_eq!(store.get("b", "k"), Some("from-b".to_string()));
    }

    #[test]
    fn test_entries_come_back_sorted_by_key() {
        let store = MemoryStore::new();
        store.set("ns", "zebra", "1");
        store.set("ns", "alpha", "2");
        store.set("ns", "mid", "3");

        let keys: Vec<String> = store.entries("ns").into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zebra"]);

        let dir = tempfile::tempdir().unwrap();
        let file_store = FileStore::new(dir.path().to_path_buf());
        file_store.set("ns", "zebra", "1");
        file_store.set("ns", "alpha", "2");
        let keys: Vec<String> = file_store
            .entries("ns")
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["alpha", "zebra"]);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::new(dir.path().to_path_buf());
            store.set("ns", "k", "survives");
        }
        let reopened = FileStore::new(dir.path().to_path_buf());
        assert_eq!(reopened.get("ns", "k"), Some("survives".to_string()));
    }

    #[test]
    fn test_file_store_clear_removes_the_namespace_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        store.set("ns", "k", "v");
        assert!(dir.path().join("ns.json").exists());

        store.clear("ns");
        assert!(!dir.path().join("ns.json").exists());
        assert_eq!(store.get("ns", "k"), None);

        // Clearing again is a no-op, not an error
        store.clear("ns");
    }

    #[test]
    fn test_file_store_survives_a_corrupt_namespace_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ns.json"), "{not json").unwrap();

        let store = FileStore::new(dir.path().to_path_buf());
        assert_eq!(store.get("ns", "k"), None);
        store.set("ns", "k", "fresh");
        assert_eq!(store.get("ns", "k"), Some("fresh".to_string()));
    }
}
