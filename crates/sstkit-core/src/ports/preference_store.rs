//! Preference store port (driven/secondary port)
//!
//! This module defines the interface to the platform's persistent key-value
//! storage. The SDK keeps five logical namespaces in it (data layer, three
//! web-storage equivalents, identity); adapters decide how namespaces map to
//! actual storage.
//!
//! ## Design Notes
//!
//! - The port is infallible from the caller's point of view: implementations
//!   serialize their own writes and log-and-swallow I/O errors. Losing a
//!   preference write must never fail a tracked event.
//! - `entries` order is implementation-defined; both built-in adapters
//!   enumerate sorted by key so payloads stay byte-stable.

/// Namespaced persistent string key-value storage.
pub trait IPreferenceStore: Send + Sync {
    /// Read a value, `None` when absent.
    fn get(&self, namespace: &str, key: &str) -> Option<String>;

    /// Write a value, overwriting any previous one.
    fn set(&self, namespace: &str, key: &str, value: &str);

    /// Delete a key. Returns true if it was present.
    fn remove(&self, namespace: &str, key: &str) -> bool;

    /// All key/value pairs in the namespace.
    fn entries(&self, namespace: &str) -> Vec<(String, String)>;

    /// Delete every key in the namespace.
    fn clear(&self, namespace: &str);
}
