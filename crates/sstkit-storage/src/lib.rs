//! SSTKit Storage - persistent key-value storage adapters
//!
//! This crate implements the `IPreferenceStore` port from `sstkit-core` and
//! the typed stores built on top of it:
//! - **Backends** - [`MemoryStore`] (ephemeral, tests) and [`FileStore`]
//!   (one JSON file per namespace)
//! - **Typed store** - [`KvStore`] parameterized by a [`ValueCodec`]
//! - **Data layer** - [`DataLayer`], arbitrary JSON values with
//!   absorb-and-report writes
//! - **Web-storage facades** - [`StringStore`] instances for cookies, local
//!   and session storage
//! - **Identity** - [`IdentityManager`], the lazy per-install UUID
//!
//! Five fixed namespaces keep the stores isolated from one another; every
//! persisted value is wrapped as a `{"value": …}` JSON string regardless of
//! codec, matching what collection endpoints expect to see re-exported.

pub mod backend;
pub mod data_layer;
pub mod identity;
pub mod kv;
pub mod string_store;

pub use backend::{FileStore, MemoryStore};
pub use data_layer::DataLayer;
pub use identity::IdentityManager;
pub use kv::{JsonCodec, KvStore, StringCodec, ValueCodec};
pub use string_store::StringStore;

/// Namespace holding data-layer entries.
pub const DATA_LAYER_NAMESPACE: &str = "sstkit.datalayer";

/// Namespace holding cookie-equivalent entries.
pub const COOKIE_NAMESPACE: &str = "sstkit.storage.cookie";

/// Namespace holding local-storage-equivalent entries.
pub const LOCAL_NAMESPACE: &str = "sstkit.storage.local";

/// Namespace holding session-storage-equivalent entries.
pub const SESSION_NAMESPACE: &str = "sstkit.storage.session";

/// Namespace holding the per-install identity.
pub const IDENTITY_NAMESPACE: &str = "sstkit.identity";
