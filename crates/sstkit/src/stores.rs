//! Store wiring
//!
//! One process-wide set of stores sharing a single preference-store backend.
//! The set is created lazily on a file-backed default; embedders and tests
//! install another backend through [`crate::init_storage`] before first use.
//! Stores are independent of the active configuration so identity and
//! storage work before `configure` is ever called.

use std::sync::{Arc, OnceLock};

use sstkit_core::ports::preference_store::IPreferenceStore;
use sstkit_storage::{DataLayer, FileStore, IdentityManager, StringStore};

use crate::reporter::RuntimeSink;

static STORES: OnceLock<Stores> = OnceLock::new();

pub(crate) struct Stores {
    pub data_layer: DataLayer,
    pub cookies: StringStore,
    pub local: StringStore,
    pub session: StringStore,
    pub identity: IdentityManager,
}

impl Stores {
    fn on(backend: Arc<dyn IPreferenceStore>) -> Self {
        Self {
            data_layer: DataLayer::new(backend.clone(), Some(Arc::new(RuntimeSink))),
            cookies: StringStore::cookies(backend.clone()),
            local: StringStore::local(backend.clone()),
            session: StringStore::session(backend.clone()),
            identity: IdentityManager::new(backend),
        }
    }
}

/// Install a custom backend, if no store has been touched yet.
///
/// Returns whether the backend was installed. Once the set exists it is
/// never rewired; a late call is logged and ignored.
pub(crate) fn init(backend: Arc<dyn IPreferenceStore>) -> bool {
    let mut installed = false;
    STORES.get_or_init(|| {
        installed = true;
        Stores::on(backend)
    });
    if !installed {
        tracing::warn!("storage already initialized, custom backend ignored");
    }
    installed
}

/// The store set, created on the file-backed default at first use.
pub(crate) fn stores() -> &'static Stores {
    STORES.get_or_init(|| Stores::on(Arc::new(FileStore::new(FileStore::default_dir()))))
}
