//! Active configuration snapshot
//!
//! `configure` swaps one immutable [`Context`] into a process-wide cell;
//! every tracked event captures the `Arc` once at entry and keeps it for the
//! whole pipeline, so a concurrent reconfigure yields either the old or the
//! new snapshot, never a torn read. A configuration that fails validation is
//! never installed: the cell is cleared and tracking stays inert until a
//! valid one arrives.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use sstkit_core::config::Config;
use sstkit_core::domain::errors::SstError;
use sstkit_core::ports::model::ModelContext;
use sstkit_core::registry::Models;

use crate::reporter::RuntimeSink;

static ACTIVE: RwLock<Option<Arc<Context>>> = RwLock::new(None);

/// Immutable snapshot of everything one tracked event needs.
pub(crate) struct Context {
    pub(crate) config: Arc<Config>,
    pub(crate) models: Models,
    model_versions: BTreeMap<String, String>,
}

impl Context {
    fn build(config: Config) -> Result<Self, SstError> {
        config.validate()?;
        // The required built-ins are part of every configuration. An explicit
        // set overlays them: same keys swap in, novel keys append.
        let models = match &config.models {
            Some(explicit) => explicit
                .iter()
                .cloned()
                .fold(sstkit_models::required(), Models::add),
            None => sstkit_models::required(),
        };
        let model_versions = models.versions();
        Ok(Self {
            config: Arc::new(config),
            models,
            model_versions,
        })
    }

    /// Context handed to model evaluation, with the runtime diagnostics sink
    /// attached.
    pub(crate) fn evaluation_context(&self) -> ModelContext {
        ModelContext::new(
            self.config.clone(),
            self.model_versions.clone(),
            Some(Arc::new(RuntimeSink)),
        )
    }
}

/// Validate and install `config`, replacing any active snapshot.
///
/// An invalid configuration clears the active snapshot instead: silently
/// sending events to the previously configured endpoint would be worse than
/// sending nothing.
pub(crate) fn install(config: Config) {
    let mut active = ACTIVE.write().unwrap_or_else(PoisonError::into_inner);
    match Context::build(config) {
        Ok(ctx) => {
            tracing::info!(account = %ctx.config.account_name, "sstkit configured");
            *active = Some(Arc::new(ctx));
        }
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration, tracking disabled");
            *active = None;
        }
    }
}

/// The active snapshot, if a valid configuration has been installed.
pub(crate) fn current() -> Option<Arc<Context>> {
    ACTIVE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
