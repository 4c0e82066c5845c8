//! Model port (driven/secondary port)
//!
//! A model is a named, versioned data provider evaluated once per tracked
//! event. Built-in models describe the application, the device and the SDK
//! itself; hosts register their own implementations for anything else
//! (consent state, advertising identifiers, feature flags).
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific and don't need domain-level classification. A failing
//!   model is omitted from the payload; it never fails the event.
//! - Uses `#[async_trait]` so implementations may do real I/O. Evaluation is
//!   cooperative: all models of a registry run concurrently on one task.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::Config;
use crate::domain::event::Event;
use crate::ports::diagnostics::IDiagnosticsSink;

/// A named data provider evaluated per tracked event.
#[async_trait]
pub trait IModel: Send + Sync {
    /// Payload key for this model's section under the composed model data.
    fn key(&self) -> &str;

    /// Model version advertised in the library metadata section.
    ///
    /// Empty versions are omitted from the version map.
    fn version(&self) -> &str {
        ""
    }

    /// Produce this model's payload section for `event`.
    async fn evaluate(&self, event: &Event, ctx: &ModelContext) -> anyhow::Result<Value>;
}

/// Everything a model may consult while evaluating.
#[derive(Clone)]
pub struct ModelContext {
    config: Arc<Config>,
    model_versions: BTreeMap<String, String>,
    diagnostics: Option<Arc<dyn IDiagnosticsSink>>,
}

impl ModelContext {
    pub fn new(
        config: Arc<Config>,
        model_versions: BTreeMap<String, String>,
        diagnostics: Option<Arc<dyn IDiagnosticsSink>>,
    ) -> Self {
        Self {
            config,
            model_versions,
            diagnostics,
        }
    }

    /// The active configuration snapshot.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Key-to-version map of the registry being evaluated, including models
    /// that fail later. Versions may be empty strings.
    pub fn model_versions(&self) -> &BTreeMap<String, String> {
        &self.model_versions
    }

    /// Channel for best-effort failure reports, when one is installed.
    pub fn diagnostics(&self) -> Option<&dyn IDiagnosticsSink> {
        self.diagnostics.as_deref()
    }
}

impl fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelContext")
            .field("model_versions", &self.model_versions)
            .field("has_diagnostics", &self.diagnostics.is_some())
            .finish_non_exhaustive()
    }
}
