//! Library model
//!
//! Reports the SDK itself: its name, its version and the versions of every
//! registered model that declares one.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use sstkit_core::assemble::SDK_VERSION;
use sstkit_core::domain::event::Event;
use sstkit_core::ports::model::{IModel, ModelContext};

/// Name reported in the `library` section.
pub const LIBRARY_NAME: &str = "sstkit";

/// Built-in model keyed `library`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryModel;

#[async_trait]
impl IModel for LibraryModel {
    fn key(&self) -> &str {
        "library"
    }

    async fn evaluate(&self, _event: &Event, ctx: &ModelContext) -> anyhow::Result<Value> {
        let models: Map<String, Value> = ctx
            .model_versions()
            .iter()
            .filter(|(_, version)| !version.is_empty())
            .map(|(key, version)| (key.clone(), Value::String(version.clone())))
            .collect();
        Ok(json!({
            "name": LIBRARY_NAME,
            "version": SDK_VERSION,
            "models": models,
        }))
    }
}
