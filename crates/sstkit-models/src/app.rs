//! Application model
//!
//! Describes the host application. A Rust process has no manifest to read
//! the way a mobile bundle does, so detection is limited to the executable
//! name; hosts that care about the `version`/`build`/`namespace` fields
//! should pass their own [`AppInfo`] via [`AppModel::with_info`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sstkit_core::domain::event::Event;
use sstkit_core::ports::model::{IModel, ModelContext};

/// Identity of the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub build: String,
    pub name: String,
    pub namespace: String,
    pub version: String,
}

impl AppInfo {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        version: impl Into<String>,
        build: impl Into<String>,
    ) -> Self {
        Self {
            build: build.into(),
            name: name.into(),
            namespace: namespace.into(),
            version: version.into(),
        }
    }

    /// Best-effort detection from the running process.
    pub fn detect() -> Self {
        let name = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "unknown".to_string());
        Self {
            build: "0".to_string(),
            namespace: name.clone(),
            name,
            version: "0.0.0".to_string(),
        }
    }
}

/// Built-in model keyed `app`.
#[derive(Debug, Clone)]
pub struct AppModel {
    info: AppInfo,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            info: AppInfo::detect(),
        }
    }

    pub fn with_info(info: AppInfo) -> Self {
        Self { info }
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IModel for AppModel {
    fn key(&self) -> &str {
        "app"
    }

    async fn evaluate(&self, _event: &Event, _ctx: &ModelContext) -> anyhow::Result<Value> {
        Ok(serde_json::to_value(&self.info)?)
    }
}
