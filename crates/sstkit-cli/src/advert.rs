//! Advertising demo model
//!
//! Shows what a host-registered model looks like. Mobile hosts would read a
//! platform advertising identifier behind a consent check; here the identifier
//! comes from `SSTKIT_ADVERTISING_ID`, and an absent or empty variable plays
//! the role of denied consent.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use sstkit::{Event, IModel, ModelContext};

#[derive(Debug, Clone, Serialize)]
struct AdvertisingInfo {
    id: String,
    enabled: bool,
}

/// Model keyed `advertising`, driven by `SSTKIT_ADVERTISING_ID`.
#[derive(Debug, Clone)]
pub struct AdvertModel {
    info: AdvertisingInfo,
}

impl AdvertModel {
    pub fn from_env() -> Self {
        let info = match std::env::var("SSTKIT_ADVERTISING_ID") {
            Ok(id) if !id.is_empty() => AdvertisingInfo { id, enabled: true },
            _ => AdvertisingInfo {
                id: "Unknown".to_string(),
                enabled: false,
            },
        };
        Self { info }
    }
}

#[async_trait]
impl IModel for AdvertModel {
    fn key(&self) -> &str {
        "advertising"
    }

    async fn evaluate(&self, _event: &Event, _ctx: &ModelContext) -> anyhow::Result<Value> {
        Ok(serde_json::to_value(&self.info)?)
    }
}
