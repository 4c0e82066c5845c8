//! Device model
//!
//! Describes the hardware and operating system the process runs on. The
//! device id is a SHA-256 digest of the machine id, so the raw id never
//! leaves the host. Privacy-sensitive sections can be switched off through
//! [`DeviceModel::custom`].

use std::path::Path;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};
use sstkit_core::domain::event::Event;
use sstkit_core::ports::model::{IModel, ModelContext};

/// Screen size reported when the host has no display to query.
pub const DEFAULT_SCREEN_WIDTH: u32 = 1920;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 1080;

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Built-in model keyed `device`.
///
/// The full payload carries `architecture`, `id`, `manufacturer`, `model`,
/// `os` and `screen`. [`DeviceModel::new`] includes everything;
/// [`DeviceModel::custom`] builds a reduced variant.
#[derive(Debug, Clone)]
pub struct DeviceModel {
    include_id: bool,
    include_os: bool,
    include_screen: bool,
    screen: (u32, u32),
}

impl DeviceModel {
    /// Model with every section enabled.
    pub fn new() -> Self {
        DeviceModelBuilder::default().create()
    }

    /// Start a builder to switch individual sections off.
    pub fn custom() -> DeviceModelBuilder {
        DeviceModelBuilder::default()
    }
}

impl Default for DeviceModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IModel for DeviceModel {
    fn key(&self) -> &str {
        "device"
    }

    async fn evaluate(&self, _event: &Event, _ctx: &ModelContext) -> anyhow::Result<Value> {
        let mut section = Map::new();
        section.insert(
            "architecture".to_string(),
            Value::String(std::env::consts::ARCH.to_string()),
        );
        if self.include_id {
            section.insert("id".to_string(), Value::String(device_id()));
        }
        section.insert(
            "manufacturer".to_string(),
            Value::String(read_dmi("sys_vendor")),
        );
        section.insert(
            "model".to_string(),
            Value::String(read_dmi("product_name")),
        );
        if self.include_os {
            section.insert(
                "os".to_string(),
                json!({
                    "name": std::env::consts::OS,
                    "version": read_kernel_version(),
                }),
            );
        }
        if self.include_screen {
            let (width, height) = self.screen;
            let orientation = if height >= width { "portrait" } else { "landscape" };
            section.insert(
                "screen".to_string(),
                json!({
                    "orientation": orientation,
                    "width": width,
                    "height": height,
                }),
            );
        }
        Ok(Value::Object(section))
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for a [`DeviceModel`] with sections switched off.
#[derive(Debug, Clone)]
pub struct DeviceModelBuilder {
    include_id: bool,
    include_os: bool,
    include_screen: bool,
    screen: (u32, u32),
}

impl Default for DeviceModelBuilder {
    fn default() -> Self {
        Self {
            include_id: true,
            include_os: true,
            include_screen: true,
            screen: (DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT),
        }
    }
}

impl DeviceModelBuilder {
    /// Omit the hashed device id.
    pub fn disable_id(mut self) -> Self {
        self.include_id = false;
        self
    }

    /// Omit the `os` section.
    pub fn disable_os(mut self) -> Self {
        self.include_os = false;
        self
    }

    /// Omit the `screen` section.
    pub fn disable_screen(mut self) -> Self {
        self.include_screen = false;
        self
    }

    /// Report this screen size instead of the default.
    pub fn screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen = (width, height);
        self
    }

    pub fn create(self) -> DeviceModel {
        DeviceModel {
            include_id: self.include_id,
            include_os: self.include_os,
            include_screen: self.include_screen,
            screen: self.screen,
        }
    }
}

// ---------------------------------------------------------------------------
// System introspection
// ---------------------------------------------------------------------------

fn device_id() -> String {
    match read_machine_id() {
        Some(raw) => hash_machine_id(&raw),
        None => "unknown".to_string(),
    }
}

fn hash_machine_id(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.trim().as_bytes());
    format!("{:x}", hasher.finalize())
}

fn read_machine_id() -> Option<String> {
    for path in ["/etc/machine-id", "/var/lib/dbus/machine-id"] {
        if let Ok(raw) = std::fs::read_to_string(path) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn read_dmi(name: &str) -> String {
    std::fs::read_to_string(Path::new("/sys/class/dmi/id").join(name))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn read_kernel_version() -> String {
    std::fs::read_to_string("/proc/version")
        .ok()
        .and_then(|v| v.split_whitespace().nth(2).map(String::from))
        .unwrap_or_default()
}
