//! Tracking profile
//!
//! A YAML file describing the account the CLI tracks against. The profile is
//! the CLI-side face of the SDK configuration: optional fields fall back to
//! the SDK defaults, so a minimal profile is just an account name.
//!
//! Default location: `~/.config/sstkit/profile.yaml` (XDG config dir).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sstkit::{Config, VirtualBrowser};

use crate::advert::AdvertModel;

/// On-disk profile for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Account identifier to track against.
    pub account: String,
    /// Collection domain override.
    pub domain: Option<String>,
    /// Diagnostic host override.
    pub nexus_host: Option<String>,
    /// Payload key the data layer is exported under.
    pub data_layer_name: Option<String>,
    /// Trailing path segment of the collection endpoint.
    pub publish_path: Option<String>,
    /// Log assembled request bodies at debug level.
    pub debug: bool,
    /// Synthetic browser overrides.
    pub virtual_browser: Option<VirtualBrowser>,
    /// Attach the advertising demo model.
    pub advertising: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            account: "demo".to_string(),
            domain: None,
            nexus_host: None,
            data_layer_name: None,
            publish_path: None,
            debug: false,
            virtual_browser: None,
            advertising: false,
        }
    }
}

impl Profile {
    /// Load a profile from a YAML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let profile: Profile = serde_yaml::from_str(&content)?;
        Ok(profile)
    }

    /// Load a profile, falling back to defaults if the file is missing or
    /// invalid.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Default profile path: `$XDG_CONFIG_HOME/sstkit/profile.yaml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("sstkit")
            .join("profile.yaml")
    }

    /// Build the SDK configuration this profile describes.
    pub fn to_config(&self) -> Config {
        let mut config = Config::new(&self.account).with_debug(self.debug);
        if let Some(domain) = &self.domain {
            config = config.with_domain(domain);
        }
        if let Some(nexus_host) = &self.nexus_host {
            config = config.with_nexus_host(nexus_host);
        }
        if let Some(name) = &self.data_layer_name {
            config = config.with_data_layer_name(name);
        }
        if let Some(path) = &self.publish_path {
            config = config.with_publish_path(path);
        }
        if let Some(virtual_browser) = &self.virtual_browser {
            config = config.with_virtual_browser(virtual_browser.clone());
        }
        if self.advertising {
            config = config.with_models(sstkit::required().add(Arc::new(AdvertModel::from_env())));
        }
        config
    }
}
