//! Configuration module for SSTKit.
//!
//! Provides the immutable configuration snapshot the whole pipeline reads,
//! with builder-style overrides, defaults, and endpoint validation. Exactly
//! one `Config` is active process-wide at a time; `sstkit::configure`
//! replaces it atomically and in-flight events keep the snapshot they
//! started with.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::errors::SstError;
use crate::domain::virtual_browser::VirtualBrowser;
use crate::ports::date_provider::{IDateProvider, SystemDateProvider};
use crate::registry::Models;

/// Default collection domain.
pub const DEFAULT_DOMAIN: &str = "t.nc0.co";

/// Default host for the diagnostic side channel.
pub const DEFAULT_NEXUS_HOST: &str = "nexus.ensighten.com";

/// Default export name for raw data-layer contents in the payload.
pub const DEFAULT_DATA_LAYER_NAME: &str = "__sstData";

/// Default trailing path segment of the collection endpoint.
pub const DEFAULT_PUBLISH_PATH: &str = "sst";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Immutable SDK configuration snapshot.
#[derive(Clone)]
pub struct Config {
    /// Account identifier, the `{account}` segment of both endpoints.
    pub account_name: String,
    /// Collection domain. A plain host gets `https://` prepended; a value
    /// containing `://` is used verbatim as the endpoint origin, which is
    /// how tests and staging setups point the SDK at a local server.
    pub domain: String,
    /// When true, assembled request bodies are logged at debug level.
    pub debug: bool,
    /// Diagnostic side-channel host. Accepts the same origin-override form
    /// as `domain`.
    pub nexus_host: String,
    /// Payload key the raw data-layer contents are exported under.
    pub data_layer_name: String,
    /// Trailing path segment of the collection endpoint.
    pub publish_path: String,
    /// Synthetic browser description sent with every request.
    pub virtual_browser: VirtualBrowser,
    /// Model set evaluated per event. `None` means the required built-ins.
    pub models: Option<Models>,
    /// Clock used for payload timestamps.
    pub date_provider: Arc<dyn IDateProvider>,
    /// Upper bound for a single model evaluation. `None` means unbounded;
    /// expiry is treated exactly like evaluation failure.
    pub model_timeout: Option<Duration>,
}

impl Config {
    /// Create a configuration for `account_name` with every other field at
    /// its default.
    pub fn new(account_name: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            domain: DEFAULT_DOMAIN.to_string(),
            debug: false,
            nexus_host: DEFAULT_NEXUS_HOST.to_string(),
            data_layer_name: DEFAULT_DATA_LAYER_NAME.to_string(),
            publish_path: DEFAULT_PUBLISH_PATH.to_string(),
            virtual_browser: VirtualBrowser::detect(),
            models: None,
            date_provider: Arc::new(SystemDateProvider),
            model_timeout: None,
        }
    }

    // --- builder-style overrides ---

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_nexus_host(mut self, nexus_host: impl Into<String>) -> Self {
        self.nexus_host = nexus_host.into();
        self
    }

    pub fn with_data_layer_name(mut self, name: impl Into<String>) -> Self {
        self.data_layer_name = name.into();
        self
    }

    pub fn with_publish_path(mut self, path: impl Into<String>) -> Self {
        self.publish_path = path.into();
        self
    }

    pub fn with_virtual_browser(mut self, virtual_browser: VirtualBrowser) -> Self {
        self.virtual_browser = virtual_browser;
        self
    }

    /// Register custom models.
    ///
    /// The required built-ins stay registered either way: an explicit set
    /// overlays them, so an entry sharing a built-in key replaces that
    /// built-in and novel keys append after them.
    pub fn with_models(mut self, models: Models) -> Self {
        self.models = Some(models);
        self
    }

    pub fn with_date_provider(mut self, provider: impl IDateProvider + 'static) -> Self {
        self.date_provider = Arc::new(provider);
        self
    }

    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = Some(timeout);
        self
    }

    // --- endpoints ---

    /// Origin of the collection endpoint, e.g. `https://t.nc0.co`.
    pub fn collect_origin(&self) -> Result<String, SstError> {
        origin_for(&self.domain)
    }

    /// Origin of the diagnostic endpoint.
    pub fn nexus_origin(&self) -> Result<String, SstError> {
        origin_for(&self.nexus_host)
    }

    /// Check that the configuration can produce valid endpoints.
    ///
    /// This is what `configure` runs before installing a snapshot; a failure
    /// leaves tracking inert rather than panicking later in a hot path.
    pub fn validate(&self) -> Result<(), SstError> {
        if self.account_name.trim().is_empty() {
            return Err(SstError::Configuration(
                "account name must not be empty".to_string(),
            ));
        }
        self.collect_origin()?;
        self.nexus_origin()?;
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("account_name", &self.account_name)
            .field("domain", &self.domain)
            .field("debug", &self.debug)
            .field("nexus_host", &self.nexus_host)
            .field("data_layer_name", &self.data_layer_name)
            .field("publish_path", &self.publish_path)
            .field("virtual_browser", &self.virtual_browser)
            .field("models", &self.models)
            .field("model_timeout", &self.model_timeout)
            .finish_non_exhaustive()
    }
}

/// Normalize a domain or origin-override string into an origin.
fn origin_for(domain: &str) -> Result<String, SstError> {
    let raw = if domain.contains("://") {
        domain.to_string()
    } else {
        format!("https://{domain}")
    };
    let url = Url::parse(&raw)
        .map_err(|e| SstError::Configuration(format!("invalid domain '{domain}': {e}")))?;
    match url.origin() {
        url::Origin::Tuple(..) => Ok(url.origin().ascii_serialization()),
        url::Origin::Opaque(_) => Err(SstError::Configuration(format!(
            "invalid domain '{domain}': no host"
        ))),
    }
}
