//! Virtual browser descriptor
//!
//! Server-side tagging endpoints speak the web container dialect, so every
//! request carries a synthetic browser description: user agent, viewport,
//! language and timezone. Defaults are detected from the host environment
//! with fixed fallbacks; everything is overridable through the config.

use serde::{Deserialize, Serialize};

/// User agent sent when the host does not override it.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";

/// Default viewport, a common phone-sized screen.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 390;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 844;

/// The synthetic browser description attached to every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualBrowser {
    /// Sent as the `User-Agent` header; omitted as a header when empty.
    pub user_agent: String,
    pub width: u32,
    pub height: u32,
    /// BCP 47 language tag, e.g. `en-US`.
    pub language: String,
    /// IANA timezone name, e.g. `Europe/Madrid`.
    pub timezone: String,
}

impl VirtualBrowser {
    pub fn new(
        user_agent: impl Into<String>,
        width: u32,
        height: u32,
        language: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            width,
            height,
            language: language.into(),
            timezone: timezone.into(),
        }
    }

    /// Build a descriptor from the host environment.
    ///
    /// Language comes from `LANG` (normalized from `en_US.UTF-8` form to
    /// `en-US`), timezone from `TZ` or `/etc/timezone`. Unknowns fall back
    /// to `en-US` and `UTC`.
    pub fn detect() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            language: detect_language(),
            timezone: detect_timezone(),
        }
    }
}

impl Default for VirtualBrowser {
    fn default() -> Self {
        Self::detect()
    }
}

fn detect_language() -> String {
    match std::env::var("LANG") {
        Ok(lang) if !lang.is_empty() && !lang.starts_with('C') => {
            // "en_US.UTF-8" -> "en-US"
            let tag = lang.split('.').next().unwrap_or(&lang);
            tag.replace('_', "-")
        }
        _ => "en-US".to_string(),
    }
}

fn detect_timezone() -> String {
    if let Ok(tz) = std::env::var("TZ") {
        if !tz.is_empty() {
            return tz;
        }
    }
    if let Ok(tz) = std::fs::read_to_string("/etc/timezone") {
        let tz = tz.trim();
        if !tz.is_empty() {
            return tz.to_string();
        }
    }
    "UTC".to_string()
}
