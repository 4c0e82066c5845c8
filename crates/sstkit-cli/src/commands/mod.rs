//! CLI command implementations

pub mod completions;
pub mod send_error;
pub mod storage;
pub mod track;
pub mod uuid;

use anyhow::Result;

/// Split one `key=value` argument at the first `=`.
pub(crate) fn split_pair(entry: &str) -> Result<(&str, &str)> {
    entry
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected key=value, got '{}'", entry))
}

/// Parse a value as JSON where possible so `count=3` stays a number and
/// `done=true` stays a boolean; anything else becomes a string.
pub(crate) fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}
