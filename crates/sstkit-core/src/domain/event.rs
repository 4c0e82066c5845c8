//! Tracked events and boundary value capture
//!
//! An [`Event`] is the unit of work for the whole SDK: one event in, one
//! outbound request out. Event data accepts any `serde::Serialize` value;
//! conversion to JSON happens immediately at the API boundary so that a
//! non-representable value is pinned to the key that carried it instead of
//! failing the whole payload serialization later with no context.
//!
//! ## Design Notes
//!
//! - A failed capture is stored, not dropped: assembly surfaces it as
//!   [`SstError::Serialization`](crate::domain::errors::SstError) with the
//!   offending key, and the event is never sent.
//! - Both maps are `BTreeMap` so iteration (and therefore the serialized
//!   payload and query string) is deterministic.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Reserved event-data key for the epoch-millisecond timestamp.
///
/// First write wins: a caller-supplied value is never overwritten by the SDK.
pub const TIMESTAMP_KEY: &str = "__timestamp";

/// Reserved request parameter that opts a single event out of identity
/// stamping. The parameter itself still travels in the query string.
pub const OPT_OUT_PARAMETER: &str = "ensDisableTracking";

// ---------------------------------------------------------------------------
// CapturedValue
// ---------------------------------------------------------------------------

/// The outcome of converting a caller-supplied value to JSON at the API
/// boundary.
#[derive(Debug, Clone)]
pub struct CapturedValue(Result<Value, String>);

impl CapturedValue {
    /// Convert `value` to JSON now, recording the serializer message on
    /// failure.
    pub fn capture<T: Serialize>(value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => Self(Ok(v)),
            Err(e) => Self(Err(e.to_string())),
        }
    }

    /// Wrap an already-converted JSON value.
    pub fn from_value(value: Value) -> Self {
        Self(Ok(value))
    }

    /// The captured value, or the capture failure message.
    pub fn as_result(&self) -> Result<&Value, &str> {
        match &self.0 {
            Ok(v) => Ok(v),
            Err(e) => Err(e.as_str()),
        }
    }

    /// Returns true if the value converted cleanly.
    pub fn is_valid(&self) -> bool {
        self.0.is_ok()
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A single tracked event: a name, arbitrary JSON-serializable data, and
/// outbound query-string parameters.
#[derive(Debug, Clone, Default)]
pub struct Event {
    name: String,
    data: BTreeMap<String, CapturedValue>,
    parameters: BTreeMap<String, String>,
}

impl Event {
    /// Create an event with the given name and no data or parameters.
    ///
    /// The name is expected to be non-empty; the collection endpoint rejects
    /// nameless events.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: BTreeMap::new(),
            parameters: BTreeMap::new(),
        }
    }

    /// Attach a data value under `key`, capturing it as JSON immediately.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.data.insert(key.into(), CapturedValue::capture(value));
        self
    }

    /// Attach a query-string parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &BTreeMap<String, CapturedValue> {
        &self.data
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// True when the caller flagged this event with [`OPT_OUT_PARAMETER`].
    pub fn opts_out_of_tracking(&self) -> bool {
        self.parameters.contains_key(OPT_OUT_PARAMETER)
    }
}
