//! Request assembly
//!
//! The pure function that turns one tracked event plus everything collected
//! around it (model output, data-layer contents, storage exports, identity)
//! into the final URL and JSON body. Given a fixed date provider the output
//! is deterministic down to the byte: every map is `BTreeMap`-backed and the
//! query string is sorted by raw key before encoding.
//!
//! Nothing here performs I/O; the dispatcher owns the network.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::config::Config;
use crate::domain::errors::SstError;
use crate::domain::event::{Event, TIMESTAMP_KEY};

/// Fixed query parameter identifying the request source.
pub const SST_ORIGIN_PARAMETER: &str = "sstOrigin";

/// Fixed query parameter carrying the SDK version.
pub const SST_VERSION_PARAMETER: &str = "sstVersion";

/// Value of [`SST_ORIGIN_PARAMETER`]; callers cannot override it.
pub const SST_ORIGIN_VALUE: &str = "mobile";

/// SDK version stamped into the query string and library metadata.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Payload key holding the composed per-model sections.
pub const MOBILE_DATA_KEY: &str = "__mobileData";

/// Cookie record name the per-install identity travels under.
pub const UUID_COOKIE_NAME: &str = "uuid";

/// Percent-encode everything outside the RFC 3986 unreserved set, so that
/// spaces become `%20` (not `+`), `&` becomes `%26` and `=` becomes `%3D`.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

// ---------------------------------------------------------------------------
// Inputs and output
// ---------------------------------------------------------------------------

/// Snapshot of the three web-storage style stores, taken per event.
///
/// `None` means the store was empty; its payload key is omitted entirely,
/// which collection endpoints treat differently from an empty list.
#[derive(Debug, Clone, Default)]
pub struct StorageExports {
    pub cookies: Option<Vec<Value>>,
    pub local_storage: Option<Vec<Value>>,
    pub session_storage: Option<Vec<Value>>,
}

/// A fully assembled outbound request, serialized exactly once.
#[derive(Debug, Clone)]
pub struct AssembledRequest {
    pub url: String,
    pub body: String,
    /// Computed User-Agent; sent as a header unless empty.
    pub user_agent: String,
}

// ---------------------------------------------------------------------------
// Payload shape
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct RequestPayload {
    #[serde(rename = "dataLayer")]
    data_layer: Map<String, Value>,
    events: Vec<EventPayload>,
    settings: SettingsPayload,
    #[serde(rename = "virtualBrowser")]
    virtual_browser: VirtualBrowserPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    cookies: Option<Vec<Value>>,
    #[serde(rename = "localStorage", skip_serializing_if = "Option::is_none")]
    local_storage: Option<Vec<Value>>,
    #[serde(rename = "sessionStorage", skip_serializing_if = "Option::is_none")]
    session_storage: Option<Vec<Value>>,
}

#[derive(Serialize)]
struct EventPayload {
    name: String,
    data: Map<String, Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsPayload {
    publish_path: String,
    nexus_host: String,
}

#[derive(Serialize)]
struct VirtualBrowserPayload {
    height: u32,
    width: u32,
    language: String,
    timezone: String,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Assemble the outbound request for one event.
///
/// Fails only when a value captured into the event at the API boundary was
/// not representable as JSON; the error names the offending key and nothing
/// is sent for this event.
pub fn assemble(
    config: &Config,
    event: &Event,
    model_results: BTreeMap<String, Value>,
    data_layer: BTreeMap<String, Value>,
    mut exports: StorageExports,
    identity: Option<String>,
) -> Result<AssembledRequest, SstError> {
    let mut event_data: Map<String, Value> = Map::new();
    for (key, captured) in event.data() {
        match captured.as_result() {
            Ok(value) => {
                event_data.insert(key.clone(), value.clone());
            }
            Err(detail) => {
                return Err(SstError::Serialization {
                    key: key.clone(),
                    detail: detail.to_string(),
                })
            }
        }
    }

    // First write wins: only stamp the time when the caller didn't.
    if !event_data.contains_key(TIMESTAMP_KEY) {
        let now_millis = config.date_provider.now().timestamp_millis();
        event_data.insert(TIMESTAMP_KEY.to_string(), Value::from(now_millis));
    }

    let mut data_layer_section: Map<String, Value> = Map::new();
    data_layer_section.insert(
        MOBILE_DATA_KEY.to_string(),
        Value::Object(model_results.into_iter().collect()),
    );
    data_layer_section.insert(
        config.data_layer_name.clone(),
        Value::Object(data_layer.into_iter().collect()),
    );

    if let Some(uuid) = identity {
        exports
            .cookies
            .get_or_insert_with(Vec::new)
            .push(json!({ "name": UUID_COOKIE_NAME, "value": uuid }));
    }

    let payload = RequestPayload {
        data_layer: data_layer_section,
        events: vec![EventPayload {
            name: event.name().to_string(),
            data: event_data,
        }],
        settings: SettingsPayload {
            publish_path: config.publish_path.clone(),
            nexus_host: config.nexus_host.clone(),
        },
        virtual_browser: VirtualBrowserPayload {
            height: config.virtual_browser.height,
            width: config.virtual_browser.width,
            language: config.virtual_browser.language.clone(),
            timezone: config.virtual_browser.timezone.clone(),
        },
        cookies: exports.cookies,
        local_storage: exports.local_storage,
        session_storage: exports.session_storage,
    };

    let origin = config.collect_origin()?;
    let url = format!(
        "{origin}/pc/{}/{}?{}",
        config.account_name,
        config.publish_path,
        build_query(event.parameters())
    );

    let body = serde_json::to_string(&payload).map_err(|e| SstError::Serialization {
        key: "__payload".to_string(),
        detail: e.to_string(),
    })?;

    Ok(AssembledRequest {
        url,
        body,
        user_agent: config.virtual_browser.user_agent.clone(),
    })
}

/// Merge caller parameters with the fixed SDK parameters (SDK wins), sort by
/// raw key, and encode.
fn build_query(parameters: &BTreeMap<String, String>) -> String {
    let mut pairs = parameters.clone();
    pairs.insert(
        SST_ORIGIN_PARAMETER.to_string(),
        SST_ORIGIN_VALUE.to_string(),
    );
    pairs.insert(SST_VERSION_PARAMETER.to_string(), SDK_VERSION.to_string());

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(component: &str) -> String {
    utf8_percent_encode(component, QUERY_ENCODE_SET).to_string()
}
