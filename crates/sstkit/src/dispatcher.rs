//! Collection dispatcher
//!
//! Owns the HTTP client and the one POST that delivers an assembled event.
//! The track path never surfaces errors to the host: any failure collapses
//! to `None` after exactly one best-effort diagnostic report.

use std::sync::OnceLock;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use sstkit_core::assemble::AssembledRequest;

use crate::context::Context;
use crate::reporter;

static CLIENT: OnceLock<Client> = OnceLock::new();

/// Shared HTTP client for collection and diagnostic requests.
pub(crate) fn http_client() -> &'static Client {
    CLIENT.get_or_init(Client::new)
}

/// What [`crate::track_event_with_result`] hands back when the event was
/// accepted by the collection endpoint.
#[derive(Debug, Clone)]
pub struct TrackResult {
    /// Exact JSON body that was sent.
    pub request_body: String,
    /// Full collection URL including the query string.
    pub url: String,
    /// User-Agent the request carried; empty when the header was omitted.
    pub user_agent: String,
}

/// POST an assembled request to the collection endpoint.
pub(crate) async fn send(request: AssembledRequest, ctx: &Context) -> Option<TrackResult> {
    let mut call = http_client()
        .post(&request.url)
        .header(CONTENT_TYPE, "application/json");
    if !request.user_agent.is_empty() {
        call = call.header(USER_AGENT, &request.user_agent);
    }

    let outcome = match call.body(request.body.clone()).send().await {
        Ok(response) => response
            .error_for_status()
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match outcome {
        Ok(()) => {
            tracing::debug!(url = %request.url, "event delivered");
            Some(TrackResult {
                request_body: request.body,
                url: request.url,
                user_agent: request.user_agent,
            })
        }
        Err(detail) => {
            tracing::warn!(url = %request.url, error = %detail, "collection request failed");
            reporter::send_report(ctx, &detail, "sstkit.track_event", "NetworkError").await;
            None
        }
    }
}
