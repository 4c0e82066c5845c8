//! Diagnostic side channel
//!
//! Error reports go to `{nexus_origin}/error/e/{account}` as small JSON
//! documents. Everything here is best-effort: a failed report is logged at
//! debug level and forgotten, and callers only learn the outcome through the
//! returned bool.

use serde_json::json;
use sstkit_core::ports::diagnostics::IDiagnosticsSink;

use crate::context::Context;
use crate::dispatcher::http_client;

/// Upper bound on a reported message, in characters.
pub const MAX_ERROR_MESSAGE_LEN: usize = 3000;

/// Shorten `s` to at most `max_len` characters.
///
/// A string that fits is returned unchanged. A longer one is cut to
/// `max_len - 3` characters with `"..."` appended, so the truncated form is
/// exactly `max_len` characters long.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

/// POST one diagnostic report for the given snapshot.
pub(crate) async fn send_report(
    ctx: &Context,
    message: &str,
    source_function_name: &str,
    error_kind: &str,
) -> bool {
    let origin = match ctx.config.nexus_origin() {
        Ok(origin) => origin,
        Err(e) => {
            tracing::debug!(error = %e, "diagnostic endpoint unavailable");
            return false;
        }
    };
    let url = format!("{origin}/error/e/{}", ctx.config.account_name);
    let body = json!({
        "errorKind": error_kind,
        "message": truncate(message, MAX_ERROR_MESSAGE_LEN),
        "sourceFunctionName": source_function_name,
    });

    match http_client().post(&url).json(&body).send().await {
        Ok(response) if response.status().is_success() => true,
        Ok(response) => {
            tracing::debug!(url = %url, status = %response.status(), "diagnostic report rejected");
            false
        }
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "diagnostic report failed");
            false
        }
    }
}

/// Sink forwarding reports through the diagnostic channel.
///
/// Reports arrive from synchronous paths like `DataLayer::add`, so the send
/// is spawned onto the current tokio runtime; without one (or without an
/// active configuration) the report degrades to a log line.
pub(crate) struct RuntimeSink;

impl IDiagnosticsSink for RuntimeSink {
    fn report(&self, message: &str, source: &str, error_kind: &str) {
        let Some(ctx) = crate::context::current() else {
            tracing::debug!(
                source = %source,
                kind = %error_kind,
                message = %message,
                "diagnostic dropped, not configured"
            );
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let message = message.to_string();
                let source = source.to_string();
                let kind = error_kind.to_string();
                handle.spawn(async move {
                    send_report(&ctx, &message, &source, &kind).await;
                });
            }
            Err(_) => {
                tracing::debug!(
                    source = %source,
                    kind = %error_kind,
                    message = %message,
                    "diagnostic dropped, no runtime"
                );
            }
        }
    }
}
