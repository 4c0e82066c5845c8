//! SSTKit - event tracking for server-side tagging endpoints
//!
//! The facade crate: a process-wide `configure` / `track_event` API wired
//! over the core pipeline (model evaluation, request assembly), the
//! persistent stores and HTTP dispatch.
//!
//! ```rust,no_run
//! use sstkit::{Config, Event};
//!
//! # async fn example() {
//! sstkit::configure(Config::new("my_account"));
//! sstkit::track_event(Event::new("screen_view").with_data("screen_name", "Home")).await;
//! # }
//! ```
//!
//! `track_event` is fire-and-forget: it never panics and never returns an
//! error. Failures are logged and reported through the diagnostic channel;
//! callers who need the outcome use [`track_event_with_result`].

mod context;
mod dispatcher;
mod reporter;
mod stores;

use std::sync::Arc;

use sstkit_core::assemble::{assemble, StorageExports};

pub use dispatcher::TrackResult;
pub use reporter::{truncate, MAX_ERROR_MESSAGE_LEN};

// Re-exported building blocks, so embedders depend on this crate alone.
pub use sstkit_core::config::Config;
pub use sstkit_core::domain::errors::SstError;
pub use sstkit_core::domain::event::{CapturedValue, Event, OPT_OUT_PARAMETER, TIMESTAMP_KEY};
pub use sstkit_core::domain::virtual_browser::VirtualBrowser;
pub use sstkit_core::ports::date_provider::{FixedDateProvider, IDateProvider, SystemDateProvider};
pub use sstkit_core::ports::diagnostics::IDiagnosticsSink;
pub use sstkit_core::ports::model::{IModel, ModelContext};
pub use sstkit_core::ports::preference_store::IPreferenceStore;
pub use sstkit_core::registry::Models;
pub use sstkit_models::{
    required, AppInfo, AppModel, DeviceModel, DeviceModelBuilder, LibraryModel,
};
pub use sstkit_storage::{DataLayer, FileStore, IdentityManager, MemoryStore, StringStore};

/// Validate and install `config` as the active configuration.
///
/// On validation failure the error is logged, no snapshot is installed and
/// tracking stays inert until a valid configuration arrives. Events already
/// in flight keep the snapshot they started with.
pub fn configure(config: Config) {
    context::install(config);
}

/// Install a custom preference-store backend before any store is first used.
///
/// Returns whether the backend was installed; once any store has been
/// touched the set is fixed and late calls are ignored.
pub fn init_storage(backend: Arc<dyn IPreferenceStore>) -> bool {
    stores::init(backend)
}

/// Track one event, fire-and-forget.
pub async fn track_event(event: Event) {
    track_event_with_result(event).await;
}

/// Track one event and hand back what was sent.
///
/// `None` means the event went nowhere: not configured, a captured value had
/// no JSON form, or the collection endpoint refused or was unreachable.
pub async fn track_event_with_result(event: Event) -> Option<TrackResult> {
    let Some(ctx) = context::current() else {
        tracing::warn!(event = %event.name(), "track_event before configure, dropping event");
        return None;
    };
    let stores = stores::stores();

    let model_results = ctx.models.evaluate(&event, &ctx.evaluation_context()).await;

    let exports = StorageExports {
        cookies: stores.cookies.event_data(),
        local_storage: stores.local.event_data(),
        session_storage: stores.session.event_data(),
    };
    let identity = if event.opts_out_of_tracking() {
        None
    } else {
        Some(stores.identity.ensure_uuid())
    };

    let assembled = match assemble(
        &ctx.config,
        &event,
        model_results,
        stores.data_layer.all(),
        exports,
        identity,
    ) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(event = %event.name(), error = %e, "dropping event");
            reporter::send_report(&ctx, &e.to_string(), "sstkit.track_event", "SerializationError")
                .await;
            return None;
        }
    };

    if ctx.config.debug {
        tracing::debug!(url = %assembled.url, body = %assembled.body, "assembled request");
    }

    dispatcher::send(assembled, &ctx).await
}

/// Send one report through the diagnostic channel.
///
/// Unlike the track path this returns the real outcome, so hosts can verify
/// the channel works.
pub async fn send_error(message: &str, source_function_name: &str, error_kind: &str) -> bool {
    let Some(ctx) = context::current() else {
        tracing::warn!("send_error before configure, dropping report");
        return false;
    };
    reporter::send_report(&ctx, message, source_function_name, error_kind).await
}

/// The persisted per-install identity, if one exists.
///
/// The identity is created lazily by the first tracked event that does not
/// opt out; this accessor never creates one.
pub fn uuid() -> Option<String> {
    stores::stores().identity.get_uuid()
}

/// Forget the per-install identity. Idempotent; the next tracked event that
/// wants one creates a fresh value.
pub fn clear_uuid() {
    stores::stores().identity.clear_uuid();
}

/// Persistent JSON context exported with every request.
pub fn data_layer() -> &'static DataLayer {
    &stores::stores().data_layer
}

/// Cookie-equivalent string store, exported as `cookies`.
pub fn cookies() -> &'static StringStore {
    &stores::stores().cookies
}

/// Local-storage-equivalent string store, exported as `localStorage`.
pub fn local_storage() -> &'static StringStore {
    &stores::stores().local
}

/// Session-storage-equivalent string store, exported as `sessionStorage`.
pub fn session_storage() -> &'static StringStore {
    &stores::stores().session
}
