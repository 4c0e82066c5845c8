//! Diagnostics sink port
//!
//! Components that absorb their own failures (model evaluation, data layer
//! writes) still need to tell someone. This port is the one-way channel they
//! use: synchronous, fire-and-forget, and forbidden from ever propagating an
//! error back into the caller. The production implementation forwards to the
//! nexus error reporter on a background task.

/// Fire-and-forget channel for internal failure reports.
pub trait IDiagnosticsSink: Send + Sync {
    /// Report an internal failure. Must not block and must not fail.
    ///
    /// `source` names the operation that failed (e.g. `DataLayer.add`),
    /// `error_kind` the coarse classification (e.g. `SerializationError`).
    fn report(&self, message: &str, source: &str, error_kind: &str);
}
