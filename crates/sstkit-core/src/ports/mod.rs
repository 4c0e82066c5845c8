//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IModel`] - A named data provider evaluated per tracked event
//! - [`IDateProvider`] - Clock abstraction (fixed in tests, system otherwise)
//! - [`IDiagnosticsSink`] - Fire-and-forget channel for self-error-reports
//! - [`IPreferenceStore`] - Namespaced persistent string key-value storage

pub mod date_provider;
pub mod diagnostics;
pub mod model;
pub mod preference_store;

pub use date_provider::{FixedDateProvider, IDateProvider, SystemDateProvider};
pub use diagnostics::IDiagnosticsSink;
pub use model::{IModel, ModelContext};
pub use preference_store::IPreferenceStore;
