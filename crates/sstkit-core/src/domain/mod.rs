//! Domain entities and business logic
//!
//! This module contains the core domain types for SSTKit:
//! - Events and the values captured into them at the API boundary
//! - The virtual browser descriptor sent with every request
//! - Domain-specific error types

pub mod errors;
pub mod event;
pub mod virtual_browser;

// Re-export commonly used types
pub use errors::SstError;
pub use event::{CapturedValue, Event, OPT_OUT_PARAMETER, TIMESTAMP_KEY};
pub use virtual_browser::VirtualBrowser;
