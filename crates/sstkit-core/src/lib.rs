//! SSTKit Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Event`, `CapturedValue`, `VirtualBrowser`, `SstError`
//! - **Configuration** - `Config` with builder-style overrides and endpoint validation
//! - **Port definitions** - Traits for adapters: `IModel`, `IDateProvider`,
//!   `IDiagnosticsSink`, `IPreferenceStore`
//! - **Model registry** - `Models`, the ordered key-unique set of data providers
//!   with concurrent evaluation
//! - **Request assembly** - the pure function that composes model output, the
//!   data layer, storage exports and identity into one outbound request
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement.
//! The registry and assembler orchestrate domain entities through port interfaces.

pub mod assemble;
pub mod config;
pub mod domain;
pub mod ports;
pub mod registry;
