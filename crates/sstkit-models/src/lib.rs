//! SSTKit Models - built-in data models
//!
//! The three models every payload is expected to carry:
//! - [`AppModel`] - what the host application is
//! - [`DeviceModel`] - what it is running on (id, os, screen; each
//!   section can be disabled)
//! - [`LibraryModel`] - the SDK itself plus the version map of every
//!   registered model
//!
//! [`required()`] returns the registry used when a configuration does not
//! supply its own model set.

use std::sync::Arc;

use sstkit_core::ports::model::IModel;
use sstkit_core::registry::Models;

pub mod app;
pub mod device;
pub mod library;

pub use app::{AppInfo, AppModel};
pub use device::{DeviceModel, DeviceModelBuilder};
pub use library::LibraryModel;

/// The mandatory built-in model set: app, device, library.
pub fn required() -> Models {
    Models::default()
        .add(Arc::new(AppModel::new()) as Arc<dyn IModel>)
        .add(Arc::new(DeviceModel::new()) as Arc<dyn IModel>)
        .add(Arc::new(LibraryModel) as Arc<dyn IModel>)
}
