//! Storage command - Manage the persistent stores
//!
//! Provides the `sstkit storage` CLI command which:
//! 1. Sets, gets, removes and clears entries in any of the four stores
//! 2. Lists a store's contents in the shape it is exported into payloads
//!
//! Cookie, local and session stores hold strings; the data store holds
//! arbitrary JSON, so `set` parses its value as JSON when possible.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use crate::commands::parse_value;
use crate::output::{Console, OutputFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Cookies,
    Local,
    Session,
    Data,
}

#[derive(Debug, Subcommand)]
pub enum StorageCommand {
    /// Store an entry
    Set(SetArgs),
    /// Print one entry
    Get(EntryArgs),
    /// List a store's contents
    List(StoreArgs),
    /// Remove one entry
    Remove(EntryArgs),
    /// Remove every entry in a store
    Clear(StoreArgs),
}

#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Which store to operate on
    #[arg(value_enum)]
    pub store: StoreKind,
}

#[derive(Debug, Args)]
pub struct EntryArgs {
    /// Which store to operate on
    #[arg(value_enum)]
    pub store: StoreKind,
    /// Entry key
    pub key: String,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Which store to operate on
    #[arg(value_enum)]
    pub store: StoreKind,
    /// Entry key
    pub key: String,
    /// Entry value; parsed as JSON for the data store
    pub value: String,
}

impl StorageCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let console = Console::new(format);

        match self {
            StorageCommand::Set(args) => {
                match args.store {
                    StoreKind::Cookies => sstkit::cookies().add(&args.key, &args.value),
                    StoreKind::Local => sstkit::local_storage().add(&args.key, &args.value),
                    StoreKind::Session => sstkit::session_storage().add(&args.key, &args.value),
                    StoreKind::Data => sstkit::data_layer().add(&args.key, parse_value(&args.value)),
                }
                console.success(&format!("Stored '{}'", args.key));
            }
            StorageCommand::Get(args) => {
                let value = match args.store {
                    StoreKind::Cookies => sstkit::cookies().get(&args.key),
                    StoreKind::Local => sstkit::local_storage().get(&args.key),
                    StoreKind::Session => sstkit::session_storage().get(&args.key),
                    StoreKind::Data => sstkit::data_layer().get(&args.key).map(|v| v.to_string()),
                };
                match value {
                    Some(value) => {
                        if console.is_json() {
                            console.payload(&serde_json::json!({ "key": args.key, "value": value }));
                        } else {
                            console.success(&value);
                        }
                    }
                    None => console.warn(&format!("no entry for '{}'", args.key)),
                }
            }
            StorageCommand::List(args) => {
                let entries = list_entries(args.store);
                if console.is_json() {
                    console.payload(&entries);
                } else if is_empty(&entries) {
                    console.detail("(empty)");
                } else {
                    console.success(&format!("{:?} store", args.store));
                    for line in serde_json::to_string_pretty(&entries)?.lines() {
                        console.detail(line);
                    }
                }
            }
            StorageCommand::Remove(args) => {
                let removed = match args.store {
                    StoreKind::Cookies => sstkit::cookies().remove(&args.key),
                    StoreKind::Local => sstkit::local_storage().remove(&args.key),
                    StoreKind::Session => sstkit::session_storage().remove(&args.key),
                    StoreKind::Data => sstkit::data_layer().remove(&args.key),
                };
                if removed {
                    console.success(&format!("Removed '{}'", args.key));
                } else {
                    console.warn(&format!("no entry for '{}'", args.key));
                }
            }
            StorageCommand::Clear(args) => {
                match args.store {
                    StoreKind::Cookies => sstkit::cookies().clear(),
                    StoreKind::Local => sstkit::local_storage().clear(),
                    StoreKind::Session => sstkit::session_storage().clear(),
                    StoreKind::Data => sstkit::data_layer().clear(),
                }
                console.success(&format!("Cleared the {:?} store", args.store));
            }
        }

        Ok(())
    }
}

/// A store's contents in payload-export shape: name/value records for the
/// string stores, a plain object for the data store.
fn list_entries(kind: StoreKind) -> serde_json::Value {
    match kind {
        StoreKind::Cookies => {
            serde_json::Value::Array(sstkit::cookies().event_data().unwrap_or_default())
        }
        StoreKind::Local => {
            serde_json::Value::Array(sstkit::local_storage().event_data().unwrap_or_default())
        }
        StoreKind::Session => {
            serde_json::Value::Array(sstkit::session_storage().event_data().unwrap_or_default())
        }
        StoreKind::Data => {
            serde_json::Value::Object(sstkit::data_layer().all().into_iter().collect())
        }
    }
}

fn is_empty(entries: &serde_json::Value) -> bool {
    match entries {
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::Object(map) => map.is_empty(),
        _ => true,
    }
}
