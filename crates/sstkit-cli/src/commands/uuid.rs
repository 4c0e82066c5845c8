//! Uuid command - Inspect or clear the per-install identity
//!
//! Provides the `sstkit uuid` CLI command. The identity is created lazily by
//! the first tracked event that does not opt out; `show` never creates one.

use anyhow::Result;
use clap::Subcommand;

use crate::output::{Console, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum UuidCommand {
    /// Print the per-install identity
    Show,
    /// Forget the per-install identity
    Clear,
}

impl UuidCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let console = Console::new(format);

        match self {
            UuidCommand::Show => {
                let uuid = sstkit::uuid();
                if console.is_json() {
                    console.payload(&serde_json::json!({ "uuid": uuid }));
                } else {
                    match uuid {
                        Some(uuid) => console.success(&uuid),
                        None => console
                            .detail("No identity yet; one is minted by the first tracked event"),
                    }
                }
            }
            UuidCommand::Clear => {
                sstkit::clear_uuid();
                console.success("Identity cleared");
            }
        }

        Ok(())
    }
}
