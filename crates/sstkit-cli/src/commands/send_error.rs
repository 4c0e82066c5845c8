//! Send-error command - Exercise the diagnostic side channel
//!
//! Provides the `sstkit send-error` CLI command, which posts a report to the
//! configured account's diagnostic endpoint and prints whether it was
//! accepted. Useful for checking connectivity before shipping a profile.

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::output::{Console, OutputFormat};

#[derive(Debug, Args)]
pub struct SendErrorCommand {
    /// Message to report; oversized messages are truncated by the SDK
    pub message: String,

    /// Reported source function name
    #[arg(long, default_value = "sstkit-cli")]
    pub source: String,

    /// Error kind label
    #[arg(long, default_value = "CliError")]
    pub kind: String,
}

impl SendErrorCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let console = Console::new(format);

        info!(kind = %self.kind, "Sending error report");

        if sstkit::send_error(&self.message, &self.source, &self.kind).await {
            console.success("Report delivered");
        } else {
            console.failure("Report was not delivered; rerun with -v for details");
        }

        Ok(())
    }
}
