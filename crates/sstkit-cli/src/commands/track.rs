//! Track command - Send a single event through the pipeline
//!
//! Provides the `sstkit track` CLI command which:
//! 1. Builds an event from name, `--data` and `--param` arguments
//! 2. Runs the full assembly pipeline against the configured account
//! 3. Prints the delivered URL (or the whole request with `--json`)

use anyhow::Result;
use clap::Args;
use sstkit::Event;
use tracing::info;

use crate::commands::{parse_value, split_pair};
use crate::output::{Console, OutputFormat};

#[derive(Debug, Args)]
pub struct TrackCommand {
    /// Event name
    pub name: String,

    /// Event data entry as key=value; values parse as JSON when possible
    #[arg(short, long = "data", value_name = "KEY=VALUE")]
    pub data: Vec<String>,

    /// Query-string parameter as key=value
    #[arg(short, long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Timestamp override in epoch milliseconds
    #[arg(long, value_name = "MILLIS")]
    pub timestamp: Option<i64>,

    /// Flag the event as opted out of tracking
    #[arg(long)]
    pub opt_out: bool,
}

impl TrackCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let console = Console::new(format);

        let mut event = Event::new(&self.name);
        for entry in &self.data {
            let (key, value) = split_pair(entry)?;
            event = event.with_data(key, parse_value(value));
        }
        for entry in &self.params {
            let (key, value) = split_pair(entry)?;
            event = event.with_parameter(key, value);
        }
        if let Some(millis) = self.timestamp {
            event = event.with_data(sstkit::TIMESTAMP_KEY, millis);
        }
        if self.opt_out {
            event = event.with_parameter(sstkit::OPT_OUT_PARAMETER, "user");
        }

        info!(event = %self.name, "Tracking event");

        match sstkit::track_event_with_result(event).await {
            Some(result) => {
                if console.is_json() {
                    let body: serde_json::Value = serde_json::from_str(&result.request_body)?;
                    console.payload(&serde_json::json!({
                        "url": result.url,
                        "userAgent": result.user_agent,
                        "body": body,
                    }));
                } else {
                    console.success(&format!("Event '{}' delivered", self.name));
                    console.detail(&format!("URL: {}", result.url));
                    console.detail(&format!("Body: {} bytes", result.request_body.len()));
                }
            }
            None => {
                console.failure("Event was not delivered; rerun with -v for details");
            }
        }

        Ok(())
    }
}
