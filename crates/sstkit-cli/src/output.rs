//! Console rendering for the sstkit binary
//!
//! Commands print three kinds of things: a verdict (delivered, stored,
//! cleared), detail lines under a verdict (the delivered URL, body size),
//! and whole JSON payloads (an assembled request, a store listing).
//! [`Console`] owns the human/JSON split for all three; a command only
//! branches on [`Console::is_json`] when the JSON shape has no human twin.

use serde_json::{json, Value};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Renders command results in the selected format.
pub struct Console {
    format: OutputFormat,
}

impl Console {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Positive verdict on stdout.
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", verdict_line(true, message)),
            OutputFormat::Json => println!("{}", envelope(true, message)),
        }
    }

    /// Negative verdict on stderr. The process still exits zero; delivery
    /// failures are an outcome, not a usage error.
    pub fn failure(&self, message: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("{}", verdict_line(false, message)),
            OutputFormat::Json => eprintln!("{}", envelope(false, message)),
        }
    }

    /// Cautionary note on stderr, e.g. removing an entry that was not there.
    pub fn warn(&self, message: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("\u{26a0} {message}"),
            OutputFormat::Json => eprintln!("{}", json!({ "warning": message })),
        }
    }

    /// Indented detail line under a verdict. Human mode only; JSON callers
    /// carry details in the payload instead.
    pub fn detail(&self, message: &str) {
        if self.format == OutputFormat::Human {
            println!("  {message}");
        }
    }

    /// Whole JSON payload, pretty-printed on stdout.
    pub fn payload(&self, value: &Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }
}

fn verdict_line(ok: bool, message: &str) -> String {
    if ok {
        format!("\u{2713} {message}")
    } else {
        format!("\u{2717} {message}")
    }
}

fn envelope(ok: bool, message: &str) -> Value {
    if ok {
        json!({ "success": true, "message": message })
    } else {
        json!({ "success": false, "error": message })
    }
}
