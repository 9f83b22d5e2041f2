//! Output helpers shared by the commands.
//!
//! Text goes to stdout with color, warnings to stderr. In JSON mode only
//! [`print`] writes anything, so stdout stays a single JSON document.

use colored::Colorize;
use serde::Serialize;

use crate::OutputFormat;

/// Print `value` as pretty JSON. Text mode prints nothing; the caller
/// renders its own text.
pub fn print<T: Serialize>(value: &T, format: OutputFormat, quiet: bool) {
    if quiet || format != OutputFormat::Json {
        return;
    }
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("failed to serialize output: {}", e),
    }
}

/// Print a success message.
pub fn success(msg: &str, format: OutputFormat, quiet: bool) {
    if quiet || format != OutputFormat::Text {
        return;
    }
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print an info message.
pub fn info(msg: &str, format: OutputFormat, quiet: bool) {
    if quiet || format != OutputFormat::Text {
        return;
    }
    println!("{}", msg);
}

/// Print a `label: value` line.
pub fn field(label: &str, value: impl std::fmt::Display, format: OutputFormat, quiet: bool) {
    let label = format!("{:<22}", format!("{}:", label));
    info(&format!("  {} {}", label.bold(), value), format, quiet);
}

/// Print a warning message.
pub fn warning(msg: &str, format: OutputFormat, quiet: bool) {
    if quiet || format != OutputFormat::Text {
        return;
    }
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

/// `yes` in green or `no` in red.
pub fn yes_no(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}
