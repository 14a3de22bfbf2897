//! Output formatting for API results.
//!
//! Supports pretty-printing and JSON serialization.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Debug;
use std::io::Write;
use tracing::debug;

/// Writes `value` to stdout using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl Debug) -> Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{:#?}", value)?;
    Ok(())
}

/// Writes `value` to stdout as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    write_json(&mut std::io::stdout().lock(), value)
}

/// Serializes `value` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(writer: &mut W, value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    debug!(bytes = json.len(), "Writing JSON output");
    writeln!(writer, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Alert, FromJson};
    use serde_json::{Value, json};

    #[test]
    fn test_write_json_round_trips_model() {
        let alert = Alert::from_value(&json!({
            "alert_id": "42",
            "header_text": "Delays of about 10 minutes",
            "effect_name": "Delay"
        }))
        .unwrap();

        let mut buf = Vec::new();
        write_json(&mut buf, &alert).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with('\n'));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["alert_id"], "42");
        assert_eq!(parsed["effect_name"], "Delay");
    }

    #[test]
    fn test_write_json_serializes_timestamps_as_rfc3339() {
        let dt = chrono::DateTime::<chrono::Utc>::from_timestamp(1_445_472_000, 0).unwrap();
        let mut buf = Vec::new();
        write_json(&mut buf, &dt).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().trim(), "\"2015-10-22T00:00:00Z\"");
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&vec!["Red", "Orange"]).unwrap();
    }
}
