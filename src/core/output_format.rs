//! Output format configuration for log records
//!
//! - Text: `[<time>] [<level>] [<callers>] <msg>`
//! - Json: the whole record as one compact JSON object

use super::record::Record;
use serde::{Deserialize, Serialize};

/// Rendering mode for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed bracketed layout (default)
    ///
    /// Example: `[1736332245123456789] [info] [[src/main.rs:10 app::main]] Request processed`
    #[default]
    Text,

    /// Flat JSON document
    ///
    /// Example: `{"level":"info","time":1736332245123456789,"msg":"Request processed","callers":[]}`
    Json,
}

impl OutputFormat {
    /// Render a record according to this output format
    pub fn format(&self, record: &Record) -> String {
        match self {
            OutputFormat::Text => self.format_text(record),
            OutputFormat::Json => self.format_json(record),
        }
    }

    fn format_text(&self, record: &Record) -> String {
        format!(
            "[{}] [{}] [{}] {}",
            record.time(),
            record.level(),
            record.callers_display(),
            record.message()
        )
    }

    /// Serialization errors yield an empty body; emission never fails on them.
    fn format_json(&self, record: &Record) -> String {
        record.to_json().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, LogLevel};

    #[test]
    fn test_text_format() {
        let callers = vec!["a.go:10 f".to_string()];
        let record = Record::at(1700, LogLevel::Info, "hello", &callers, &Fields::new());
        assert_eq!(
            OutputFormat::Text.format(&record),
            "[1700] [info] [[a.go:10 f]] hello"
        );
    }

    #[test]
    fn test_text_format_ignores_user_fields() {
        let extra = Fields::new().with("user_id", 123);
        let record = Record::at(5, LogLevel::Error, "boom", &[], &extra);
        assert_eq!(OutputFormat::Text.format(&record), "[5] [error] [[]] boom");
    }

    #[test]
    fn test_json_format() {
        let callers = vec!["a.go:10 f".to_string()];
        let extra = Fields::new()
            .with("request_id", "abc-123")
            .with("latency_ms", 42);
        let record = Record::at(1700, LogLevel::Info, "hello", &callers, &extra);

        let result = OutputFormat::Json.format(&record);
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["time"], 1700);
        assert_eq!(parsed["msg"], "hello");
        assert_eq!(parsed["callers"], serde_json::json!(["a.go:10 f"]));
        assert_eq!(parsed["request_id"], "abc-123");
        assert_eq!(parsed["latency_ms"], 42);
        assert_eq!(parsed.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_json_non_finite_float_degrades_to_null() {
        let extra = Fields::new().with("ratio", f64::NAN);
        let record = Record::at(1, LogLevel::Info, "m", &[], &extra);
        let parsed: serde_json::Value =
            serde_json::from_str(&OutputFormat::Json.format(&record)).unwrap();
        assert!(parsed["ratio"].is_null());
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
