//! Record assembled at emission time

use super::error::Result;
use super::fields::{FieldValue, Fields};
use super::log_level::LogLevel;
use chrono::Local;

pub const LEVEL_KEY: &str = "level";
pub const TIME_KEY: &str = "time";
pub const MSG_KEY: &str = "msg";
pub const CALLERS_KEY: &str = "callers";

/// Merged view of one log call: the four built-in keys plus the logger's
/// accumulated fields. User fields never shadow a built-in key.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Fields,
}

impl Record {
    /// Build a record stamped with the current local time.
    pub fn new(level: LogLevel, message: &str, callers: &[String], extra: &Fields) -> Self {
        let time = Local::now().timestamp_nanos_opt().unwrap_or_default();
        Self::at(time, level, message, callers, extra)
    }

    /// Build a record with an explicit timestamp in nanoseconds since the epoch.
    pub fn at(time: i64, level: LogLevel, message: &str, callers: &[String], extra: &Fields) -> Self {
        let mut fields = Fields::with_capacity(extra.len() + 4);
        fields.insert(LEVEL_KEY, level.name());
        fields.insert(TIME_KEY, time);
        fields.insert(MSG_KEY, message);
        fields.insert(CALLERS_KEY, callers.to_vec());
        fields.absorb(extra);
        Self { fields }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }

    pub fn level(&self) -> &str {
        self.fields
            .get(LEVEL_KEY)
            .and_then(FieldValue::as_str)
            .unwrap_or_default()
    }

    pub fn time(&self) -> i64 {
        self.fields
            .get(TIME_KEY)
            .and_then(FieldValue::as_i64)
            .unwrap_or_default()
    }

    pub fn message(&self) -> &str {
        self.fields
            .get(MSG_KEY)
            .and_then(FieldValue::as_str)
            .unwrap_or_default()
    }

    /// The callers entry in its bracketed, space-separated form.
    pub fn callers_display(&self) -> String {
        self.fields
            .get(CALLERS_KEY)
            .map(ToString::to_string)
            .unwrap_or_else(|| "[]".to_string())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Serialize to a compact JSON object
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keys() {
        let callers = vec!["a.rs:10 f".to_string()];
        let record = Record::at(42, LogLevel::Info, "hello", &callers, &Fields::new());

        assert_eq!(record.level(), "info");
        assert_eq!(record.time(), 42);
        assert_eq!(record.message(), "hello");
        assert_eq!(record.callers_display(), "[a.rs:10 f]");
        assert_eq!(record.fields().len(), 4);
    }

    #[test]
    fn test_user_fields_do_not_shadow_builtins() {
        let extra = Fields::new()
            .with("msg", "spoofed")
            .with("level", "panic")
            .with("request_id", "abc");
        let record = Record::at(1, LogLevel::Warn, "real", &[], &extra);

        assert_eq!(record.message(), "real");
        assert_eq!(record.level(), "warn");
        assert_eq!(
            record.get("request_id").and_then(FieldValue::as_str),
            Some("abc")
        );
    }

    #[test]
    fn test_empty_callers() {
        let record = Record::at(1, LogLevel::Debug, "m", &[], &Fields::new());
        assert_eq!(record.callers_display(), "[]");
    }

    #[test]
    fn test_new_uses_current_time() {
        let record = Record::new(LogLevel::Info, "now", &[], &Fields::new());
        assert!(record.time() > 0);
    }
}
