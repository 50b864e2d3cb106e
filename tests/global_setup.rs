//! Installing the process-wide logger through `setup_logger`
//!
//! One test only: the installed logger lives for the whole binary.

use chainlog::global;
use chainlog::prelude::*;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use tempfile::TempDir;

/// Strip the `YYYY/MM/DD HH:MM:SS ` header written before every record.
fn body(line: &str) -> &str {
    line.get(20..).unwrap_or_default()
}

#[test]
fn test_setup_logger_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let settings = LogSettings::new("fallback", 5, 7).with_format(OutputFormat::Json);
    let base = LogFileBase::new(temp_dir.path().join("logs"), "service", ".log");

    setup_logger(Some(&settings), &base).expect("first setup succeeds");
    assert!(global::is_initialized());

    // the installed logger names this test as its caller
    let callers = global::logger().callers();
    assert_eq!(callers.len(), 1);
    assert!(callers[0].contains("global_setup.rs:"), "{}", callers[0]);
    assert!(callers[0].ends_with("test_setup_logger_lifecycle"), "{}", callers[0]);

    global::info("service started");
    chainlog::warn!("disk at {}%", 91);
    global::logger()
        .with_field("job", "reindex")
        .error("job failed");

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| global::panic("cannot continue")));
    let payload = outcome.unwrap_err();
    let rendered = payload.downcast_ref::<String>().expect("String payload");
    assert!(rendered.contains(r#""msg":"cannot continue""#), "{}", rendered);

    let err = setup_logger(Some(&settings), &base).unwrap_err();
    assert!(matches!(err, LoggerError::AlreadyInitialized));

    // a rejected second setup leaves the filesystem alone
    let other = LogFileBase::new(temp_dir.path().join("other"), "service", ".log");
    let err = setup_logger(Some(&settings), &other).unwrap_err();
    assert!(matches!(err, LoggerError::AlreadyInitialized));
    assert!(!temp_dir.path().join("other").exists());

    global::logger().flush().unwrap();
    let content = fs::read_to_string(temp_dir.path().join("logs").join("service.log")).unwrap();
    let records: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(body(line)).expect("JSON body"))
        .collect();

    assert_eq!(records.len(), 4);
    assert_eq!(records[0]["level"], "info");
    assert_eq!(records[0]["msg"], "service started");
    assert_eq!(records[0]["callers"][0].as_str(), Some(callers[0].as_str()));
    assert_eq!(records[1]["level"], "warn");
    assert_eq!(records[1]["msg"], "disk at 91%");
    assert_eq!(records[2]["job"], "reindex");
    assert_eq!(records[3]["level"], "panic");
}
