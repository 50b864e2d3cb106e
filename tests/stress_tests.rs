//! Stress tests for chainlog
//!
//! These tests verify:
//! - Many threads sharing one rotating file sink lose no records
//! - Every record survives rotation whole
//! - Deep derivation chains stay cheap and correct

use chainlog::prelude::*;
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

#[test]
fn test_rotating_sink_under_concurrency() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("stress.log");

    let policy = RotationPolicy::new().with_max_size_mb(1);
    let sink = Arc::new(RotatingFileSink::with_policy(&log_path, policy).unwrap());
    let root = Logger::from_sink(sink.clone(), "", Flags::NONE).with_format(OutputFormat::Json);

    const THREADS: usize = 8;
    const PER_THREAD: usize = 2_000;
    let padding = "x".repeat(100);

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let logger = root.with_field("thread", thread_id).with_field("pad", padding.as_str());
            thread::spawn(move || {
                for seq in 0..PER_THREAD {
                    logger.with_field("seq", seq).info("tick");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    root.flush().unwrap();

    let backups = sink.backups();
    assert!(!backups.is_empty(), "expected at least one rotation");

    let mut seen = vec![vec![false; PER_THREAD]; THREADS];
    let mut total = 0;
    for path in backups.iter().chain(std::iter::once(&log_path)) {
        let content = fs::read_to_string(path).unwrap();
        assert!(content.len() as u64 <= 1024 * 1024);
        for line in content.lines() {
            let record: serde_json::Value = serde_json::from_str(line).expect("intact record");
            let thread_id = record["thread"].as_u64().unwrap() as usize;
            let seq = record["seq"].as_u64().unwrap() as usize;
            assert!(!seen[thread_id][seq], "duplicate record {} {}", thread_id, seq);
            seen[thread_id][seq] = true;
            total += 1;
        }
    }
    assert_eq!(total, THREADS * PER_THREAD);
}

#[test]
fn test_deep_derivation_chain() {
    let sink = Arc::new(MemorySink::new());
    let mut logger = Logger::from_sink(sink.clone(), "", Flags::NONE).with_format(OutputFormat::Json);

    for depth in 0..500 {
        logger = logger.with_field(format!("k{}", depth % 50), depth);
    }
    logger.info("deep");

    let record: serde_json::Value = serde_json::from_str(&sink.lines()[0]).unwrap();
    assert_eq!(record.as_object().unwrap().len(), 4 + 50);
    // the last write to each key wins
    assert_eq!(record["k0"], 450);
    assert_eq!(record["k49"], 499);
}
