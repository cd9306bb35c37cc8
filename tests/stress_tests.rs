//! Stress tests for the concurrency modes
//!
//! These tests verify:
//! - Locked sinks never interleave lines written from many threads
//! - Offloaded sinks write every record once their pool is stopped
//! - A single worker keeps records in submission order

use slogpp::attr;
use slogpp::sinks::{compose, ConcurrencyMode, FileDestination, WriterSink};
use slogpp::utils::ThreadPool;
use slogpp::{Formatter, Level, LevelFilter, Logger};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const MESSAGES_PER_THREAD: usize = 500;

fn file_logger(path: &Path, mode: ConcurrencyMode, pool: &Arc<ThreadPool>) -> Logger {
    let destination = FileDestination::open(path).expect("Failed to open log file");
    let writer = WriterSink::new(
        destination,
        Formatter::Json,
        LevelFilter::from_level(Level::TRACE),
    );
    Logger::new(compose(writer, mode, pool))
}

fn hammer(logger: &Logger) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.with([attr::int("thread", t as i64)]);
            thread::spawn(move || {
                for i in 0..MESSAGES_PER_THREAD {
                    logger.info(
                        "stress message with a reasonably long body to widen the write",
                        [attr::int("seq", i as i64), attr::string("padding", "x".repeat(64))],
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Logging thread panicked");
    }
}

/// Every line parses on its own and every (thread, seq) pair shows up once.
fn assert_complete(path: &Path) {
    let content = fs::read_to_string(path).expect("Failed to read log file");
    let mut seen = HashSet::new();
    for line in content.lines() {
        let entry: serde_json::Value =
            serde_json::from_str(line).unwrap_or_else(|e| panic!("torn line {:?}: {}", line, e));
        let key = (entry["thread"].as_i64(), entry["seq"].as_i64());
        assert!(seen.insert(key), "duplicate record {:?}", key);
    }
    assert_eq!(seen.len(), THREADS * MESSAGES_PER_THREAD);
}

#[test]
fn test_mt_safe_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("mt_safe.log");
    let pool = Arc::new(ThreadPool::new());

    let logger = file_logger(&log_file, ConcurrencyMode::MtSafe, &pool);
    hammer(&logger);
    drop(logger);

    assert_complete(&log_file);
}

#[test]
fn test_async_mt_safe_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("async_mt_safe.log");
    let pool = Arc::new(ThreadPool::with_size(4).expect("Failed to start workers"));

    let logger = file_logger(&log_file, ConcurrencyMode::AsyncMtSafe, &pool);
    hammer(&logger);

    // Joins the workers and runs whatever is still queued.
    pool.set_size(0).expect("Failed to stop workers");
    assert_eq!(pool.pending(), 0);
    drop(logger);

    assert_complete(&log_file);
}

#[test]
fn test_single_worker_keeps_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("ordered.log");
    let pool = Arc::new(ThreadPool::with_size(1).expect("Failed to start worker"));

    let logger = file_logger(&log_file, ConcurrencyMode::Async, &pool);
    for i in 0..2_000i64 {
        logger.debug("ordered", [attr::int("seq", i)]);
    }
    pool.set_size(0).expect("Failed to stop worker");
    drop(logger);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let sequence: Vec<i64> = content
        .lines()
        .map(|line| {
            let entry: serde_json::Value = serde_json::from_str(line).expect("valid JSON");
            entry["seq"].as_i64().expect("seq is an integer")
        })
        .collect();
    assert_eq!(sequence, (0..2_000).collect::<Vec<_>>());
}

#[test]
fn test_resize_while_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("resize.log");
    let pool = Arc::new(ThreadPool::with_size(2).expect("Failed to start workers"));

    let logger = file_logger(&log_file, ConcurrencyMode::AsyncMtSafe, &pool);
    let resizer = {
        let pool = Arc::clone(&pool);
        thread::spawn(move || {
            for size in [4, 1, 3, 0, 2] {
                pool.set_size(size).expect("Failed to resize");
                thread::yield_now();
            }
        })
    };
    hammer(&logger);
    resizer.join().expect("Resizer panicked");

    pool.set_size(0).expect("Failed to stop workers");
    drop(logger);

    assert_complete(&log_file);
}
