//! Integration tests for slog++
//!
//! These tests verify:
//! - File sinks built from options in JSON and text
//! - Bound attributes reaching the output
//! - Level filtering at the sink
//! - Declarative configuration loaded from JSON
//! - Log injection prevention in JSON output

use serde_json::Value as Json;
use slogpp::attr;
use slogpp::config::{
    build_sink, build_sink_from_config, from_level, with_file_output, with_format, with_level,
    with_locking, Config,
};
use slogpp::{group, info, warn, Level, Logger, OutputFormat, SlogError};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(str::to_owned)
        .collect()
}

fn parse(line: &str) -> Json {
    serde_json::from_str(line).unwrap_or_else(|e| panic!("invalid JSON line {:?}: {}", line, e))
}

#[test]
fn test_json_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.json");

    let sink = build_sink([with_file_output(
        &log_file,
        [from_level(Level::DEBUG), with_locking()],
    )])
    .expect("Failed to build sink");
    let logger = Logger::new(sink);

    logger.trace("filtered", []);
    logger.info(
        "request served",
        [
            attr::string("path", "/index.html"),
            attr::int("status", 200),
            attr::bool("cached", false),
            attr::duration("latency", Duration::from_micros(1100)),
            group!("client", attr::string("ip", "10.0.0.7"), attr::float("score", 0.5)),
        ],
    );
    drop(logger);

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 1);

    let entry = parse(&lines[0]);
    assert_eq!(entry["level"], "INFO");
    assert_eq!(entry["message"], "request served");
    assert_eq!(entry["path"], "/index.html");
    assert_eq!(entry["status"], 200);
    assert_eq!(entry["cached"], false);
    assert_eq!(entry["latency"], "1.1ms");
    assert_eq!(entry["client"]["ip"], "10.0.0.7");
    assert_eq!(entry["client"]["score"], 0.5);

    let time = entry["time"].as_str().expect("time is a string");
    assert!(time.ends_with('Z'), "{}", time);
    assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok(), "{}", time);
}

#[test]
fn test_text_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let sink = build_sink([with_file_output(
        &log_file,
        [with_format(OutputFormat::Text), from_level(Level::INFO)],
    )])
    .expect("Failed to build sink");
    let logger = Logger::new(sink);

    logger.warn(
        "disk almost full",
        [
            attr::string("mount", "/var"),
            group!("usage", attr::int("used", 95), attr::string("unit", "percent")),
        ],
    );
    drop(logger);

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 1);
    let (timestamp, rest) = lines[0].split_once(' ').expect("timestamp separator");
    assert!(timestamp.ends_with('Z'));
    assert_eq!(
        rest,
        "WARN \"disk almost full\" mount=/var usage.used=95 usage.unit=percent"
    );
}

#[test]
fn test_bound_attributes_precede_call_attributes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("bound.json");

    let sink = build_sink([with_file_output(&log_file, [from_level(Level::TRACE)])])
        .expect("Failed to build sink");
    let root = Logger::new(sink);
    let request = root
        .with([attr::string("request_id", "r-17")])
        .with_error("connection reset");

    request.error("upstream failed", [attr::int("attempt", 3)]);
    root.info("unrelated", []);
    drop((root, request));

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(
        r#""message":"upstream failed","request_id":"r-17","error":"connection reset","attempt":3}"#
    ));
    let second = parse(&lines[1]);
    assert_eq!(second["message"], "unrelated");
    assert!(second.get("request_id").is_none());
}

#[test]
fn test_selected_levels_only() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("levels.json");

    let sink = build_sink([with_file_output(
        &log_file,
        [with_level(&[Level::DEBUG, Level::ERROR.sub(2)])],
    )])
    .expect("Failed to build sink");
    let logger = Logger::new(sink);

    logger.debug("kept", []);
    logger.info("dropped", []);
    logger.log(Level::ERROR.sub(2), "kept too", []);
    logger.error("dropped too", []);
    drop(logger);

    let levels: Vec<String> = read_lines(&log_file)
        .iter()
        .map(|line| parse(line)["level"].as_str().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(levels, vec!["DEBUG", "ERROR_2"]);
}

#[test]
fn test_macros_write_formatted_messages() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("macros.json");

    let sink = build_sink([with_file_output(&log_file, [from_level(Level::INFO)])])
        .expect("Failed to build sink");
    let logger = Logger::new(sink);

    info!(logger, "listening on port {}", 8080; attr::string("proto", "tcp"));
    warn!(logger, "retry {} of {}", 2, 5);
    drop(logger);

    let lines = read_lines(&log_file);
    assert_eq!(parse(&lines[0])["message"], "listening on port 8080");
    assert_eq!(parse(&lines[0])["proto"], "tcp");
    assert_eq!(parse(&lines[1])["message"], "retry 2 of 5");
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection.json");

    let sink = build_sink([with_file_output(&log_file, [from_level(Level::INFO)])])
        .expect("Failed to build sink");
    let logger = Logger::new(sink);

    let malicious = "User login\n{\"level\":\"ERROR\",\"message\":\"fake\"}";
    logger.info(malicious, [attr::string("user", "evil\r\nadmin")]);
    drop(logger);

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 1, "Log should be a single line");
    let entry = parse(&lines[0]);
    assert_eq!(entry["message"], malicious);
    assert_eq!(entry["user"], "evil\r\nadmin");
}

#[test]
fn test_config_from_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("declared.log");

    let json = serde_json::json!({
        "sinks": [{
            "type": "file",
            "filepath": log_file,
            "format": "text",
            "with_locking": true,
            "levels": ["WARN", "ERROR", "FATAL"],
        }],
    })
    .to_string();

    let config = Config::from_json(&json).expect("Failed to parse config");
    let sink = build_sink_from_config(config).expect("Failed to build sink");
    assert!(!sink.enabled(Level::INFO));
    assert!(sink.enabled(Level::CRITICAL));

    let logger = Logger::new(sink);
    logger.critical("meltdown", [attr::int("core", 7)]);
    drop(logger);

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(" FATAL meltdown core=7"), "{}", lines[0]);
}

#[test]
fn test_unwritable_file_is_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("missing").join("app.log");

    let result = build_sink([with_file_output(&log_file, [])]);
    match result {
        Err(SlogError::FileSink { path, .. }) => assert!(path.ends_with("app.log")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("opening a file in a missing directory succeeded"),
    }
}

#[test]
fn test_multiple_sinks_are_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let result = build_sink([
        with_file_output(temp_dir.path().join("a.log"), []),
        with_file_output(temp_dir.path().join("b.log"), []),
    ]);
    assert!(matches!(result, Err(SlogError::UnsupportedConfiguration(_))));
}
