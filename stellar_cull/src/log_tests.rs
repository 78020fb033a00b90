//! Unit tests for log.rs
//!
//! Severity ordering, the default console logger, and the error macros.
//! Routing of the severity macros through `Engine` is covered in engine_tests.rs.

use crate::error::{Error, Result};
use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
use serial_test::serial;
use std::time::SystemTime;

fn culling_entry(severity: LogSeverity, message: &str) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "stellar::Culling".to_string(),
        message: message.to_string(),
        file: None,
        line: None,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_skipped_object_warning_outranks_frame_statistics() {
    let stats = culling_entry(LogSeverity::Trace, "frame 7 slot 1: 4096 objects, survivors Known(812)");
    let skipped = culling_entry(LogSeverity::Warn, "3 of 4096 objects skipped (missing transform or mesh)");

    assert!(skipped.severity > stats.severity);
    assert!(skipped.severity < LogSeverity::Error);
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_clone_keeps_location() {
    let entry = LogEntry {
        severity: LogSeverity::Error,
        timestamp: SystemTime::now(),
        source: "stellar::FrameResources".to_string(),
        message: "Failed to grow frame slot 1 to 4096 draws".to_string(),
        file: Some("frame_resources.rs"),
        line: Some(128),
    };

    let copy = entry.clone();

    assert_eq!(copy.severity, LogSeverity::Error);
    assert_eq!(copy.timestamp, entry.timestamp);
    assert_eq!(copy.source, "stellar::FrameResources");
    assert_eq!(copy.message, entry.message);
    assert_eq!(copy.file, Some("frame_resources.rs"));
    assert_eq!(copy.line, Some(128));
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_prints_a_culling_frame() {
    let logger = DefaultLogger;

    logger.log(&culling_entry(LogSeverity::Info, "Culling mode selected: cpu-parallel"));
    logger.log(&culling_entry(LogSeverity::Trace, "frame 0 slot 0: 10000 objects, survivors Known(1415)"));
    logger.log(&culling_entry(LogSeverity::Warn, "50 of 10050 objects skipped (missing transform or mesh)"));
    logger.log(&LogEntry {
        file: Some("gpu_compute.rs"),
        line: Some(96),
        ..culling_entry(LogSeverity::Error, "Failed to upload cull input")
    });
}

#[test]
fn test_default_logger_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
}

// ============================================================================
// MACRO TESTS
// ============================================================================

#[test]
#[serial]
fn test_engine_err_macro_builds_backend_error() {
    let err = crate::engine_err!("stellar::vulkan", "allocation of {} bytes failed", 4096);
    match err {
        Error::BackendError(msg) => assert_eq!(msg, "allocation of 4096 bytes failed"),
        other => panic!("expected BackendError, got {:?}", other),
    }
}

fn first_survivor(visible: &[u32]) -> Result<u32> {
    if visible.is_empty() {
        crate::engine_bail!("stellar::Culling", "no object survived culling");
    }
    Ok(visible[0])
}

#[test]
#[serial]
fn test_engine_bail_macro_returns_early() {
    assert!(matches!(first_survivor(&[]), Err(Error::BackendError(_))));
    assert_eq!(first_survivor(&[7, 9]).unwrap(), 7);
}
