//! Integration tests for Engine logging system
//!
//! These tests verify the logging system and the messages the culling
//! system reports through it.
//! No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests


use glam::{Mat4, Vec3};
use host_device::HostDevice;
use stellar_cull::stellar::Engine;
use stellar_cull::stellar::camera::Camera;
use stellar_cull::stellar::culling::{CullingConfig, CullingMode, CullingSystem};
use stellar_cull::stellar::device::GraphicsDevice;
use stellar_cull::stellar::log::{Logger, LogEntry, LogSeverity};
use stellar_cull::stellar::scene::{
    MeshBounds, MeshId, MeshTable, ObjectTable, RenderableObject, Transform, TransformTable, AABB,
};
use stellar_cull::stellar::culling::CullInput;
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        let mut entries = self.entries.lock().unwrap();
        entries.push(LogEntry {
            severity: entry.severity,
            timestamp: entry.timestamp,
            source: entry.source.clone(),
            message: entry.message.clone(),
            file: entry.file,
            line: entry.line,
        });
    }
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    // Create test logger
    let (test_logger, entries) = TestLogger::new();

    // Set custom logger
    Engine::set_logger(test_logger);

    // Log some messages
    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    Engine::log(LogSeverity::Error, "test::module", "Test error message".to_string());

    // Verify logs were captured
    let captured_entries = entries.lock().unwrap();
    assert_eq!(captured_entries.len(), 3);

    // Verify first log (Info)
    assert_eq!(captured_entries[0].severity, LogSeverity::Info);
    assert_eq!(captured_entries[0].source, "test::module");
    assert_eq!(captured_entries[0].message, "Test info message");

    // Verify second log (Warn)
    assert_eq!(captured_entries[1].severity, LogSeverity::Warn);
    assert_eq!(captured_entries[1].source, "test::module");
    assert_eq!(captured_entries[1].message, "Test warning message");

    // Verify third log (Error)
    assert_eq!(captured_entries[2].severity, LogSeverity::Error);
    assert_eq!(captured_entries[2].source, "test::module");
    assert_eq!(captured_entries[2].message, "Test error message");

    // Reset to default logger
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    // Create test logger
    let (test_logger, entries) = TestLogger::new();

    // Set custom logger
    Engine::set_logger(test_logger);

    // Log error with file and line information
    Engine::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    // Verify log was captured with location
    let captured_entries = entries.lock().unwrap();
    assert_eq!(captured_entries.len(), 1);

    let entry = &captured_entries[0];
    assert_eq!(entry.severity, LogSeverity::Error);
    assert_eq!(entry.source, "test::error");
    assert_eq!(entry.message, "Critical error occurred");
    assert_eq!(entry.file, Some("test_file.rs"));
    assert_eq!(entry.line, Some(42));

    // Reset to default logger
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    // Create test logger
    let (test_logger, entries) = TestLogger::new();

    // Set custom logger
    Engine::set_logger(test_logger);

    // Log a message
    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());

    // Verify log was captured
    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
    }

    // Reset to default logger
    Engine::reset_logger();

    // Log another message (will go to default logger, not captured)
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());

    // Verify no new logs in test logger
    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1); // Still only one message
}

#[test]
#[serial]
fn test_integration_logging_different_severities() {
    // Create test logger
    let (test_logger, entries) = TestLogger::new();

    // Set custom logger
    Engine::set_logger(test_logger);

    // Log messages with all severity levels
    Engine::log(LogSeverity::Trace, "test", "Trace message".to_string());
    Engine::log(LogSeverity::Debug, "test", "Debug message".to_string());
    Engine::log(LogSeverity::Info, "test", "Info message".to_string());
    Engine::log(LogSeverity::Warn, "test", "Warn message".to_string());
    Engine::log(LogSeverity::Error, "test", "Error message".to_string());

    // Verify all severities were captured
    let captured_entries = entries.lock().unwrap();
    assert_eq!(captured_entries.len(), 5);

    assert_eq!(captured_entries[0].severity, LogSeverity::Trace);
    assert_eq!(captured_entries[1].severity, LogSeverity::Debug);
    assert_eq!(captured_entries[2].severity, LogSeverity::Info);
    assert_eq!(captured_entries[3].severity, LogSeverity::Warn);
    assert_eq!(captured_entries[4].severity, LogSeverity::Error);

    // Reset to default logger
    Engine::reset_logger();
}

// ============================================================================
// CULLING SYSTEM LOGGING
// ============================================================================

fn host_device() -> Arc<Mutex<dyn GraphicsDevice>> {
    Arc::new(Mutex::new(HostDevice::new()))
}

#[test]
#[serial]
fn test_integration_culling_mode_selection_is_logged() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let system = CullingSystem::new(host_device(), CullingConfig::with_mode(CullingMode::Off));
    assert!(system.is_ok());

    {
        let captured = entries.lock().unwrap();
        let selection = captured
            .iter()
            .find(|entry| entry.message.starts_with("Culling mode selected"))
            .expect("mode selection was not logged");
        assert_eq!(selection.severity, LogSeverity::Info);
        assert_eq!(selection.source, "stellar::Culling");
        assert_eq!(selection.message, "Culling mode selected: off");
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_culling_warns_once_per_frame_on_skipped_objects() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let camera = Camera::new(
        Mat4::look_at_rh(Vec3::ZERO, Vec3::Z, Vec3::Y),
        Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0),
    );
    let mut meshes = MeshTable::new();
    let cube = meshes.register(MeshBounds {
        aabb: AABB::from_center_half_extent(Vec3::ZERO, Vec3::splat(1.0)),
        index_count: 36,
        first_index: 0,
        vertex_offset: 0,
    });
    let mut transforms = TransformTable::new();
    let mut objects = ObjectTable::new();
    for (object_index, mesh) in [cube, MeshId(40), MeshId(41)].into_iter().enumerate() {
        let entity = transforms.spawn(Transform::from_position(Vec3::new(0.0, 0.0, 10.0)));
        objects
            .insert(RenderableObject { entity, mesh, object_index: object_index as u32 })
            .unwrap();
    }

    let device = host_device();
    let mut cmd = device.lock().unwrap().create_command_list().unwrap();
    let mut system = CullingSystem::new(device, CullingConfig::with_mode(CullingMode::CpuSerial)).unwrap();
    let input = CullInput {
        camera: &camera,
        objects: &objects,
        transforms: &transforms,
        meshes: &meshes,
    };
    system.cull(0, &input, cmd.as_mut()).unwrap();

    {
        let captured = entries.lock().unwrap();
        let warnings: Vec<_> = captured
            .iter()
            .filter(|entry| entry.severity == LogSeverity::Warn)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].source, "stellar::Culling");
        assert_eq!(warnings[0].message, "2 of 3 objects skipped (missing transform or mesh)");
    }

    Engine::reset_logger();
}
