//! Test to verify mock backends log output correctly

use trackball_scroll::backend::{MockScrollBackend, ScrollSink};
use trackball_scroll::device::constants::{EV_REL, REL_Y};
use trackball_scroll::{shutdown_channel, MockMotionSource, MotionSample, Policy, ScrollCommand, ScrollManager};

#[test]
fn test_mock_scroll_logs() {
    // Initialize a simple logger for testing
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Info)
        .try_init();

    let mut backend = MockScrollBackend::new();

    // These should log at info level (visible with RUST_LOG=info)
    assert!(backend.emit(&ScrollCommand::vertical(-3)).is_ok());
    assert!(backend.destroy().is_ok());
}

#[test]
fn test_manager_logs_at_trace() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();

    let backend = MockScrollBackend::new();
    let source = MockMotionSource::new(vec![vec![MotionSample::new(EV_REL, REL_Y, 10)]]);
    let mut manager = ScrollManager::new(source, backend.clone(), Policy::default());

    let (_handle, token) = shutdown_channel();
    // Source runs dry after one batch, which ends the loop with a read error
    assert!(manager.run(&token).is_err());
    assert_eq!(backend.emitted(), vec![ScrollCommand::vertical(-3)]);
}
