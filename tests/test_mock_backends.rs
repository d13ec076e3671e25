//! Integration tests for mock backends

use trackball_scroll::backend::{MockScrollBackend, ScrollSink};
use trackball_scroll::device::constants::{EV_REL, EV_SYN, REL_X, SYN_REPORT};
use trackball_scroll::device::{MockMotionSource, MotionSource};
use trackball_scroll::{MotionSample, ScrollCommand};

#[test]
fn test_mock_scroll_backend() {
    let mut backend = MockScrollBackend::new();

    // All operations should succeed and be recorded
    assert!(backend.emit(&ScrollCommand::vertical(-6)).is_ok());
    assert!(backend.emit(&ScrollCommand::horizontal(2)).is_ok());
    assert!(backend.destroy().is_ok());

    assert_eq!(
        backend.emitted(),
        vec![ScrollCommand::vertical(-6), ScrollCommand::horizontal(2)]
    );
}

#[test]
fn test_mock_scroll_backend_clones_share_record() {
    let mut sb1 = MockScrollBackend::new();
    let mut sb2 = sb1.clone();

    assert!(sb1.emit(&ScrollCommand::vertical(1)).is_ok());
    assert!(sb2.emit(&ScrollCommand::vertical(2)).is_ok());

    assert_eq!(sb1.emitted().len(), 2);
    assert_eq!(sb2.emitted().len(), 2);
}

#[test]
fn test_mock_motion_source() {
    let mut source = MockMotionSource::new(vec![
        vec![MotionSample::new(EV_REL, REL_X, 4), MotionSample::new(EV_SYN, SYN_REPORT, 0)],
        vec![],
    ]);

    assert_eq!(source.read_batch().unwrap().len(), 2);
    assert!(source.read_batch().unwrap().is_empty());
    assert!(source.read_batch().is_err());
    assert!(source.release().is_ok());
}
