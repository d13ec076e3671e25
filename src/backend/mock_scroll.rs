//! Mock scroll backend for testing.
//!
//! This backend logs and records scroll steps instead of sending them to
//! the kernel. Clones share the same record, so a test can keep one clone
//! while the manager owns the other.

use crate::backend::{BackendError, ScrollSink};
use crate::device::types::ScrollCommand;
use log::info;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct MockState {
    emitted: Vec<ScrollCommand>,
    destroy_calls: usize,
    destroyed: bool,
}

/// Mock scroll backend that records events instead of sending them.
#[derive(Clone, Debug, Default)]
pub struct MockScrollBackend {
    state: Arc<Mutex<MockState>>,
    /// Fail every emission after this many successful ones
    fail_after: Option<usize>,
}

impl MockScrollBackend {
    /// Create a new mock scroll backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that accepts `count` emissions and fails afterwards.
    pub fn failing_after(count: usize) -> Self {
        Self {
            fail_after: Some(count),
            ..Self::default()
        }
    }

    /// Scroll steps emitted so far, in order
    pub fn emitted(&self) -> Vec<ScrollCommand> {
        self.state.lock().map(|s| s.emitted.clone()).unwrap_or_default()
    }

    /// Number of destroy() calls
    pub fn destroy_calls(&self) -> usize {
        self.state.lock().map(|s| s.destroy_calls).unwrap_or_default()
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.lock().map(|s| s.destroyed).unwrap_or_default()
    }
}

impl ScrollSink for MockScrollBackend {
    fn emit(&mut self, command: &ScrollCommand) -> Result<(), BackendError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| BackendError::Operation(e.to_string()))?;

        if state.destroyed {
            return Err(BackendError::NotActive);
        }
        if self.fail_after.is_some_and(|limit| state.emitted.len() >= limit) {
            return Err(BackendError::Operation("mock emission failure".into()));
        }

        info!("[MOCK SCROLL] {} {}", command.axis, command.amount);
        state.emitted.push(*command);
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), BackendError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| BackendError::Operation(e.to_string()))?;

        state.destroy_calls += 1;
        if !state.destroyed {
            info!("[MOCK SCROLL] Destroy");
            state.destroyed = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_scroll_records() {
        let mut backend = MockScrollBackend::new();
        let observer = backend.clone();

        assert!(backend.emit(&ScrollCommand::vertical(-2)).is_ok());
        assert!(backend.emit(&ScrollCommand::horizontal(5)).is_ok());

        assert_eq!(
            observer.emitted(),
            vec![ScrollCommand::vertical(-2), ScrollCommand::horizontal(5)]
        );
    }

    #[test]
    fn mock_scroll_rejects_after_destroy() {
        let mut backend = MockScrollBackend::new();
        assert!(backend.destroy().is_ok());
        assert!(backend.destroy().is_ok());
        assert!(backend.is_destroyed());
        assert_eq!(backend.destroy_calls(), 2);
        assert!(matches!(
            backend.emit(&ScrollCommand::vertical(1)),
            Err(BackendError::NotActive)
        ));
    }

    #[test]
    fn mock_scroll_fails_on_request() {
        let mut backend = MockScrollBackend::failing_after(1);
        assert!(backend.emit(&ScrollCommand::vertical(1)).is_ok());
        assert!(backend.emit(&ScrollCommand::vertical(1)).is_err());
    }
}
