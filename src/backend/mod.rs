//! Backend abstraction for scroll output
//!
//! This module provides the interface the manager uses to emit scroll
//! steps, with a uinput implementation for Linux and a mock for tests.

pub mod mock_scroll;

#[cfg(target_os = "linux")]
pub mod uinput;

pub use mock_scroll::MockScrollBackend;

#[cfg(target_os = "linux")]
pub use uinput::{UinputScrollDevice, VirtualDeviceState};

use crate::device::types::ScrollCommand;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to open /dev/uinput: {0}")]
    Open(io::Error),

    #[error("failed to set {name}: {source}")]
    Capability { name: &'static str, source: io::Error },

    #[error("failed to setup device: {0}")]
    Setup(io::Error),

    #[error("failed to create device: {0}")]
    Create(io::Error),

    #[error("failed to write event: {0}")]
    Write(io::Error),

    #[error("failed to destroy device: {0}")]
    Destroy(io::Error),

    #[error("virtual device is not active")]
    NotActive,

    #[error("Backend operation failed: {0}")]
    Operation(String),
}

/// Virtual input device that accepts scroll steps
pub trait ScrollSink {
    /// Emit one scroll step as a complete input frame
    fn emit(&mut self, command: &ScrollCommand) -> Result<(), BackendError>;

    /// Tear the device down. Safe to call more than once, and on a device
    /// that never became active.
    fn destroy(&mut self) -> Result<(), BackendError>;
}

/// Create the default scroll device for the current platform
#[cfg(target_os = "linux")]
pub fn create_scroll_device() -> Result<UinputScrollDevice, BackendError> {
    UinputScrollDevice::create()
}
