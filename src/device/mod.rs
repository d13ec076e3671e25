//! Physical input side
//!
//! This module covers everything that happens before translation:
//! - Scanning evdev nodes for trackballs
//! - Opening and exclusively grabbing the selected device
//! - Reading raw event batches

pub mod constants;
pub mod types;
pub mod discovery;
pub mod mock_source;

#[cfg(target_os = "linux")]
pub mod physical;

pub use constants::*;
pub use types::*;
pub use discovery::{is_trackball_name, select_device};
pub use mock_source::MockMotionSource;

#[cfg(target_os = "linux")]
pub use physical::PhysicalDevice;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("failed to open device {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to grab device {path}: {source}")]
    Grab { path: PathBuf, source: io::Error },

    #[error("error reading events: {0}")]
    Read(io::Error),

    #[error("failed to release device: {0}")]
    Release(io::Error),
}

/// Source of raw motion batches, owned by the manager
pub trait MotionSource {
    /// Human readable device name
    fn name(&self) -> &str;

    /// Block until the device reports one or more events
    fn read_batch(&mut self) -> Result<Vec<MotionSample>, DeviceError>;

    /// Drop the exclusive grab and close the device. Calling it again is a no-op.
    fn release(&mut self) -> Result<(), DeviceError>;
}
