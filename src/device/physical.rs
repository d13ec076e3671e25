//! Exclusively grabbed evdev device
//!
//! While the grab is held no other reader (including the compositor) sees
//! the trackball's events, so the pointer stays still while we scroll.

use crate::device::types::MotionSample;
use crate::device::{DeviceError, MotionSource};
use evdev::Device;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Physical trackball handle
pub struct PhysicalDevice {
    path: PathBuf,
    name: String,
    /// `None` once released
    device: Option<Device>,
}

impl PhysicalDevice {
    /// Open the node and grab it exclusively
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DeviceError> {
        let path = path.as_ref().to_path_buf();

        let mut device = Device::open(&path).map_err(|source| DeviceError::Open {
            path: path.clone(),
            source,
        })?;

        device.grab().map_err(|source| DeviceError::Grab {
            path: path.clone(),
            source,
        })?;

        let name = device.name().unwrap_or("Unknown device").to_string();
        info!("Grabbed {} ({})", name, path.display());

        Ok(Self {
            path,
            name,
            device: Some(device),
        })
    }
}

impl MotionSource for PhysicalDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_batch(&mut self) -> Result<Vec<MotionSample>, DeviceError> {
        let device = self.device.as_mut().ok_or_else(|| {
            DeviceError::Read(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "device already released",
            ))
        })?;

        let events = device.fetch_events().map_err(DeviceError::Read)?;
        Ok(events
            .map(|event| MotionSample::new(event.event_type().0, event.code(), event.value()))
            .collect())
    }

    fn release(&mut self) -> Result<(), DeviceError> {
        let Some(mut device) = self.device.take() else {
            return Ok(());
        };

        debug!("Releasing {} ({})", self.name, self.path.display());
        // Closing the fd drops the grab as well, so the device is gone either way
        device.ungrab().map_err(DeviceError::Release)
    }
}

impl Drop for PhysicalDevice {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn released(path: &str) -> PhysicalDevice {
        PhysicalDevice {
            path: PathBuf::from(path),
            name: "Kensington Expert Mouse".to_string(),
            device: None,
        }
    }

    #[test]
    fn missing_node_is_open_error() {
        let result = PhysicalDevice::open("/nonexistent/event0");
        match result {
            Err(DeviceError::Open { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/event0"))
            }
            Err(other) => panic!("expected open error, got {}", other),
            Ok(_) => panic!("opened a missing node"),
        }
    }

    #[test]
    fn release_is_idempotent() {
        let mut device = released("/dev/input/event3");
        assert!(device.release().is_ok());
        assert!(device.release().is_ok());
        assert!(device.device.is_none());
    }

    #[test]
    fn read_after_release_fails() {
        let mut device = released("/dev/input/event3");
        assert!(matches!(device.read_batch(), Err(DeviceError::Read(_))));
    }
}
