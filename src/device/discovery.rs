//! Trackball discovery
//!
//! Opens `/dev/input/event0..31`, reads each device name and keeps the
//! ones that look like a trackball. Nodes that can't be opened (missing,
//! permission denied) are skipped silently.

use crate::device::constants::{EVENT_DEVICE_PREFIX, MAX_EVENT_DEVICES, TRACKBALL_KEYWORDS};
use crate::mapping::config::{ConfigError, DeviceSelector};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Check if a device name matches known trackball patterns (case-insensitive)
pub fn is_trackball_name(name: &str) -> bool {
    let name = name.to_lowercase();
    TRACKBALL_KEYWORDS.iter().any(|keyword| name.contains(keyword))
}

/// Path of the n-th evdev node
pub fn event_device_path(index: usize) -> PathBuf {
    PathBuf::from(format!("{}{}", EVENT_DEVICE_PREFIX, index))
}

/// Scan all event nodes, using `read_name` to read a device name.
///
/// `read_name` returns `None` for nodes that can't be opened. Matches are
/// returned in node order.
pub fn scan_with<F>(mut read_name: F) -> Vec<PathBuf>
where
    F: FnMut(&Path) -> Option<String>,
{
    let mut trackballs = Vec::new();

    for index in 0..MAX_EVENT_DEVICES {
        let path = event_device_path(index);

        let Some(name) = read_name(&path) else {
            continue;
        };

        if is_trackball_name(&name) {
            println!("Found trackball: {} ({})", name, path.display());
            trackballs.push(path);
        } else {
            debug!("Skipping {} ({})", name, path.display());
        }
    }

    trackballs
}

/// Scan the real evdev nodes for trackballs
#[cfg(target_os = "linux")]
pub fn find_trackball_devices() -> Vec<PathBuf> {
    scan_with(device_name)
}

/// Open a node just long enough to read its name
#[cfg(target_os = "linux")]
fn device_name(path: &Path) -> Option<String> {
    match evdev::Device::open(path) {
        Ok(device) => Some(device.name().unwrap_or_default().to_string()),
        Err(e) => {
            debug!("Cannot open {}: {}", path.display(), e);
            None
        }
    }
}

/// Pick the first candidate, reporting any others as ignored
pub fn choose_device(candidates: &[PathBuf]) -> Result<PathBuf, ConfigError> {
    let first = candidates.first().cloned().ok_or(ConfigError::NoDeviceFound)?;

    if candidates.len() > 1 {
        println!("Multiple trackballs found:");
        for (i, path) in candidates.iter().enumerate() {
            println!("  {}: {}", i + 1, path.display());
        }
        println!("Using first one: {}", first.display());
    }

    Ok(first)
}

/// Resolve the device path to use. Explicit paths bypass discovery.
pub fn select_device(selector: &DeviceSelector) -> Result<PathBuf, ConfigError> {
    match selector {
        DeviceSelector::Path(path) => {
            info!("Using device from command line: {}", path.display());
            Ok(path.clone())
        }
        DeviceSelector::Auto => {
            println!("Detecting trackball devices...");
            #[cfg(target_os = "linux")]
            let candidates = find_trackball_devices();
            #[cfg(not(target_os = "linux"))]
            let candidates: Vec<PathBuf> = Vec::new();
            choose_device(&candidates)
        }
    }
}
