//! Runtime settings and validation
//!
//! Settings come from the command line only and are fixed for the life
//! of the process.

use log::debug;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_SENSITIVITY: f64 = 0.3;
pub const DEFAULT_DEAD_ZONE: u32 = 2;

/// Literal accepted by `--device` to request auto-detection
pub const AUTO_DEVICE: &str = "auto";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no trackball devices found. Try to manually add a device with --device")]
    NoDeviceFound,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which physical device to translate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSelector {
    /// Scan evdev nodes for a trackball
    Auto,

    /// Use this node as-is
    Path(PathBuf),
}

impl FromStr for DeviceSelector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ConfigError::Invalid("device path must not be empty".into()));
        }
        if s.eq_ignore_ascii_case(AUTO_DEVICE) {
            Ok(DeviceSelector::Auto)
        } else {
            Ok(DeviceSelector::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceSelector::Auto => write!(f, "{}", AUTO_DEVICE),
            DeviceSelector::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Translation policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Policy {
    /// Scale factor from raw motion to scroll steps
    pub sensitivity: f64,

    /// Raw magnitudes at or below this are ignored
    pub dead_zone: u32,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            dead_zone: DEFAULT_DEAD_ZONE,
        }
    }
}

impl Policy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sensitivity must be a positive number, got {}",
                self.sensitivity
            )));
        }
        Ok(())
    }
}

/// Everything the manager needs to start
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub policy: Policy,
    pub device: DeviceSelector,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            device: DeviceSelector::Auto,
        }
    }
}

impl Settings {
    /// Build validated settings from raw option values
    pub fn new(sensitivity: f64, dead_zone: u32, device: &str) -> Result<Self, ConfigError> {
        let settings = Self {
            policy: Policy {
                sensitivity,
                dead_zone,
            },
            device: device.parse()?,
        };
        settings.validate()?;

        debug!("Settings: {:?}", settings);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()
    }
}
