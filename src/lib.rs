//! trackball-scroll: turn trackball motion into scroll wheel events
//!
//! This library grabs a trackball through evdev, translates its relative
//! motion into wheel steps and replays them through a uinput virtual device.

pub mod backend;
pub mod device;
pub mod mapping;
pub mod manager;
pub mod shutdown;

// Re-export commonly used items
pub use backend::{BackendError, MockScrollBackend, ScrollSink};
pub use device::{DeviceError, MockMotionSource, MotionSample, MotionSource, ScrollAxis, ScrollCommand};
pub use manager::{LifecycleState, ScrollError, ScrollManager};
pub use mapping::{ConfigError, DeviceSelector, Policy, ScrollTranslator, Settings};
pub use shutdown::{shutdown_channel, ShutdownHandle, ShutdownToken};
