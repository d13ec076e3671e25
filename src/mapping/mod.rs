//! Mapping module - settings and motion-to-scroll translation

pub mod config;
pub mod translate;

pub use config::{ConfigError, DeviceSelector, Policy, Settings};
pub use translate::{translate_motion, ScrollTranslator};
