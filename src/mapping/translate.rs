//! Motion to scroll translation
//!
//! Stateless: every sample is judged on its own. X motion scrolls
//! horizontally, Y motion scrolls vertically with the sign flipped so that
//! rolling the ball up moves content down.

use crate::device::constants::{EV_REL, REL_X, REL_Y};
use crate::device::types::{MotionSample, ScrollAxis, ScrollCommand};
use crate::mapping::config::Policy;

/// Translate one raw event.
///
/// Returns `None` for non-motion events, unknown axes, motion inside the
/// dead zone and motion that scales down to zero.
pub fn translate_motion(
    event_type: u16,
    code: u16,
    value: i32,
    sensitivity: f64,
    dead_zone: u32,
) -> Option<ScrollCommand> {
    if event_type != EV_REL {
        return None;
    }

    let (axis, amount) = match code {
        REL_X => (ScrollAxis::Horizontal, scale(value, sensitivity)),
        REL_Y => (ScrollAxis::Vertical, scale(value, sensitivity).saturating_neg()),
        _ => return None,
    };

    // Dead zone is checked on the raw value, not the scaled one
    if value.unsigned_abs() > dead_zone && amount != 0 {
        Some(ScrollCommand::new(axis, amount))
    } else {
        None
    }
}

/// Truncates toward zero, saturating at the i32 range
fn scale(value: i32, sensitivity: f64) -> i32 {
    (f64::from(value) * sensitivity) as i32
}

/// Translator bound to a fixed policy
#[derive(Debug, Clone, Copy)]
pub struct ScrollTranslator {
    policy: Policy,
}

impl ScrollTranslator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn translate(&self, sample: &MotionSample) -> Option<ScrollCommand> {
        translate_motion(
            sample.event_type,
            sample.code,
            sample.value,
            self.policy.sensitivity,
            self.policy.dead_zone,
        )
    }

    /// Translate a whole batch, keeping sample order
    pub fn translate_batch(&self, samples: &[MotionSample]) -> Vec<ScrollCommand> {
        samples.iter().filter_map(|s| self.translate(s)).collect()
    }
}
