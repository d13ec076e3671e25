//! Value types passed between the physical device, the translator and the
//! virtual scroll device.

use std::fmt;

/// One raw event read from the physical device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionSample {
    /// Event type (EV_REL, EV_KEY, EV_SYN, ...)
    pub event_type: u16,

    /// Event code within the type (REL_X, REL_Y, ...)
    pub code: u16,

    /// Signed event value
    pub value: i32,
}

impl MotionSample {
    pub fn new(event_type: u16, code: u16, value: i32) -> Self {
        Self { event_type, code, value }
    }
}

/// Scroll axis of the virtual device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    Horizontal,
    Vertical,
}

impl fmt::Display for ScrollAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollAxis::Horizontal => write!(f, "horizontal"),
            ScrollAxis::Vertical => write!(f, "vertical"),
        }
    }
}

/// A scroll step to emit on the virtual device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollCommand {
    pub axis: ScrollAxis,
    pub amount: i32,
}

impl ScrollCommand {
    pub fn new(axis: ScrollAxis, amount: i32) -> Self {
        Self { axis, amount }
    }

    pub fn horizontal(amount: i32) -> Self {
        Self::new(ScrollAxis::Horizontal, amount)
    }

    pub fn vertical(amount: i32) -> Self {
        Self::new(ScrollAxis::Vertical, amount)
    }
}
