//! Linux input constants
//!
//! Event types and codes from `linux/input-event-codes.h`, plus the
//! parameters used when scanning for trackballs.

/// Synchronization event type
pub const EV_SYN: u16 = 0x00;

/// Relative motion event type
pub const EV_REL: u16 = 0x02;

/// End of one input frame
pub const SYN_REPORT: u16 = 0x00;

/// Horizontal relative motion
pub const REL_X: u16 = 0x00;

/// Vertical relative motion
pub const REL_Y: u16 = 0x01;

/// Horizontal scroll wheel
pub const REL_HWHEEL: u16 = 0x06;

/// Vertical scroll wheel
pub const REL_WHEEL: u16 = 0x08;

/// Prefix of the evdev nodes scanned during discovery
pub const EVENT_DEVICE_PREFIX: &str = "/dev/input/event";

/// Number of evdev nodes scanned (event0..event31)
pub const MAX_EVENT_DEVICES: usize = 32;

/// Lower-case name fragments identifying a trackball
pub const TRACKBALL_KEYWORDS: [&str; 4] = ["trackball", "expert mouse", "orbit", "slimblade"];
