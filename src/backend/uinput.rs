//! uinput scroll device (Linux).
//!
//! Registers a wheel-only virtual mouse with the kernel through the
//! `/dev/uinput` control interface and writes raw `input_event` records to it.
//!
//! Lifecycle: Unconfigured -> Configured -> Active -> Destroyed. Every setup
//! step is fatal; destroy is best-effort and idempotent.
//!
//! Safety: wraps raw ioctl/record writes on a descriptor owned by this struct.

use crate::backend::{BackendError, ScrollSink};
use crate::device::constants::{EV_REL, EV_SYN, REL_HWHEEL, REL_WHEEL, SYN_REPORT};
use crate::device::types::{ScrollAxis, ScrollCommand};
use log::{debug, info, trace};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const UINPUT_PATH: &str = "/dev/uinput";
pub const UINPUT_MAX_NAME_SIZE: usize = 80;

pub const DEVICE_NAME: &str = "Trackball Scroll Device";
pub const BUS_USB: u16 = 0x03;
pub const DEVICE_VENDOR: u16 = 0x1234;
pub const DEVICE_PRODUCT: u16 = 0x5678;
pub const DEVICE_VERSION: u16 = 1;

/// Time for the kernel to finish registering the device. Writes issued
/// right after UI_DEV_CREATE can be dropped.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

const UI_SET_EVBIT: libc::c_ulong = 0x40045564;
const UI_SET_RELBIT: libc::c_ulong = 0x40045566;
const UI_DEV_SETUP: libc::c_ulong = 0x405c5503;
const UI_DEV_CREATE: libc::c_ulong = 0x5501;
const UI_DEV_DESTROY: libc::c_ulong = 0x5502;

/// `struct input_id`
#[allow(dead_code)]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
struct InputId {
    bustype: u16,
    vendor: u16,
    product: u16,
    version: u16,
}

/// `struct uinput_setup`
#[allow(dead_code)]
#[repr(C)]
struct UinputSetup {
    id: InputId,
    name: [u8; UINPUT_MAX_NAME_SIZE],
    ff_effects_max: u32,
}

impl UinputSetup {
    fn new(name: &str, id: InputId) -> Self {
        let mut setup = Self {
            id,
            name: [0; UINPUT_MAX_NAME_SIZE],
            ff_effects_max: 0,
        };
        // Keep the trailing NUL
        let len = name.len().min(UINPUT_MAX_NAME_SIZE - 1);
        setup.name[..len].copy_from_slice(&name.as_bytes()[..len]);
        setup
    }
}

/// `struct input_event`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct RawInputEvent {
    time: libc::timeval,
    type_: u16,
    code: u16,
    value: i32,
}

impl RawInputEvent {
    fn new(seconds: u64, type_: u16, code: u16, value: i32) -> Self {
        Self {
            time: libc::timeval {
                tv_sec: seconds as libc::time_t,
                tv_usec: 0,
            },
            type_,
            code,
            value,
        }
    }

    pub fn event_type(&self) -> u16 {
        self.type_
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    fn as_bytes(&self) -> &[u8] {
        // SAFETY: repr(C) plain-old-data with no padding between fields.
        unsafe {
            std::slice::from_raw_parts(
                (self as *const Self).cast::<u8>(),
                std::mem::size_of::<Self>(),
            )
        }
    }
}

/// Wheel code for a scroll axis
pub fn wheel_code(axis: ScrollAxis) -> u16 {
    match axis {
        ScrollAxis::Horizontal => REL_HWHEEL,
        ScrollAxis::Vertical => REL_WHEEL,
    }
}

/// The two records making up one scroll frame: wheel motion, then SYN_REPORT
pub fn scroll_frame(command: &ScrollCommand, seconds: u64) -> [RawInputEvent; 2] {
    [
        RawInputEvent::new(seconds, EV_REL, wheel_code(command.axis), command.amount),
        RawInputEvent::new(seconds, EV_SYN, SYN_REPORT, 0),
    ]
}

/// Write a scroll frame record by record, stopping at the first failure
pub fn write_frame<W: Write>(writer: &mut W, command: &ScrollCommand) -> io::Result<()> {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    for record in scroll_frame(command, seconds).iter() {
        writer.write_all(record.as_bytes())?;
    }
    Ok(())
}

/// Where the virtual device is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualDeviceState {
    Unconfigured,
    Configured,
    Active,
    Destroyed,
}

/// Wheel-only virtual mouse backed by /dev/uinput
#[derive(Debug)]
pub struct UinputScrollDevice {
    /// `None` once closed
    file: Option<File>,
    state: VirtualDeviceState,
}

impl UinputScrollDevice {
    /// Create and activate the device on /dev/uinput
    pub fn create() -> Result<Self, BackendError> {
        Self::create_at(UINPUT_PATH)
    }

    /// Create and activate the device on the given control node.
    ///
    /// On failure the partially set up device is closed before returning.
    pub fn create_at<P: AsRef<Path>>(path: P) -> Result<Self, BackendError> {
        let file = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path.as_ref())
            .map_err(BackendError::Open)?;

        let mut device = Self {
            file: Some(file),
            state: VirtualDeviceState::Unconfigured,
        };

        device.declare_capabilities()?;
        device.submit_setup()?;
        device.activate()?;

        thread::sleep(SETTLE_DELAY);
        info!("Virtual device '{}' ready", DEVICE_NAME);

        Ok(device)
    }

    pub fn state(&self) -> VirtualDeviceState {
        self.state
    }

    fn declare_capabilities(&mut self) -> Result<(), BackendError> {
        let capabilities: [(libc::c_ulong, u16, &'static str); 4] = [
            (UI_SET_EVBIT, EV_REL, "EV_REL"),
            (UI_SET_RELBIT, REL_WHEEL, "REL_WHEEL"),
            (UI_SET_RELBIT, REL_HWHEEL, "REL_HWHEEL"),
            (UI_SET_EVBIT, EV_SYN, "EV_SYN"),
        ];

        for (request, value, name) in capabilities {
            self.ioctl(request, libc::c_ulong::from(value))
                .map_err(|source| BackendError::Capability { name, source })?;
            debug!("Declared {}", name);
        }

        self.state = VirtualDeviceState::Configured;
        Ok(())
    }

    fn submit_setup(&mut self) -> Result<(), BackendError> {
        let setup = UinputSetup::new(
            DEVICE_NAME,
            InputId {
                bustype: BUS_USB,
                vendor: DEVICE_VENDOR,
                product: DEVICE_PRODUCT,
                version: DEVICE_VERSION,
            },
        );

        self.ioctl(UI_DEV_SETUP, &setup as *const UinputSetup as libc::c_ulong)
            .map_err(BackendError::Setup)
    }

    fn activate(&mut self) -> Result<(), BackendError> {
        self.ioctl(UI_DEV_CREATE, 0).map_err(BackendError::Create)?;
        self.state = VirtualDeviceState::Active;
        Ok(())
    }

    fn ioctl(&self, request: libc::c_ulong, arg: libc::c_ulong) -> io::Result<()> {
        let file = self
            .file
            .as_ref()
            .ok_or_else(|| io::Error::from_raw_os_error(libc::EBADF))?;

        // SAFETY: the fd is open for the lifetime of `file`; pointer arguments
        // (UI_DEV_SETUP) point at a live repr(C) struct on the caller's stack.
        let rc = unsafe { libc::ioctl(file.as_raw_fd(), request as _, arg) };
        if rc < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }
}

impl ScrollSink for UinputScrollDevice {
    fn emit(&mut self, command: &ScrollCommand) -> Result<(), BackendError> {
        if self.state != VirtualDeviceState::Active {
            return Err(BackendError::NotActive);
        }
        let file = self.file.as_mut().ok_or(BackendError::NotActive)?;

        write_frame(file, command).map_err(BackendError::Write)?;
        trace!("Scroll {} {}", command.axis, command.amount);
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), BackendError> {
        if self.state == VirtualDeviceState::Destroyed {
            return Ok(());
        }

        let result = if self.state == VirtualDeviceState::Active {
            self.ioctl(UI_DEV_DESTROY, 0).map_err(BackendError::Destroy)
        } else {
            Ok(())
        };

        self.file = None;
        self.state = VirtualDeviceState::Destroyed;
        debug!("Virtual device destroyed");
        result
    }
}

impl Drop for UinputScrollDevice {
    fn drop(&mut self) {
        let _ = self.destroy();
    }
}
