//! Virtual touchscreen registered through `/dev/uinput`.
//!
//! Requires the `uinput` feature. The device advertises only what a gesture
//! from [`crate::touch`] uses, plus the key range for [`crate::key`].
//!
//! ## Permissions
//!
//! `/dev/uinput` is usually root-only. Either run as root or add a udev rule
//! granting the `input` group write access.

use crate::codes::{ABS_MT_POSITION_X, ABS_MT_POSITION_Y, ABS_MT_TRACKING_ID, BTN_TOUCH};
use crate::device::{EventSink, write_record_to};
use crate::error::{Error, Result};
use crate::event::InputEventRecord;
use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AbsInfo, AbsoluteAxisType, AttributeSet, Key as EvdevKey, UinputAbsSetup};
use std::fs::File;
use std::mem::ManuallyDrop;
use std::os::fd::{AsRawFd, FromRawFd};
use std::path::Path;

const UINPUT_PATH: &str = "/dev/uinput";

/// Name the virtual device registers under by default.
pub const DEFAULT_NAME: &str = "uinputctl virtual touchscreen";

/// Axis maxima advertised by the virtual device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub x_max: i32,
    pub y_max: i32,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            x_max: 65535,
            y_max: 65535,
        }
    }
}

/// A uinput touchscreen; destroyed when dropped.
pub struct VirtualTouchscreen {
    device: VirtualDevice,
}

impl VirtualTouchscreen {
    /// Register a new virtual touchscreen.
    pub fn create(name: &str, axes: AxisRange) -> Result<Self> {
        let mut keys = AttributeSet::<EvdevKey>::new();
        keys.insert(EvdevKey::new(BTN_TOUCH));
        // Plain keyboard keys so `send_key` works on the same device.
        for code in 1..256 {
            keys.insert(EvdevKey::new(code));
        }

        let tracking = UinputAbsSetup::new(
            AbsoluteAxisType(ABS_MT_TRACKING_ID),
            AbsInfo::new(0, 0, 65535, 0, 0, 0),
        );
        let x = UinputAbsSetup::new(
            AbsoluteAxisType(ABS_MT_POSITION_X),
            AbsInfo::new(0, 0, axes.x_max, 0, 0, 0),
        );
        let y = UinputAbsSetup::new(
            AbsoluteAxisType(ABS_MT_POSITION_Y),
            AbsInfo::new(0, 0, axes.y_max, 0, 0, 0),
        );

        let device = VirtualDeviceBuilder::new()
            .map_err(|e| {
                Error::VirtualDevice(format!(
                    "cannot open {UINPUT_PATH}: {}. Make sure it is writable \
                     (run as root or add a udev rule).",
                    e
                ))
            })?
            .name(name)
            .with_keys(&keys)
            .map_err(|e| Error::VirtualDevice(format!("failed to add keys: {}", e)))?
            .with_absolute_axis(&tracking)
            .and_then(|b| b.with_absolute_axis(&x))
            .and_then(|b| b.with_absolute_axis(&y))
            .map_err(|e| Error::VirtualDevice(format!("failed to add axes: {}", e)))?
            .build()
            .map_err(|e| Error::VirtualDevice(format!("failed to create device: {}", e)))?;

        log::debug!(
            "created virtual touchscreen {:?} ({}x{})",
            name,
            axes.x_max,
            axes.y_max
        );
        Ok(Self { device })
    }
}

// `VirtualDevice::emit` appends a SYN_REPORT to every call, which would
// split a gesture into one frame per record. Records are written to the
// descriptor directly instead.
impl EventSink for VirtualTouchscreen {
    fn write_record(&mut self, record: &InputEventRecord) -> Result<()> {
        // SAFETY: the descriptor stays owned by `self.device`; ManuallyDrop
        // keeps this borrowed `File` from closing it.
        let mut file = ManuallyDrop::new(unsafe { File::from_raw_fd(self.device.as_raw_fd()) });
        write_record_to(&mut *file, Path::new(UINPUT_PATH), record)
    }
}
