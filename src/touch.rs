//! Single-finger touch gestures and the screen to device coordinate transform.
//!
//! A gesture is a fixed burst of records copied from a `sendevent` trace that
//! a real touchscreen accepted:
//!
//! ```text
//! EV_KEY BTN_TOUCH          1
//! EV_ABS ABS_MT_TRACKING_ID 0
//! EV_ABS ABS_MT_POSITION_X  x
//! EV_ABS ABS_MT_POSITION_Y  y
//! EV_SYN SYN_MT_REPORT      0
//! EV_SYN SYN_REPORT         0
//! EV_SYN SYN_MT_REPORT      0
//! EV_SYN SYN_REPORT         0
//! ```
//!
//! The trailing sync pair is sent twice and no release (`BTN_TOUCH 0`) is
//! sent. Both quirks are suspect, but they are what the trace shows and must
//! not change without checking against hardware.
//!
//! There is no slot tracking between calls: every gesture claims tracking id 0.

use crate::codes::{
    ABS_MT_POSITION_X, ABS_MT_POSITION_Y, ABS_MT_TRACKING_ID, BTN_TOUCH, EventType, SYN_MT_REPORT,
    SYN_REPORT,
};
use crate::device::EventSink;
use crate::error::{Error, Result};
use crate::event::InputEventRecord;
use std::fmt;
use std::time::SystemTime;

/// Number of records one gesture writes.
pub const GESTURE_RECORDS: usize = 8;

/// Default horizontal screen to device factor.
pub const DEFAULT_SCALE_X: i32 = 60;
/// Default vertical screen to device factor.
pub const DEFAULT_SCALE_Y: i32 = 33;

/// Environment variable overriding the horizontal factor.
pub const SCALE_X_ENV: &str = "UINPUTCTL_SCALE_X";
/// Environment variable overriding the vertical factor.
pub const SCALE_Y_ENV: &str = "UINPUTCTL_SCALE_Y";

/// A point in UI pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

/// A point in the device's raw absolute-axis range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevicePoint {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for DevicePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Linear screen to device scale.
///
/// The defaults were calibrated by hand for one touchscreen; they are not
/// read from the device's axis ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenScale {
    pub x: i32,
    pub y: i32,
}

impl Default for ScreenScale {
    fn default() -> Self {
        Self {
            x: DEFAULT_SCALE_X,
            y: DEFAULT_SCALE_Y,
        }
    }
}

impl ScreenScale {
    /// Build a scale from the environment, falling back to the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a scale from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut scale = Self::default();
        if let Some(raw) = lookup(SCALE_X_ENV) {
            scale.x = parse_factor(SCALE_X_ENV, &raw)?;
        }
        if let Some(raw) = lookup(SCALE_Y_ENV) {
            scale.y = parse_factor(SCALE_Y_ENV, &raw)?;
        }
        Ok(scale)
    }

    /// Map screen coordinates to device coordinates.
    ///
    /// Values are not checked against the device's axis range. Products
    /// outside `i32` saturate.
    pub fn apply(&self, point: ScreenPoint) -> DevicePoint {
        DevicePoint {
            x: point.x.saturating_mul(self.x),
            y: point.y.saturating_mul(self.y),
        }
    }
}

fn parse_factor(name: &str, raw: &str) -> Result<i32> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{name}: not an integer: {raw:?}")))
}

/// Scale screen coordinates with the default factors.
pub fn scale_screen_to_device(screen_x: i32, screen_y: i32) -> (i32, i32) {
    let point = ScreenScale::default().apply(ScreenPoint {
        x: screen_x,
        y: screen_y,
    });
    (point.x, point.y)
}

/// The records of one touch gesture at device coordinates `(x, y)`.
///
/// Timestamps are zero; they are stamped when written.
pub fn gesture(x: i32, y: i32) -> [InputEventRecord; GESTURE_RECORDS] {
    use EventType::{Absolute, Key, Synchronization};
    [
        InputEventRecord::new(Key, BTN_TOUCH, 1),
        InputEventRecord::new(Absolute, ABS_MT_TRACKING_ID, 0),
        InputEventRecord::new(Absolute, ABS_MT_POSITION_X, x),
        InputEventRecord::new(Absolute, ABS_MT_POSITION_Y, y),
        InputEventRecord::new(Synchronization, SYN_MT_REPORT, 0),
        InputEventRecord::new(Synchronization, SYN_REPORT, 0),
        InputEventRecord::new(Synchronization, SYN_MT_REPORT, 0),
        InputEventRecord::new(Synchronization, SYN_REPORT, 0),
    ]
}

/// Send a touch gesture at device coordinates `(x, y)`.
///
/// Stops at the first failed write. Records already written stay written;
/// the protocol has no way to abort a half-sent frame.
pub fn send_touch<S: EventSink + ?Sized>(sink: &mut S, x: i32, y: i32) -> Result<()> {
    write_sequence(sink, &gesture(x, y))?;
    log::debug!("sent touch at device coordinates ({}, {})", x, y);
    Ok(())
}

/// Send a touch gesture at screen coordinates, scaled by `scale`.
///
/// Returns the device coordinates that were sent.
pub fn send_screen_touch<S: EventSink + ?Sized>(
    sink: &mut S,
    scale: &ScreenScale,
    point: ScreenPoint,
) -> Result<DevicePoint> {
    let device = scale.apply(point);
    send_touch(sink, device.x, device.y)?;
    Ok(device)
}

/// Write `records` in order, each stamped with the current time.
pub(crate) fn write_sequence<S: EventSink + ?Sized>(
    sink: &mut S,
    records: &[InputEventRecord],
) -> Result<()> {
    write_sequence_at(sink, records, 0)
}

/// Like [`write_sequence`], for a sequence whose first `offset` records were
/// already sent; error indices count from the start of the whole sequence.
pub(crate) fn write_sequence_at<S: EventSink + ?Sized>(
    sink: &mut S,
    records: &[InputEventRecord],
    offset: usize,
) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        sink.write_record(&record.stamped(SystemTime::now()))
            .map_err(|source| Error::Gesture {
                record: offset + index + 1,
                event: record.name(),
                source: Box::new(source),
            })?;
    }
    Ok(())
}
