//! # uinputctl
//!
//! Inject touch and key events into a Linux input device by writing raw
//! `struct input_event` records to its device file, e.g. `/dev/input/event5`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use uinputctl::{InputDevice, scale_screen_to_device, send_touch};
//!
//! let mut device = InputDevice::open("/dev/input/event5")?;
//! let (x, y) = scale_screen_to_device(40, 40);
//! send_touch(&mut device, x, y)?;
//! device.close()?;
//! # Ok::<(), uinputctl::Error>(())
//! ```
//!
//! ## Architecture
//!
//! [`InputDevice`] is the only thing that touches the OS. The sequencers in
//! [`touch`] and [`key`] write through the [`EventSink`] trait, so they run
//! just as well against a uinput device (feature `uinput`) or a test fake.
//!
//! All writes are synchronous and unbuffered. One handle must only be used
//! by one caller at a time; interleaved writes would break frame ordering.

#[cfg(not(target_os = "linux"))]
compile_error!("uinputctl only supports Linux");

pub mod cli;
pub mod codes;
pub mod device;
pub mod error;
pub mod event;
pub mod key;
pub mod touch;
#[cfg(feature = "uinput")]
pub mod uinput;

#[cfg(test)]
mod testing;

// Re-exports
pub use codes::EventType;
pub use device::{EventSink, InputDevice, close_device};
pub use error::{Error, Result};
pub use event::InputEventRecord;
pub use key::{KeyAction, send_key};
pub use touch::{
    DevicePoint, ScreenPoint, ScreenScale, scale_screen_to_device, send_screen_touch, send_touch,
};
#[cfg(feature = "uinput")]
pub use uinput::{AxisRange, VirtualTouchscreen};
