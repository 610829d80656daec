//! Key press and release events.

use crate::codes::{EventType, KEY_MAX, SYN_REPORT};
use crate::device::EventSink;
use crate::error::{Error, Result};
use crate::event::InputEventRecord;
use crate::touch::{write_sequence, write_sequence_at};
use std::fmt;
use std::str::FromStr;
use std::thread;
use std::time::Duration;

/// How long a tap holds the key down.
pub const TAP_HOLD: Duration = Duration::from_millis(10);

/// What to do with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyAction {
    /// Press and hold.
    Down,
    /// Release.
    Up,
    /// Press, hold for [`TAP_HOLD`], then release.
    #[default]
    Tap,
}

impl FromStr for KeyAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "down" => Ok(KeyAction::Down),
            "up" => Ok(KeyAction::Up),
            "tap" => Ok(KeyAction::Tap),
            other => Err(Error::InvalidArgument(format!(
                "key action must be down, up or tap, got {other:?}"
            ))),
        }
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyAction::Down => "down",
            KeyAction::Up => "up",
            KeyAction::Tap => "tap",
        })
    }
}

fn key_records(code: u16, pressed: bool) -> [InputEventRecord; 2] {
    [
        InputEventRecord::new(EventType::Key, code, i32::from(pressed)),
        InputEventRecord::new(EventType::Synchronization, SYN_REPORT, 0),
    ]
}

/// Send a key event for the raw evdev key `code`, each state change
/// followed by `SYN_REPORT`.
pub fn send_key<S: EventSink + ?Sized>(sink: &mut S, code: u16, action: KeyAction) -> Result<()> {
    if code > KEY_MAX {
        return Err(Error::InvalidArgument(format!(
            "key code {code} is above KEY_MAX ({KEY_MAX})"
        )));
    }

    match action {
        KeyAction::Down => write_sequence(sink, &key_records(code, true))?,
        KeyAction::Up => write_sequence(sink, &key_records(code, false))?,
        KeyAction::Tap => {
            let press = key_records(code, true);
            write_sequence(sink, &press)?;
            thread::sleep(TAP_HOLD);
            write_sequence_at(sink, &key_records(code, false), press.len())?;
        }
    }

    log::debug!("sent key {} {}", code, action);
    Ok(())
}
