//! The raw input event record and its kernel byte layout.

use crate::codes::{self, EventType};
use std::mem;
use std::time::{SystemTime, UNIX_EPOCH};

/// Size in bytes of one `struct input_event` on this host.
pub const RECORD_SIZE: usize = mem::size_of::<libc::input_event>();

/// One input event as the kernel's input core reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEventRecord {
    /// Timestamp seconds since the Unix epoch.
    pub seconds: i64,
    /// Timestamp microseconds within the second.
    pub microseconds: i64,
    /// Event type class.
    pub kind: EventType,
    /// Which key, axis or sync reason.
    pub code: u16,
    /// State or magnitude.
    pub value: i32,
}

impl InputEventRecord {
    /// Create a record with a zero timestamp.
    pub fn new(kind: EventType, code: u16, value: i32) -> Self {
        Self {
            seconds: 0,
            microseconds: 0,
            kind,
            code,
            value,
        }
    }

    /// Create a record stamped with the current wall-clock time.
    pub fn now(kind: EventType, code: u16, value: i32) -> Self {
        Self::new(kind, code, value).stamped(SystemTime::now())
    }

    /// Return a copy stamped with `time`.
    pub fn stamped(mut self, time: SystemTime) -> Self {
        let since_epoch = time.duration_since(UNIX_EPOCH).unwrap_or_default();
        self.seconds = since_epoch.as_secs() as i64;
        self.microseconds = i64::from(since_epoch.subsec_micros());
        self
    }

    /// Symbolic name of the event code, e.g. `ABS_MT_POSITION_X`.
    pub fn name(&self) -> &'static str {
        codes::code_name(self.kind, self.code)
    }

    /// Encode as `struct input_event` in host byte order.
    ///
    /// Layout is `timeval { time_t, suseconds_t }`, then `u16 type`,
    /// `u16 code`, `i32 value`, with no padding on Linux targets.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let sec = (self.seconds as libc::time_t).to_ne_bytes();
        let usec = (self.microseconds as libc::suseconds_t).to_ne_bytes();
        let kind = self.kind.raw().to_ne_bytes();
        let code = self.code.to_ne_bytes();
        let value = self.value.to_ne_bytes();

        let mut out = [0u8; RECORD_SIZE];
        let mut at = 0;
        for field in [&sec[..], &usec[..], &kind[..], &code[..], &value[..]] {
            out[at..at + field.len()].copy_from_slice(field);
            at += field.len();
        }
        debug_assert_eq!(at, RECORD_SIZE);
        out
    }
}
