//! Event types and codes of the Linux input-event ABI.
//!
//! Values come from `linux/input-event-codes.h`. They are part of the stable
//! kernel ABI, so they are written out here rather than generated at build time.

/// Event type classes used by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum EventType {
    /// `EV_SYN`: frame and report delimiters.
    Synchronization = EV_SYN,
    /// `EV_KEY`: keys and buttons, including `BTN_TOUCH`.
    Key = EV_KEY,
    /// `EV_ABS`: absolute axes.
    Absolute = EV_ABS,
}

impl EventType {
    /// The raw `type` field value.
    pub fn raw(self) -> u16 {
        self as u16
    }

    /// Map a raw `type` field back to a known class.
    pub fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            EV_SYN => Some(EventType::Synchronization),
            EV_KEY => Some(EventType::Key),
            EV_ABS => Some(EventType::Absolute),
            _ => None,
        }
    }
}

pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_ABS: u16 = 0x03;

pub const SYN_REPORT: u16 = 0;
pub const SYN_MT_REPORT: u16 = 2;

pub const BTN_TOUCH: u16 = 0x14a;

pub const ABS_MT_POSITION_X: u16 = 0x35;
pub const ABS_MT_POSITION_Y: u16 = 0x36;
pub const ABS_MT_TRACKING_ID: u16 = 0x39;

/// Highest key code the kernel accepts (`KEY_MAX`).
pub const KEY_MAX: u16 = 0x2ff;

/// Symbolic name of a `(type, code)` pair, for log and error messages.
pub fn code_name(kind: EventType, code: u16) -> &'static str {
    match (kind, code) {
        (EventType::Synchronization, SYN_REPORT) => "SYN_REPORT",
        (EventType::Synchronization, SYN_MT_REPORT) => "SYN_MT_REPORT",
        (EventType::Key, BTN_TOUCH) => "BTN_TOUCH",
        (EventType::Key, _) => "KEY",
        (EventType::Absolute, ABS_MT_POSITION_X) => "ABS_MT_POSITION_X",
        (EventType::Absolute, ABS_MT_POSITION_Y) => "ABS_MT_POSITION_Y",
        (EventType::Absolute, ABS_MT_TRACKING_ID) => "ABS_MT_TRACKING_ID",
        (EventType::Absolute, _) => "ABS",
        (EventType::Synchronization, _) => "SYN",
    }
}
