//! Error types for device access and event emission.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for uinputctl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while opening a device or emitting events.
#[derive(Debug, Error)]
pub enum Error {
    /// The device file could not be opened for writing.
    #[error("open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record could not be written in full.
    #[error("write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One record of a multi-record sequence failed; later records were not sent.
    #[error("emit {event} failed (record {record}): {source}")]
    Gesture {
        /// 1-based index of the failing record within the sequence.
        record: usize,
        /// Symbolic name of the failing event code, e.g. `SYN_MT_REPORT`.
        event: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// The handle was used after it had been closed.
    #[error("device {} is closed", path.display())]
    Closed { path: PathBuf },

    /// Releasing the descriptor failed.
    #[error("close {}: {source}", path.display())]
    Close {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A coordinate, key code or other argument was not usable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Creating or driving a uinput virtual device failed.
    #[error("virtual device error: {0}")]
    VirtualDevice(String),
}

impl Error {
    /// The OS error code behind this error, if there is one.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Error::Open { source, .. } | Error::Write { source, .. } | Error::Close { source, .. } => {
                source.raw_os_error()
            }
            Error::Gesture { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}
