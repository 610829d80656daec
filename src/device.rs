//! Write handle to an input device file.
//!
//! [`InputDevice`] owns a write-only descriptor for a path such as
//! `/dev/input/event5`. Every record goes out in its own `write(2)` so the
//! kernel sees events in exactly the order they were emitted.

use crate::codes::EventType;
use crate::error::{Error, Result};
use crate::event::{InputEventRecord, RECORD_SIZE};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::fd::IntoRawFd;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};

/// Destination for raw input event records.
///
/// Implemented by [`InputDevice`], by the uinput virtual device, and by test
/// fakes that record what was emitted.
pub trait EventSink {
    /// Write exactly one record.
    fn write_record(&mut self, record: &InputEventRecord) -> Result<()>;

    /// Stamp the current time on `(kind, code, value)` and write it.
    fn emit_raw(&mut self, kind: EventType, code: u16, value: i32) -> Result<()> {
        self.write_record(&InputEventRecord::now(kind, code, value))
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn write_record(&mut self, record: &InputEventRecord) -> Result<()> {
        (**self).write_record(record)
    }
}

/// An open, write-only input device file.
#[derive(Debug)]
pub struct InputDevice {
    file: Option<File>,
    path: PathBuf,
}

impl InputDevice {
    /// Open an existing device file for writing.
    ///
    /// Fails if the path is missing, not writable, or not a character device.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let open_error = |source| Error::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(open_error)?;
        let metadata = file.metadata().map_err(open_error)?;
        if !metadata.file_type().is_char_device() {
            return Err(open_error(io::Error::from_raw_os_error(libc::ENODEV)));
        }

        log::debug!("opened {} for writing", path.display());
        Ok(Self::from_file(file, path))
    }

    /// Wrap a file that is already open for writing.
    ///
    /// No device-type check is made; `path` is only used in messages.
    pub fn from_file(file: File, path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(file),
            path: path.into(),
        }
    }

    /// Path the device was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether [`close`](Self::close) has already released the descriptor.
    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    /// Release the descriptor.
    ///
    /// Calling this on a closed handle does nothing and returns `Ok`.
    pub fn close(&mut self) -> Result<()> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };

        let fd = file.into_raw_fd();
        // SAFETY: `fd` was just released by `into_raw_fd`, so it is owned here
        // and closed exactly once.
        if unsafe { libc::close(fd) } < 0 {
            return Err(Error::Close {
                path: self.path.clone(),
                source: io::Error::last_os_error(),
            });
        }

        log::debug!("closed {}", self.path.display());
        Ok(())
    }
}

impl EventSink for InputDevice {
    fn write_record(&mut self, record: &InputEventRecord) -> Result<()> {
        let file = self.file.as_mut().ok_or_else(|| Error::Closed {
            path: self.path.clone(),
        })?;
        write_record_to(file, &self.path, record)
    }
}

/// Encode `record` and hand it to `writer` in a single `write` call.
///
/// Anything short of a full record is an error; there is no retry.
pub(crate) fn write_record_to<W: Write + ?Sized>(
    writer: &mut W,
    path: &Path,
    record: &InputEventRecord,
) -> Result<()> {
    log::trace!(
        "{}: {} type={} code={} value={}",
        path.display(),
        record.name(),
        record.kind.raw(),
        record.code,
        record.value
    );

    let bytes = record.to_bytes();
    let source = match writer.write(&bytes) {
        Ok(n) if n == RECORD_SIZE => return Ok(()),
        Ok(n) => io::Error::new(
            io::ErrorKind::WriteZero,
            format!("short write: {n} of {RECORD_SIZE} bytes"),
        ),
        Err(e) => e,
    };
    Err(Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

impl Drop for InputDevice {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("{}", e);
        }
    }
}

/// Close a device that may not exist.
///
/// `None` is a no-op returning `Ok`.
pub fn close_device(device: Option<InputDevice>) -> Result<()> {
    match device {
        Some(mut device) => device.close(),
        None => Ok(()),
    }
}
