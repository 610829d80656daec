//! In-memory sinks and writers for asserting emitted sequences.

use crate::device::{EventSink, write_record_to};
use crate::error::{Error, Result};
use crate::event::{InputEventRecord, RECORD_SIZE};
use std::io::{self, Write};
use std::path::PathBuf;

/// Records `(type, code, value)` of every write; optionally fails one write.
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub records: Vec<(u16, u16, i32)>,
    /// Total write attempts, including the failed one.
    pub attempts: usize,
    /// 1-based write attempt that fails with `EIO`.
    pub fail_on: Option<usize>,
}

impl RecordingSink {
    pub fn failing_on(n: usize) -> Self {
        Self {
            fail_on: Some(n),
            ..Self::default()
        }
    }
}

impl EventSink for RecordingSink {
    fn write_record(&mut self, record: &InputEventRecord) -> Result<()> {
        self.attempts += 1;
        if self.fail_on == Some(self.attempts) {
            return Err(Error::Write {
                path: "fake".into(),
                source: io::Error::from_raw_os_error(libc::EIO),
            });
        }
        self.records
            .push((record.kind.raw(), record.code, record.value));
        Ok(())
    }
}

/// Sends records through the same encode-and-write path as real devices.
#[derive(Debug)]
pub(crate) struct WriterSink<W: Write> {
    pub writer: W,
    path: PathBuf,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            path: "fake".into(),
        }
    }
}

impl<W: Write> EventSink for WriterSink<W> {
    fn write_record(&mut self, record: &InputEventRecord) -> Result<()> {
        write_record_to(&mut self.writer, &self.path, record)
    }
}

/// Accepts one byte less than a full record on every call.
#[derive(Debug, Default)]
pub(crate) struct ShortWriter {
    pub calls: usize,
}

impl Write for ShortWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        Ok(buf.len().min(RECORD_SIZE) - 1)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
