//! Audit Logger - the three on-disk log streams of a scaffold run.
//!
//! Entries are buffered per stream in call order and written by `flush`.
//! Each entry is also mirrored to `tracing` for live diagnostics.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, Local};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{LogEntry, LogLevel, LogStream},
    error::{StackseedError, StackseedResult},
};

/// Source of wall-clock time. Injectable for tests.
pub type Clock = Box<dyn Fn() -> DateTime<Local> + Send + Sync>;

#[derive(Default)]
struct StreamBuffer {
    entries: Vec<LogEntry>,
    flushed: usize,
}

/// Per-run audit logger.
///
/// Constructed once per run and passed by reference to the tree builder.
/// Streams never share entries: a message logged to `frontend` only ever
/// lands in `frontend.log`.
pub struct AuditLogger {
    run_id: Uuid,
    streams: BTreeMap<LogStream, StreamBuffer>,
    clock: Clock,
    last: Option<DateTime<Local>>,
}

impl AuditLogger {
    pub fn new() -> Self {
        Self::with_clock(Box::new(Local::now))
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            streams: LogStream::ALL
                .into_iter()
                .map(|stream| (stream, StreamBuffer::default()))
                .collect(),
            clock,
            last: None,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Record an entry, timestamped now.
    ///
    /// Timestamps never go backwards within a run, even if the wall clock
    /// does; a step back is clamped to the previous timestamp.
    pub fn log(&mut self, stream: LogStream, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        let mut timestamp = (self.clock)();
        if let Some(last) = self.last {
            if timestamp < last {
                timestamp = last;
            }
        }
        self.last = Some(timestamp);

        match level {
            LogLevel::Info => info!(stream = %stream, run_id = %self.run_id, "{message}"),
            LogLevel::Warn => warn!(stream = %stream, run_id = %self.run_id, "{message}"),
            LogLevel::Error => error!(stream = %stream, run_id = %self.run_id, "{message}"),
        }

        self.buffer_mut(stream).entries.push(LogEntry {
            timestamp,
            stream,
            level,
            message,
        });
    }

    pub fn info(&mut self, stream: LogStream, message: impl Into<String>) {
        self.log(stream, LogLevel::Info, message);
    }

    pub fn warn(&mut self, stream: LogStream, message: impl Into<String>) {
        self.log(stream, LogLevel::Warn, message);
    }

    pub fn error(&mut self, stream: LogStream, message: impl Into<String>) {
        self.log(stream, LogLevel::Error, message);
    }

    /// All entries of one stream, oldest first.
    pub fn entries(&self, stream: LogStream) -> &[LogEntry] {
        self.streams
            .get(&stream)
            .map_or(&[], |buffer| buffer.entries.as_slice())
    }

    /// Entries not yet written by `flush`.
    pub fn pending(&self) -> usize {
        self.streams
            .values()
            .map(|buffer| buffer.entries.len() - buffer.flushed)
            .sum()
    }

    /// Append every unflushed entry to `<log_dir>/<stream>.log`.
    ///
    /// All three files are created even when a stream has nothing to write.
    /// Every stream is attempted; the first failure is returned and the
    /// failed stream keeps its entries for a later attempt.
    pub fn flush(&mut self, filesystem: &dyn Filesystem, log_dir: &Path) -> StackseedResult<()> {
        self.flush_streams(filesystem, log_dir, &LogStream::ALL)
    }

    /// [`flush`](Self::flush) limited to `streams`. The others stay pending.
    pub fn flush_streams(
        &mut self,
        filesystem: &dyn Filesystem,
        log_dir: &Path,
        streams: &[LogStream],
    ) -> StackseedResult<()> {
        let mut first_error: Option<StackseedError> = None;

        for (stream, buffer) in &mut self.streams {
            if !streams.contains(stream) {
                continue;
            }
            let path = log_dir.join(stream.file_name());
            let text: String = buffer.entries[buffer.flushed..]
                .iter()
                .map(|entry| entry.to_line() + "\n")
                .collect();

            match filesystem.append_file(&path, text.as_bytes()) {
                Ok(()) => {
                    debug!(
                        stream = %stream,
                        entries = buffer.entries.len() - buffer.flushed,
                        path = %path.display(),
                        "Flushed audit log"
                    );
                    buffer.flushed = buffer.entries.len();
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Audit log flush failed");
                    first_error.get_or_insert_with(|| {
                        ApplicationError::LogFlushFailed {
                            path,
                            reason: e.to_string(),
                        }
                        .into()
                    });
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    fn buffer_mut(&mut self, stream: LogStream) -> &mut StreamBuffer {
        self.streams.entry(stream).or_default()
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLogger")
            .field("run_id", &self.run_id)
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}
