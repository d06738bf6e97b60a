//! Log Sinks
//!
//! `FileLogSink` appends to a file that is opened and closed around every line, so
//! each line is on disk before the logging call returns even if the process dies
//! right after. `MemorySink` keeps lines in memory.

use crate::error::SinkError;
use crate::ports::LogSink;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct FileLogSink {
    path: PathBuf,
}

impl FileLogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<std::fs::File, SinkError> {
        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        options.open(&self.path).map_err(|source| SinkError::Open {
            path: self.path.clone(),
            source,
        })
    }
}

impl LogSink for FileLogSink {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut file = self.open()?;
        file.write_all(line.as_bytes()).map_err(|source| SinkError::Write {
            path: self.path.clone(),
            source,
        })
        // closed on drop
    }
}

#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Everything written so far, concatenated.
    pub fn contents(&self) -> String {
        self.lines.lock().concat()
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}
