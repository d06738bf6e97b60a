//! Configuration for qq.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```toml
//! log_file = "/var/tmp/debug.log"
//! group_threshold_ms = 5000
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where lines are appended
    pub log_file: PathBuf,
    /// Idle gap after which the next line starts a new block
    pub group_threshold_ms: u64,
    /// Name the calling crate uses for qq, for `alias::qq!(..)` calls
    pub alias: String,
    /// ANSI colors around names and values
    pub color: bool,
    /// Multi-line `{:#?}` values
    pub pretty: bool,
    /// Panic in `qq!` when the log file cannot be written, instead of reporting on stderr
    pub fail_fast: bool,
    /// Free proc-macro2 span data after each lookup
    pub release_spans: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            group_threshold_ms: 2000,
            alias: "qq".to_string(),
            color: true,
            pretty: false,
            fail_fast: false,
            release_spans: true,
        }
    }
}

/// `qq.log` in the platform temp directory.
pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("qq.log")
}

impl Config {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).context("Invalid qq config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("In {}", path.display()))
    }

    pub fn group_threshold(&self) -> Duration {
        Duration::from_millis(self.group_threshold_ms)
    }
}
