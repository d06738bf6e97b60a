// One formatted log line.

use crate::domain::call_site::CallSite;
use chrono::{DateTime, Local};

/// A line ready for the sink.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub prefix: String,
    pub args: Vec<String>,
    /// Starts a new group, so a blank line goes first
    pub separated: bool,
}

impl LogEntry {
    pub fn new(site: &CallSite, timestamp: DateTime<Local>, args: Vec<String>, separated: bool) -> Self {
        let prefix = format!(
            "[{} {}:{} {}] ",
            timestamp.format("%H:%M:%S"),
            site.short_file(),
            site.line,
            site.function
        );
        Self { timestamp, prefix, args, separated }
    }

    /// Full text including the trailing newline.
    pub fn to_line(&self) -> String {
        let mut line = String::new();
        if self.separated {
            line.push('\n');
        }
        line.push_str(&self.prefix);
        line.push_str(&self.args.join(" "));
        line.push('\n');
        line
    }
}
