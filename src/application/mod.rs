//! Logging Use Case
//!
//! `Logger` runs one logging call end to end: read the caller's source, find the
//! call, name the arguments, format, group, write. Everything happens on the
//! calling thread.

use crate::config::Config;
use crate::domain::argument::ArgumentNode;
use crate::domain::call_site::CallSite;
use crate::domain::entry::LogEntry;
use crate::domain::format::Formatter;
use crate::domain::grouping::GroupingTimer;
use crate::domain::matcher::{Anchor, CallMatcher};
use crate::error::Error;
use crate::infrastructure::{release_spans, FileLogSink, SynSourceLocator};
use crate::ports::{LogSink, SourceLocator};
use chrono::{DateTime, Local};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::time::Instant;
use syn::File;

pub struct Logger {
    config: Config,
    locator: Box<dyn SourceLocator>,
    sink: Box<dyn LogSink>,
    matcher: CallMatcher,
    formatter: Formatter,
    timer: Mutex<GroupingTimer>,
}

impl Logger {
    /// Logger writing to `config.log_file`.
    pub fn new(config: Config) -> Self {
        let sink = FileLogSink::new(config.log_file.clone());
        Self::with_parts(config, Box::new(SynSourceLocator), Box::new(sink))
    }

    pub fn with_parts(config: Config, locator: Box<dyn SourceLocator>, sink: Box<dyn LogSink>) -> Self {
        Self {
            matcher: CallMatcher::new(config.alias.clone()),
            formatter: Formatter::new(config.color, config.pretty),
            timer: Mutex::new(GroupingTimer::new(config.group_threshold())),
            config,
            locator,
            sink,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Format `values` for the call at `site` and append the line to the sink.
    ///
    /// Only a sink failure is reported; source lookup problems just leave the
    /// values unnamed.
    pub fn log(&self, site: &CallSite, values: &[&dyn Debug]) -> Result<(), Error> {
        let entry = self.entry_at(site, values, Instant::now(), Local::now());
        self.sink.write_line(&entry.to_line())?;
        Ok(())
    }

    /// Build the entry without writing it. `now` drives grouping, `timestamp` the prefix.
    pub fn entry_at(
        &self,
        site: &CallSite,
        values: &[&dyn Debug],
        now: Instant,
        timestamp: DateTime<Local>,
    ) -> LogEntry {
        let names = self.argument_names(site).filter(|names| {
            if names.len() == values.len() {
                return true;
            }
            tracing::debug!(
                "qq: {}:{} has {} arguments in source but {} values, leaving all unnamed",
                site.file,
                site.line,
                names.len(),
                values.len()
            );
            false
        });
        let args = self.formatter.format(names.as_deref(), values);
        let separated = !self.timer.lock().reset(now);
        LogEntry::new(site, timestamp, args, separated)
    }

    /// Source text of each argument of the call at `site`, empty for literals.
    /// `None` when the file cannot be read or parsed, or holds no matching call.
    pub fn argument_names(&self, site: &CallSite) -> Option<Vec<String>> {
        let found = self.locator.locate(site).map(|tree| self.find_call(&tree, site));
        if self.config.release_spans {
            release_spans();
        }

        match found {
            Ok(Some(args)) => Some(args.iter().map(|arg| arg.name().to_string()).collect()),
            Ok(None) => {
                tracing::debug!("qq: no call found at {}:{}", site.file, site.line);
                None
            }
            Err(err) => {
                tracing::debug!("qq: {}", err);
                None
            }
        }
    }

    fn find_call(&self, tree: &File, site: &CallSite) -> Option<Vec<ArgumentNode>> {
        match site.column {
            // column!() counts characters; fall back to the line alone if the source disagrees
            Some(column) => self
                .matcher
                .find(tree, Anchor::Exact { line: site.line, column })
                .or_else(|| self.matcher.find(tree, Anchor::StartLine(site.line))),
            None => self.matcher.find(tree, Anchor::EndLine(site.line)),
        }
    }
}

static GLOBAL: OnceCell<Logger> = OnceCell::new();

/// Install the process-wide logger used by `qq!`. Fails if it already exists,
/// including when a `qq!` call already created the default one.
pub fn init(config: Config) -> Result<(), Error> {
    GLOBAL
        .set(Logger::new(config))
        .map_err(|_| Error::AlreadyInitialized)
}

/// The process-wide logger, created with `Config::default()` on first use.
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(|| Logger::new(Config::default()))
}

#[doc(hidden)]
pub fn log_or_report(site: CallSite, values: &[&dyn Debug]) {
    let logger = global();
    if let Err(err) = logger.log(&site, values) {
        if logger.config().fail_fast {
            panic!("qq: {}", err);
        }
        tracing::warn!("qq: {}", err);
        eprintln!("[qq] {}", err);
    }
}

#[doc(hidden)]
pub fn try_log(site: CallSite, values: &[&dyn Debug]) -> Result<(), Error> {
    global().log(&site, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemorySink;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    const SOURCE: &str = r#"fn connect() {
    let ip = "1.2.3.4";
    let port = 443;
    qq!(ip, port, 5432);
    qq!(ip,
        port);
}
"#;

    struct Fixture {
        _dir: TempDir,
        path: String,
        sink: Arc<MemorySink>,
        logger: Logger,
    }

    fn fixture(source: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect.rs");
        std::fs::write(&path, source).unwrap();

        let config = Config { color: false, ..Config::default() };
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::with_parts(config, Box::new(SynSourceLocator), Box::new(sink.clone()));
        Fixture {
            _dir: dir,
            path: path.to_str().unwrap().to_string(),
            sink,
            logger,
        }
    }

    fn render(logger: &Logger, site: &CallSite, values: &[&dyn Debug]) -> Vec<String> {
        logger.entry_at(site, values, Instant::now(), Local::now()).args
    }

    #[test]
    fn test_names_variables_and_leaves_literals_bare() {
        let fx = fixture(SOURCE);
        let site = CallSite::new(fx.path.as_str(), 4, "app::connect");
        let (ip, port) = ("1.2.3.4", 443);

        let args = render(&fx.logger, &site, &[&ip, &port, &5432]);
        assert_eq!(args, vec!["ip=\"1.2.3.4\"", "port=443", "5432"]);
    }

    #[test]
    fn test_column_anchor_and_start_line_fallback() {
        let fx = fixture(SOURCE);
        let (ip, port) = ("1.2.3.4", 443);

        let site = CallSite::new(fx.path.as_str(), 5, "app::connect").with_column(5);
        assert_eq!(render(&fx.logger, &site, &[&ip, &port]), vec!["ip=\"1.2.3.4\"", "port=443"]);

        // a column that does not line up still finds the call starting on that line
        let site = CallSite::new(fx.path.as_str(), 5, "app::connect").with_column(9);
        assert_eq!(render(&fx.logger, &site, &[&ip, &port]), vec!["ip=\"1.2.3.4\"", "port=443"]);
    }

    #[test]
    fn test_count_mismatch_leaves_everything_unnamed() {
        let fx = fixture(SOURCE);
        let site = CallSite::new(fx.path.as_str(), 4, "app::connect");
        assert_eq!(render(&fx.logger, &site, &[&1, &2]), vec!["1", "2"]);
    }

    #[test]
    fn test_unparsable_source_still_logs_values() {
        let fx = fixture("fn connect( {");
        let site = CallSite::new(fx.path.as_str(), 1, "app::connect");
        fx.logger.log(&site, &[&1, &2]).unwrap();

        let contents = fx.sink.contents();
        assert!(contents.ends_with("] 1 2\n"), "got {:?}", contents);
    }

    #[test]
    fn test_unreadable_source_still_logs_values() {
        let fx = fixture(SOURCE);
        let site = CallSite::new("no/such/file.rs", 4, "app::connect");
        assert_eq!(render(&fx.logger, &site, &[&1, &2]), vec!["1", "2"]);
        assert!(fx.logger.argument_names(&site).is_none());
    }

    #[test]
    fn test_no_call_on_line() {
        let fx = fixture(SOURCE);
        let site = CallSite::new(fx.path.as_str(), 2, "app::connect");
        assert!(fx.logger.argument_names(&site).is_none());
    }

    #[test]
    fn test_grouping_separator() {
        let fx = fixture(SOURCE);
        let site = CallSite::new(fx.path.as_str(), 4, "app::connect");
        let values: [&dyn Debug; 3] = [&"1.2.3.4", &443, &5432];
        let start = Instant::now();

        let first = fx.logger.entry_at(&site, &values, start, Local::now());
        let close = fx.logger.entry_at(&site, &values, start + Duration::from_secs(1), Local::now());
        let later = fx.logger.entry_at(&site, &values, start + Duration::from_secs(4), Local::now());

        assert!(first.to_line().starts_with("\n["));
        assert!(close.to_line().starts_with('['));
        assert!(later.to_line().starts_with("\n["));
    }

    #[test]
    fn test_log_line_layout() {
        let fx = fixture(SOURCE);
        let site = CallSite::new(fx.path.as_str(), 4, "app::connect");
        let (ip, port) = ("1.2.3.4", 443);
        fx.logger.log(&site, &[&ip, &port, &5432]).unwrap();

        let lines = fx.sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("\n["));
        assert!(lines[0].contains(" connect.rs:4 app::connect] "));
        assert!(lines[0].ends_with("] ip=\"1.2.3.4\" port=443 5432\n"));
    }

    #[test]
    fn test_sink_failure_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            log_file: dir.path().join("missing").join("qq.log"),
            ..Config::default()
        };
        let logger = Logger::new(config);
        let site = CallSite::new("no/such/file.rs", 1, "main");
        assert!(matches!(logger.log(&site, &[&1]), Err(Error::Sink(_))));
    }
}
