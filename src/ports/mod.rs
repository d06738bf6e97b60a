use crate::domain::call_site::CallSite;
use crate::error::{LocateError, SinkError};

/// Produces a fresh syntax tree for the file a call site points at.
pub trait SourceLocator: Send + Sync {
    fn locate(&self, site: &CallSite) -> Result<syn::File, LocateError>;
}

/// Destination for finished log lines.
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &str) -> Result<(), SinkError>;
}

impl<T: LogSink + ?Sized> LogSink for std::sync::Arc<T> {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        (**self).write_line(line)
    }
}
