// Infrastructure implementations for qq.

pub mod sink;

pub use sink::{FileLogSink, MemorySink};

use crate::domain::call_site::CallSite;
use crate::error::LocateError;
use crate::ports::SourceLocator;
use std::fs;
use std::path::Path;
use syn::File;

/// Reads and parses the caller's source on every call. Nothing is cached, so edits
/// to the file are picked up immediately (and line numbers may then drift).
pub struct SynSourceLocator;

impl SourceLocator for SynSourceLocator {
    fn locate(&self, site: &CallSite) -> Result<File, LocateError> {
        let path = site
            .source_candidates()
            .into_iter()
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| LocateError::NotFound(site.file.clone()))?;
        parse_source_file(&path)
    }
}

pub fn parse_source_file(path: &Path) -> Result<File, LocateError> {
    let src = fs::read_to_string(path).map_err(|source| LocateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    syn::parse_file(&src).map_err(|source| LocateError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Drop the line/column bookkeeping proc-macro2 keeps for every parse on this thread.
/// Without this the source map grows by one file per logging call.
///
/// Spans of trees parsed earlier on this thread must not be used afterwards.
pub fn release_spans() {
    proc_macro2::extra::invalidate_current_thread_spans();
}
