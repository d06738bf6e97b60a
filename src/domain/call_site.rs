//! Call Site Module
//!
//! The source coordinates of one `qq!` invocation, captured by the macro.

use std::path::{Path, PathBuf};

/// Where a logging call happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Path as reported by `file!()` (usually relative to the package or workspace root)
    pub file: String,
    /// 1-based line of the invocation
    pub line: u32,
    /// 1-based column of the invocation, if known
    pub column: Option<u32>,
    /// Path of the enclosing function, e.g. `my_crate::server::run`
    pub function: String,
    /// `CARGO_MANIFEST_DIR` of the calling crate, if it was built by cargo
    pub manifest_dir: Option<&'static str>,
}

impl CallSite {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            column: None,
            function: function.into(),
            manifest_dir: None,
        }
    }

    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_manifest_dir(mut self, dir: Option<&'static str>) -> Self {
        self.manifest_dir = dir;
        self
    }

    /// File name without directories, as shown in the line prefix.
    pub fn short_file(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file)
    }

    /// Paths worth trying when reading the source back.
    ///
    /// `file!()` is relative to the directory rustc was invoked from, which is the
    /// workspace root for workspace members, so every ancestor of the manifest
    /// directory is a candidate.
    pub fn source_candidates(&self) -> Vec<PathBuf> {
        let file = Path::new(&self.file);
        let mut candidates = vec![file.to_path_buf()];
        if file.is_absolute() {
            return candidates;
        }
        if let Some(dir) = self.manifest_dir {
            for base in Path::new(dir).ancestors() {
                let candidate = base.join(file);
                if !candidates.contains(&candidate) {
                    candidates.push(candidate);
                }
            }
        }
        candidates
    }
}

/// Turn the `type_name` of a marker fn into the path of the function containing it.
///
/// Used by [`function_name!`](crate::function_name); strips the marker segment and any
/// trailing closure segments.
pub fn enclosing_function(marker_type_name: &'static str) -> &'static str {
    let mut name = marker_type_name
        .strip_suffix("::__qq_marker")
        .unwrap_or(marker_type_name);
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_file() {
        let site = CallSite::new("src/server/listener.rs", 12, "app::server::listen");
        assert_eq!(site.short_file(), "listener.rs");

        let bare = CallSite::new("main.rs", 1, "main");
        assert_eq!(bare.short_file(), "main.rs");
    }

    #[test]
    fn test_source_candidates_walk_manifest_ancestors() {
        let site = CallSite::new("crates/app/src/main.rs", 3, "app::main")
            .with_manifest_dir(Some("/work/ws/crates/app"));
        let candidates = site.source_candidates();

        assert_eq!(candidates[0], PathBuf::from("crates/app/src/main.rs"));
        assert_eq!(
            candidates[1],
            PathBuf::from("/work/ws/crates/app/crates/app/src/main.rs")
        );
        assert!(candidates.contains(&PathBuf::from("/work/ws/crates/app/src/main.rs")));
    }

    #[test]
    fn test_absolute_path_is_only_candidate() {
        let site = CallSite::new("/tmp/x.rs", 1, "x").with_manifest_dir(Some("/work"));
        assert_eq!(site.source_candidates(), vec![PathBuf::from("/tmp/x.rs")]);
    }

    #[test]
    fn test_enclosing_function() {
        assert_eq!(enclosing_function("app::run::__qq_marker"), "app::run");
        assert_eq!(
            enclosing_function("app::run::{{closure}}::{{closure}}::__qq_marker"),
            "app::run"
        );
        assert_eq!(enclosing_function("odd"), "odd");
    }
}
