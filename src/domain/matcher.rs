//! Call Matching
//!
//! Finds the `qq!` invocation a call site refers to and classifies its arguments.
//! A call site only carries a file/line (and usually a column), so matching is
//! positional: every recognized invocation anchored at that position qualifies.

use crate::domain::argument::{ArgumentClassifier, ArgumentNode};
use proc_macro2::LineColumn;
use std::collections::HashSet;
use syn::punctuated::Punctuated;
use syn::visit::{self, Visit};
use syn::{Expr, File, ImplItemConst, ItemConst, Macro, Path, Token, TraitItemConst};

/// Macro names that count as a logging call.
pub const ENTRY_POINTS: &[&str] = &["qq", "try_qq"];

/// Which source position a call must sit at to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Closing delimiter ends on this line. A multi-line call matches on the line of its `)`.
    EndLine(u32),
    /// Macro path starts on this line.
    StartLine(u32),
    /// Macro path starts at this line and 1-based column.
    Exact { line: u32, column: u32 },
}

/// Recognizes `qq!(..)`, `try_qq!(..)` and their `alias::`-qualified forms.
#[derive(Debug, Clone)]
pub struct CallMatcher {
    alias: String,
}

impl Default for CallMatcher {
    fn default() -> Self {
        Self::new("qq")
    }
}

impl CallMatcher {
    pub fn new(alias: impl Into<String>) -> Self {
        Self { alias: alias.into() }
    }

    /// Whether a macro path names one of our entry points.
    pub fn is_entry_point(&self, path: &Path) -> bool {
        if path.segments.iter().any(|segment| !segment.arguments.is_none()) {
            return false;
        }
        let names: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        match names.as_slice() {
            [entry] => path.leading_colon.is_none() && ENTRY_POINTS.contains(&entry.as_str()),
            [alias, entry] => *alias == self.alias && ENTRY_POINTS.contains(&entry.as_str()),
            _ => false,
        }
    }

    /// Argument list of the call(s) at `anchor`, or `None` when nothing matches.
    ///
    /// If several calls qualify, their arguments are concatenated in traversal order
    /// (outer call before the calls nested inside it). With `Anchor::EndLine` two
    /// calls on one physical line cannot be told apart; callers that have a column
    /// should use `Anchor::Exact`.
    pub fn find(&self, tree: &File, anchor: Anchor) -> Option<Vec<ArgumentNode>> {
        let mut constants = ConstCollector::default();
        constants.visit_file(tree);

        let mut finder = CallFinder {
            matcher: self,
            anchor,
            classifier: ArgumentClassifier::new(constants.names),
            args: Vec::new(),
            matched: false,
        };
        finder.visit_file(tree);

        if finder.matched {
            Some(finder.args)
        } else {
            None
        }
    }
}

struct CallFinder<'m> {
    matcher: &'m CallMatcher,
    anchor: Anchor,
    classifier: ArgumentClassifier,
    args: Vec<ArgumentNode>,
    matched: bool,
}

impl CallFinder<'_> {
    fn is_anchored(&self, mac: &Macro) -> bool {
        match self.anchor {
            Anchor::EndLine(line) => mac.delimiter.span().close().end().line == line as usize,
            Anchor::StartLine(line) => path_start(&mac.path).line == line as usize,
            Anchor::Exact { line, column } => {
                let start = path_start(&mac.path);
                start.line == line as usize && start.column + 1 == column as usize
            }
        }
    }
}

impl<'ast> Visit<'ast> for CallFinder<'_> {
    fn visit_macro(&mut self, mac: &'ast Macro) {
        // Bodies that are not expression lists (macro_rules!, DSLs) cannot hold a call we understand.
        let args = match mac.parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated) {
            Ok(args) => args,
            Err(_) => return,
        };

        if self.matcher.is_entry_point(&mac.path) && self.is_anchored(mac) {
            self.matched = true;
            for arg in &args {
                let node = self.classifier.classify(arg);
                self.args.push(node);
            }
        }

        for arg in &args {
            visit::visit_expr(self, arg);
        }
    }
}

/// Names of `const` items anywhere in the file.
#[derive(Default)]
struct ConstCollector {
    names: HashSet<String>,
}

impl<'ast> Visit<'ast> for ConstCollector {
    fn visit_item_const(&mut self, item: &'ast ItemConst) {
        self.names.insert(item.ident.to_string());
        visit::visit_item_const(self, item);
    }

    fn visit_impl_item_const(&mut self, item: &'ast ImplItemConst) {
        self.names.insert(item.ident.to_string());
        visit::visit_impl_item_const(self, item);
    }

    fn visit_trait_item_const(&mut self, item: &'ast TraitItemConst) {
        self.names.insert(item.ident.to_string());
        visit::visit_trait_item_const(self, item);
    }
}

fn path_start(path: &Path) -> LineColumn {
    match &path.leading_colon {
        Some(colon) => colon.spans[0].start(),
        None => path
            .segments
            .first()
            .map(|segment| segment.ident.span().start())
            .unwrap_or(LineColumn { line: 0, column: 0 }),
    }
}
