//! Argument Classification
//!
//! Decides, per argument expression, what name (if any) is printed in front of its value.

use crate::domain::render::render_expr;
use std::collections::HashSet;
use std::fmt::Debug;
use syn::Expr;

/// Classified argument of a logging call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentNode {
    /// A direct variable reference, e.g. `port`
    Identifier(String),
    /// Any expression worth printing verbatim, e.g. `a + b` or `conn.peer_addr()`
    Compound(String),
    /// No useful name: literals, constants, paths and anything that could not be rendered
    Literal,
}

impl ArgumentNode {
    /// Display name, empty for literals.
    pub fn name(&self) -> &str {
        match self {
            ArgumentNode::Identifier(name) | ArgumentNode::Compound(name) => name,
            ArgumentNode::Literal => "",
        }
    }
}

/// A runtime value paired with the source text that produced it.
#[derive(Clone, Copy)]
pub struct LoggedValue<'a> {
    pub value: &'a dyn Debug,
    pub name: Option<&'a str>,
}

impl<'a> LoggedValue<'a> {
    /// Pair names with values. A count mismatch means the names cannot be trusted,
    /// so every value comes back unnamed.
    pub fn zip(names: Option<&'a [String]>, values: &'a [&'a dyn Debug]) -> Vec<LoggedValue<'a>> {
        match names {
            Some(names) if names.len() == values.len() => values
                .iter()
                .zip(names)
                .map(|(value, name)| LoggedValue {
                    value: *value,
                    name: if name.is_empty() { None } else { Some(name.as_str()) },
                })
                .collect(),
            _ => values
                .iter()
                .map(|value| LoggedValue { value: *value, name: None })
                .collect(),
        }
    }
}

/// Classifies argument expressions. Knows the `const` items of the file being
/// searched so that `qq!(MAX_CONNS)` is treated like a literal.
#[derive(Debug, Default)]
pub struct ArgumentClassifier {
    constants: HashSet<String>,
}

impl ArgumentClassifier {
    pub fn new(constants: HashSet<String>) -> Self {
        Self { constants }
    }

    pub fn classify(&self, expr: &Expr) -> ArgumentNode {
        match expr {
            Expr::Group(group) => self.classify(&group.expr),
            Expr::Path(path) => {
                if path.qself.is_some() || path.path.leading_colon.is_some() {
                    return ArgumentNode::Literal;
                }
                match path.path.get_ident() {
                    Some(ident) => {
                        let name = ident.to_string();
                        if self.is_constant(&name) {
                            ArgumentNode::Literal
                        } else {
                            ArgumentNode::Identifier(name)
                        }
                    }
                    None => ArgumentNode::Literal,
                }
            }
            Expr::Binary(_)
            | Expr::Call(_)
            | Expr::MethodCall(_)
            | Expr::Index(_)
            | Expr::Field(_)
            | Expr::Paren(_)
            | Expr::Range(_)
            | Expr::Cast(_)
            | Expr::Unary(_)
            | Expr::Reference(_)
            | Expr::Try(_)
            | Expr::Macro(_) => match render_expr(expr) {
                Ok(text) => ArgumentNode::Compound(text),
                Err(err) => {
                    tracing::debug!("qq: argument left unnamed: {}", err);
                    ArgumentNode::Literal
                }
            },
            _ => ArgumentNode::Literal,
        }
    }

    fn is_constant(&self, name: &str) -> bool {
        if self.constants.contains(name) {
            return true;
        }
        // SCREAMING_CASE constants, and CamelCase unit structs / enum variants like `None`
        name.chars().next().map_or(false, |c| c.is_uppercase())
    }
}
