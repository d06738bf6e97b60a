//! Argument Formatting
//!
//! Turns (name, value) pairs into the `name=value` strings written to the log.

use crate::domain::argument::LoggedValue;
use owo_colors::{OwoColorize, Style};
use std::fmt::Debug;

/// Renders logged values.
#[derive(Debug, Clone)]
pub struct Formatter {
    /// Wrap names and values in ANSI escape codes
    pub color: bool,
    /// Use `{:#?}` instead of `{:?}` for values
    pub pretty: bool,
}

impl Default for Formatter {
    fn default() -> Self {
        Self { color: true, pretty: false }
    }
}

impl Formatter {
    pub fn new(color: bool, pretty: bool) -> Self {
        Self { color, pretty }
    }

    /// One display string per value, in argument order.
    pub fn format(&self, names: Option<&[String]>, values: &[&dyn Debug]) -> Vec<String> {
        LoggedValue::zip(names, values)
            .iter()
            .map(|logged| self.format_one(logged))
            .collect()
    }

    pub fn format_one(&self, logged: &LoggedValue<'_>) -> String {
        let value = self.colorize(&self.value_repr(logged.value), value_style());
        match logged.name {
            Some(name) => format!("{}={}", self.colorize(name, name_style()), value),
            None => value,
        }
    }

    fn value_repr(&self, value: &dyn Debug) -> String {
        if self.pretty {
            format!("{:#?}", value)
        } else {
            format!("{:?}", value)
        }
    }

    fn colorize(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

fn name_style() -> Style {
    Style::new().bold()
}

fn value_style() -> Style {
    Style::new().cyan()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Peer {
        addr: &'static str,
        port: u16,
    }

    fn plain() -> Formatter {
        Formatter::new(false, false)
    }

    #[test]
    fn test_named_and_literal_arguments() {
        let (ip, port) = ("1.2.3.4", 443);
        let names = vec!["ip".to_string(), "port".to_string(), String::new()];
        let out = plain().format(Some(names.as_slice()), &[&ip, &port, &5432]);
        assert_eq!(out, vec!["ip=\"1.2.3.4\"", "port=443", "5432"]);
    }

    #[test]
    fn test_compound_name() {
        let (a, b) = (2, 3);
        let names = vec!["a + b".to_string()];
        assert_eq!(plain().format(Some(names.as_slice()), &[&(a + b)]), vec!["a + b=5"]);
    }

    #[test]
    fn test_unnamed_when_no_names_or_mismatch() {
        assert_eq!(plain().format(None, &[&1, &2]), vec!["1", "2"]);

        let names = vec!["x".to_string()];
        assert_eq!(plain().format(Some(names.as_slice()), &[&1, &2]), vec!["1", "2"]);
    }

    #[test]
    fn test_structural_representation() {
        let peer = Peer { addr: "db", port: 5432 };
        let names = vec!["peer".to_string()];
        let out = plain().format(Some(names.as_slice()), &[&peer]);
        assert_eq!(out[0], "peer=Peer { addr: \"db\", port: 5432 }");

        let out = Formatter::new(false, true).format(None, &[&Some(vec![1])]);
        assert_eq!(out[0], "Some(\n    [\n        1,\n    ],\n)");
    }

    #[test]
    fn test_colors_wrap_name_and_value_separately() {
        let port = 443;
        let names = vec!["port".to_string()];
        let out = Formatter::default().format(Some(names.as_slice()), &[&port]);
        assert!(out[0].starts_with("\u{1b}[1mport\u{1b}[0m="));
        assert!(out[0].contains("\u{1b}[36m443"));
        assert!(out[0].ends_with("\u{1b}[0m"));
    }
}
