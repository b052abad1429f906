//! Human and JSON rendering shared by the subcommands

use serde::Serialize;
use serde_json::json;

use super::OutputConfig;

/// Writes results to stdout and diagnostics to stderr
///
/// In JSON mode stdout carries one JSON document per command and errors are
/// JSON objects on stderr; nothing is colored.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn is_json(&self) -> bool {
        self.config.json
    }

    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    /// Report a failed command. Never silenced by `--quiet`.
    pub fn failure(&self, err: &mcx_core::Error) {
        if self.config.json {
            self.json_error(error_document(err));
        } else {
            self.error(&err.to_string());
        }
    }

    /// Report a plain error message. Never silenced by `--quiet`.
    pub fn error(&self, message: &str) {
        if self.config.json {
            self.json_error(json!({ "error": message }));
        } else {
            self.marked(message, "31", "✗");
        }
    }

    /// Suppressed by `--quiet` and in JSON mode
    pub fn warning(&self, message: &str) {
        if !self.config.quiet && !self.config.json {
            self.marked(message, "33", "⚠");
        }
    }

    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Print an aligned `Label   : value` line
    pub fn field(&self, label: &str, value: &str) {
        self.println(&format!("{label:<8}: {value}"));
    }

    pub fn println(&self, message: &str) {
        if !self.config.quiet {
            println!("{message}");
        }
    }

    fn marked(&self, message: &str, color: &str, mark: &str) {
        if self.colors_enabled() {
            eprintln!("\x1b[{color}m{mark}\x1b[0m {message}");
        } else {
            eprintln!("{mark} {message}");
        }
    }

    fn json_error(&self, document: serde_json::Value) {
        match serde_json::to_string_pretty(&document) {
            Ok(text) => eprintln!("{text}"),
            Err(_) => eprintln!("{document}"),
        }
    }
}

/// `{"error": ..., "operation": ...}`; the operation is omitted for errors
/// that did not come out of the resolver.
fn error_document(err: &mcx_core::Error) -> serde_json::Value {
    let mut document = json!({ "error": err.to_string() });
    if let Some(op) = err.operation() {
        document["operation"] = json!(op.as_str());
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcx_core::{Error, Operation};

    #[test]
    fn test_colors_follow_flags() {
        assert!(Formatter::new(OutputConfig::default()).colors_enabled());

        let json = Formatter::new(OutputConfig {
            json: true,
            ..Default::default()
        });
        assert!(json.is_json());
        assert!(!json.colors_enabled());

        let plain = Formatter::new(OutputConfig {
            no_color: true,
            ..Default::default()
        });
        assert!(!plain.is_json());
        assert!(!plain.colors_enabled());
    }

    #[test]
    fn test_error_document_carries_operation() {
        let err = Error::Argument {
            index: 2,
            token: "//host".into(),
            source: Box::new(Error::InvalidUrl {
                op: Operation::Canonicalize,
                token: "//host".into(),
                reason: "host must be empty".into(),
            }),
        };
        let document = error_document(&err);
        assert_eq!(document["operation"], "canonicalize");
        assert!(
            document["error"]
                .as_str()
                .unwrap()
                .starts_with("argument #3")
        );
    }

    #[test]
    fn test_error_document_without_operation() {
        let document = error_document(&Error::Config("no default host".into()));
        assert!(document.get("operation").is_none());
        assert_eq!(
            document["error"],
            "Configuration error: no default host"
        );
    }
}
