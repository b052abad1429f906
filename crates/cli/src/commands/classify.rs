//! classify command - Show the type of each argument
//!
//! Unlike `resolve`, every argument is reported even when some are malformed.

use clap::Args;
use mcx_core::UrlType;
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Show whether arguments are object-storage, local-file or unsupported
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Paths or URLs to classify
    #[arg(required = true)]
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ClassifyEntry {
    input: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    url_type: Option<&'static str>,
    supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ClassifyEntry {
    fn new(input: String) -> Self {
        match mcx_core::classify(&input) {
            Ok(url_type) => Self {
                url_type: Some(url_type.as_str()),
                supported: !matches!(url_type, UrlType::Unknown),
                error: None,
                input,
            },
            Err(e) => Self {
                url_type: None,
                supported: false,
                error: Some(e.to_string()),
                input,
            },
        }
    }
}

/// Execute the classify command
pub fn execute(args: ClassifyArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let entries: Vec<ClassifyEntry> = args.args.into_iter().map(ClassifyEntry::new).collect();

    if formatter.is_json() {
        formatter.json(&entries);
    } else {
        for entry in &entries {
            match (&entry.url_type, &entry.error) {
                (Some(url_type), _) => formatter.println(&format!("{url_type:<15} {}", entry.input)),
                (None, Some(error)) => formatter.error(error),
                (None, None) => {}
            }
        }
    }

    if entries.iter().any(|e| e.error.is_some()) {
        ExitCode::UsageError
    } else {
        ExitCode::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_supported() {
        let entry = ClassifyEntry::new("https://s3.example.com/b".into());
        assert_eq!(entry.url_type, Some("object-storage"));
        assert!(entry.supported);
        assert!(entry.error.is_none());
    }

    #[test]
    fn test_entry_unknown_scheme() {
        let entry = ClassifyEntry::new("ftp://host/file".into());
        assert_eq!(entry.url_type, Some("unknown"));
        assert!(!entry.supported);
    }

    #[test]
    fn test_entry_parse_error() {
        let entry = ClassifyEntry::new("http://[::1".into());
        assert!(entry.url_type.is_none());
        assert!(!entry.supported);
        assert!(entry.error.unwrap().starts_with("classify:"));
    }
}
