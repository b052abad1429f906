//! Error types for mcx-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.
//! Resolver errors carry the operation that failed and the token it was given.

use std::fmt;

use thiserror::Error;

use crate::url_parser::UrlType;

/// Result type alias for mcx-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Resolver operation an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Classify,
    Canonicalize,
    ExtractHost,
    SplitBucketObject,
    ExpandAlias,
    Resolve,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Classify => "classify",
            Operation::Canonicalize => "canonicalize",
            Operation::ExtractHost => "extract host",
            Operation::SplitBucketObject => "split bucket/object",
            Operation::ExpandAlias => "expand alias",
            Operation::Resolve => "resolve",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error types for mcx-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Empty token where a URL was required
    #[error("{op}: URL cannot be empty")]
    EmptyUrl { op: Operation },

    /// Token is not syntactically a URL
    #[error("{op}: cannot parse '{token}': {source}")]
    Parse {
        op: Operation,
        token: String,
        #[source]
        source: url::ParseError,
    },

    /// Token parsed but has the wrong kind for the operation
    #[error("{op}: '{token}' is {found}, expected a local file")]
    Classification {
        op: Operation,
        token: String,
        found: UrlType,
    },

    /// Token parsed but is structurally disallowed
    #[error("{op}: invalid URL '{token}': {reason}")]
    InvalidUrl {
        op: Operation,
        token: String,
        reason: String,
    },

    /// Scheme is neither object storage nor local file
    #[error("Unsupported scheme in '{token}'")]
    UnsupportedScheme { token: String },

    /// Alias expansion produced something unusable
    #[error("Cannot expand alias in '{token}': {reason}")]
    Alias { token: String, reason: String },

    /// A single argument of a batch failed
    #[error("argument #{} ('{token}'): {source}", .index + 1)]
    Argument {
        index: usize,
        token: String,
        #[source]
        source: Box<Error>,
    },

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::EmptyUrl { .. }
            | Error::Parse { .. }
            | Error::Classification { .. }
            | Error::InvalidUrl { .. }
            | Error::UnsupportedScheme { .. }
            | Error::Alias { .. } => 2, // UsageError
            Error::Config(_) => 2,      // UsageError
            Error::Argument { source, .. } => source.exit_code(),
            _ => 1, // GeneralError
        }
    }

    /// Operation tag, if the error came out of the resolver
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::EmptyUrl { op }
            | Error::Parse { op, .. }
            | Error::Classification { op, .. }
            | Error::InvalidUrl { op, .. } => Some(*op),
            Error::UnsupportedScheme { .. } => Some(Operation::Resolve),
            Error::Alias { .. } => Some(Operation::ExpandAlias),
            Error::Argument { source, .. } => source.operation(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(
            Error::EmptyUrl {
                op: Operation::Canonicalize
            }
            .exit_code(),
            2
        );
        assert_eq!(
            Error::UnsupportedScheme {
                token: "ftp://x".into()
            }
            .exit_code(),
            2
        );
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(
            Error::Alias {
                token: "s3:bucket".into(),
                reason: "bad".into()
            }
            .exit_code(),
            2
        );
        let io = std::io::Error::other("disk");
        assert_eq!(Error::Io(io).exit_code(), 1);
    }

    #[test]
    fn test_argument_error_delegates_to_source() {
        let err = Error::Argument {
            index: 1,
            token: "ftp://host/x".into(),
            source: Box::new(Error::UnsupportedScheme {
                token: "ftp://host/x".into(),
            }),
        };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.operation(), Some(Operation::Resolve));
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidUrl {
            op: Operation::Canonicalize,
            token: "file://host/tmp".into(),
            reason: "host must be empty".into(),
        };
        assert_eq!(
            err.to_string(),
            "canonicalize: invalid URL 'file://host/tmp': host must be empty"
        );

        let err = Error::Argument {
            index: 0,
            token: "".into(),
            source: Box::new(Error::Config("no default host configured".into())),
        };
        assert_eq!(
            err.to_string(),
            "argument #1 (''): Configuration error: no default host configured"
        );
    }
}
