//! URL classification and decomposition
//!
//! A command-line token names either an object-storage endpoint (`http` or
//! `https`) or a local file (`file:` URL or a plain path). Local tokens can be
//! rewritten into the canonical `file:///absolute/path` form, and any token can
//! be split into a bucket and an object key by path position.

use std::fmt;

use percent_encoding::percent_decode_str;
use tracing::trace;
use url::Url;

use crate::error::{Error, Operation, Result};

/// Kind of location a token refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlType {
    /// Valid URL with a scheme we do not handle
    Unknown,
    /// Minio and S3 compatible object storage
    ObjectStorage,
    /// POSIX compatible file system
    LocalFile,
}

impl UrlType {
    pub const fn as_str(self) -> &'static str {
        match self {
            UrlType::Unknown => "unknown",
            UrlType::ObjectStorage => "object-storage",
            UrlType::LocalFile => "local-file",
        }
    }

    fn from_scheme(scheme: &str) -> Self {
        match scheme {
            "http" | "https" => UrlType::ObjectStorage,
            "file" | "" => UrlType::LocalFile,
            _ => UrlType::Unknown,
        }
    }
}

impl fmt::Display for UrlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic components of a token
#[derive(Debug)]
struct Parts {
    scheme: String,
    host: String,
    path: String,
    /// Present when the token is an absolute URL
    url: Option<Url>,
}

impl Parts {
    fn reference(host: &str, path: &str) -> Self {
        Self {
            scheme: String::new(),
            host: host.to_string(),
            path: path.to_string(),
            url: None,
        }
    }
}

/// Parse a token into scheme, host and path.
///
/// Absolute URLs go through the WHATWG parser. Tokens without a scheme are
/// path references: `//host/path` carries a host, anything else is a path.
/// An absolute URL padded with whitespace is rejected rather than trimmed.
fn parse(token: &str, op: Operation) -> Result<Parts> {
    #[cfg(windows)]
    if is_drive_path(token) {
        return Ok(Parts::reference("", token));
    }

    match Url::parse(token) {
        // The WHATWG parser silently strips these; a strict URL may not carry them
        Ok(_) if token.trim_matches(|c: char| c <= ' ') != token
            || token.contains(['\t', '\n', '\r']) =>
        {
            Err(Error::InvalidUrl {
                op,
                token: token.to_string(),
                reason: "URL contains whitespace or control characters".into(),
            })
        }
        Ok(url) => Ok(Parts {
            scheme: url.scheme().to_string(),
            host: url.host_str().unwrap_or_default().to_string(),
            path: url.path().to_string(),
            url: Some(url),
        }),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(match token.strip_prefix("//") {
            Some(rest) => match rest.find('/') {
                Some(pos) => Parts::reference(&rest[..pos], &rest[pos..]),
                None => Parts::reference(rest, ""),
            },
            None => Parts::reference("", token),
        }),
        Err(source) => Err(Error::Parse {
            op,
            token: token.to_string(),
            source,
        }),
    }
}

/// `C:\dir` and `C:/dir` would otherwise parse with scheme `c`
#[cfg(windows)]
fn is_drive_path(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && matches!(bytes.get(2), None | Some(b'\\') | Some(b'/'))
}

/// Detect the type of a token from its scheme.
///
/// Returns [`UrlType::Unknown`] for a well-formed URL with an unsupported
/// scheme; only malformed syntax is an error.
pub fn classify(token: &str) -> Result<UrlType> {
    let parts = parse(token, Operation::Classify)?;
    let url_type = UrlType::from_scheme(&parts.scheme);
    trace!(token, scheme = %parts.scheme, %url_type, "classified token");
    Ok(url_type)
}

/// Whether the token is an object-storage or local-file URL.
///
/// Malformed tokens and unsupported schemes are both `false`.
pub fn is_supported(token: &str) -> bool {
    matches!(
        classify(token),
        Ok(UrlType::ObjectStorage | UrlType::LocalFile)
    )
}

/// Whether the token is a local-file URL. Malformed tokens are `false`.
pub fn is_local_file(token: &str) -> bool {
    matches!(classify(token), Ok(UrlType::LocalFile))
}

fn parse_local(token: &str, op: Operation) -> Result<Parts> {
    if token.is_empty() {
        return Err(Error::EmptyUrl { op });
    }

    let parts = parse(token, op)?;
    match UrlType::from_scheme(&parts.scheme) {
        UrlType::LocalFile => Ok(parts),
        found @ (UrlType::ObjectStorage | UrlType::Unknown) => Err(Error::Classification {
            op,
            token: token.to_string(),
            found,
        }),
    }
}

/// Rewrite a local-file token to `file:///absolute/path` form.
///
/// Plain paths are made absolute against the current directory. `file:` URLs
/// are re-serialized, so the result is a fixed point of this function.
pub fn canonicalize_local_file(token: &str) -> Result<String> {
    let op = Operation::Canonicalize;
    let parts = parse_local(token, op)?;

    // file:///path always has an empty host
    if !parts.host.is_empty() {
        return Err(Error::InvalidUrl {
            op,
            token: token.to_string(),
            reason: format!("local path cannot have host '{}'", parts.host),
        });
    }

    let url = match parts.url {
        Some(url) => url,
        None => path_to_file_url(token, &parts.path)?,
    };
    Ok(url.into())
}

fn path_to_file_url(token: &str, path: &str) -> Result<Url> {
    let op = Operation::Canonicalize;
    // `//` names the root with an empty host
    let path = if path.is_empty() { "/" } else { path };
    let absolute = std::path::absolute(path)?;
    let url = Url::from_file_path(&absolute).map_err(|()| Error::InvalidUrl {
        op,
        token: token.to_string(),
        reason: format!("cannot express '{}' as a file URL", absolute.display()),
    })?;

    // Re-parse so dot segments collapse exactly as they do for `file:` tokens.
    Url::parse(url.as_str()).map_err(|source| Error::Parse {
        op,
        token: token.to_string(),
        source,
    })
}

/// Host component of a local-file token.
///
/// Genuine local paths have an empty host; a non-empty one (`file://host/x`)
/// should be treated as suspicious by the caller.
pub fn extract_host(token: &str) -> Result<String> {
    parse_local(token, Operation::ExtractHost).map(|parts| parts.host)
}

/// Split a token's path into bucket and object key.
///
/// The path is cut into at most three pieces on `/`, so `/bucket/a/b/c`
/// yields `("bucket", "a/b/c")`. A token that fails to parse has no bucket.
///
/// Pieces of an absolute URL are percent-decoded when they decode to UTF-8 and
/// kept encoded otherwise. Plain paths are taken literally.
pub fn split_bucket_object(token: &str) -> (String, String) {
    let (path, encoded) = match parse(token, Operation::SplitBucketObject) {
        Ok(parts) => (parts.path, parts.url.is_some()),
        Err(e) => {
            trace!(error = %e, "treating unparsable token as bucket-less");
            return (String::new(), String::new());
        }
    };

    // No bucket name passed, which is valid
    if path.is_empty() {
        return (String::new(), String::new());
    }

    let piece = |segment: &str| {
        if encoded {
            decode_segment(segment)
        } else {
            segment.to_string()
        }
    };
    let splits: Vec<&str> = path.splitn(3, '/').collect();
    match splits.as_slice() {
        [_, bucket] => (piece(bucket), String::new()),
        [_, bucket, object] => (piece(bucket), piece(object)),
        _ => (String::new(), String::new()),
    }
}

fn decode_segment(segment: &str) -> String {
    match percent_decode_str(segment).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            trace!(segment, error = %e, "keeping non UTF-8 segment encoded");
            segment.to_string()
        }
    }
}

/// Bucket name of a token.
pub fn bucket_only(token: &str) -> Result<String> {
    let (bucket, _) = split_bucket_object(token);
    Ok(bucket)
}
