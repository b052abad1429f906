//! Command-line argument resolution
//!
//! Turns raw arguments into URLs the rest of the client can act on. The
//! default host and alias table are supplied by the caller through the
//! [`DefaultHostSource`] and [`AliasExpander`] traits.

use tracing::debug;

use crate::error::{Error, Result};
use crate::url_parser::{self, UrlType};

/// Source of the URL substituted for an empty argument
#[cfg_attr(test, mockall::automock)]
pub trait DefaultHostSource {
    /// Configured default host, if any
    fn default_host(&self) -> Result<Option<String>>;
}

/// Expands alias references in a token
#[cfg_attr(test, mockall::automock)]
pub trait AliasExpander {
    /// Return the token with any alias expanded, or unchanged
    fn expand(&self, token: &str) -> Result<String>;
}

/// Resolves command-line arguments into object-storage or canonical file URLs
pub struct Resolver<'a> {
    defaults: &'a dyn DefaultHostSource,
    aliases: &'a dyn AliasExpander,
}

impl<'a> Resolver<'a> {
    pub fn new(defaults: &'a dyn DefaultHostSource, aliases: &'a dyn AliasExpander) -> Self {
        Self { defaults, aliases }
    }

    /// Resolve a single argument.
    ///
    /// An empty argument is replaced by the default host. The result is then
    /// alias-expanded and validated; object-storage URLs are returned as-is
    /// and local files are canonicalized.
    pub fn resolve(&self, arg: &str) -> Result<String> {
        let url = if arg.is_empty() {
            let host = self
                .defaults
                .default_host()?
                .filter(|host| !host.is_empty())
                .ok_or_else(|| {
                    Error::Config("No URL given and no default host configured".into())
                })?;
            debug!(%host, "using default host");
            host
        } else {
            arg.to_string()
        };

        let url = self.aliases.expand(&url)?;

        match url_parser::classify(&url) {
            Ok(UrlType::ObjectStorage) => {
                debug!(%url, "resolved object-storage URL");
                Ok(url)
            }
            Ok(UrlType::LocalFile) => {
                let canonical = url_parser::canonicalize_local_file(&url)?;
                debug!(%url, %canonical, "resolved local file");
                Ok(canonical)
            }
            Ok(UrlType::Unknown) | Err(_) => Err(Error::UnsupportedScheme { token: url }),
        }
    }

    /// Resolve every argument in order.
    ///
    /// Stops at the first failure; the error names the failing argument and no
    /// partial results are returned.
    pub fn resolve_all<I, S>(&self, args: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter()
            .enumerate()
            .map(|(index, arg)| {
                let arg = arg.as_ref();
                self.resolve(arg).map_err(|source| Error::Argument {
                    index,
                    token: arg.to_string(),
                    source: Box::new(source),
                })
            })
            .collect()
    }
}
