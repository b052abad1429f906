//! Alias management
//!
//! Aliases are named references to S3-compatible storage endpoints. A token
//! of the form `name:bucket/key` expands to `<endpoint>/bucket/key` when
//! `name` is a configured alias.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::ConfigManager;
use crate::error::{Error, Result};
use crate::resolve::AliasExpander;

/// An alias represents a named S3-compatible storage endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// Unique name for this alias
    pub name: String,

    /// S3 endpoint URL
    pub endpoint: String,
}

impl Alias {
    /// Create a new alias
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// Check if a string is a valid alias name
pub fn is_valid_alias_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Expand an aliased token against a list of aliases.
///
/// Tokens that already carry a host, and tokens whose prefix is not a known
/// alias, are returned unchanged.
pub fn expand(token: &str, aliases: &[Alias]) -> Result<String> {
    // A proper URL is never an alias
    if Url::parse(token).is_ok_and(|u| u.host_str().is_some_and(|h| !h.is_empty())) {
        return Ok(token.to_string());
    }

    let Some((name, rest)) = token.split_once(':') else {
        return Ok(token.to_string());
    };
    let Some(alias) = aliases.iter().find(|a| a.name == name) else {
        return Ok(token.to_string());
    };

    let rest = rest.trim_start_matches(['/', '\\']);
    let joined = format!("{}/{}", alias.endpoint.trim_end_matches('/'), rest);
    let expanded = Url::parse(&joined).map_err(|e| Error::Alias {
        token: token.to_string(),
        reason: format!("'{joined}' is not a valid URL: {e}"),
    })?;

    debug!(alias = %alias.name, %token, expanded = %expanded, "expanded alias");
    Ok(expanded.into())
}

/// Manager for alias lookups backed by the config file
#[derive(Debug, Clone)]
pub struct AliasManager {
    config_manager: ConfigManager,
}

impl AliasManager {
    /// Create a new AliasManager with a specific ConfigManager
    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// List all configured aliases
    pub fn list(&self) -> Result<Vec<Alias>> {
        let config = self.config_manager.load()?;
        Ok(config.aliases)
    }
}

impl AliasExpander for AliasManager {
    fn expand(&self, token: &str) -> Result<String> {
        expand(token, &self.list()?)
    }
}
