//! mcx-core: Core library for the mcx object-storage client
//!
//! This crate provides the URL handling behind every mcx command:
//! - Classification of tokens as object-storage or local-file URLs
//! - Canonicalization of local paths to `file:///` URLs
//! - Bucket/object decomposition
//! - Argument resolution with default host and alias expansion
//! - Configuration and alias loading
//!
//! All resolver functions are pure; the only I/O is reading the config file.

pub mod alias;
pub mod config;
pub mod error;
pub mod resolve;
pub mod url_parser;

pub use alias::{Alias, AliasManager};
pub use config::{Config, ConfigManager};
pub use error::{Error, Operation, Result};
pub use resolve::{AliasExpander, DefaultHostSource, Resolver};
pub use url_parser::{
    bucket_only, canonicalize_local_file, classify, extract_host, is_local_file, is_supported,
    split_bucket_object, UrlType,
};
