//! resolve command - Resolve arguments to URLs
//!
//! Prints the URL each argument resolves to: object-storage URLs unchanged,
//! local paths as `file:///` URLs. Fails on the first bad argument.

use clap::Args;
use mcx_core::{Resolver, UrlType};
use serde::Serialize;

use super::Sources;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Resolve arguments to object-storage or canonical file URLs
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Paths, URLs or alias references (alias:bucket/key). With none, or
    /// with an empty argument, the configured default host is used.
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ResolveOutput {
    urls: Vec<ResolvedUrl>,
}

#[derive(Debug, Serialize)]
struct ResolvedUrl {
    input: String,
    url: String,
    #[serde(rename = "type")]
    url_type: &'static str,
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs, output_config: OutputConfig, sources: &Sources) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let resolver = Resolver::new(&sources.config, &sources.aliases);

    let inputs = if args.args.is_empty() {
        vec![String::new()]
    } else {
        args.args
    };

    let urls = match resolver.resolve_all(&inputs) {
        Ok(urls) => urls,
        Err(e) => {
            formatter.failure(&e);
            return ExitCode::from(&e);
        }
    };

    if formatter.is_json() {
        let output = ResolveOutput {
            urls: inputs
                .into_iter()
                .zip(urls)
                .map(|(input, url)| ResolvedUrl {
                    url_type: mcx_core::classify(&url)
                        .unwrap_or(UrlType::Unknown)
                        .as_str(),
                    input,
                    url,
                })
                .collect(),
        };
        formatter.json(&output);
    } else {
        for url in &urls {
            formatter.println(url);
        }
    }

    ExitCode::Success
}
