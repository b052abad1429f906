//! host command - Show the host of a local-file URL
//!
//! A local file should never carry a host; one that does (`file://server/x`)
//! is reported with a warning.

use clap::Args;
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Show the host component of a local-file URL
#[derive(Args, Debug)]
pub struct HostArgs {
    /// Local path or file URL
    pub url: String,
}

#[derive(Debug, Serialize)]
struct HostOutput {
    url: String,
    host: String,
}

/// Execute the host command
pub fn execute(args: HostArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let host = match mcx_core::extract_host(&args.url) {
        Ok(host) => host,
        Err(e) => {
            formatter.failure(&e);
            return ExitCode::from(&e);
        }
    };

    if !host.is_empty() {
        formatter.warning(&format!(
            "'{}' names host '{host}'; it is not a genuine local path",
            args.url
        ));
    }

    if formatter.is_json() {
        formatter.json(&HostOutput {
            url: args.url,
            host,
        });
    } else {
        formatter.println(&host);
    }

    ExitCode::Success
}
