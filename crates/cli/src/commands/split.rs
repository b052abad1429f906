//! split command - Split a URL into bucket and object key

use clap::Args;
use mcx_core::Resolver;
use serde::Serialize;

use super::Sources;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Split a URL into bucket and object key
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// URL or alias reference; resolved first, so `alias:bucket/key` works
    #[arg(default_value = "")]
    pub url: String,
}

#[derive(Debug, Serialize)]
struct SplitOutput {
    url: String,
    bucket: String,
    object: String,
}

/// Execute the split command
pub fn execute(args: SplitArgs, output_config: OutputConfig, sources: &Sources) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let resolver = Resolver::new(&sources.config, &sources.aliases);

    let url = match resolver.resolve(&args.url) {
        Ok(url) => url,
        Err(e) => {
            formatter.failure(&e);
            return ExitCode::from(&e);
        }
    };
    let (bucket, object) = mcx_core::split_bucket_object(&url);

    if formatter.is_json() {
        formatter.json(&SplitOutput {
            url,
            bucket,
            object,
        });
    } else {
        formatter.field("URL", &url);
        formatter.field("Bucket", &bucket);
        formatter.field("Object", &object);
    }

    ExitCode::Success
}
