//! mcx - file and object-storage client
//!
//! Command-line front-end over mcx-core's URL resolution.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mcx_cli::commands::{self, Cli};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli);

    std::process::exit(exit_code.as_i32());
}
