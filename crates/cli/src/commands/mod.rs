//! CLI command definitions and execution
//!
//! Every command resolves its arguments through mcx-core and reports the
//! result in human or JSON form.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mcx_core::{AliasManager, ConfigManager};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod classify;
pub mod completions;
mod host;
mod resolve;
mod split;

/// mcx - file and object-storage client
///
/// Resolves command-line paths and URLs the way every mcx command sees them.
#[derive(Parser, Debug)]
#[command(name = "mcx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Configuration file (default: ~/.config/mcx/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve arguments to object-storage or canonical file URLs
    Resolve(resolve::ResolveArgs),

    /// Show whether arguments are object-storage, local-file or unsupported
    Classify(classify::ClassifyArgs),

    /// Split a URL into bucket and object key
    Split(split::SplitArgs),

    /// Show the host component of a local-file URL
    Host(host::HostArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Classify(args) => classify::execute(args, output_config),
        Commands::Host(args) => host::execute(args, output_config),
        Commands::Completions(args) => completions::execute(args),
        Commands::Resolve(args) => with_config(cli.config, output_config, |config, output| {
            resolve::execute(args, output, config)
        }),
        Commands::Split(args) => with_config(cli.config, output_config, |config, output| {
            split::execute(args, output, config)
        }),
    }
}

/// Config and alias sources backing the resolver
pub(crate) struct Sources {
    pub config: ConfigManager,
    pub aliases: AliasManager,
}

fn with_config(
    path: Option<PathBuf>,
    output_config: OutputConfig,
    run: impl FnOnce(&Sources, OutputConfig) -> ExitCode,
) -> ExitCode {
    let config = match path {
        Some(path) => ConfigManager::with_path(path),
        None => match ConfigManager::new() {
            Ok(cm) => cm,
            Err(e) => {
                Formatter::new(output_config).failure(&e);
                return ExitCode::from(&e);
            }
        },
    };
    tracing::debug!(path = %config.config_path().display(), "using config file");

    let sources = Sources {
        aliases: AliasManager::with_config_manager(config.clone()),
        config,
    };
    run(&sources, output_config)
}
