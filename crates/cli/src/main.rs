mod cli;
mod commands;
mod config;
mod reporter;
mod tables;
mod transport;

use std::{io, process};

use clap::Parser;
use jukebox::{
    adapters::filesystem::RealFileSystem,
    config::loader::{ApplyToConfig, ConfigLoader, Yaml},
};
use reporter::TerminalReporter;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{cli::ClapCli, commands::dispatch_command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ClapCli::parse();
    init_tracing(args.verbose, !args.no_color);
    debug!("CLI arguments: {:#?}", &args);

    let fs = RealFileSystem;

    // `config` carries the CLI overrides; `config` subcommands only look at `original_config`,
    // which is exactly what the file says.
    let (config, original_config) = {
        let config = Yaml::new(&fs).load_config()?;

        (args.apply_to_config(config.clone()), config)
    };

    debug!("Final config: {:#?}", &config);

    let reporter = TerminalReporter::new(!args.no_color);
    let config_path = Yaml::new(&fs)
        .find_config_file_paths()
        .ok()
        .and_then(|paths| paths.into_iter().next());

    let exit_code = dispatch_command(
        &args.command,
        config,
        original_config,
        config_path,
        reporter,
    )
    .await;

    process::exit(exit_code)
}

/// Logs go to stderr; stdout belongs to the chat transport.
fn init_tracing(verbose: bool, use_colors: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(use_colors)
        .with_target(false)
        .init();
}
