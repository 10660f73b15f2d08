pub(crate) mod chat;
pub(crate) mod config;

use std::path::PathBuf;

use jukebox::config::AppConfig;
use tracing::debug;

use crate::{
    cli::{ClapCommands, ConfigSubcommands},
    reporter::TerminalReporter,
};

/// Primary command dispatcher that routes to the appropriate command handler
pub(crate) async fn dispatch_command(
    command: &ClapCommands,
    config: AppConfig,
    original_config: AppConfig,
    config_path: Option<PathBuf>,
    reporter: TerminalReporter,
) -> i32 {
    debug!("Dispatching command: {:?}", command);

    match command {
        ClapCommands::Run(args) => chat::handle_run(args, config, reporter).await,
        ClapCommands::Send { chat: args, text } => {
            chat::handle_send(args, &text.join(" "), config, reporter).await
        }
        ClapCommands::Config(config_cmd) => match config_cmd.command {
            ConfigSubcommands::Validate => {
                config::handle_validate(&original_config, config_path, reporter)
            }
        },
    }
}
