// src/cli.rs
use std::num::NonZeroUsize;

use clap::{Args, Parser, Subcommand};

/// Jukebox - control a speaker from a chat channel
///
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct ClapCli {
    /// Override the standard channel from config
    ///
    #[clap(long, global = true)]
    pub(crate) standard_channel: Option<String>,

    /// Override the admin channel from config
    ///
    #[clap(long, global = true)]
    pub(crate) admin_channel: Option<String>,

    /// Override the number of gongs needed to skip a track
    ///
    #[clap(long, global = true)]
    pub(crate) gong_limit: Option<NonZeroUsize>,

    /// Show debug logging
    ///
    #[clap(long, short = 'v', global = true, default_value_t = false)]
    pub(crate) verbose: bool,

    /// Disable colored output
    ///
    #[clap(long, global = true, default_value_t = false)]
    pub(crate) no_color: bool,

    /// Subcommand to execute
    ///
    #[clap(subcommand)]
    pub(crate) command: ClapCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum ClapCommands {
    /// Read chat messages from stdin, one per line, and print the replies
    ///
    /// A line starting with `#name` is posted to that channel instead of the default one.
    Run(ChatArgs),

    /// Post a single chat message and print the reply
    ///
    Send {
        #[clap(flatten)]
        chat: ChatArgs,

        /// The message text
        #[clap(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Jukebox: configuration management commands
    ///
    Config(ConfigCommands),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ChatArgs {
    /// Channel the messages are posted in (defaults to the standard channel)
    #[clap(long, short = 'c')]
    pub(crate) channel: Option<String>,

    /// User id the messages are posted as
    #[clap(long, short = 's', default_value = "console")]
    pub(crate) sender: String,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ConfigCommands {
    #[clap(subcommand)]
    pub(crate) command: ConfigSubcommands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum ConfigSubcommands {
    /// Validate the jukebox configuration
    Validate,
}
