use jukebox::config::{AppConfig, loader::ApplyToConfig, sanitize_channel};

use crate::cli::ClapCli;

impl ApplyToConfig for ClapCli {
    fn apply_to_config(&self, mut config: AppConfig) -> AppConfig {
        if let Some(channel) = self.standard_channel.as_deref() {
            *config.standard_channel_mut() = sanitize_channel(channel);
        }

        if let Some(channel) = self.admin_channel.as_deref() {
            *config.admin_channel_mut() = sanitize_channel(channel);
        }

        if let Some(limit) = self.gong_limit {
            *config.gong_limit_mut() = limit;
        }

        config
    }
}
