//! `AppConfig` test helpers to eliminate duplication across tests.

use std::{fs, path::PathBuf};

use jukebox::config::{AppConfig, AppConfigBuilder};
use tempfile::TempDir;

use crate::constants::{ADMIN_CHANNEL, STANDARD_CHANNEL};

/// A complete config file as a user would write it
pub const VALID_CONFIG_YAML: &str = r##"standard_channel: "#music"
admin_channel: "music-admin"
gong_limit: 3
spotify:
  client_id: "test-client"
  client_secret: "test-secret"
  region: "GB"
sonos:
  address: "127.0.0.1:1400"
"##;

/// Standard test configuration with the default limits
#[must_use]
pub fn test_config() -> AppConfig {
    test_builder().build()
}

/// Test configuration with a custom number of gongs per skip
#[must_use]
pub fn test_config_with_gong_limit(limit: usize) -> AppConfig {
    test_builder().gong_limit_unchecked(limit).build()
}

fn test_builder() -> AppConfigBuilder {
    AppConfigBuilder::default()
        .standard_channel(STANDARD_CHANNEL)
        .admin_channel(ADMIN_CHANNEL)
        .spotify_credentials("test-client", "test-secret")
        .sonos_address("127.0.0.1:1400")
}

/// Writes `content` as `config.yaml` in `dir` and returns its path
///
/// # Panics
///
/// Panics if the file cannot be written.
#[must_use]
pub fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.yaml");
    fs::write(&path, content).expect("Failed to write config file");
    path
}
