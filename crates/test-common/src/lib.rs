//! Common test utilities shared across all jukebox crates.
//!
//! In-memory fakes of the ports plus catalog fixtures, so integration tests can drive the
//! dispatcher end to end and inspect what reached the speaker and the chat channel.

pub mod config;
pub mod constants;
pub mod fakes;
pub mod fixtures;

// Re-export the most commonly used items for convenience
pub use config::{VALID_CONFIG_YAML, test_config, test_config_with_gong_limit, write_config_file};
pub use constants::*;
pub use fakes::{FakeCatalog, FakeDevice, RecordingTransport, Sent};
pub use fixtures::{
    closer_tracks, dinner_playlists, james_artists, james_top_tracks, ok_computer_albums,
    ok_computer_tracks,
};

pub use jukebox::config::AppConfigBuilder;
pub use tempfile::TempDir;
