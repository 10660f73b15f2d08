use std::fs;

use assert_cmd::Command;
use tempfile::TempDir;

pub use test_common::VALID_CONFIG_YAML;

/// A temporary config directory holding `config.yaml` with `config_yaml` as its contents
#[must_use]
pub fn setup_test_config(config_yaml: &str) -> TempDir {
    let temp_dir = tempfile::tempdir().unwrap();

    let config_dir = temp_dir.path().join(".config").join("jukebox");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.yaml"), config_yaml).unwrap();

    temp_dir
}

/// The CLI binary, pointed at the config directory made by [`setup_test_config`]
#[must_use]
pub fn get_command_with_test_config(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jukebox-cli").unwrap();

    cmd.env(
        "JUKEBOX_CONFIG_DIR",
        temp_dir.path().join(".config").join("jukebox"),
    )
    .env_remove("RUST_LOG")
    .arg("--no-color");

    cmd
}
