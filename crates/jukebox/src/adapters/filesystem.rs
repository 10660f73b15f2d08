use std::{
    fs,
    path::{Path, PathBuf},
};

use etcetera::{AppStrategy, AppStrategyArgs, choose_app_strategy};

use crate::ports::filesystem::{FileSystem, FileSystemError};

/// Overrides the platform config directory when set
pub const CONFIG_DIR_ENV: &str = "JUKEBOX_CONFIG_DIR";

/// Real file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError> {
        Ok(fs::read_to_string(path)?)
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn config_dir(&self) -> Result<PathBuf, FileSystemError> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            let expanded = shellexpand::tilde(&dir);
            return Ok(PathBuf::from(expanded.as_ref()));
        }

        choose_app_strategy(AppStrategyArgs {
            top_level_domain: "org".to_string(),
            author: "jukebox".to_string(),
            app_name: "jukebox".to_string(),
        })
        .map(|xdg| xdg.config_dir())
        .map_err(|_| FileSystemError::HomeDirNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_path_exists() {
        let fs = RealFileSystem;

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");

        assert!(!fs.path_exists(&file_path));
        File::create(&file_path).unwrap();
        assert!(fs.path_exists(&file_path));
    }

    #[test]
    fn test_read_file() {
        let fs = RealFileSystem;

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");
        fs::write(&file_path, "gong_limit: 3").unwrap();

        assert_eq!(fs.read_file(&file_path).unwrap(), "gong_limit: 3");

        let err = fs.read_file(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, FileSystemError::IoError(_)));
    }

    #[test]
    fn test_config_dir_is_absolute() {
        // Either the env override or the platform default, depending on the environment
        let config_dir = RealFileSystem.config_dir().unwrap();
        assert!(config_dir.is_absolute() || std::env::var(CONFIG_DIR_ENV).is_ok());
    }
}
