//! File system port
//!
//! Only what configuration loading needs: locating the config directory and reading files in it.

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Port for file system operations
#[cfg_attr(any(test, feature = "with_mocks"), mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// Read a file and return its contents as a string
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the file is missing, unreadable or not UTF-8.
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError>;

    /// Check if a path exists
    fn path_exists(&self, path: &Path) -> bool;

    /// Directory the application's `config.yaml` lives in
    ///
    /// `$JUKEBOX_CONFIG_DIR` (with `~` expanded) wins over the platform default.
    fn config_dir(&self) -> Result<PathBuf, FileSystemError>;
}

/// Errors that can occur during file system operations
#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,
}

#[cfg(any(test, feature = "with_mocks"))]
impl MockFileSystem {
    pub fn mock_read_file<P, S>(&mut self, path: P, content: S)
    where
        PathBuf: From<P>,
        S: ToString,
    {
        let path_buf = PathBuf::from(path);
        let content_string = content.to_string();
        self.expect_read_file()
            .with(mockall::predicate::eq(path_buf))
            .returning(move |_| Ok(content_string.clone()));
    }

    pub fn mock_path_exists<P>(&mut self, path: P, exists: bool)
    where
        PathBuf: From<P>,
    {
        self.expect_path_exists()
            .with(mockall::predicate::eq(PathBuf::from(path)))
            .returning(move |_| exists);
    }

    pub fn mock_config_dir_ok<P>(&mut self, path: P)
    where
        PathBuf: From<P>,
    {
        let p = PathBuf::from(path);
        self.expect_config_dir().return_once(|| Ok(p));
    }

    /// Config dir containing exactly one `config.yaml` with `config_yaml` in it
    pub fn mock_config_file(&mut self, config_dir: &Path, config_yaml: &str) {
        let config_path = config_dir.join("config.yaml");

        self.mock_config_dir_ok(config_dir);
        self.mock_path_exists(&config_path, true);
        self.mock_read_file(&config_path, config_yaml);
        self.mock_path_exists(config_dir.join("config.yml"), false);
    }
}
