use std::path::PathBuf;

use config::FileFormat;

use crate::{config::AppConfig, ports::filesystem::FileSystem};

use super::{ConfigLoadError, ConfigLoader};

pub struct Yaml<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> Yaml<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> ConfigLoader for Yaml<'_, F> {
    fn load_config(&self) -> Result<AppConfig, ConfigLoadError> {
        let config_paths = self
            .find_config_file_paths()
            .map_err(|searched| ConfigLoadError::NotFound { searched })?;

        let config_path = match config_paths.as_slice() {
            [] => {
                return Err(ConfigLoadError::NotFound {
                    searched: PathBuf::from("~/.config/jukebox"),
                });
            }
            [path] => path,
            _ => {
                return Err(ConfigLoadError::MultipleFound(
                    config_paths
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>(),
                ));
            }
        };

        let file_contents = self.fs.read_file(config_path)?;
        tracing::debug!(path = %config_path.display(), "loading configuration");

        let config = config::Config::builder()
            .add_source(config::File::from_str(&file_contents, FileFormat::Yaml))
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.sanitize_channels();

        Ok(app_config)
    }

    fn find_config_file_paths(&self) -> Result<Vec<PathBuf>, PathBuf> {
        let mut paths = Vec::new();

        if let Ok(config_dir) = self.fs.config_dir() {
            let config_yaml = config_dir.join("config.yaml");
            let config_yml = config_dir.join("config.yml");

            if self.fs.path_exists(&config_yaml) {
                paths.push(config_yaml);
            }
            if self.fs.path_exists(&config_yml) {
                paths.push(config_yml);
            }

            if paths.is_empty() {
                return Err(config_dir);
            }
        }

        Ok(paths)
    }
}
