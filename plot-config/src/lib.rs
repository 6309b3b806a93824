use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub mod inventory;
pub mod logging;
pub mod text;

pub use inventory::InventoryConfig;
pub use logging::LoggingConfig;
pub use text::TextConfig;

const CONFIG_ROOT_FOLDER: &str = "config/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("couldn't access configuration at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("couldn't parse configuration at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Everything the inventory adapter can be tuned with.
/// The defaults match what the game server does out of the box.
#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlotConfiguration {
    pub text: TextConfig,
    pub inventory: InventoryConfig,
    pub logging: LoggingConfig,
}

pub trait LoadConfiguration {
    /// Reads `config/<path>` below `exec_dir`, writing the defaults first if the
    /// file does not exist yet.
    fn load(exec_dir: &Path) -> Result<Self, ConfigError>
    where
        Self: Sized + Default + Serialize + DeserializeOwned,
    {
        let config_dir = exec_dir.join(CONFIG_ROOT_FOLDER);
        if !config_dir.exists() {
            log::debug!("creating new config root folder");
            fs::create_dir(&config_dir).map_err(|source| ConfigError::Io {
                path: config_dir.clone(),
                source,
            })?;
        }
        let path = config_dir.join(Self::get_path());

        let config = if path.exists() {
            let file_content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            toml::from_str(&file_content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            let content = Self::default();

            match toml::to_string(&content) {
                Ok(serialized) => {
                    if let Err(err) = fs::write(&path, serialized) {
                        warn!("Couldn't write default config to {:?}. Reason: {}", &path, err);
                    }
                }
                Err(err) => warn!("Couldn't serialize default config. Reason: {err}"),
            }

            content
        };

        config.validate()?;
        Ok(config)
    }

    fn get_path() -> &'static Path;

    fn validate(&self) -> Result<(), ConfigError>;
}

impl LoadConfiguration for PlotConfiguration {
    fn get_path() -> &'static Path {
        Path::new("inventory.toml")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.text.validate()
    }
}

#[cfg(test)]
mod test {
    use super::{ConfigError, LoadConfiguration, PlotConfiguration};
    use std::fs;

    #[test]
    fn writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlotConfiguration::load(dir.path()).unwrap();

        assert_eq!(config, PlotConfiguration::default());
        assert!(dir.path().join("config/inventory.toml").exists());
    }

    #[test]
    fn reads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/inventory.toml"),
            "[text]\nhex_colors = true\n\n[inventory]\nrefresh_on_set = false\n",
        )
        .unwrap();

        let config = PlotConfiguration::load(dir.path()).unwrap();
        assert!(config.text.hex_colors);
        assert_eq!(config.text.alternate_color_char, '&');
        assert!(!config.inventory.refresh_on_set);
    }

    #[test]
    fn rejects_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(dir.path().join("config/inventory.toml"), "[text\n").unwrap();

        let err = PlotConfiguration::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn rejects_whitespace_marker() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/inventory.toml"),
            "[text]\nalternate_color_char = \" \"\n",
        )
        .unwrap();

        let err = PlotConfiguration::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
