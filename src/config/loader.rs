use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, LoadedConfig};

/// Config filenames checked in the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["storyreel.toml", "storyreel.json"];

/// Loads a configuration file from the provided path or default locations.
/// The returned path names the file that was read.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<LoadedConfig>> {
    let path = match path {
        Some(path) => PathBuf::from(path),
        None => match DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|candidate| candidate.exists())
        {
            Some(candidate) => candidate.to_path_buf(),
            None => return Ok(None),
        },
    };
    let file = load_config_file(&path)?;
    Ok(Some(LoadedConfig { path, file }))
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}
