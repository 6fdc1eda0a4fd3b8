//! Persisted client settings stored as TOML in the app directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::app_dirs;

/// File name of the settings file inside the app root.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that overrides the configured backend URL.
pub const API_BASE_URL_ENV: &str = "CALLGRADE_API_BASE_URL";

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 5;

/// Errors that may occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The app directory could not be prepared.
    #[error("Config directory unavailable: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
    /// Failed to read the settings file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write the settings file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The settings file is not valid TOML for [`AppSettings`].
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Settings could not be serialized.
    #[error("Failed to serialize config for {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    /// The backend URL cannot be parsed or is not http(s).
    #[error("Invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}

/// User-editable settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Root URL of the analysis backend.
    pub api_base_url: String,
    /// Seconds before a notification dismisses itself.
    pub notification_ttl_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            notification_ttl_secs: DEFAULT_NOTIFICATION_TTL_SECS,
        }
    }
}

impl AppSettings {
    /// Parse and validate the backend URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        parse_base_url(&self.api_base_url)
    }

    fn normalized(mut self) -> Self {
        self.api_base_url = self.api_base_url.trim().to_string();
        if self.api_base_url.is_empty() {
            self.api_base_url = DEFAULT_API_BASE_URL.to_string();
        }
        if self.notification_ttl_secs == 0 {
            self.notification_ttl_secs = DEFAULT_NOTIFICATION_TTL_SECS;
        }
        self
    }
}

/// Resolve the settings file path, creating the app root if needed.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings, falling back to defaults when the file is missing.
///
/// `CALLGRADE_API_BASE_URL` wins over the file so deployments can point the
/// client at another backend without editing config.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let mut settings = load_from_path(&config_path()?)?;
    if let Ok(value) = std::env::var(API_BASE_URL_ENV) {
        if !value.trim().is_empty() {
            settings.api_base_url = value.trim().to_string();
        }
    }
    settings.base_url()?;
    Ok(settings)
}

/// Persist settings to the default location.
pub fn save(settings: &AppSettings) -> Result<(), ConfigError> {
    save_to_path(settings, &config_path()?)
}

pub(crate) fn load_from_path(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppSettings>(&text)
        .map(AppSettings::normalized)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
}

/// Write the settings file atomically so a crash never leaves half a file.
pub(crate) fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, data.as_bytes())
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .ok_or_else(|| write_err(std::io::Error::other("config path has no parent directory")))?;
    std::fs::create_dir_all(dir).map_err(write_err)?;
    let suffix: u32 = rand::random();
    let tmp_path = dir.join(format!(".{CONFIG_FILE_NAME}.{suffix:08x}.tmp"));
    let result = std::fs::File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        })
        .and_then(|()| std::fs::rename(&tmp_path, path));
    if let Err(source) = result {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(write_err(source));
    }
    Ok(())
}

pub(crate) fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason,
    };
    let url = Url::parse(value.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_from_path(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let settings = AppSettings {
            api_base_url: "https://calls.example.com/api".to_string(),
            notification_ttl_secs: 9,
        };
        save_to_path(&settings, &path).unwrap();
        assert_eq!(load_from_path(&path).unwrap(), settings);
        let leftovers = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn partial_file_fills_defaults_and_normalizes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "notification_ttl_secs = 0\napi_base_url = \"  \"\n").unwrap();
        let settings = load_from_path(&path).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "api_base_url = [").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn base_url_requires_http_scheme() {
        assert!(parse_base_url("https://api.example.com").is_ok());
        assert!(parse_base_url("ftp://api.example.com").is_err());
        assert!(parse_base_url("not a url").is_err());
    }
}
