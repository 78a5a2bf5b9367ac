//! Startup configuration: where the prediction backend lives.
//!
//! The backend base URL comes from the `CKD_BACKEND_URL` environment variable
//! or, failing that, from `backend_url` in `config.toml` under the app root.
//! It is resolved once at startup and handed to the backend as a value.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::{AppDirError, AppDirs};

/// File name of the TOML settings file inside the app root.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that takes precedence over the settings file.
pub const BACKEND_URL_ENV: &str = "CKD_BACKEND_URL";

/// Settings persisted in `config.toml`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Base URL of the prediction service, e.g. `http://localhost:5000`.
    pub backend_url: Option<String>,
}

/// Resolved configuration used by the running application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub backend_url: BackendUrl,
}

/// Validated `http`/`https` base URL without a trailing slash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendUrl(String);

impl BackendUrl {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim().trim_end_matches('/');
        let invalid = |reason: String| ConfigError::InvalidBackendUrl {
            value: raw.to_string(),
            reason,
        };
        let parsed = url::Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme `{}`", parsed.scheme())));
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid("query and fragment are not allowed".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join an absolute endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl fmt::Display for BackendUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that may occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("No backend URL configured; set CKD_BACKEND_URL or `backend_url` in {path}")]
    MissingBackendUrl { path: PathBuf },
    #[error("Invalid backend URL `{value}`: {reason}")]
    InvalidBackendUrl { value: String, reason: String },
    #[error(transparent)]
    AppDir(#[from] AppDirError),
}

/// Resolve the settings file path inside the app root.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(AppDirs::locate()?.root().join(CONFIG_FILE_NAME))
}

/// Load the configuration from the environment and the settings file.
pub fn load() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    resolve(std::env::var(BACKEND_URL_ENV).ok(), &path)
}

/// Resolve configuration from an optional environment value and a settings path.
///
/// A blank environment value counts as unset.
pub fn resolve(env_value: Option<String>, settings_path: &Path) -> Result<AppConfig, ConfigError> {
    if let Some(value) = env_value.filter(|value| !value.trim().is_empty()) {
        tracing::debug!("Using backend URL from {BACKEND_URL_ENV}");
        return Ok(AppConfig {
            backend_url: BackendUrl::parse(&value)?,
        });
    }
    let settings = load_settings_from(settings_path)?;
    let raw = settings
        .backend_url
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingBackendUrl {
            path: settings_path.to_path_buf(),
        })?;
    Ok(AppConfig {
        backend_url: BackendUrl::parse(&raw)?,
    })
}

/// Read settings from `path`, returning defaults when the file is missing.
pub fn load_settings_from(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Save settings to a specific path, creating parent directories as needed.
pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist `url` as the backend in the settings file and return its path.
///
/// Other settings already in the file are preserved.
pub fn save_backend_url(url: &BackendUrl) -> Result<PathBuf, ConfigError> {
    let path = config_path()?;
    store_backend_url(url, &path)?;
    Ok(path)
}

fn store_backend_url(url: &BackendUrl, path: &Path) -> Result<(), ConfigError> {
    let mut settings = load_settings_from(path)?;
    settings.backend_url = Some(url.as_str().to_string());
    save_to_path(&settings, path)?;
    tracing::info!("Saved backend URL {url} to {}", path.display());
    Ok(())
}
