//! Where the CKD predictor keeps its files.
//!
//! Everything lives in one `.ckd_predictor` folder: `config.toml` at the top
//! and one log file per GUI launch in `logs/`. The folder sits in the OS config
//! directory unless `CKD_PREDICTOR_CONFIG_HOME` names a different base.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

/// Folder created under the config base.
pub const APP_DIR_NAME: &str = ".ckd_predictor";

/// Environment variable naming an alternative config base (portable installs, tests).
pub const CONFIG_HOME_ENV: &str = "CKD_PREDICTOR_CONFIG_HOME";

const LOGS_DIR_NAME: &str = "logs";

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("No config directory found for this user; set CKD_PREDICTOR_CONFIG_HOME")]
    NoBaseDir,
    #[error("Could not create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The `.ckd_predictor` folder below one config base.
///
/// Locating the folder never touches the disk; only [`AppDirs::create_logs_dir`]
/// creates directories, since reading config works without them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppDirs {
    root: PathBuf,
}

impl AppDirs {
    /// Resolve the folder from `CKD_PREDICTOR_CONFIG_HOME`, else the OS config dir.
    pub fn locate() -> Result<Self, AppDirError> {
        std::env::var_os(CONFIG_HOME_ENV)
            .filter(|base| !base.is_empty())
            .map(PathBuf::from)
            .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
            .map(Self::under)
            .ok_or(AppDirError::NoBaseDir)
    }

    /// The folder below an explicit base directory.
    pub fn under(base: impl Into<PathBuf>) -> Self {
        Self {
            root: base.into().join(APP_DIR_NAME),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create `logs/` (and the root above it) and return its path.
    pub fn create_logs_dir(&self) -> Result<PathBuf, AppDirError> {
        let logs = self.root.join(LOGS_DIR_NAME);
        std::fs::create_dir_all(&logs).map_err(|source| AppDirError::CreateDir {
            path: logs.clone(),
            source,
        })?;
        Ok(logs)
    }
}
