//! Configuration Module
//! Dashboard settings from defaults, an optional JSON file and the environment.

use crate::data::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "crime_dashboard.json";
/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "CRIME_DASHBOARD_CONFIG";
/// Overrides `data_dir`.
pub const DATA_DIR_ENV: &str = "CRIME_DASHBOARD_DATA_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// User settings for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the CSV tables.
    pub data_dir: PathBuf,
    /// Rows kept in ranked bar charts.
    pub top_n: usize,
    pub window_width: f32,
    pub window_height: f32,
    pub export_width: u32,
    pub export_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            top_n: DEFAULT_TOP_N,
            window_width: 1400.0,
            window_height: 800.0,
            export_width: 1200,
            export_height: 800,
        }
    }
}

impl DashboardConfig {
    /// Defaults, then the config file if present, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        let mut config = if path.is_file() {
            info!(path = %path.display(), "reading config");
            Self::from_file(&path)?
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = DashboardConfig::from_json(r#"{ "data_dir": "/srv/crime", "top_n": 5 }"#)
            .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/crime"));
        assert_eq!(config.top_n, 5);
        assert_eq!(config.export_width, DashboardConfig::default().export_width);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(
            DashboardConfig::from_json("{}").unwrap(),
            DashboardConfig::default()
        );
    }

    #[test]
    fn bad_file_reports_path() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ top_n: ").unwrap();

        let err = DashboardConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }
}
