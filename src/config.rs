//! Dashboard configuration, read from an optional JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "wages_dashboard.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Wide wage CSV: a label column followed by one column per year.
    pub data_path: PathBuf,
    /// Banner shown above the dashboard; a text heading replaces it when absent.
    pub header_image: PathBuf,
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("average_daily_wages_of_informal_sector_.csv"),
            header_image: PathBuf::from("header_banner.png"),
            title: "Sri Lanka Wages Dashboard".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read the config at `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// [`DashboardConfig::load`] falling back to defaults on error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn absent_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "data_path": "wages.csv" }"#).unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("wages.csv"));
        assert_eq!(config.title, "Sri Lanka Wages Dashboard");
    }

    #[test]
    fn malformed_file_is_an_error_then_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let err = DashboardConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
        assert_eq!(
            DashboardConfig::load_or_default(&path),
            DashboardConfig::default()
        );
    }
}
