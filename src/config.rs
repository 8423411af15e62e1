use crate::error::{BikeshareError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the directory holding the trip tables.
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

/// Default settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = "bikeshare.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory containing `chicago.csv`, `new_york_city.csv` and
    /// `washington.csv`.
    pub data_dir: PathBuf,
    /// Print "This took N seconds." after each statistic group.
    pub show_timings: bool,
    /// Offer raw data pages after the statistics in interactive mode.
    pub offer_raw_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            show_timings: true,
            offer_raw_data: true,
        }
    }
}

impl Settings {
    /// Replaces the data directory when `data_dir` is given.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }
}

/// Reads settings from `path`, falling back to defaults if it doesn't exist.
///
/// # Errors
///
/// Returns [`BikeshareError::Config`] if the file exists but is not valid
/// settings JSON.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        log::debug!("No settings at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        BikeshareError::Config(format!("invalid settings in {}: {e}", path.display()))
    })
}

/// Writes settings to `path` as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bikeshare_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_missing_file_gives_defaults() -> anyhow::Result<()> {
        let settings = load_settings(&temp_path("does_not_exist.json"))?;
        assert_eq!(settings, Settings::default());
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> anyhow::Result<()> {
        let path = temp_path("partial.json");
        std::fs::write(&path, r#"{ "data_dir": "/srv/bikeshare" }"#)?;

        let settings = load_settings(&path)?;
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings.data_dir, PathBuf::from("/srv/bikeshare"));
        assert!(settings.show_timings);
        assert!(settings.offer_raw_data);
        Ok(())
    }

    #[test]
    fn test_invalid_file_is_config_error() -> anyhow::Result<()> {
        let path = temp_path("invalid.json");
        std::fs::write(&path, "not json")?;

        let result = load_settings(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(BikeshareError::Config(_))));
        Ok(())
    }

    #[test]
    fn test_saved_settings_load_back() -> anyhow::Result<()> {
        let path = temp_path("saved.json");
        let settings = Settings {
            show_timings: false,
            ..Settings::default()
        }
        .with_data_dir(Some(PathBuf::from("data")));

        save_settings(&settings, &path)?;
        let loaded = load_settings(&path)?;
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, settings);
        Ok(())
    }
}
