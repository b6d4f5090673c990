use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::LaunchDashError;

const CONFIG_DIR_NAME: &str = "launchdash";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_WINDOW_WIDTH: f32 = 1100.;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.;
pub const SLIDER_MIN_KG: f64 = 0.;
pub const SLIDER_MAX_KG: f64 = 10000.;
pub const SLIDER_STEP_KG: f64 = 1000.;

/// Settings that survive restarts. The site/payload selection is never stored:
/// every session starts from "ALL" and the table's payload bounds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: f32,
    pub window_height: f32,
    pub slider_min: f64,
    pub slider_max: f64,
    pub slider_step: f64,
    pub dark_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            slider_min: SLIDER_MIN_KG,
            slider_max: SLIDER_MAX_KG,
            slider_step: SLIDER_STEP_KG,
            dark_mode: true,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Result<PathBuf, LaunchDashError> {
        Ok(dirs::config_dir()
            .ok_or(LaunchDashError::NoConfigDir)?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    /// Loads the config from the user config directory, falling back to defaults when the
    /// file is missing or cannot be used.
    pub fn from_local_file() -> Self {
        let loaded = Self::config_path().and_then(|path| Self::from_file(&path));
        match loaded {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_file(config_path: &Path) -> Result<Option<Self>, LaunchDashError> {
        if !config_path.exists() {
            return Ok(None);
        }
        let file = std::fs::File::open(config_path)
            .map_err(|e| LaunchDashError::ConfigIOError { source: e })?;
        let config: Self = serde_json::from_reader(file)
            .map_err(|e| LaunchDashError::ConfigSerializeError { source: e })?;
        Ok(Some(config.sanitized()))
    }

    pub fn save(&self) -> Result<(), LaunchDashError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), LaunchDashError> {
        if let Some(parent) = config_path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| LaunchDashError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| LaunchDashError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| LaunchDashError::ConfigSerializeError { source: e })
    }

    /// Replaces slider settings that would make the slider unusable with the defaults.
    fn sanitized(mut self) -> Self {
        let usable = self.slider_step > 0. && self.slider_min < self.slider_max;
        if !usable {
            warn!(
                "Invalid payload slider settings [{}, {}] step {}, using defaults",
                self.slider_min, self.slider_max, self.slider_step
            );
            self.slider_min = SLIDER_MIN_KG;
            self.slider_max = SLIDER_MAX_KG;
            self.slider_step = SLIDER_STEP_KG;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_partial_config_fills_defaults() {
        let mut config_file = NamedTempFile::new().unwrap();
        writeln!(config_file, r#"{{"window_width": 640.0, "dark_mode": false}}"#).unwrap();
        config_file.flush().unwrap();

        let config = AppConfig::from_file(config_file.path()).unwrap().unwrap();
        assert_eq!(config.window_width, 640.);
        assert!(!config.dark_mode);
        assert_eq!(config.window_height, DEFAULT_WINDOW_HEIGHT);
        assert_eq!(config.slider_step, SLIDER_STEP_KG);
    }

    #[test]
    fn test_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::from_file(&temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_malformed_config_file() {
        let mut config_file = NamedTempFile::new().unwrap();
        writeln!(config_file, "not json").unwrap();
        config_file.flush().unwrap();

        assert!(matches!(
            AppConfig::from_file(config_file.path()),
            Err(LaunchDashError::ConfigSerializeError { .. })
        ));
    }

    #[test]
    fn test_save_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);
        let config = AppConfig {
            window_width: 800.,
            ..Default::default()
        };
        config.save_to(&config_path).unwrap();

        let loaded = AppConfig::from_file(&config_path).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unusable_slider_settings_reset() {
        let mut config_file = NamedTempFile::new().unwrap();
        writeln!(
            config_file,
            r#"{{"slider_min": 5000.0, "slider_max": 1000.0, "slider_step": 0.0}}"#
        )
        .unwrap();
        config_file.flush().unwrap();

        let config = AppConfig::from_file(config_file.path()).unwrap().unwrap();
        assert_eq!(config.slider_min, SLIDER_MIN_KG);
        assert_eq!(config.slider_max, SLIDER_MAX_KG);
        assert_eq!(config.slider_step, SLIDER_STEP_KG);
    }
}
