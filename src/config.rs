//! Dashboard configuration (JSON)
//!
//! Chart sizes, gender colors and the dataset location. A missing file means
//! defaults; a malformed one is reported and defaults are used.

use crate::constants::{chart, config, layout, palette};
use crate::data::Gender;
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Per-gender RGB colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderColors {
    pub male: [u8; 3],
    pub female: [u8; 3],
    pub other: [u8; 3],
}

impl Default for GenderColors {
    fn default() -> Self {
        Self {
            male: palette::MALE,
            female: palette::FEMALE,
            other: palette::OTHER,
        }
    }
}

impl GenderColors {
    pub fn get(&self, gender: Gender) -> [u8; 3] {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
            Gender::Other => self.other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    pub csv_separator: char,
    pub main_width: f32,
    pub main_height: f32,
    pub side_width: f32,
    pub side_height: f32,
    pub colors: GenderColors,
    pub dimmed_opacity: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(config::DEFAULT_DATASET),
            csv_separator: ',',
            main_width: layout::MAIN_WIDTH,
            main_height: layout::MAIN_HEIGHT,
            side_width: layout::SIDE_WIDTH,
            side_height: layout::SIDE_HEIGHT,
            colors: GenderColors::default(),
            dimmed_opacity: chart::DIMMED_LEGEND_OPACITY,
        }
    }
}

impl DashboardConfig {
    /// Read a config file; `Ok(None)` when it does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let config: DashboardConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(Some(config))
    }

    /// Load the config, logging problems and falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(Some(config)) => {
                tracing::info!(path = %path.display(), "configuration loaded");
                config
            }
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "invalid configuration, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// The CSV separator as a single byte
    pub fn separator_byte(&self) -> Result<u8> {
        u8::try_from(self.csv_separator)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                DashboardError::Config(format!(
                    "csv_separator must be a single ASCII character, got '{}'",
                    self.csv_separator
                ))
            })
    }

    pub fn validate(&self) -> Result<()> {
        self.separator_byte()?;
        if !(0.0..=1.0).contains(&self.dimmed_opacity) {
            return Err(DashboardError::Config(format!(
                "dimmed_opacity must be between 0 and 1, got {}",
                self.dimmed_opacity
            )));
        }
        let sizes = [self.main_width, self.main_height, self.side_width, self.side_height];
        if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(DashboardError::Config("chart sizes must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::Builder;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(DashboardConfig::load(&path).unwrap().is_none());
        assert_eq!(DashboardConfig::load_or_default(&path), DashboardConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let file = Builder::new().suffix(".json").tempfile().unwrap();
        let config = DashboardConfig {
            csv_separator: ';',
            dimmed_opacity: 0.5,
            ..Default::default()
        };
        config.save(file.path()).unwrap();

        let loaded = DashboardConfig::load(file.path()).unwrap().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.separator_byte().unwrap(), b';');
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = Builder::new().suffix(".json").tempfile().unwrap();
        std::fs::write(file.path(), r#"{ "dataset_path": "survey.csv" }"#).unwrap();
        let loaded = DashboardConfig::load(file.path()).unwrap().unwrap();
        assert_eq!(loaded.dataset_path, PathBuf::from("survey.csv"));
        assert_eq!(loaded.colors, GenderColors::default());
        assert_eq!(loaded.csv_separator, ',');
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = Builder::new().suffix(".json").tempfile().unwrap();
        std::fs::write(file.path(), r#"{ "dimmed_opacity": 3.0 }"#).unwrap();
        assert!(matches!(
            DashboardConfig::load(file.path()),
            Err(DashboardError::Config(_))
        ));

        std::fs::write(file.path(), r#"{ "csv_separator": "é" }"#).unwrap();
        assert!(DashboardConfig::load(file.path()).is_err());

        std::fs::write(file.path(), "not json").unwrap();
        assert!(matches!(
            DashboardConfig::load(file.path()),
            Err(DashboardError::Json(_))
        ));
        assert_eq!(
            DashboardConfig::load_or_default(file.path()),
            DashboardConfig::default()
        );
    }

    #[test]
    fn test_gender_colors() {
        let colors = GenderColors::default();
        assert_eq!(colors.get(Gender::Female), palette::FEMALE);
    }
}
