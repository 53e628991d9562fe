//! User profile configuration
//!
//! Weight and height are stored in a small JSON document so a tracker can keep
//! them between runs:
//!
//! ```json
//! { "weight_kg": 75.0, "height": 1.75 }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a profile file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read profile: {0}")]
    Io(#[from] io::Error),

    #[error("invalid profile JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("profile is missing {0}")]
    MissingField(&'static str),
}

/// Stored profile; either field may be left out and supplied elsewhere
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default, alias = "weight")]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl ProfileConfig {
    /// Parse a profile from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a profile from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::debug!("loaded profile from {}", path.display());
        Ok(config)
    }

    /// Read the profile file when one is given, otherwise start empty
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply explicit values over the stored ones
    pub fn with_overrides(mut self, weight_kg: Option<f64>, height: Option<f64>) -> Self {
        if weight_kg.is_some() {
            self.weight_kg = weight_kg;
        }
        if height.is_some() {
            self.height = height;
        }
        self
    }

    /// Weight and height as given.
    ///
    /// Only absence is an error here; range checks belong to the report functions,
    /// which apply their own failure policy.
    pub fn values(&self) -> Result<(f64, f64), ConfigError> {
        let weight = self.weight_kg.ok_or(ConfigError::MissingField("weight_kg"))?;
        let height = self.height.ok_or(ConfigError::MissingField("height"))?;
        Ok((weight, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_json() {
        let config = ProfileConfig::from_json(r#"{"weight_kg": 75.0, "height": 1.75}"#).unwrap();
        assert_eq!(config.values().unwrap(), (75.0, 1.75));

        let config = ProfileConfig::from_json(r#"{"weight": 60}"#).unwrap();
        assert_eq!(config.weight_kg, Some(60.0));
        assert!(matches!(
            config.values().unwrap_err(),
            ConfigError::MissingField("height")
        ));
    }

    #[test]
    fn test_overrides() {
        let config = ProfileConfig::from_json(r#"{"weight_kg": 75.0, "height": 1.75}"#)
            .unwrap()
            .with_overrides(Some(80.0), None);
        assert_eq!(config.weight_kg, Some(80.0));
        assert_eq!(config.height, Some(1.75));

        let config = ProfileConfig::default().with_overrides(Some(70.0), Some(1.8));
        assert_eq!(config.values().unwrap(), (70.0, 1.8));
    }

    #[test]
    fn test_out_of_range_values_reach_report_policies() {
        let (weight, height) = ProfileConfig::load(None)
            .unwrap()
            .with_overrides(Some(0.0), Some(1.75))
            .values()
            .unwrap();
        assert_eq!((weight, height), (0.0, 1.75));

        // steps path stays silent, training path reports the record problem first
        assert_eq!(crate::report_steps("5000,1h", weight, height), "");
        assert!(matches!(
            crate::report_training("junk", weight, height).unwrap_err(),
            crate::ComputeError::StringFormat { .. }
        ));
        assert_eq!(
            crate::report_training("5000,Running,1h", weight, height).unwrap_err(),
            crate::ComputeError::Weight(0.0)
        );
    }

    #[test]
    fn test_missing_and_malformed() {
        assert!(matches!(
            ProfileConfig::default()
                .with_overrides(Some(75.0), None)
                .values()
                .unwrap_err(),
            ConfigError::MissingField("height")
        ));
        assert!(matches!(
            ProfileConfig::from_json("not json").unwrap_err(),
            ConfigError::Json(_)
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"weight_kg": 68.5, "height": 172}}"#).unwrap();

        let config = ProfileConfig::from_path(file.path()).unwrap();
        assert_eq!(config.height, Some(172.0));

        let missing = ProfileConfig::load(Some(Path::new("/nonexistent/profile.json")));
        assert!(matches!(missing.unwrap_err(), ConfigError::Io(_)));
    }
}
