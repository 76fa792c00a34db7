//! Main VastuMatchConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::{GridConfig, MapConfig, SensorConfig};
use crate::matching::MatcherConfig;

use super::error::ConfigLoadError;

/// Full configuration loaded from YAML
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VastuMatchConfig {
    /// Grid settings
    #[serde(default)]
    pub grid: GridConfig,

    /// Range sensor settings
    #[serde(default)]
    pub sensor: SensorConfig,

    /// Scan matcher settings
    #[serde(default)]
    pub matcher: MatcherConfig,
}

impl VastuMatchConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Convert to MapConfig for OccupancyGrid
    pub fn to_map_config(&self) -> MapConfig {
        MapConfig {
            grid: self.grid.clone(),
            sensor: self.sensor.clone(),
        }
    }

    /// Get the matcher config
    pub fn matcher_config(&self) -> MatcherConfig {
        self.matcher.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = VastuMatchConfig::default();
        assert_eq!(config.grid.resolution, 0.02);
        assert_eq!(config.sensor.samples_per_revolution, 180);
        assert_eq!(config.matcher.coarse_factor, 5);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = VastuMatchConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = VastuMatchConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.grid.resolution, config.grid.resolution);
        assert_eq!(parsed.matcher, config.matcher);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "sensor:\n  max_range: 4.0\nmatcher:\n  coarse_factor: 2\n";
        let config = VastuMatchConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.sensor.max_range, 4.0);
        assert_eq!(config.sensor.samples_per_revolution, 180);
        assert_eq!(config.matcher.coarse_factor, 2);
        assert_eq!(config.grid.initial_width, 500);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "grid:\n  resolution: 0.05\n").unwrap();

        let config = VastuMatchConfig::load(file.path()).unwrap();
        assert_eq!(config.to_map_config().grid.resolution, 0.05);
    }

    #[test]
    fn test_load_errors() {
        let missing = VastuMatchConfig::load(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(missing, Err(ConfigLoadError::Io(_))));

        let bad = VastuMatchConfig::from_yaml("matcher: [1, 2");
        assert!(matches!(bad, Err(ConfigLoadError::Parse(_))));
    }
}
