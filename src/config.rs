//! Maze settings, as read from a JSON file or assembled by the driver.
//!
//! ```json
//! { "rows": 20, "columns": 30, "seed": 7, "solve": true }
//! ```
//!
//! Every field is optional. The size limit checked by `validate` is a presentation policy for
//! the driver; the grid itself accepts any non zero size.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde_derive::Deserialize;

/// Largest number of rows or columns `validate` accepts.
pub const MAX_DIMENSION: usize = 40;

const DEFAULT_DIMENSION: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MazeConfig {
    pub rows: usize,
    pub columns: usize,
    /// Fixed seed for a reproducible maze. A fresh seed is drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Search for the exit once the maze is carved.
    pub solve: bool,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            rows: DEFAULT_DIMENSION,
            columns: DEFAULT_DIMENSION,
            seed: None,
            solve: true,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Json(serde_json::Error),
    DimensionOutOfRange {
        name: &'static str,
        value: usize,
        max: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::Io(ref e) => write!(f, "cannot read maze config: {}", e),
            ConfigError::Json(ref e) => write!(f, "invalid maze config: {}", e),
            ConfigError::DimensionOutOfRange { name, value, max } => {
                write!(f, "{} must be between 1 and {}, got {}", name, max, value)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ConfigError::Io(ref e) => Some(e),
            ConfigError::Json(ref e) => Some(e),
            ConfigError::DimensionOutOfRange { .. } => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> ConfigError {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> ConfigError {
        ConfigError::Json(e)
    }
}

impl MazeConfig {
    pub fn from_json_str(json: &str) -> Result<MazeConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<MazeConfig, ConfigError> {
        let text = fs::read_to_string(path)?;
        MazeConfig::from_json_str(&text)
    }

    /// Check both dimensions are within `1..=MAX_DIMENSION`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for &(name, value) in [("rows", self.rows), ("columns", self.columns)].iter() {
            if value == 0 || value > MAX_DIMENSION {
                return Err(ConfigError::DimensionOutOfRange {
                    name,
                    value,
                    max: MAX_DIMENSION,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MazeConfig::default();
        assert_eq!((config.rows, config.columns), (20, 20));
        assert_eq!(config.seed, None);
        assert!(config.solve);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = MazeConfig::from_json_str(r#"{ "rows": 5, "seed": 12 }"#).unwrap();
        assert_eq!(config,
                   MazeConfig {
                       rows: 5,
                       columns: 20,
                       seed: Some(12),
                       solve: true,
                   });
    }

    #[test]
    fn full_json() {
        let json = r#"{ "rows": 3, "columns": 40, "seed": null, "solve": false }"#;
        let config = MazeConfig::from_json_str(json).unwrap();
        assert_eq!((config.rows, config.columns, config.seed, config.solve),
                   (3, 40, None, false));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_or_malformed_json_is_rejected() {
        match MazeConfig::from_json_str(r#"{ "rows": 3, "colour": "red" }"#) {
            Err(ConfigError::Json(_)) => {}
            other => panic!("expected json error, got {:?}", other),
        }
        match MazeConfig::from_json_str(r#"{ "rows": -3 }"#) {
            Err(ConfigError::Json(_)) => {}
            other => panic!("expected json error, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_dimensions() {
        let too_wide = MazeConfig { columns: 41, ..MazeConfig::default() };
        match too_wide.validate() {
            Err(ConfigError::DimensionOutOfRange { name, value, max }) => {
                assert_eq!((name, value, max), ("columns", 41, MAX_DIMENSION));
            }
            other => panic!("unexpected {:?}", other),
        }

        let empty = MazeConfig { rows: 0, ..MazeConfig::default() };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn missing_file() {
        match MazeConfig::from_json_file("/nonexistent/maze/config.json") {
            Err(ConfigError::Io(_)) => {}
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
