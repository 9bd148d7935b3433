use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Whether the autopilot rewrites its cycle to reach food sooner
    pub optimize: bool,
    /// Milliseconds between game ticks in the terminal modes
    pub tick_millis: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            optimize: true,
            tick_millis: 125,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config in {:?}", path))
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(format!(
                "grid must be at least 2x2, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        if self.initial_snake_length > self.grid_width / 2 {
            return Err(format!(
                "initial_snake_length ({}) must fit in half the grid width ({})",
                self.initial_snake_length, self.grid_width
            ));
        }

        if self.tick_millis == 0 {
            return Err("tick_millis must be at least 1".to_string());
        }

        Ok(())
    }

    /// Validate for the autopilot, which needs a Hamiltonian cycle
    pub fn validate_for_autopilot(&self) -> Result<(), String> {
        self.validate()?;

        if self.grid_width % 2 != 0 || self.grid_height % 2 != 0 {
            return Err(format!(
                "autopilot needs even grid dimensions, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert!(config.optimize);
        assert!(config.validate().is_ok());
        assert!(config.validate_for_autopilot().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
        assert!(config.validate().is_ok());
        assert!(config.validate_for_autopilot().is_err());
    }

    #[test]
    fn test_validation_rejects_tiny_grid() {
        assert!(GameConfig::new(1, 10).validate().is_err());
    }

    #[test]
    fn test_validation_rejects_long_snake() {
        let config = GameConfig {
            initial_snake_length: 6,
            ..GameConfig::new(10, 10)
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            initial_snake_length: 0,
            ..GameConfig::new(10, 10)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("game.json");
        std::fs::write(&path, r#"{ "grid_width": 8, "optimize": false }"#).unwrap();

        let config = GameConfig::from_json_file(&path).unwrap();
        assert_eq!(config.grid_width, 8);
        assert_eq!(config.grid_height, 20);
        assert!(!config.optimize);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");
        assert!(GameConfig::from_json_file(&path).is_err());
    }
}
