//! Configuration file support for boxtool.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/boxtool/config.toml`. Settings include per-tool drag behaviour,
//! shape defaults, document limits and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::SecondPointerPolicy;
pub use keybindings::{Action, KeyBinding, KeybindingError, KeybindingsConfig};
pub use types::{DocumentConfig, ShapeConfig, ToolConfig, ToolsConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [tools.polygon]
/// drag_threshold = 4.0
/// persistent_tool = true
/// grid_size = 10.0
///
/// [shapes]
/// polygon_sides = 6
///
/// [keybindings]
/// polygon_tool = ["G"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drag behaviour for each box tool
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Type-specific shape defaults
    #[serde(default)]
    pub shapes: ShapeConfig,

    /// Document limits
    #[serde(default)]
    pub document: DocumentConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `aspect_ratio`: 0.05 - 20.0
    /// - `min_size`: 0.0 - 1000.0
    /// - `default_size`: each side at least `min_size`
    /// - `drag_threshold`: 0.0 - 50.0
    /// - `grid_size`: positive, otherwise disabled
    /// - `corner_radius`: 0.0 - 500.0
    /// - `polygon_sides`: 3 - 64
    pub fn validate_and_clamp(&mut self) {
        let tools = &mut self.tools;
        for (name, tool) in [
            ("rectangle", &mut tools.rectangle),
            ("ellipse", &mut tools.ellipse),
            ("polygon", &mut tools.polygon),
            ("frame", &mut tools.frame),
            ("image", &mut tools.image),
        ] {
            validate_tool(name, tool);
        }

        if !(0.0..=500.0).contains(&self.shapes.corner_radius) {
            log::warn!(
                "Invalid corner_radius {:.1}, clamping to 0.0-500.0 range",
                self.shapes.corner_radius
            );
            self.shapes.corner_radius = clamp_or(self.shapes.corner_radius, 0.0, 500.0, 0.0);
        }

        if !(3..=64).contains(&self.shapes.polygon_sides) {
            log::warn!(
                "Invalid polygon_sides {}, clamping to 3-64 range",
                self.shapes.polygon_sides
            );
            self.shapes.polygon_sides = self.shapes.polygon_sides.clamp(3, 64);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/boxtool/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("boxtool");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses a TOML document without validation.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Saves the current configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn validate_tool(name: &str, tool: &mut ToolConfig) {
    if !(0.05..=20.0).contains(&tool.aspect_ratio) {
        log::warn!(
            "Invalid tools.{name}.aspect_ratio {:.2}, clamping to 0.05-20.0 range",
            tool.aspect_ratio
        );
        tool.aspect_ratio = clamp_or(tool.aspect_ratio, 0.05, 20.0, 1.0);
    }

    if !(0.0..=1000.0).contains(&tool.min_size) {
        log::warn!(
            "Invalid tools.{name}.min_size {:.1}, clamping to 0.0-1000.0 range",
            tool.min_size
        );
        tool.min_size = clamp_or(tool.min_size, 0.0, 1000.0, 0.0);
    }

    for side in &mut tool.default_size {
        if !side.is_finite() || *side < tool.min_size {
            log::warn!(
                "Invalid tools.{name}.default_size side {:.1}, raising to min_size {:.1}",
                side,
                tool.min_size
            );
            *side = tool.min_size;
        }
    }

    if !(0.0..=50.0).contains(&tool.drag_threshold) {
        log::warn!(
            "Invalid tools.{name}.drag_threshold {:.1}, clamping to 0.0-50.0 range",
            tool.drag_threshold
        );
        tool.drag_threshold = clamp_or(tool.drag_threshold, 0.0, 50.0, 0.0);
    }

    if let Some(grid) = tool.grid_size {
        if !(grid.is_finite() && grid > 0.0) {
            log::warn!("Invalid tools.{name}.grid_size {grid}, disabling grid snapping");
            tool.grid_size = None;
        }
    }
}

/// Clamps `value`, substituting `fallback` for NaN.
fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.tools.polygon, ToolConfig::default());
        assert_eq!(config.shapes.polygon_sides, 3);
        assert_eq!(config.keybindings.polygon_tool, vec!["G".to_string()]);
    }

    #[test]
    fn partial_tool_table_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
            [tools.polygon]
            persistent_tool = true
            grid_size = 10.0
            second_pointer = "cancel"
            "#,
        )
        .unwrap();
        let polygon = &config.tools.polygon;
        assert!(polygon.persistent_tool);
        assert_eq!(polygon.grid_size, Some(10.0));
        assert_eq!(polygon.second_pointer, SecondPointerPolicy::Cancel);
        assert_eq!(polygon.drag_threshold, 4.0);
        assert!(!config.tools.rectangle.persistent_tool);
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = Config::from_toml(
            r#"
            [tools.rectangle]
            aspect_ratio = 100.0
            drag_threshold = -3.0
            grid_size = 0.0
            min_size = 20.0
            default_size = [5.0, 40.0]

            [shapes]
            polygon_sides = 1
            corner_radius = 900.0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        let rect = &config.tools.rectangle;
        assert_eq!(rect.aspect_ratio, 20.0);
        assert_eq!(rect.drag_threshold, 0.0);
        assert_eq!(rect.grid_size, None);
        assert_eq!(rect.default_size, [20.0, 40.0]);
        assert_eq!(config.shapes.polygon_sides, 3);
        assert_eq!(config.shapes.corner_radius, 500.0);
    }

    #[test]
    fn invalid_toml_is_reported() {
        assert!(Config::from_toml("[tools.polygon\n").is_err());
    }

    #[test]
    fn save_and_load_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.shapes.polygon_sides = 6;
        config.tools.frame.persistent_tool = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.shapes.polygon_sides, 6);
        assert!(loaded.tools.frame.persistent_tool);
    }

    #[test]
    fn schema_lists_top_level_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = &schema["properties"];
        for section in ["tools", "shapes", "document", "keybindings"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
