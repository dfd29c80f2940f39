//! Editor configuration.

use crate::error::ConfigError;
use crate::shapes::SerializableColor;
use kurbo::{Point, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Default resize floor in canvas units.
pub const DEFAULT_MIN_SIZE: f64 = 20.0;

/// Tunables for the selection, transform and grouping engine.
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Width/height floor applied after every resize step.
    pub min_size: Size,
    /// Root-frame position given to freshly created elements.
    pub spawn_position: Point,
    /// Side length of each square corner thumb.
    pub resize_handle_size: f64,
    /// Side length of the delete control.
    pub delete_handle_size: f64,
    /// Extra slack around handles when picking.
    pub handle_hit_tolerance: f64,
    /// Glow color marking the active element.
    pub selection_color: SerializableColor,
    /// Blur radius of the selection glow.
    pub selection_glow_radius: f64,
    /// Outline color marking group candidates.
    pub group_highlight_color: SerializableColor,
    /// Outline width of the group highlight.
    pub group_highlight_width: f64,
    /// Maximum delay between two clicks of a double-click.
    pub double_click_time_ms: u64,
    /// Maximum pointer travel between two clicks of a double-click.
    pub double_click_distance: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: Size::new(DEFAULT_MIN_SIZE, DEFAULT_MIN_SIZE),
            spawn_position: Point::new(100.0, 100.0),
            resize_handle_size: 10.0,
            delete_handle_size: 20.0,
            handle_hit_tolerance: 2.0,
            selection_color: SerializableColor::new(0, 0, 255, 255),
            selection_glow_radius: 10.0,
            group_highlight_color: SerializableColor::new(0, 128, 0, 255),
            group_highlight_width: 2.0,
            double_click_time_ms: 500,
            double_click_distance: 5.0,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size.width < 0.0 || self.min_size.height < 0.0 {
            return Err(ConfigError::InvalidMinimumSize {
                width: self.min_size.width,
                height: self.min_size.height,
            });
        }
        for size in [self.resize_handle_size, self.delete_handle_size] {
            if size <= 0.0 {
                return Err(ConfigError::InvalidHandleSize(size));
            }
        }
        Ok(())
    }

    /// Selection glow color.
    pub fn selection(&self) -> Color {
        self.selection_color.into()
    }

    /// Group candidate highlight color.
    pub fn group_highlight(&self) -> Color {
        self.group_highlight_color.into()
    }
}
