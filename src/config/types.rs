//! Configuration type definitions.

use super::enums::SecondPointerPolicy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Behaviour of a single box tool.
///
/// Every variant (rectangle, ellipse, polygon, frame, image) gets its own
/// table under `[tools]`, e.g. `[tools.polygon]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolConfig {
    /// Hold the aspect ratio even without the aspect-lock modifier (Shift)
    #[serde(default = "default_aspect_lock")]
    pub default_aspect_lock: bool,

    /// Width/height ratio used when aspect-lock is active (valid range: 0.05 - 20.0)
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f64,

    /// Smallest width or height a committed shape may have (valid range: 0.0 - 1000.0)
    #[serde(default = "default_min_size")]
    pub min_size: f64,

    /// Size `[width, height]` of a shape created by clicking without dragging
    #[serde(default = "default_size")]
    pub default_size: [f64; 2],

    /// Pointer travel before a press turns into a drag (valid range: 0.0 - 50.0)
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f64,

    /// Stay on this tool after a commit instead of returning to select
    #[serde(default = "default_persistent_tool")]
    pub persistent_tool: bool,

    /// Snap box corners to multiples of this size (unset = no snapping)
    #[serde(default)]
    pub grid_size: Option<f64>,

    /// Reaction to a second pointer press during a drag (ignore, cancel)
    #[serde(default)]
    pub second_pointer: SecondPointerPolicy,

    /// Apply pointer moves once per rendered frame instead of per event
    #[serde(default = "default_coalesce_pointer_moves")]
    pub coalesce_pointer_moves: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            default_aspect_lock: default_aspect_lock(),
            aspect_ratio: default_aspect_ratio(),
            min_size: default_min_size(),
            default_size: default_size(),
            drag_threshold: default_drag_threshold(),
            persistent_tool: default_persistent_tool(),
            grid_size: None,
            second_pointer: SecondPointerPolicy::default(),
            coalesce_pointer_moves: default_coalesce_pointer_moves(),
        }
    }
}

/// Per-variant tool settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ToolsConfig {
    #[serde(default)]
    pub rectangle: ToolConfig,

    #[serde(default)]
    pub ellipse: ToolConfig,

    #[serde(default)]
    pub polygon: ToolConfig,

    #[serde(default)]
    pub frame: ToolConfig,

    #[serde(default)]
    pub image: ToolConfig,
}

/// Type-specific fields filled in when a shape is committed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ShapeConfig {
    /// Corner radius of new rectangles (valid range: 0.0 - 500.0)
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f64,

    /// Number of sides of new polygons (valid range: 3 - 64)
    #[serde(default = "default_polygon_sides")]
    pub polygon_sides: u32,

    /// Label given to new frames
    #[serde(default = "default_frame_label")]
    pub frame_label: String,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            corner_radius: default_corner_radius(),
            polygon_sides: default_polygon_sides(),
            frame_label: default_frame_label(),
        }
    }
}

/// Document settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentConfig {
    /// Maximum number of committed shapes (0 = unlimited)
    #[serde(default = "default_max_shapes")]
    pub max_shapes: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            max_shapes: default_max_shapes(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_aspect_lock() -> bool {
    false
}

fn default_aspect_ratio() -> f64 {
    1.0
}

fn default_min_size() -> f64 {
    10.0
}

fn default_size() -> [f64; 2] {
    [100.0, 100.0]
}

fn default_drag_threshold() -> f64 {
    4.0
}

fn default_persistent_tool() -> bool {
    false
}

fn default_coalesce_pointer_moves() -> bool {
    true
}

fn default_corner_radius() -> f64 {
    0.0
}

fn default_polygon_sides() -> u32 {
    3
}

fn default_frame_label() -> String {
    "Frame".to_string()
}

fn default_max_shapes() -> usize {
    0
}
