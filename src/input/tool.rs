//! Tool identities and box tool variants.

use crate::config::{Config, ToolConfig};
use crate::draw::{
    EllipseFactory, FrameFactory, ImageFactory, PolygonFactory, RectangleFactory, ShapeFactory,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tool selection.
///
/// `Select` is the host's default tool; every other tool is a box tool that
/// drags out a new shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolId {
    /// Default selection tool (owned by the host)
    Select,
    /// Rectangle outline
    Rectangle,
    /// Ellipse inscribed in the dragged box
    Ellipse,
    /// Regular polygon stretched to the dragged box
    Polygon,
    /// Labelled container frame
    Frame,
    /// Image placeholder
    Image,
}

impl ToolId {
    /// Every box tool, in toolbar order.
    pub const BOX_TOOLS: [ToolId; 5] = [
        ToolId::Rectangle,
        ToolId::Ellipse,
        ToolId::Polygon,
        ToolId::Frame,
        ToolId::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolId::Select => "select",
            ToolId::Rectangle => "rectangle",
            ToolId::Ellipse => "ellipse",
            ToolId::Polygon => "polygon",
            ToolId::Frame => "frame",
            ToolId::Image => "image",
        }
    }

    /// Human-readable name shown in toolbars and logs.
    pub fn label(&self) -> &'static str {
        match self {
            ToolId::Select => "Select",
            ToolId::Rectangle => "Rectangle",
            ToolId::Ellipse => "Ellipse",
            ToolId::Polygon => "Polygon",
            ToolId::Frame => "Frame",
            ToolId::Image => "Image",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "select" => Ok(ToolId::Select),
            "rectangle" | "rect" => Ok(ToolId::Rectangle),
            "ellipse" => Ok(ToolId::Ellipse),
            "polygon" => Ok(ToolId::Polygon),
            "frame" => Ok(ToolId::Frame),
            "image" => Ok(ToolId::Image),
            other => Err(format!("unknown tool '{other}'")),
        }
    }
}

/// A box tool variant: identity, shortcut, drag behaviour and shape factory.
///
/// Variants share one state machine; only this bundle differs between them.
#[derive(Debug)]
pub struct ToolVariant {
    pub id: ToolId,
    /// First configured activation shortcut, for toolbar hints
    pub shortcut: Option<String>,
    pub config: ToolConfig,
    pub factory: Box<dyn ShapeFactory>,
}

impl ToolVariant {
    pub fn new(id: ToolId, config: ToolConfig, factory: Box<dyn ShapeFactory>) -> Self {
        Self {
            id,
            shortcut: None,
            config,
            factory,
        }
    }

    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    pub fn label(&self) -> &'static str {
        self.id.label()
    }

    /// Builds the built-in variant for `id` from user configuration.
    ///
    /// Returns `None` for [`ToolId::Select`], which is not a box tool.
    pub fn from_config(id: ToolId, config: &Config) -> Option<Self> {
        let tools = &config.tools;
        let shapes = &config.shapes;
        let (tool_config, factory): (&ToolConfig, Box<dyn ShapeFactory>) = match id {
            ToolId::Select => return None,
            ToolId::Rectangle => (
                &tools.rectangle,
                Box::new(RectangleFactory {
                    corner_radius: shapes.corner_radius,
                }),
            ),
            ToolId::Ellipse => (&tools.ellipse, Box::new(EllipseFactory)),
            ToolId::Polygon => (
                &tools.polygon,
                Box::new(PolygonFactory {
                    sides: shapes.polygon_sides,
                }),
            ),
            ToolId::Frame => (
                &tools.frame,
                Box::new(FrameFactory {
                    label: shapes.frame_label.clone(),
                }),
            ),
            ToolId::Image => (&tools.image, Box::new(ImageFactory)),
        };
        let variant = Self::new(id, tool_config.clone(), factory);
        Some(match config.keybindings.tool_bindings(id).first() {
            Some(shortcut) => variant.with_shortcut(shortcut.as_str()),
            None => variant,
        })
    }
}
