//! Drawing tool and brush selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool decides what a pointer press does on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand drawing - follows the pointer path (default)
    #[default]
    Pen,
    /// Clears a square around the pointer
    Eraser,
    /// Places text at the pressed position
    Text,
}

impl Tool {
    pub fn label(self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::Eraser => "Eraser",
            Tool::Text => "Text",
        }
    }
}

/// Pen tip shape, applied as the stroke's line cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BrushShape {
    #[default]
    Round,
    Square,
}

impl BrushShape {
    pub fn line_cap(self) -> cairo::LineCap {
        match self {
            BrushShape::Round => cairo::LineCap::Round,
            BrushShape::Square => cairo::LineCap::Square,
        }
    }

    pub fn line_join(self) -> cairo::LineJoin {
        match self {
            BrushShape::Round => cairo::LineJoin::Round,
            BrushShape::Square => cairo::LineJoin::Miter,
        }
    }

    /// The other shape (used by the toggle shortcut).
    pub fn toggled(self) -> Self {
        match self {
            BrushShape::Round => BrushShape::Square,
            BrushShape::Square => BrushShape::Round,
        }
    }
}
