//! Raster drawing primitives (Cairo-based).
//!
//! This module defines the pixel-level pieces of the whiteboard:
//! - [`Surface`]: the single mutable ARGB32 drawing target
//! - [`Snapshot`] and [`History`]: by-value pixel copies and the undo cursor
//! - [`Color`] and [`FontDescriptor`]: paint parameters
//! - Rendering functions for strokes, erasing and text

pub mod color;
pub mod font;
pub mod history;
pub mod render;
pub mod surface;

// Re-export commonly used types at module level
pub use color::Color;
pub use font::FontDescriptor;
pub use history::{History, Snapshot};
pub use render::{
    clear_surface, erase_square, render_board_background, render_text, stroke_segment,
};
pub use surface::{Surface, SurfaceError};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
