//! Input handling and the whiteboard engine.
//!
//! This module translates host keyboard and pointer events into edits on the
//! drawing surface. It owns the tool state, the gesture state machine and the
//! snapshot history that backs undo and redo.

pub mod events;
pub mod modifiers;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, WhiteboardEvent};
pub use state::{
    DrawingState, MAX_FONT_SIZE, MAX_SIZE, MIN_FONT_SIZE, MIN_SIZE, ToolState, Whiteboard,
    WhiteboardError,
};
pub use tool::{BrushShape, Tool};

// Re-export for public API (unused internally but part of public interface)
#[allow(unused_imports)]
pub use modifiers::Modifiers;
