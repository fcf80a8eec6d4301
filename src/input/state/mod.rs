mod actions;
mod core;
mod mouse;
mod text;

pub use core::{
    DrawingState, MAX_FONT_SIZE, MAX_SIZE, MIN_FONT_SIZE, MIN_SIZE, ToolState, Whiteboard,
    WhiteboardError,
};
