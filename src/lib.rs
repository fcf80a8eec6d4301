//! Library exports for the classboard whiteboard engine.
//!
//! Exposes the engine, its raster primitives and the configuration data
//! structures so that hosts (the bundled CLI, GUI front-ends, tests) share the
//! same drawing, history and validation logic.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod script;
pub mod util;

pub use config::Config;
pub use input::{Whiteboard, WhiteboardError, WhiteboardEvent};
