//! Whiteboard engine state: surface, history, tool state and gesture tracking.

use crate::config::{Action, Config, KeyBinding};
use crate::draw::{
    Color, FontDescriptor, History, Snapshot, Surface, SurfaceError, clear_surface,
};
use crate::input::{BrushShape, Tool, WhiteboardEvent, modifiers::Modifiers};
use crate::util::{self, Point};
use std::collections::HashMap;
use thiserror::Error;

/// Smallest stroke size in pixels.
pub const MIN_SIZE: f64 = 1.0;
/// Largest stroke size in pixels.
pub const MAX_SIZE: f64 = 100.0;
/// Smallest font size in pixels.
pub const MIN_FONT_SIZE: f64 = 8.0;
/// Largest font size in pixels.
pub const MAX_FONT_SIZE: f64 = 72.0;

/// Fatal setup errors; a whiteboard that fails to build cannot run.
#[derive(Debug, Error)]
pub enum WhiteboardError {
    #[error("Failed to set up drawing surface: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Invalid keybindings: {0}")]
    Keybindings(String),
}

/// Current drawing tool configuration.
///
/// Mutated only through the whiteboard's setters; never versioned by history.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    /// Active tool
    pub tool: Tool,
    /// Pen tip shape
    pub brush: BrushShape,
    /// Pen width and eraser side in pixels
    pub size: f64,
    /// Stroke and text color
    pub color: Color,
    /// Text size in pixels
    pub font_size: f64,
    /// Text font family/weight/style
    pub font: FontDescriptor,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            brush: BrushShape::Round,
            size: 5.0,
            color: crate::draw::BLACK,
            font_size: 20.0,
            font: FontDescriptor::default(),
        }
    }
}

impl ToolState {
    /// Builds the initial tool state from the `[drawing]` config section.
    pub fn from_config(config: &crate::config::DrawingConfig) -> Self {
        Self {
            tool: Tool::Pen,
            brush: config.default_brush,
            size: config.default_size.clamp(MIN_SIZE, MAX_SIZE),
            color: config.default_color.to_color(),
            font_size: config.default_font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            font: FontDescriptor::new(
                config.font_family.clone(),
                config.font_weight.clone(),
                config.font_style.clone(),
            ),
        }
    }
}

/// Gesture state machine.
///
/// Tracks whether the user is idle, dragging a pen/eraser, or has anchored a
/// text placement that is waiting for its content.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// No gesture in progress
    Idle,
    /// Pointer held down with a drag tool
    Drawing {
        /// Tool captured at pointer-down
        tool: Tool,
        /// Last painted position (end of the pen path so far)
        last: Point,
    },
    /// Text anchor recorded; waiting for `commit_text` or `cancel_text`
    TextPending {
        /// Baseline start for the text
        anchor: Point,
    },
}

/// Single-canvas whiteboard engine.
///
/// Owns the drawing [`Surface`], the snapshot [`History`] and the live
/// [`ToolState`]. Every method runs synchronously on the caller's thread;
/// each finished gesture commits exactly one snapshot.
pub struct Whiteboard {
    pub(super) surface: Surface,
    pub(super) history: History,
    pub(super) tool_state: ToolState,
    /// Current gesture state machine
    pub(super) state: DrawingState,
    /// Current modifier key state
    pub(super) modifiers: Modifiers,
    /// Whether a host text field currently owns keyboard focus
    pub(super) text_entry_focused: bool,
    /// Whether the host should repaint the surface
    pub needs_redraw: bool,
    action_map: HashMap<KeyBinding, Action>,
    events: Vec<WhiteboardEvent>,
}

impl Whiteboard {
    /// Creates a whiteboard with a blank surface and a one-entry history.
    ///
    /// # Arguments
    /// * `width` / `height` - Surface size in pixels
    /// * `tool_state` - Initial tool configuration
    /// * `action_map` - Keybinding action map
    /// * `max_snapshots` - History capacity (0 = unlimited)
    pub fn with_defaults(
        width: i32,
        height: i32,
        tool_state: ToolState,
        action_map: HashMap<KeyBinding, Action>,
        max_snapshots: usize,
    ) -> Result<Self, WhiteboardError> {
        let mut surface = Surface::new(width, height)?;
        let initial = surface.capture()?;

        log::info!(
            "Whiteboard ready: {}x{} surface, history capacity {}",
            width,
            height,
            if max_snapshots == 0 {
                "unlimited".to_string()
            } else {
                max_snapshots.to_string()
            }
        );

        Ok(Self {
            surface,
            history: History::new(initial, max_snapshots),
            tool_state,
            state: DrawingState::Idle,
            modifiers: Modifiers::new(),
            text_entry_focused: false,
            needs_redraw: true,
            action_map,
            events: Vec::new(),
        })
    }

    /// Creates a whiteboard from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Result<Self, WhiteboardError> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(WhiteboardError::Keybindings)?;

        Self::with_defaults(
            config.canvas.width,
            config.canvas.height,
            ToolState::from_config(&config.drawing),
            action_map,
            config.history.max_snapshots,
        )
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tool_state(&self) -> &ToolState {
        &self.tool_state
    }

    pub fn drawing_state(&self) -> &DrawingState {
        &self.state
    }

    /// True while a pen or eraser gesture is held down.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    /// Anchor of a text placement waiting for content, if any.
    pub fn pending_text_anchor(&self) -> Option<Point> {
        match self.state {
            DrawingState::TextPending { anchor } => Some(anchor),
            _ => None,
        }
    }

    pub fn undo_available(&self) -> bool {
        self.history.can_undo()
    }

    pub fn redo_available(&self) -> bool {
        self.history.can_redo()
    }

    /// Copies the live surface pixels, including any uncommitted stroke.
    pub fn capture_surface(&mut self) -> Result<Snapshot, SurfaceError> {
        self.surface.capture()
    }

    /// Drains queued notifications for the host.
    pub fn take_events(&mut self) -> Vec<WhiteboardEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn emit(&mut self, event: WhiteboardEvent) {
        self.events.push(event);
    }

    /// Runs `draw` against a fresh Cairo context on the surface.
    ///
    /// The context is dropped before returning so the pixels stay capturable.
    pub(super) fn paint(&mut self, draw: impl FnOnce(&cairo::Context)) {
        match self.surface.context() {
            Ok(ctx) => {
                draw(&ctx);
                self.needs_redraw = true;
            }
            Err(err) => log::error!("Failed to create drawing context: {}", err),
        }
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Captures the surface as a new snapshot after the cursor.
    ///
    /// Discards any redo branch first. Returns `false` only if the pixels
    /// could not be captured, in which case history is left untouched.
    pub fn commit(&mut self) -> bool {
        let snapshot = match self.surface.capture() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::error!("Failed to capture snapshot, edit not recorded: {}", err);
                return false;
            }
        };

        let discarded = self.history.push(snapshot);
        log::debug!(
            "Committed snapshot {} of {} (discarded {} redo entries)",
            self.history.cursor(),
            self.history.len(),
            discarded
        );
        self.sync_affordances();
        true
    }

    /// Steps back one snapshot. Returns `false` at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            log::debug!("Undo not available");
            return false;
        };

        if let Err(err) = self.surface.restore(snapshot) {
            log::error!("Failed to restore snapshot on undo: {}", err);
        }
        self.after_history_move();
        true
    }

    /// Steps forward one snapshot. Returns `false` at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            log::debug!("Redo not available");
            return false;
        };

        if let Err(err) = self.surface.restore(snapshot) {
            log::error!("Failed to restore snapshot on redo: {}", err);
        }
        self.after_history_move();
        true
    }

    /// Clears the whole surface as one undoable edit.
    ///
    /// Returns `false` (and records nothing) when the surface is already blank.
    pub fn clear_canvas(&mut self) -> bool {
        if self.history.current().is_blank() && !self.is_drawing() {
            return false;
        }

        self.state = DrawingState::Idle;
        self.paint(clear_surface);
        log::info!("Canvas cleared");
        self.commit()
    }

    fn after_history_move(&mut self) {
        // A restore ends whatever gesture was being drawn over the old pixels
        if self.is_drawing() {
            self.state = DrawingState::Idle;
        }
        self.needs_redraw = true;
        log::debug!(
            "History cursor at {} of {}",
            self.history.cursor(),
            self.history.len()
        );
        self.sync_affordances();
    }

    fn sync_affordances(&mut self) {
        let undo_available = self.undo_available();
        let redo_available = self.redo_available();
        self.emit(WhiteboardEvent::HistoryChanged {
            undo_available,
            redo_available,
        });
    }

    // ========================================================================
    // Tool state setters
    // ========================================================================

    /// Selects the active tool. Leaving text mode drops a pending anchor.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool != Tool::Text && matches!(self.state, DrawingState::TextPending { .. }) {
            self.state = DrawingState::Idle;
        }
        self.tool_state.tool = tool;
        log::debug!("Tool set to {}", tool.label());
    }

    /// Flips between text placement and the pen.
    pub fn toggle_text_mode(&mut self) {
        let next = if self.tool_state.tool == Tool::Text {
            Tool::Pen
        } else {
            Tool::Text
        };
        self.set_tool(next);
    }

    pub fn is_text_mode(&self) -> bool {
        self.tool_state.tool == Tool::Text
    }

    pub fn set_brush_shape(&mut self, brush: BrushShape) {
        self.tool_state.brush = brush;
    }

    /// Sets the stroke size, clamped to 1.0-100.0px.
    pub fn set_size(&mut self, size: f64) {
        if !size.is_finite() {
            log::warn!("Ignoring non-finite stroke size");
            return;
        }
        self.tool_state.size = size.clamp(MIN_SIZE, MAX_SIZE);
        self.emit(WhiteboardEvent::SizeChanged(self.tool_state.size));
    }

    /// Adjusts the stroke size by a delta, clamping to the valid range.
    pub fn adjust_size(&mut self, delta: f64) {
        self.set_size(self.tool_state.size + delta);
        log::debug!("Stroke size adjusted to {:.1}px", self.tool_state.size);
    }

    pub fn set_color(&mut self, color: Color) {
        self.tool_state.color = color;
        log::debug!("Color set to {}", util::color_to_name(&color));
    }

    /// Sets the font size, clamped to 8.0-72.0px.
    pub fn set_font_size(&mut self, font_size: f64) {
        if !font_size.is_finite() {
            log::warn!("Ignoring non-finite font size");
            return;
        }
        self.tool_state.font_size = font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.emit(WhiteboardEvent::FontSizeChanged(self.tool_state.font_size));
    }

    /// Adjusts the font size by a delta, clamping to the valid range.
    pub fn adjust_font_size(&mut self, delta: f64) {
        self.set_font_size(self.tool_state.font_size + delta);
        log::debug!("Font size adjusted to {:.1}px", self.tool_state.font_size);
    }

    pub fn set_font(&mut self, font: FontDescriptor) {
        self.tool_state.font = font;
    }

    /// Tells the engine whether a host text field holds keyboard focus.
    ///
    /// While focused, keyboard shortcuts are ignored so typing never undoes.
    pub fn set_text_entry_focused(&mut self, focused: bool) {
        self.text_entry_focused = focused;
    }

    /// Look up an action for the given key and the current modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map.iter().find_map(|(binding, action)| {
            binding
                .matches(
                    key_str,
                    self.modifiers.ctrl,
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
                .then_some(*action)
        })
    }
}
