use crate::config::Action;
use crate::input::{Tool, events::Key};

use super::Whiteboard;

/// Stroke size change per size step, in pixels.
const SIZE_STEP: f64 = 1.0;
/// Font size change per font step, in pixels.
const FONT_SIZE_STEP: f64 = 2.0;

impl Whiteboard {
    /// Processes a key press event.
    ///
    /// Modifier keys are always tracked. While a host text field holds focus
    /// no other key reaches the action map, so typing into the prompt can
    /// never trigger undo or redo.
    ///
    /// Returns `true` if the key triggered an action.
    pub fn on_key_press(&mut self, key: Key) -> bool {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return false;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return false;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return false;
            }
            _ => {}
        }

        if self.text_entry_focused {
            return false;
        }

        let Some(key_str) = key.binding_name() else {
            return false;
        };

        match self.find_action(&key_str) {
            Some(action) => {
                self.handle_action(action);
                true
            }
            None => false,
        }
    }

    /// Processes a key release event.
    ///
    /// Only modifier releases change state.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    /// Handle an action triggered by a keybinding or a host control.
    pub fn handle_action(&mut self, action: Action) {
        log::debug!("Handling action {:?}", action);
        match action {
            Action::Undo => {
                self.undo();
            }
            Action::Redo => {
                self.redo();
            }
            Action::ClearCanvas => {
                self.clear_canvas();
            }
            Action::SelectPen => self.set_tool(Tool::Pen),
            Action::SelectEraser => self.set_tool(Tool::Eraser),
            Action::ToggleTextMode => self.toggle_text_mode(),
            Action::ToggleBrushShape => {
                let next = self.tool_state.brush.toggled();
                self.set_brush_shape(next);
            }
            Action::IncreaseSize => self.adjust_size(SIZE_STEP),
            Action::DecreaseSize => self.adjust_size(-SIZE_STEP),
            Action::IncreaseFontSize => self.adjust_font_size(FONT_SIZE_STEP),
            Action::DecreaseFontSize => self.adjust_font_size(-FONT_SIZE_STEP),
        }
    }
}
