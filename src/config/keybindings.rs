//! Keybinding configuration types and parsing.
//!
//! Users can rebind every whiteboard shortcut; the undo and redo chords are
//! the ones hosts must intercept before their own default handling.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // History
    Undo,
    Redo,
    ClearCanvas,

    // Tool selection
    SelectPen,
    SelectEraser,
    ToggleTextMode,
    ToggleBrushShape,

    // Size controls
    IncreaseSize,
    DecreaseSize,
    IncreaseFontSize,
    DecreaseFontSize,
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Delete".
    ///
    /// Modifiers can appear in any order and spaces around '+' are ignored.
    /// A trailing "++" binds the '+' key itself.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]: the empty parts are the '+' key
        let key = key_parts.join("+");
        let key = if key.chars().all(|c| c == '+') {
            "+".to_string()
        } else {
            key
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the given key and modifier state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y", "Ctrl+Shift+Z"]
/// clear_canvas = ["Ctrl+Shift+Delete"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_select_pen")]
    pub select_pen: Vec<String>,

    #[serde(default = "default_select_eraser")]
    pub select_eraser: Vec<String>,

    #[serde(default = "default_toggle_text_mode")]
    pub toggle_text_mode: Vec<String>,

    #[serde(default = "default_toggle_brush_shape")]
    pub toggle_brush_shape: Vec<String>,

    #[serde(default = "default_increase_size")]
    pub increase_size: Vec<String>,

    #[serde(default = "default_decrease_size")]
    pub decrease_size: Vec<String>,

    #[serde(default = "default_increase_font_size")]
    pub increase_font_size: Vec<String>,

    #[serde(default = "default_decrease_font_size")]
    pub decrease_font_size: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            undo: default_undo(),
            redo: default_redo(),
            clear_canvas: default_clear_canvas(),
            select_pen: default_select_pen(),
            select_eraser: default_select_eraser(),
            toggle_text_mode: default_toggle_text_mode(),
            toggle_brush_shape: default_toggle_brush_shape(),
            increase_size: default_increase_size(),
            decrease_size: default_decrease_size(),
            increase_font_size: default_increase_font_size(),
            decrease_font_size: default_decrease_font_size(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let table: [(&[String], Action); 11] = [
            (self.undo.as_slice(), Action::Undo),
            (self.redo.as_slice(), Action::Redo),
            (self.clear_canvas.as_slice(), Action::ClearCanvas),
            (self.select_pen.as_slice(), Action::SelectPen),
            (self.select_eraser.as_slice(), Action::SelectEraser),
            (self.toggle_text_mode.as_slice(), Action::ToggleTextMode),
            (self.toggle_brush_shape.as_slice(), Action::ToggleBrushShape),
            (self.increase_size.as_slice(), Action::IncreaseSize),
            (self.decrease_size.as_slice(), Action::DecreaseSize),
            (self.increase_font_size.as_slice(), Action::IncreaseFontSize),
            (self.decrease_font_size.as_slice(), Action::DecreaseFontSize),
        ];

        let mut map = HashMap::new();
        for (bindings, action) in table {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybindings
// =============================================================================

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Y".to_string(), "Ctrl+Shift+Z".to_string()]
}

fn default_clear_canvas() -> Vec<String> {
    vec!["Ctrl+Shift+Delete".to_string()]
}

fn default_select_pen() -> Vec<String> {
    vec!["P".to_string()]
}

fn default_select_eraser() -> Vec<String> {
    vec!["E".to_string()]
}

fn default_toggle_text_mode() -> Vec<String> {
    vec!["T".to_string()]
}

fn default_toggle_brush_shape() -> Vec<String> {
    vec!["B".to_string()]
}

// '+' and '_' sit on shifted keys; the bare "+" covers the keypad
fn default_increase_size() -> Vec<String> {
    vec!["+".to_string(), "Shift++".to_string(), "=".to_string()]
}

fn default_decrease_size() -> Vec<String> {
    vec!["-".to_string(), "Shift+_".to_string()]
}

fn default_increase_font_size() -> Vec<String> {
    vec!["Ctrl+Shift++".to_string(), "Ctrl+Shift+=".to_string()]
}

fn default_decrease_font_size() -> Vec<String> {
    vec!["Ctrl+Shift+-".to_string(), "Ctrl+Shift+_".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("Delete").unwrap();
        assert_eq!(binding.key, "Delete");
        assert!(!binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_ctrl_key() {
        let binding = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(binding.key, "Z");
        assert!(binding.ctrl);
        assert!(!binding.shift);
    }

    #[test]
    fn test_parse_plus_key() {
        let binding = KeyBinding::parse("Ctrl+Shift++").unwrap();
        assert_eq!(binding.key, "+");
        assert!(binding.ctrl && binding.shift);

        let bare = KeyBinding::parse("+").unwrap();
        assert_eq!(bare.key, "+");
        assert!(!bare.ctrl);
    }

    #[test]
    fn test_parse_with_spaces_and_any_order() {
        let a = KeyBinding::parse("Ctrl + Shift + Z").unwrap();
        let b = KeyBinding::parse("Shift+Ctrl+Z").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rejects_modifier_only() {
        assert!(KeyBinding::parse("Ctrl+Shift").is_err());
        assert!(KeyBinding::parse("   ").is_err());
    }

    #[test]
    fn test_matches() {
        let binding = KeyBinding::parse("Ctrl+Y").unwrap();
        assert!(binding.matches("y", true, false, false));
        assert!(!binding.matches("y", false, false, false));
        assert!(!binding.matches("y", true, true, false));
        assert!(!binding.matches("z", true, false, false));
    }

    #[test]
    fn test_build_action_map_defaults() {
        let map = KeybindingsConfig::default().build_action_map().unwrap();

        let ctrl_z = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(map.get(&ctrl_z), Some(&Action::Undo));

        let ctrl_y = KeyBinding::parse("Ctrl+Y").unwrap();
        assert_eq!(map.get(&ctrl_y), Some(&Action::Redo));

        let ctrl_shift_z = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert_eq!(map.get(&ctrl_shift_z), Some(&Action::Redo));
    }

    #[test]
    fn test_shifted_size_keys_match_with_shift_held() {
        let map = KeybindingsConfig::default().build_action_map().unwrap();
        let lookup = |key: &str, shift: bool| {
            map.iter()
                .find(|(binding, _)| binding.matches(key, false, shift, false))
                .map(|(_, action)| *action)
        };

        assert_eq!(lookup("+", true), Some(Action::IncreaseSize));
        assert_eq!(lookup("+", false), Some(Action::IncreaseSize));
        assert_eq!(lookup("=", false), Some(Action::IncreaseSize));
        assert_eq!(lookup("_", true), Some(Action::DecreaseSize));
        assert_eq!(lookup("-", false), Some(Action::DecreaseSize));
        assert_eq!(lookup("_", false), None);
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        let config = KeybindingsConfig {
            clear_canvas: vec!["Shift+Ctrl+Z".to_string()],
            ..KeybindingsConfig::default()
        };

        let err = config.build_action_map().unwrap_err();
        assert!(err.contains("Duplicate keybinding"));
        assert!(err.contains("Shift+Ctrl+Z"));
    }
}
