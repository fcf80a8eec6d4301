//! Generic input and output event types exchanged with the host UI.

/// Generic key representation for cross-host compatibility.
///
/// Hosts map their native key codes to these generic values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Tab key
    Tab,
    /// Space bar
    Space,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used for keybinding lookup, or `None` for keys that never bind.
    pub fn binding_name(self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Return => Some("Return".to_string()),
            Key::Backspace => Some("Backspace".to_string()),
            Key::Delete => Some("Delete".to_string()),
            Key::Space => Some("Space".to_string()),
            Key::Tab | Key::Shift | Key::Ctrl | Key::Alt | Key::Unknown => None,
        }
    }

    /// Maps a keybinding key name back to a key.
    pub fn from_name(name: &str) -> Key {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Char(c);
        }

        match name.to_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "tab" => Key::Tab,
            "space" => Key::Space,
            _ => Key::Unknown,
        }
    }
}

/// Notifications the engine queues for the host UI.
///
/// Drained with [`crate::input::Whiteboard::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum WhiteboardEvent {
    /// Text placement was started; the host should collect text and call
    /// `commit_text` (or `cancel_text`).
    TextInputRequested { x: f64, y: f64 },
    /// Undo/redo availability after a commit, undo or redo.
    HistoryChanged {
        undo_available: bool,
        redo_available: bool,
    },
    /// Stroke size changed (label echo).
    SizeChanged(f64),
    /// Font size changed (label echo).
    FontSizeChanged(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_round_trip_through_bindings() {
        for key in [
            Key::Char('z'),
            Key::Char('+'),
            Key::Escape,
            Key::Return,
            Key::Delete,
            Key::Space,
        ] {
            let name = key.binding_name().unwrap();
            assert_eq!(Key::from_name(&name), key);
        }
    }

    #[test]
    fn modifiers_never_bind() {
        assert_eq!(Key::Ctrl.binding_name(), None);
        assert_eq!(Key::from_name("Hyper"), Key::Unknown);
    }
}
