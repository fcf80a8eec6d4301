//! Replay scripts: TOML gesture lists fed to a [`Whiteboard`].
//!
//! A script is a list of `[[step]]` tables, each tagged with an `op`:
//!
//! ```toml
//! [[step]]
//! op = "color"
//! color = "#1f6feb"
//!
//! [[step]]
//! op = "stroke"
//! points = [[10, 10], [50, 50], [90, 20]]
//!
//! [[step]]
//! op = "text"
//! x = 20
//! y = 60
//! text = "hello"
//!
//! [[step]]
//! op = "key"
//! binding = "Ctrl+Z"
//! ```

use crate::config::{ColorSpec, KeyBinding};
use crate::input::{BrushShape, Key, Tool, Whiteboard, WhiteboardEvent};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Step {index}: {message}")]
    InvalidStep { index: usize, message: String },
}

/// One host interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Pointer press
    Down { x: f64, y: f64 },
    /// Pointer motion
    Move { x: f64, y: f64 },
    /// Pointer release
    Up,
    /// Press, move through every point, release
    Stroke { points: Vec<[f64; 2]> },
    /// Press at (x, y) in text mode, then submit `text`
    Text { x: f64, y: f64, text: String },
    /// Submit text for an already pending anchor
    CommitText { text: String },
    /// Abandon a pending text placement
    CancelText,
    Undo,
    Redo,
    Clear,
    Tool { tool: Tool },
    Brush { brush: BrushShape },
    Color { color: ColorSpec },
    Size { size: f64 },
    FontSize { size: f64 },
    /// Press a keybinding chord such as "Ctrl+Shift+Z"
    Key { binding: String },
    /// Report host text-field focus
    Focus { focused: bool },
}

/// A parsed replay script.
#[derive(Debug, Default, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub step: Vec<Step>,
}

/// Totals gathered while replaying.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub history_changes: usize,
    pub text_requests: usize,
}

impl ReplayScript {
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let source = fs::read_to_string(path)?;
        let script = Self::parse(&source)?;
        log::info!(
            "Loaded {} script steps from {}",
            script.step.len(),
            path.display()
        );
        Ok(script)
    }

    /// Feeds every step to `board` in order.
    ///
    /// Stops at the first malformed step; earlier steps stay applied.
    pub fn apply(&self, board: &mut Whiteboard) -> Result<ReplaySummary, ScriptError> {
        let mut summary = ReplaySummary::default();

        for (index, step) in self.step.iter().enumerate() {
            apply_step(board, step).map_err(|message| ScriptError::InvalidStep {
                index: index + 1,
                message,
            })?;
            summary.steps += 1;

            for event in board.take_events() {
                match event {
                    WhiteboardEvent::HistoryChanged {
                        undo_available,
                        redo_available,
                    } => {
                        summary.history_changes += 1;
                        log::info!(
                            "Step {}: history at {}/{} (undo: {}, redo: {})",
                            index + 1,
                            board.history().cursor() + 1,
                            board.history().len(),
                            undo_available,
                            redo_available
                        );
                    }
                    WhiteboardEvent::TextInputRequested { x, y } => {
                        summary.text_requests += 1;
                        log::debug!("Step {}: text requested at ({}, {})", index + 1, x, y);
                    }
                    WhiteboardEvent::SizeChanged(size) => {
                        log::debug!("Step {}: size {:.0}px", index + 1, size);
                    }
                    WhiteboardEvent::FontSizeChanged(size) => {
                        log::debug!("Step {}: font size {:.0}px", index + 1, size);
                    }
                }
            }
        }

        Ok(summary)
    }
}

fn apply_step(board: &mut Whiteboard, step: &Step) -> Result<(), String> {
    match step {
        Step::Down { x, y } => board.on_pointer_down(*x, *y),
        Step::Move { x, y } => board.on_pointer_move(*x, *y),
        Step::Up => board.on_pointer_up(),
        Step::Stroke { points } => {
            let Some(([x, y], rest)) = points.split_first() else {
                return Err("stroke needs at least one point".to_string());
            };
            board.on_pointer_down(*x, *y);
            for [x, y] in rest {
                board.on_pointer_move(*x, *y);
            }
            board.on_pointer_up();
        }
        Step::Text { x, y, text } => {
            if !board.is_text_mode() {
                board.set_tool(Tool::Text);
            }
            board.on_pointer_down(*x, *y);
            board.commit_text(text);
        }
        Step::CommitText { text } => {
            board.commit_text(text);
        }
        Step::CancelText => board.cancel_text(),
        Step::Undo => {
            board.undo();
        }
        Step::Redo => {
            board.redo();
        }
        Step::Clear => {
            board.clear_canvas();
        }
        Step::Tool { tool } => board.set_tool(*tool),
        Step::Brush { brush } => board.set_brush_shape(*brush),
        Step::Color { color } => board.set_color(color.to_color()),
        Step::Size { size } => board.set_size(*size),
        Step::FontSize { size } => board.set_font_size(*size),
        Step::Key { binding } => press_binding(board, binding)?,
        Step::Focus { focused } => board.set_text_entry_focused(*focused),
    }
    Ok(())
}

/// Presses the modifiers of `binding`, then its key, then releases them.
fn press_binding(board: &mut Whiteboard, binding: &str) -> Result<(), String> {
    let binding = KeyBinding::parse(binding)?;
    let key = Key::from_name(&binding.key);
    if key == Key::Unknown {
        return Err(format!("unknown key '{}'", binding.key));
    }

    let modifiers: Vec<Key> = [
        (binding.ctrl, Key::Ctrl),
        (binding.shift, Key::Shift),
        (binding.alt, Key::Alt),
    ]
    .into_iter()
    .filter_map(|(held, key)| held.then_some(key))
    .collect();

    for modifier in &modifiers {
        board.on_key_press(*modifier);
    }
    board.on_key_press(key);
    for modifier in &modifiers {
        board.on_key_release(*modifier);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    fn board() -> Whiteboard {
        Whiteboard::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn parses_tagged_steps() {
        let script = ReplayScript::parse(
            r##"
            [[step]]
            op = "stroke"
            points = [[10, 10], [50, 50]]

            [[step]]
            op = "color"
            color = "#ff0000"

            [[step]]
            op = "tool"
            tool = "eraser"

            [[step]]
            op = "undo"
            "##,
        )
        .unwrap();

        assert_eq!(
            script.step,
            vec![
                Step::Stroke {
                    points: vec![[10.0, 10.0], [50.0, 50.0]]
                },
                Step::Color {
                    color: ColorSpec::Name("#ff0000".to_string())
                },
                Step::Tool { tool: Tool::Eraser },
                Step::Undo,
            ]
        );
    }

    #[test]
    fn unknown_op_is_a_parse_error() {
        let err = ReplayScript::parse("[[step]]\nop = \"teleport\"\n").unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn replay_records_one_snapshot_per_gesture() {
        let script = ReplayScript::parse(
            r#"
            [[step]]
            op = "stroke"
            points = [[10, 10], [40, 10], [40, 40]]

            [[step]]
            op = "text"
            x = 20
            y = 70
            text = "hi"

            [[step]]
            op = "key"
            binding = "Ctrl+Z"
            "#,
        )
        .unwrap();

        let mut board = board();
        let summary = script.apply(&mut board).unwrap();

        assert_eq!(summary.steps, 3);
        assert_eq!(summary.history_changes, 3);
        assert_eq!(summary.text_requests, 1);
        assert_eq!(board.history().len(), 3);
        assert_eq!(board.history().cursor(), 1);
    }

    #[test]
    fn focused_text_entry_swallows_key_steps() {
        let script = ReplayScript::parse(
            r#"
            [[step]]
            op = "stroke"
            points = [[10, 10], [40, 10]]

            [[step]]
            op = "focus"
            focused = true

            [[step]]
            op = "key"
            binding = "Ctrl+Z"
            "#,
        )
        .unwrap();

        let mut board = board();
        script.apply(&mut board).unwrap();
        assert_eq!(board.history().cursor(), 1);
    }

    #[test]
    fn empty_stroke_reports_step_number() {
        let script = ReplayScript::parse(
            r#"
            [[step]]
            op = "undo"

            [[step]]
            op = "stroke"
            points = []
            "#,
        )
        .unwrap();

        let err = script.apply(&mut board()).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidStep { index: 2, .. }));
    }

    #[test]
    fn unknown_key_in_binding_is_rejected() {
        let script = ReplayScript {
            step: vec![Step::Key {
                binding: "Ctrl+Hyper".to_string(),
            }],
        };
        let err = script.apply(&mut board()).unwrap_err();
        assert!(err.to_string().contains("Hyper"));
    }
}
