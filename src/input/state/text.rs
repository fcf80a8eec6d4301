use crate::draw::render_text;

use super::{DrawingState, Whiteboard};

impl Whiteboard {
    /// Renders `text` at the pending anchor and commits it as one edit.
    ///
    /// Surrounding whitespace is trimmed. Empty input is an abandonment: no
    /// pixels change, nothing is committed and the anchor stays pending so
    /// the host can prompt again. Without a pending anchor nothing happens.
    ///
    /// Returns `true` if the text was placed.
    pub fn commit_text(&mut self, text: &str) -> bool {
        let DrawingState::TextPending { anchor } = self.state else {
            log::warn!("Text submitted without a placement anchor; ignoring");
            return false;
        };

        let text = text.trim();
        if text.is_empty() {
            log::debug!("Empty text submitted; nothing placed");
            return false;
        }

        let color = self.tool_state.color;
        let size = self.tool_state.font_size;
        let font = self.tool_state.font.clone();
        self.paint(|ctx| render_text(ctx, anchor, text, color, size, &font));

        self.state = DrawingState::Idle;
        log::debug!(
            "Placed {} chars of text at ({:.0}, {:.0})",
            text.chars().count(),
            anchor.x,
            anchor.y
        );
        self.commit()
    }

    /// Drops a pending text placement without touching the surface.
    pub fn cancel_text(&mut self) {
        if matches!(self.state, DrawingState::TextPending { .. }) {
            self.state = DrawingState::Idle;
        }
    }
}
