use crate::draw::{erase_square, stroke_segment};
use crate::input::{Tool, WhiteboardEvent};
use crate::util::Point;

use super::{DrawingState, Whiteboard};

impl Whiteboard {
    /// Processes a pointer press at surface coordinates (x, y).
    ///
    /// # Behavior
    /// - Text tool: anchors a text placement and asks the host for content
    /// - Pen: starts a path at the position without painting
    /// - Eraser: erases once at the position immediately
    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        let position = Point::new(x, y);

        if let DrawingState::Drawing { tool, .. } = self.state {
            // The release for the previous gesture never arrived
            log::debug!(
                "Abandoning uncommitted {} gesture on new press",
                tool.label()
            );
        }

        match self.tool_state.tool {
            Tool::Text => {
                self.state = DrawingState::TextPending { anchor: position };
                self.emit(WhiteboardEvent::TextInputRequested { x, y });
            }
            Tool::Pen => {
                self.state = DrawingState::Drawing {
                    tool: Tool::Pen,
                    last: position,
                };
            }
            Tool::Eraser => {
                self.state = DrawingState::Drawing {
                    tool: Tool::Eraser,
                    last: position,
                };
                self.paint_at(Tool::Eraser, position, position);
            }
        }
    }

    /// Processes pointer motion. Paints only while a drag gesture is held.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        let DrawingState::Drawing { tool, last } = self.state else {
            return;
        };
        if self.is_text_mode() {
            return;
        }

        let position = Point::new(x, y);
        self.paint_at(tool, last, position);
        self.state = DrawingState::Drawing {
            tool,
            last: position,
        };
    }

    /// Processes pointer release: ends the gesture and commits one snapshot.
    pub fn on_pointer_up(&mut self) {
        if let DrawingState::Drawing { tool, .. } = self.state {
            self.state = DrawingState::Idle;
            log::debug!("{} gesture finished", tool.label());
            self.commit();
        }
    }

    /// Paints one step of a drag gesture.
    fn paint_at(&mut self, tool: Tool, from: Point, to: Point) {
        let tool_state = self.tool_state.clone();
        match tool {
            Tool::Pen => self.paint(|ctx| {
                stroke_segment(
                    ctx,
                    from,
                    to,
                    tool_state.color,
                    tool_state.size,
                    tool_state.brush,
                );
            }),
            Tool::Eraser => self.paint(|ctx| erase_square(ctx, to, tool_state.size)),
            Tool::Text => {}
        }
    }
}
