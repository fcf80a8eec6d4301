//! Cairo-based rendering functions for strokes, erasing and text.

use super::color::Color;
use super::font::FontDescriptor;
use crate::input::BrushShape;
use crate::util::{Point, Rect};

/// Fills the whole context with a solid board color.
///
/// Used when compositing the transparent surface for export; the live
/// surface itself stays transparent so erasing always reveals the board.
pub fn render_board_background(ctx: &cairo::Context, color: Color) {
    color.set_source(ctx);
    let _ = ctx.paint(); // Ignore errors - if paint fails, we'll just have transparent bg
}

/// Strokes one pen segment from `from` to `to`.
///
/// Freehand strokes are rendered incrementally, one segment per pointer move.
/// A zero-length segment still leaves a dot with round or square caps.
pub fn stroke_segment(
    ctx: &cairo::Context,
    from: Point,
    to: Point,
    color: Color,
    width: f64,
    brush: BrushShape,
) {
    color.set_source(ctx);
    ctx.set_line_width(width);
    ctx.set_line_cap(brush.line_cap());
    ctx.set_line_join(brush.line_join());

    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    let _ = ctx.stroke();
}

/// Clears an axis-aligned `size` x `size` square centered on `center`.
///
/// Pixels become fully transparent; no blending and no antialiasing.
pub fn erase_square(ctx: &cairo::Context, center: Point, size: f64) {
    let Some(rect) = Rect::centered_square(center, size) else {
        return;
    };

    ctx.save().ok();
    ctx.set_operator(cairo::Operator::Clear);
    ctx.set_antialias(cairo::Antialias::None);
    ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
    let _ = ctx.fill();
    ctx.restore().ok();
}

/// Clears the entire surface to transparent.
pub fn clear_surface(ctx: &cairo::Context) {
    ctx.save().ok();
    ctx.set_operator(cairo::Operator::Clear);
    let _ = ctx.paint();
    ctx.restore().ok();
}

/// Renders text with its first baseline at `anchor` using Pango.
///
/// Text containing newline characters is laid out across multiple lines
/// with spacing from the font metrics.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `anchor` - Baseline start of the first line
/// * `text` - Text content to render
/// * `color` - Fill color
/// * `size` - Font size in pixels
/// * `font_descriptor` - Font configuration (family, weight, style)
pub fn render_text(
    ctx: &cairo::Context,
    anchor: Point,
    text: &str,
    color: Color,
    size: f64,
    font_descriptor: &FontDescriptor,
) {
    ctx.save().ok();

    // Gray antialiasing; subpixel fringes on a transparent surface
    ctx.set_antialias(cairo::Antialias::Gray);

    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&font_descriptor.to_pango_string(size));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);

    // Pango positions layouts by their top-left corner
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    ctx.move_to(anchor.x, anchor.y - baseline);

    color.set_source(ctx);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, Surface};

    #[test]
    fn erase_square_clears_only_the_square() {
        let mut surface = Surface::new(20, 20).unwrap();
        {
            let ctx = surface.context().unwrap();
            render_board_background(&ctx, BLACK);
            erase_square(&ctx, Point::new(10.0, 10.0), 4.0);
        }
        let snapshot = surface.capture().unwrap();
        assert_eq!(snapshot.alpha(8, 8), Some(0));
        assert_eq!(snapshot.alpha(11, 11), Some(0));
        assert_eq!(snapshot.alpha(12, 12), Some(255));
        assert_eq!(snapshot.alpha(7, 10), Some(255));
    }

    #[test]
    fn stroke_segment_marks_pixels_along_the_line() {
        let mut surface = Surface::new(40, 40).unwrap();
        {
            let ctx = surface.context().unwrap();
            stroke_segment(
                &ctx,
                Point::new(5.0, 20.0),
                Point::new(35.0, 20.0),
                BLACK,
                4.0,
                BrushShape::Round,
            );
        }
        let snapshot = surface.capture().unwrap();
        assert_eq!(snapshot.alpha(20, 20), Some(255));
        assert_eq!(snapshot.alpha(20, 5), Some(0));
    }

    #[test]
    fn clear_surface_blanks_everything() {
        let mut surface = Surface::new(10, 10).unwrap();
        {
            let ctx = surface.context().unwrap();
            render_board_background(&ctx, BLACK);
            clear_surface(&ctx);
        }
        assert!(surface.capture().unwrap().is_blank());
    }
}
