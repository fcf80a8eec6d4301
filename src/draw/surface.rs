//! The single raster drawing target and its snapshot capture/restore.

use super::history::Snapshot;
use thiserror::Error;

/// Errors raised while allocating or copying the drawing surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid surface size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface pixels are borrowed elsewhere: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Snapshot is {found_width}x{found_height} but surface is {width}x{height}")]
    SizeMismatch {
        width: i32,
        height: i32,
        found_width: i32,
        found_height: i32,
    },
}

/// Fixed-size ARGB32 raster owned by one whiteboard.
///
/// Drawing goes through short-lived Cairo contexts obtained from
/// [`Surface::context`]; a context must be dropped before the pixels can be
/// captured or restored, since Cairo only hands out the pixel buffer to an
/// exclusive owner.
pub struct Surface {
    image: cairo::ImageSurface,
}

impl Surface {
    /// Allocates a fully transparent surface.
    pub fn new(width: i32, height: i32) -> Result<Self, SurfaceError> {
        if width <= 0 || height <= 0 {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        let image = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        Ok(Self { image })
    }

    pub fn width(&self) -> i32 {
        self.image.width()
    }

    pub fn height(&self) -> i32 {
        self.image.height()
    }

    /// Creates a drawing context targeting this surface.
    pub fn context(&self) -> Result<cairo::Context, cairo::Error> {
        cairo::Context::new(&self.image)
    }

    /// Borrows the underlying Cairo surface (used for compositing on export).
    pub fn image(&self) -> &cairo::ImageSurface {
        &self.image
    }

    /// Copies the current pixels into a new, independent [`Snapshot`].
    pub fn capture(&mut self) -> Result<Snapshot, SurfaceError> {
        let width = self.image.width();
        let height = self.image.height();
        let stride = self.image.stride();
        let data = self.image.data()?;
        Ok(Snapshot::new(width, height, stride, data.to_vec()))
    }

    /// Overwrites every pixel with the contents of `snapshot`.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SurfaceError> {
        let width = self.image.width();
        let height = self.image.height();
        if snapshot.width() != width
            || snapshot.height() != height
            || snapshot.stride() != self.image.stride()
        {
            return Err(SurfaceError::SizeMismatch {
                width,
                height,
                found_width: snapshot.width(),
                found_height: snapshot.height(),
            });
        }

        let mut data = self.image.data()?;
        data.copy_from_slice(snapshot.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(matches!(
            Surface::new(0, 10),
            Err(SurfaceError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn capture_is_a_copy_not_a_view() {
        let mut surface = Surface::new(8, 8).unwrap();
        let before = surface.capture().unwrap();

        {
            let ctx = surface.context().unwrap();
            ctx.set_source_rgba(1.0, 0.0, 0.0, 1.0);
            ctx.paint().unwrap();
        }

        let after = surface.capture().unwrap();
        assert!(before.is_blank());
        assert!(!after.is_blank());

        surface.restore(&before).unwrap();
        assert_eq!(surface.capture().unwrap(), before);
    }

    #[test]
    fn restore_rejects_foreign_snapshot() {
        let mut small = Surface::new(4, 4).unwrap();
        let mut large = Surface::new(16, 16).unwrap();
        let snapshot = large.capture().unwrap();
        assert!(matches!(
            small.restore(&snapshot),
            Err(SurfaceError::SizeMismatch { .. })
        ));
    }
}
