//! PNG export of the whiteboard surface.

use crate::config::ExportConfig;
use crate::draw::{Color, Surface, render_board_background};
use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while exporting the surface.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Invalid filename template '{0}'")]
    InvalidTemplate(String),
}

/// Returns true if every chrono specifier in `template` is recognized.
pub fn is_valid_filename_template(template: &str) -> bool {
    !StrftimeItems::new(template).any(|item| matches!(item, Item::Error))
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "png")
///
/// # Errors
/// Returns [`ExportError::InvalidTemplate`] for unknown specifiers like `%Q`.
pub fn generate_filename(template: &str, format: &str) -> Result<String, ExportError> {
    let invalid = || ExportError::InvalidTemplate(template.to_string());
    if !is_valid_filename_template(template) {
        return Err(invalid());
    }

    let mut filename = String::new();
    write!(filename, "{}.{}", Local::now().format(template), format).map_err(|_| invalid())?;
    Ok(filename)
}

/// Ensure the export directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Writes the surface to `path` as a PNG.
///
/// With a `background`, the transparent surface is composited over that
/// board color first, so erased areas come out as board rather than alpha.
pub fn write_png(
    surface: &Surface,
    background: Option<Color>,
    path: &Path,
) -> Result<(), ExportError> {
    let output = cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        surface.width(),
        surface.height(),
    )?;

    {
        let ctx = cairo::Context::new(&output)?;
        if let Some(color) = background {
            render_board_background(&ctx, color);
        }
        ctx.set_source_surface(surface.image(), 0.0, 0.0)?;
        ctx.paint()?;
    }

    let mut file = fs::File::create(path)?;
    output.write_to_png(&mut file)?;

    log::info!(
        "Exported {}x{} surface to {}",
        surface.width(),
        surface.height(),
        path.display()
    );
    Ok(())
}

/// Saves the surface into the configured export directory.
///
/// # Returns
/// Path to the saved file
pub fn save_to_directory(
    surface: &Surface,
    background: Color,
    config: &ExportConfig,
) -> Result<PathBuf, ExportError> {
    let filename = generate_filename(&config.filename_template, "png")?;
    let directory = ensure_directory_exists(&expand_tilde(&config.save_directory))?;
    let file_path = directory.join(filename);

    let background = config.flatten.then_some(background);
    write_png(surface, background, &file_path)?;

    Ok(file_path)
}
