//! Freehand drawing: strokes, undo/redo history and rasterization.

pub mod history;
pub mod render;
pub mod session;
pub mod stroke;

use std::path::Path;

use tracing::info;

use crate::error::ExportError;

pub use history::StrokeHistory;
pub use session::CanvasSession;
pub use stroke::{HexColor, Point, Stroke, Tool};

pub const PNG_FILE_NAME: &str = "drawing.png";

/// Writes the current render as a PNG.
pub fn export_png(canvas: &CanvasSession, path: &Path) -> Result<(), ExportError> {
    canvas
        .render()
        .save_with_format(path, image::ImageFormat::Png)?;
    info!(path = %path.display(), "exported drawing");
    Ok(())
}
