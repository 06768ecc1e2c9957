use image::RgbaImage;
use tracing::debug;

use super::history::StrokeHistory;
use super::render::{self, StrokeView};
use super::stroke::{HexColor, Point, Stroke, Tool};
use crate::error::ColorError;

/// All drawing state for one canvas.
///
/// The in-progress buffer is separate from history until `commit_stroke`;
/// tool and color changes only affect strokes drawn afterwards.
#[derive(Debug, Clone)]
pub struct CanvasSession {
    size: (u32, u32),
    tool: Tool,
    color: HexColor,
    background: HexColor,
    history: StrokeHistory,
    in_progress: Option<Vec<Point>>,
    needs_redraw: bool,
}

impl CanvasSession {
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            tool: Tool::Pen,
            color: HexColor::BLACK,
            background: HexColor::WHITE,
            history: StrokeHistory::new(),
            in_progress: None,
            needs_redraw: true,
        }
    }

    /// Opens a new stroke, abandoning any stroke still open.
    pub fn begin_stroke(&mut self, point: Point) {
        self.in_progress = Some(vec![point]);
    }

    pub fn extend_stroke(&mut self, point: Point) -> bool {
        let Some(path) = self.in_progress.as_mut() else {
            return false;
        };
        path.push(point);
        self.needs_redraw = true;
        true
    }

    /// Closes the open stroke. Returns `true` if it was added to history.
    pub fn commit_stroke(&mut self) -> bool {
        let Some(path) = self.in_progress.take() else {
            return false;
        };
        if path.is_empty() {
            return false;
        }
        debug!(tool = ?self.tool, points = path.len(), "committed stroke");
        self.history.commit(Stroke::new(self.tool, self.color, path));
        self.needs_redraw = true;
        true
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo();
        self.needs_redraw |= changed;
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo();
        self.needs_redraw |= changed;
        changed
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: HexColor) {
        self.color = color;
    }

    pub fn set_background(&mut self, color: HexColor) {
        self.background = color;
        self.needs_redraw = true;
    }

    /// Sets the stroke color from `#rgb` or `#rrggbb`. Invalid input changes nothing.
    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), ColorError> {
        self.set_color(hex.parse()?);
        Ok(())
    }

    pub fn set_background_hex(&mut self, hex: &str) -> Result<(), ColorError> {
        self.set_background(hex.parse()?);
        Ok(())
    }

    /// Clears the surface and replays history, then the open stroke on top.
    pub fn render(&self) -> RgbaImage {
        let committed = self.history.committed().iter().map(|s| StrokeView {
            tool: s.tool(),
            color: s.color(),
            path: s.path(),
        });
        let open = self.in_progress.as_deref().map(|path| StrokeView {
            tool: self.tool,
            color: self.color,
            path,
        });
        render::render(self.size, self.background, committed.chain(open))
    }

    /// Whether anything changed since the last call. Resets the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Forces the next `take_redraw` to report a change.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn is_drawing(&self) -> bool {
        self.in_progress.is_some()
    }

    pub fn in_progress(&self) -> Option<&[Point]> {
        self.in_progress.as_deref()
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> HexColor {
        self.color
    }

    pub fn background(&self) -> HexColor {
        self.background
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}
