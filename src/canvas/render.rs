//! Full-replay rasterizer.
//!
//! Every frame starts from a background fill and redraws every stroke; there
//! is no cached layer. Segments are Bresenham lines stamped with a disc of the
//! stroke's width, which also gives round caps and joins.

use image::{ImageBuffer, Rgba, RgbaImage};

use super::stroke::{HexColor, Point, Tool};

pub const PEN_WIDTH: u32 = 2;
pub const HIGHLIGHT_WIDTH: u32 = 10;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

pub fn line_width(tool: Tool) -> u32 {
    match tool {
        Tool::Highlight => HIGHLIGHT_WIDTH,
        Tool::Pen | Tool::Erase => PEN_WIDTH,
    }
}

/// A stroke to draw, committed or still in progress.
#[derive(Debug, Clone, Copy)]
pub struct StrokeView<'a> {
    pub tool: Tool,
    pub color: HexColor,
    pub path: &'a [Point],
}

pub fn render<'a>(
    (width, height): (u32, u32),
    background: HexColor,
    strokes: impl IntoIterator<Item = StrokeView<'a>>,
) -> RgbaImage {
    let [r, g, b] = background.rgb();
    let mut img: RgbaImage = ImageBuffer::from_pixel(width, height, Rgba([r, g, b, 255]));
    for stroke in strokes {
        draw_stroke(&mut img, stroke);
    }
    img
}

fn draw_stroke(img: &mut RgbaImage, stroke: StrokeView<'_>) {
    // a single point has no segment to draw
    if stroke.path.len() < 2 {
        return;
    }
    let pixel = match stroke.tool {
        Tool::Erase => TRANSPARENT,
        Tool::Pen | Tool::Highlight => {
            let [r, g, b] = stroke.color.rgb();
            Rgba([r, g, b, 255])
        }
    };
    let radius = (line_width(stroke.tool) / 2) as i32;
    // anything farther out than this cannot reach a pixel
    let margin = f64::from(radius + 1);
    let (w, h) = img.dimensions();
    let bounds = (-margin, -margin, f64::from(w) + margin, f64::from(h) + margin);
    for segment in stroke.path.windows(2) {
        let Some((from, to)) = clip_segment(segment[0], segment[1], bounds) else {
            continue;
        };
        draw_line(img, to_pixel(from), to_pixel(to), pixel, radius);
    }
}

/// Liang-Barsky clip of `a..b` to `(min_x, min_y, max_x, max_y)`.
///
/// Works in f64 so endpoints far off the surface keep their direction, and
/// returns `None` for segments that miss the box or have non-finite ends.
fn clip_segment(
    a: Point,
    b: Point,
    (min_x, min_y, max_x, max_y): (f64, f64, f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (ax, ay) = (f64::from(a.x), f64::from(a.y));
    let (bx, by) = (f64::from(b.x), f64::from(b.y));
    if ![ax, ay, bx, by].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (dx, dy) = (bx - ax, by - ay);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, ax - min_x), (dx, max_x - ax), (-dy, ay - min_y), (dy, max_y - ay)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }
    Some(((ax + t0 * dx, ay + t0 * dy), (ax + t1 * dx, ay + t1 * dy)))
}

fn to_pixel((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn draw_line(img: &mut RgbaImage, (x0, y0): (i32, i32), (x1, y1): (i32, i32), pixel: Rgba<u8>, radius: i32) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        stamp(img, x, y, pixel, radius);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

fn stamp(img: &mut RgbaImage, cx: i32, cy: i32, pixel: Rgba<u8>, radius: i32) {
    let (w, h) = img.dimensions();
    for oy in -radius..=radius {
        for ox in -radius..=radius {
            if ox * ox + oy * oy > radius * radius {
                continue;
            }
            let (px, py) = (cx + ox, cy + oy);
            if px >= 0 && py >= 0 && (px as u32) < w && (py as u32) < h {
                img.put_pixel(px as u32, py as u32, pixel);
            }
        }
    }
}
