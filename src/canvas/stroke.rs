use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tool {
    #[default]
    Pen,
    Highlight,
    Erase,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Pen, Tool::Highlight, Tool::Erase];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Pen => "✏ Pen",
            Tool::Highlight => "🖍 Highlight",
            Tool::Erase => "🧽 Erase",
        }
    }
}

/// An opaque sRGB color written as `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub const BLACK: HexColor = HexColor([0, 0, 0]);
    pub const WHITE: HexColor = HexColor([255, 255, 255]);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn rgb(self) -> [u8; 3] {
        self.0
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::Invalid(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let mut rgb = [0; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = channel(&c.to_string())?;
                    rgb[i] = v * 17;
                }
                Ok(Self(rgb))
            }
            6 => Ok(Self([
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ])),
            _ => Err(invalid()),
        }
    }
}

impl From<[u8; 3]> for HexColor {
    fn from(rgb: [u8; 3]) -> Self {
        Self(rgb)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Pixel coordinates relative to the canvas' top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A committed stroke. Fields are private so history entries cannot be edited.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    tool: Tool,
    color: HexColor,
    path: Vec<Point>,
}

impl Stroke {
    pub fn new(tool: Tool, color: HexColor, path: Vec<Point>) -> Self {
        Self { tool, color, path }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> HexColor {
        self.color
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }
}
