//! Paint primitives: colors, pixel rects and a recorded display list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::rendering::surface::Surface;
use crate::Viewport;

/// An opaque-by-default RGBA8 color.
///
/// Serialises as a CSS hex string so config files can say `"#0b0f1a"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let digits = s.trim().trim_start_matches('#');
        let bad = || Error::InvalidArgument(format!("not a hex color: {:?}", s));
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        let parsed = match digits.len() {
            3 => (nibble(0), nibble(1), nibble(2), Ok(255)),
            4 => (nibble(0), nibble(1), nibble(2), nibble(3)),
            6 => (byte(0), byte(2), byte(4), Ok(255)),
            8 => (byte(0), byte(2), byte(4), byte(6)),
            _ => return Err(bad()),
        };
        match parsed {
            (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Self { r, g, b, a }),
            _ => Err(bad()),
        }
    }

    /// Lower-case `#rrggbb`, with an alpha byte appended only when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_tuple(self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// Integer rectangle in raster space (top-left origin, y down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Intersect with the `0..width, 0..height` area of a surface.
    pub fn clip_to(&self, size: Viewport) -> Option<PixelRect> {
        let x0 = i64::from(self.x).max(0);
        let y0 = i64::from(self.y).max(0);
        let x1 = (i64::from(self.x) + i64::from(self.width)).min(i64::from(size.width));
        let y1 = (i64::from(self.y) + i64::from(self.height)).min(i64::from(size.height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(PixelRect {
            x: x0 as i32,
            y: y0 as i32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// Very small paint command set
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    Clear {
        rgba: (u8, u8, u8, u8),
    },
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: (u8, u8, u8, u8),
    },
}

/// A surface that records what would have been painted instead of touching pixels.
///
/// Rects are stored already clipped to the surface; fully clipped fills are dropped.
#[derive(Debug, Clone)]
pub struct DisplayList {
    size: Viewport,
    commands: Vec<PaintCommand>,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Viewport { width, height },
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Paint the recorded commands onto another surface, in order.
    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S) {
        for cmd in &self.commands {
            match *cmd {
                PaintCommand::Clear { rgba: (r, g, b, a) } => {
                    target.fill_all(Color::rgba(r, g, b, a))
                }
                PaintCommand::SolidRect {
                    x,
                    y,
                    width,
                    height,
                    rgba: (r, g, b, a),
                } => target.fill_rect(PixelRect::new(x, y, width, height), Color::rgba(r, g, b, a)),
            }
        }
    }
}

impl Surface for DisplayList {
    fn size(&self) -> Viewport {
        self.size
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        if let Some(r) = rect.clip_to(self.size) {
            self.commands.push(PaintCommand::SolidRect {
                x: r.x,
                y: r.y,
                width: r.width,
                height: r.height,
                rgba: color.to_tuple(),
            });
        }
    }

    fn fill_all(&mut self, color: Color) {
        self.commands.push(PaintCommand::Clear {
            rgba: color.to_tuple(),
        });
    }
}
