/// In-memory RGBA8 raster surface

use sha2::{Digest, Sha256};

use crate::rendering::paint::{Color, PixelRect};
use crate::rendering::surface::Surface;
use crate::Viewport;

/// Row-major RGBA8 pixel buffer, top-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Create a transparent-black raster. Zero dimensions give an empty buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    pub fn from_viewport(viewport: Viewport) -> Self {
        Self::new(viewport.width, viewport.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        let p = &self.pixels[i..i + 4];
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Number of pixels exactly equal to `color`
    pub fn count(&self, color: Color) -> usize {
        let needle = color.to_bytes();
        self.pixels.chunks_exact(4).filter(|p| *p == needle).count()
    }

    /// Hex SHA-256 of the raw pixel buffer, prefixed by the dimensions.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_be_bytes());
        hasher.update(self.height.to_be_bytes());
        hasher.update(&self.pixels);
        hex::encode(hasher.finalize())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Encode as PNG. A zero-area raster yields an empty screenshot.
    #[cfg(feature = "png")]
    pub fn to_png(&self) -> crate::Result<crate::rendering::Screenshot> {
        use crate::rendering::Screenshot;

        if self.width == 0 || self.height == 0 {
            return Ok(Screenshot::empty(self.width, self.height));
        }
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
            writer.finish()?;
        }
        log::debug!(
            "encoded {}x{} raster to {} PNG bytes",
            self.width,
            self.height,
            out.len()
        );
        Ok(Screenshot {
            width: self.width,
            height: self.height,
            png_data: out,
        })
    }
}

impl Surface for Raster {
    fn size(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let Some(r) = rect.clip_to(self.size()) else {
            return;
        };
        let px = color.to_bytes();
        let (x0, x1) = (r.x as u32, r.x as u32 + r.width);
        for y in r.y as u32..r.y as u32 + r.height {
            let start = self.index(x0, y);
            let end = self.index(x1, y);
            for chunk in self.pixels[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&px);
            }
        }
    }

    fn fill_all(&mut self, color: Color) {
        let px = color.to_bytes();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }
}
