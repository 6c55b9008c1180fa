//! Rendering module: surfaces, paint primitives and the in-memory raster.

pub mod paint;
pub mod raster;
pub mod surface;

pub use paint::{Color, DisplayList, PaintCommand, PixelRect};
pub use raster::Raster;
pub use surface::{DrawContext, Surface, Transform, TransformScope};

// Encoded output of a rendered raster.

#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    pub fn empty(width: u32, height: u32) -> Self {
        Self { width, height, png_data: Vec::new() }
    }

    /// `data:image/png;base64,...` form, for dropping straight into an `<img>`.
    #[cfg(feature = "png")]
    pub fn to_data_url(&self) -> String {
        use base64::Engine as _;
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png_data)
        )
    }
}
