//! lidarmap
//!
//! Headless rendering of 2D lidar point clouds into bitmap maps.
//!
//! Points arrive as raw `(x, y)` pairs centred on the sensor. The renderer
//! scales them down, flips Y so positive values go up the screen, drops
//! anything outside a fixed window and paints the rest as small squares on
//! a dark background, with a marker at the origin.
//!
//! # Example
//!
//! ```
//! use lidarmap::{MapRenderer, Point, Raster};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut raster = Raster::new(400, 400);
//! let points = [Point::new(0.0, 0.0), Point::new(3000.0, 0.0)];
//! let stats = MapRenderer::default().render(&mut raster, Some(&points));
//! assert_eq!(stats.drawn, 1);
//! assert_eq!(stats.clipped, 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod map;
pub mod points;
pub mod rendering;
pub mod scan;

pub use map::{MapRenderer, RenderConfig, RenderStats};
pub use points::Point;
pub use rendering::{Color, Raster, Screenshot, Surface};

/// Surface dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
        }
    }
}

/// Render `points` onto a fresh raster of the given size.
pub fn render_map(
    config: &RenderConfig,
    viewport: Viewport,
    points: Option<&[Point]>,
) -> Result<(Raster, RenderStats)> {
    let renderer = MapRenderer::new(config.clone())?;
    let mut raster = Raster::from_viewport(viewport);
    let stats = renderer.render(&mut raster, points);
    Ok((raster, stats))
}
