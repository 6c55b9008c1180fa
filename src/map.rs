//! Point-cloud map rendering.
//!
//! [`MapRenderer::render`] paints one frame: background, every in-window
//! point as a small square in a centred Y-up coordinate system, then the
//! origin marker in raw pixel space.
//!
//! Pixel convention: a point whose scaled coordinates floor to `(fx, fy)`
//! covers raster columns `W/2 + fx .. W/2 + fx + 2` and rows
//! `H/2 - fy - 2 .. H/2 - fy`, so raster pixel `(W/2 + fx, H/2 - fy - 1)`
//! is always painted. Edges falling on half pixels (odd dimensions) round up.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::points::Point;
use crate::rendering::paint::Color;
use crate::rendering::surface::Surface;

pub const BACKGROUND: Color = Color::rgb(0x0b, 0x0f, 0x1a);
pub const ACCENT: Color = Color::rgb(0x66, 0x66, 0xee);
pub const MARKER: Color = Color::rgb(0x00, 0xff, 0x00);

/// Raw units per logical unit
pub const SCALE: f64 = 10.0;
/// Half-width of the clip window, in logical units
pub const CLIP_BOUND: f64 = 200.0;
pub const POINT_SIZE: u32 = 2;
pub const MARKER_SIZE: u32 = 6;

/// Renderer configuration
///
/// The defaults reproduce the robot's map view exactly. Every field is
/// optional when deserialising, so a config file only needs the overrides.
///
/// ```
/// let cfg = lidarmap::RenderConfig::default();
/// assert_eq!(cfg.scale, 10.0);
/// assert_eq!(cfg.marker.to_hex(), "#00ff00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Fill for the whole surface
    pub background: Color,
    /// Point color
    pub accent: Color,
    /// Origin marker color
    pub marker: Color,
    /// Divisor applied to raw coordinates
    pub scale: f64,
    /// Points with |x| or |y| beyond this (after scaling) are dropped
    pub clip_bound: f64,
    /// Point square edge, in logical units
    pub point_size: u32,
    /// Marker square edge, in pixels
    pub marker_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: BACKGROUND,
            accent: ACCENT,
            marker: MARKER,
            scale: SCALE,
            clip_bound: CLIP_BOUND,
            point_size: POINT_SIZE,
            marker_size: MARKER_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "scale must be finite and positive, got {}",
                self.scale
            )));
        }
        if !self.clip_bound.is_finite() || self.clip_bound < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "clip_bound must be finite and non-negative, got {}",
                self.clip_bound
            )));
        }
        if self.point_size == 0 || self.marker_size == 0 {
            return Err(Error::InvalidArgument(
                "point_size and marker_size must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Load a JSON config file; missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let cfg: RenderConfig = serde_json::from_str(&text)
            .map_err(|e| Error::InvalidArgument(format!("config: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Outcome of a render call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Points painted
    pub drawn: usize,
    /// Points dropped by the clip window (including non-finite ones)
    pub clipped: usize,
}

/// Paints point clouds onto caller-owned surfaces.
#[derive(Debug, Clone, Default)]
pub struct MapRenderer {
    config: RenderConfig,
}

impl MapRenderer {
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Paint one frame onto `surface`. `None` points render like an empty list.
    ///
    /// Infallible: the config was checked by [`MapRenderer::new`] and the
    /// default is valid, and out-of-range input is clipped rather than rejected.
    pub fn render<S: Surface>(&self, surface: &mut S, points: Option<&[Point]>) -> RenderStats {
        let cfg = &self.config;

        let mut ctx = surface.begin_draw();
        let size = ctx.size();
        let (cx, cy) = (f64::from(size.width) / 2.0, f64::from(size.height) / 2.0);
        let mut stats = RenderStats::default();

        ctx.fill_all(cfg.background);
        {
            let mut logical = ctx.save();
            logical.translate(cx, cy);
            logical.scale(1.0, -1.0);

            let side = f64::from(cfg.point_size);
            for p in points.unwrap_or_default() {
                let (x, y) = (p.x / cfg.scale, p.y / cfg.scale);
                if !p.is_finite() {
                    log::warn!("skipping non-finite point ({}, {})", p.x, p.y);
                    stats.clipped += 1;
                    continue;
                }
                if x.abs() > cfg.clip_bound || y.abs() > cfg.clip_bound {
                    log::trace!("clipped point ({}, {})", p.x, p.y);
                    stats.clipped += 1;
                    continue;
                }
                logical.fill_rect(x.floor(), y.floor(), side, side, cfg.accent);
                stats.drawn += 1;
            }
        }

        let half = f64::from(cfg.marker_size) / 2.0;
        let side = f64::from(cfg.marker_size);
        ctx.fill_rect(cx - half, cy - half, side, side, cfg.marker);

        log::debug!(
            "rendered {}x{} map: {} drawn, {} clipped",
            size.width,
            size.height,
            stats.drawn,
            stats.clipped
        );
        stats
    }
}
