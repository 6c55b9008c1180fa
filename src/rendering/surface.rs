//! Drawing surfaces and the transform-aware drawing context.
//!
//! A [`Surface`] only knows raster space: it fills integer rects and clears
//! itself. [`DrawContext`] layers a 2D affine transform (translate + scale)
//! over a surface so callers can draw in their own coordinate system, and
//! [`TransformScope`] saves that transform and puts it back when dropped.

use std::ops::{Deref, DerefMut};

use crate::rendering::paint::{Color, PixelRect};
use crate::Viewport;

/// A caller-owned raster target.
pub trait Surface {
    /// Dimensions in pixels
    fn size(&self) -> Viewport;

    /// Fill a raster-space rect. Implementations clip to their bounds.
    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    /// Fill the whole surface
    fn fill_all(&mut self, color: Color) {
        let size = self.size();
        self.fill_rect(PixelRect::new(0, 0, size.width, size.height), color);
    }

    /// Acquire a drawing context with an identity transform.
    fn begin_draw(&mut self) -> DrawContext<'_, Self>
    where
        Self: Sized,
    {
        DrawContext::new(self)
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> Viewport {
        (**self).size()
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        (**self).fill_rect(rect, color)
    }

    fn fill_all(&mut self, color: Color) {
        (**self).fill_all(color)
    }
}

/// Axis-aligned affine transform: `p' = (sx * x + tx, sy * y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        sx: 1.0,
        sy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.sx * x + self.tx, self.sy * y + self.ty)
    }

    /// Compose a translation applied before this transform.
    pub fn pre_translate(self, dx: f64, dy: f64) -> Transform {
        Transform {
            tx: self.tx + self.sx * dx,
            ty: self.ty + self.sy * dy,
            ..self
        }
    }

    /// Compose a scale applied before this transform.
    pub fn pre_scale(self, kx: f64, ky: f64) -> Transform {
        Transform {
            sx: self.sx * kx,
            sy: self.sy * ky,
            ..self
        }
    }

    /// Map a rect through the transform and snap its edges to the pixel grid.
    ///
    /// Edges round half-up, the covered span is `[min, max)` on each axis.
    /// Returns `None` when the snapped rect has no area or is not finite.
    pub fn map_rect(&self, x: f64, y: f64, w: f64, h: f64) -> Option<PixelRect> {
        let (ax, ay) = self.apply(x, y);
        let (bx, by) = self.apply(x + w, y + h);
        let snap = |v: f64| (v + 0.5).floor();
        let (left, right) = (snap(ax.min(bx)), snap(ax.max(bx)));
        let (top, bottom) = (snap(ay.min(by)), snap(ay.max(by)));
        if !(left.is_finite() && right.is_finite() && top.is_finite() && bottom.is_finite()) {
            return None;
        }
        if right <= left || bottom <= top {
            return None;
        }
        // `as` saturates; anything that far out is clipped away by the surface anyway.
        Some(PixelRect::new(
            left as i32,
            top as i32,
            (right - left).min(f64::from(u32::MAX)) as u32,
            (bottom - top).min(f64::from(u32::MAX)) as u32,
        ))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

/// Drawing capability handed out by [`Surface::begin_draw`].
pub struct DrawContext<'a, S: ?Sized> {
    surface: &'a mut S,
    transform: Transform,
    saved: Vec<Transform>,
}

impl<'a, S: Surface + ?Sized> DrawContext<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        Self {
            surface,
            transform: Transform::IDENTITY,
            saved: Vec::new(),
        }
    }

    pub fn size(&self) -> Viewport {
        self.surface.size()
    }

    /// Clear the whole surface. Not affected by the current transform.
    pub fn fill_all(&mut self, color: Color) {
        self.surface.fill_all(color);
    }

    /// Fill a rect given in the current coordinate system.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        if let Some(rect) = self.transform.map_rect(x, y, w, h) {
            self.surface.fill_rect(rect, color);
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform.pre_translate(dx, dy);
    }

    pub fn scale(&mut self, kx: f64, ky: f64) {
        self.transform = self.transform.pre_scale(kx, ky);
    }

    /// Save the current transform; it is restored when the scope is dropped.
    pub fn save(&mut self) -> TransformScope<'_, 'a, S> {
        self.saved.push(self.transform);
        log::trace!("transform saved (depth {})", self.saved.len());
        TransformScope { ctx: self }
    }
}

impl<'a, S: ?Sized> DrawContext<'a, S> {
    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.transform = t;
        }
    }
}

/// Guard returned by [`DrawContext::save`].
pub struct TransformScope<'c, 'a, S: ?Sized> {
    ctx: &'c mut DrawContext<'a, S>,
}

impl<'a, S: ?Sized> Deref for TransformScope<'_, 'a, S> {
    type Target = DrawContext<'a, S>;

    fn deref(&self) -> &Self::Target {
        &*self.ctx
    }
}

impl<S: ?Sized> DerefMut for TransformScope<'_, '_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.ctx
    }
}

impl<S: ?Sized> Drop for TransformScope<'_, '_, S> {
    fn drop(&mut self) {
        self.ctx.restore();
        log::trace!("transform restored (depth {})", self.ctx.saved.len());
    }
}
