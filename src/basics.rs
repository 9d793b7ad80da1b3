//! Foundation geometry types shared by the quad modules.
//!
//! Rectangles and points are stored in `f32`, the precision quads are
//! uploaded to the GPU with.

// ============================================================================
// Scalar helpers
// ============================================================================

/// Tolerance used when deciding whether two directions are perpendicular.
pub const NEARLY_ZERO: f32 = 1.0 / (1 << 12) as f32;

/// Returns `true` if `v` has no fractional part.
///
/// Infinities and NaN are never integral.
#[inline]
pub fn is_integral(v: f32) -> bool {
    v.is_finite() && v.trunc() == v
}

/// Returns `true` if `|v| <= tolerance`.
#[inline]
pub fn is_nearly_zero(v: f32, tolerance: f32) -> bool {
    v.abs() <= tolerance
}

// ============================================================================
// Rect
// ============================================================================

/// An axis-aligned rectangle stored as its four edges:
/// `x1` = left, `y1` = top, `x2` = right, `y2` = bottom.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Normalize so that x1 <= x2 and y1 <= y2, swapping if needed.
    pub fn normalize(&mut self) -> &Self {
        if self.x1 > self.x2 {
            core::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            core::mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }

    /// Returns `true` if the rectangle is not inverted.
    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }
}

impl<T: Copy + core::ops::Sub<Output = T>> Rect<T> {
    pub fn width(&self) -> T {
        self.x2 - self.x1
    }

    pub fn height(&self) -> T {
        self.y2 - self.y1
    }
}

/// Rectangle with `f32` coordinates.
pub type RectF = Rect<f32>;

// ============================================================================
// Points
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A homogeneous 2D point `(x, y, w)`. The projected point is `(x/w, y/w)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3F {
    pub x: f32,
    pub y: f32,
    pub w: f32,
}

impl Point3F {
    pub fn new(x: f32, y: f32, w: f32) -> Self {
        Self { x, y, w }
    }

    /// Perspective divide.
    pub fn project(&self) -> PointF {
        PointF::new(self.x / self.w, self.y / self.w)
    }
}

impl From<PointF> for Point3F {
    fn from(p: PointF) -> Self {
        Self::new(p.x, p.y, 1.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
