//! 2D and perspective quadrilaterals.
//!
//! A quad is 4 points ordered as a triangle strip with CCW triangles:
//! top-left, bottom-left, top-right, bottom-right (for the identity
//! transform). Coordinates are stored per axis so each axis can be
//! processed as one 4-lane vector.

use crate::basics::{is_integral, is_nearly_zero, Point3F, PointF, RectF, NEARLY_ZERO};
use crate::error::{check_quad_type, contract_check, QuadError};
use crate::quad_type::QuadType;
use crate::trans_perspective::TransPerspective;

// ============================================================================
// 4-lane helpers
// ============================================================================

/// Smallest lane. Comparisons are ordered, so a NaN lane never replaces a
/// value already selected, while infinities win as usual.
#[inline]
pub fn min4(v: [f32; 4]) -> f32 {
    let mut m = v[0];
    for &x in &v[1..] {
        if x < m {
            m = x;
        }
    }
    m
}

/// Largest lane, with the same NaN handling as [`min4`].
#[inline]
pub fn max4(v: [f32; 4]) -> f32 {
    let mut m = v[0];
    for &x in &v[1..] {
        if x > m {
            m = x;
        }
    }
    m
}

/// Lane-wise IEEE reciprocal; a zero lane becomes ±infinity.
#[inline]
pub fn invert4(v: [f32; 4]) -> [f32; 4] {
    v.map(|x| 1.0 / x)
}

#[inline]
fn mul4(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    [a[0] * b[0], a[1] * b[1], a[2] * b[2], a[3] * b[3]]
}

#[inline]
fn bounds_of(xs: [f32; 4], ys: [f32; 4]) -> RectF {
    RectF::new(min4(xs), min4(ys), max4(xs), max4(ys))
}

// Corners of `rect` in strip order.
#[inline]
fn rect_xs(rect: &RectF) -> [f32; 4] {
    [rect.x1, rect.x1, rect.x2, rect.x2]
}

#[inline]
fn rect_ys(rect: &RectF) -> [f32; 4] {
    [rect.y1, rect.y2, rect.y1, rect.y2]
}

/// Map the strip-ordered corners of `rect` without the homogeneous divide.
fn map_rect_homogeneous(rect: &RectF, m: &TransPerspective) -> ([f32; 4], [f32; 4], [f32; 4]) {
    let (rx, ry) = (rect_xs(rect), rect_ys(rect));
    let mut xs = [0.0; 4];
    let mut ys = [0.0; 4];
    let mut ws = [1.0; 4];
    for i in 0..4 {
        let (x, y, w) = m.map_homogeneous(rx[i] as f64, ry[i] as f64);
        xs[i] = x as f32;
        ys[i] = y as f32;
        ws[i] = w as f32;
    }
    (xs, ys, ws)
}

/// Classify 2D points: axis-aligned pairs make a rect, perpendicular
/// edges at opposite corners make a rectilinear quad.
fn quad_type_for_points(xs: &[f32; 4], ys: &[f32; 4]) -> QuadType {
    if (xs[0] == xs[1] && xs[2] == xs[3] && ys[0] == ys[2] && ys[1] == ys[3])
        || (xs[0] == xs[2] && xs[1] == xs[3] && ys[0] == ys[1] && ys[2] == ys[3])
    {
        return QuadType::Rect;
    }
    let right_angle = |corner: usize, a: usize, b: usize| {
        let (ax, ay) = (xs[a] - xs[corner], ys[a] - ys[corner]);
        let (bx, by) = (xs[b] - xs[corner], ys[b] - ys[corner]);
        let scale = (ax * ax + ay * ay).sqrt() * (bx * bx + by * by).sqrt();
        is_nearly_zero(ax * bx + ay * by, NEARLY_ZERO * scale)
    };
    if right_angle(0, 1, 2) && right_angle(3, 1, 2) {
        QuadType::Rectilinear
    } else {
        QuadType::Standard
    }
}

/// AA softens a rect unless all four edges sit on integer coordinates.
#[inline]
fn aa_affects_rect(left: f32, top: f32, right: f32, bottom: f32) -> bool {
    !is_integral(left) || !is_integral(top) || !is_integral(right) || !is_integral(bottom)
}

// ============================================================================
// QuadGeometry
// ============================================================================

/// Read access shared by [`Quad`] and [`PerspQuad`], so lists and the AA
/// resolver accept either.
pub trait QuadGeometry {
    fn x4(&self) -> [f32; 4];
    fn y4(&self) -> [f32; 4];

    /// Explicit weights, or `None` when the quad stores none (implicitly 1).
    fn w4(&self) -> Option<[f32; 4]>;

    /// Classification recomputed from the stored points. This is the
    /// slow verification path; production code should carry the type from
    /// [`quad_type_for_transformed_rect`](crate::quad_type::quad_type_for_transformed_rect).
    fn quad_type(&self) -> QuadType;

    /// True if anti-aliasing would visibly change this quad.
    /// Requires `quad_type() == QuadType::Rect`.
    fn aa_has_effect_on_rect(&self) -> bool;
}

// ============================================================================
// Quad
// ============================================================================

/// A quadrilateral with no perspective component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quad {
    pub(crate) xs: [f32; 4],
    pub(crate) ys: [f32; 4],
}

impl Quad {
    /// The corners of `rect` in strip order.
    pub fn from_rect(rect: &RectF) -> Self {
        Self {
            xs: rect_xs(rect),
            ys: rect_ys(rect),
        }
    }

    /// Four points, already in strip order.
    pub fn from_points(pts: &[PointF; 4]) -> Self {
        Self {
            xs: pts.map(|p| p.x),
            ys: pts.map(|p| p.y),
        }
    }

    /// `rect` mapped by `m`.
    ///
    /// `m` must not have perspective; classify first and build a
    /// [`PerspQuad`] in that case. With contract checks off a perspective
    /// matrix is still accepted and the points are projected, which loses
    /// the weights needed for perspective-correct interpolation.
    pub fn from_rect_transform(rect: &RectF, m: &TransPerspective) -> Self {
        contract_check!(Self::check_affine(m));
        let (mut xs, mut ys, ws) = map_rect_homogeneous(rect, m);
        if m.has_perspective() {
            let iw = invert4(ws);
            xs = mul4(xs, iw);
            ys = mul4(ys, iw);
        }
        Self { xs, ys }
    }

    /// Like [`from_rect_transform`](Self::from_rect_transform), but rejects
    /// perspective matrices.
    pub fn try_from_rect_transform(rect: &RectF, m: &TransPerspective) -> Result<Self, QuadError> {
        Self::check_affine(m)?;
        let (xs, ys, _) = map_rect_homogeneous(rect, m);
        Ok(Self { xs, ys })
    }

    fn check_affine(m: &TransPerspective) -> Result<(), QuadError> {
        if m.has_perspective() {
            Err(QuadError::PerspectiveTransform)
        } else {
            Ok(())
        }
    }

    pub fn point(&self, i: usize) -> PointF {
        PointF::new(self.xs[i], self.ys[i])
    }

    pub fn x(&self, i: usize) -> f32 {
        self.xs[i]
    }

    pub fn y(&self, i: usize) -> f32 {
        self.ys[i]
    }

    /// Axis-aligned bounding box of the 4 points.
    pub fn bounds(&self) -> RectF {
        bounds_of(self.xs, self.ys)
    }
}

impl QuadGeometry for Quad {
    fn x4(&self) -> [f32; 4] {
        self.xs
    }

    fn y4(&self) -> [f32; 4] {
        self.ys
    }

    fn w4(&self) -> Option<[f32; 4]> {
        None
    }

    fn quad_type(&self) -> QuadType {
        quad_type_for_points(&self.xs, &self.ys)
    }

    fn aa_has_effect_on_rect(&self) -> bool {
        contract_check!(check_quad_type(QuadType::Rect, self.quad_type()));
        aa_affects_rect(self.xs[0], self.ys[0], self.xs[3], self.ys[3])
    }
}

// ============================================================================
// PerspQuad
// ============================================================================

/// A quadrilateral with a homogeneous weight per point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerspQuad {
    pub(crate) xs: [f32; 4],
    pub(crate) ys: [f32; 4],
    pub(crate) ws: [f32; 4],
}

impl PerspQuad {
    pub(crate) fn from_xyw(xs: [f32; 4], ys: [f32; 4], ws: [f32; 4]) -> Self {
        Self { xs, ys, ws }
    }

    pub fn from_rect(rect: &RectF) -> Self {
        Self::from_quad(&Quad::from_rect(rect))
    }

    /// `rect` mapped by `m`, keeping the weights instead of dividing.
    pub fn from_rect_transform(rect: &RectF, m: &TransPerspective) -> Self {
        let (xs, ys, ws) = map_rect_homogeneous(rect, m);
        Self { xs, ys, ws }
    }

    /// A 2D quad with explicit unit weights.
    pub fn from_quad(quad: &Quad) -> Self {
        Self::from_xyw(quad.xs, quad.ys, [1.0; 4])
    }

    pub fn point(&self, i: usize) -> Point3F {
        Point3F::new(self.xs[i], self.ys[i], self.ws[i])
    }

    pub fn x(&self, i: usize) -> f32 {
        self.xs[i]
    }

    pub fn y(&self, i: usize) -> f32 {
        self.ys[i]
    }

    pub fn w(&self, i: usize) -> f32 {
        self.ws[i]
    }

    /// `1 / w(i)`, following IEEE rules for a zero weight.
    pub fn iw(&self, i: usize) -> f32 {
        1.0 / self.ws[i]
    }

    pub fn iw4(&self) -> [f32; 4] {
        invert4(self.ws)
    }

    /// True if any weight differs from 1.
    pub fn has_perspective(&self) -> bool {
        self.ws.iter().any(|&w| w != 1.0)
    }

    /// Bounding box of the projected points.
    ///
    /// `ty` is the type the caller tracks for this quad (usually the list's
    /// type). The divide by w only happens when `ty` is `Perspective`; below
    /// that the weights are assumed to be 1.
    pub fn bounds(&self, ty: QuadType) -> RectF {
        contract_check!(check_quad_type(ty, self.quad_type()));
        self.bounds_unchecked(ty)
    }

    /// Like [`bounds`](Self::bounds), but reports an understated `ty`.
    pub fn try_bounds(&self, ty: QuadType) -> Result<RectF, QuadError> {
        check_quad_type(ty, self.quad_type())?;
        Ok(self.bounds_unchecked(ty))
    }

    fn bounds_unchecked(&self, ty: QuadType) -> RectF {
        if ty == QuadType::Perspective {
            let iw = self.iw4();
            bounds_of(mul4(self.xs, iw), mul4(self.ys, iw))
        } else {
            bounds_of(self.xs, self.ys)
        }
    }
}

impl From<Quad> for PerspQuad {
    fn from(quad: Quad) -> Self {
        Self::from_quad(&quad)
    }
}

impl QuadGeometry for PerspQuad {
    fn x4(&self) -> [f32; 4] {
        self.xs
    }

    fn y4(&self) -> [f32; 4] {
        self.ys
    }

    fn w4(&self) -> Option<[f32; 4]> {
        Some(self.ws)
    }

    fn quad_type(&self) -> QuadType {
        if self.has_perspective() {
            QuadType::Perspective
        } else {
            quad_type_for_points(&self.xs, &self.ys)
        }
    }

    fn aa_has_effect_on_rect(&self) -> bool {
        contract_check!(check_quad_type(QuadType::Rect, self.quad_type()));
        // A rect has unit weights, so no divide is needed.
        aa_affects_rect(self.xs[0], self.ys[0], self.xs[3], self.ys[3])
    }
}

// ============================================================================
// Tests
// ============================================================================
