//! Projective 2D transformation.
//!
//! A 3×3 matrix with just enough surface for quad work: named
//! constructors, concatenation, point mapping with and without the
//! homogeneous divide, and the shape predicates the quad classifier
//! relies on.

use crate::basics::NEARLY_ZERO;

// ============================================================================
// TransPerspective
// ============================================================================

/// Perspective 2D transformation (3×3 projective matrix).
///
/// ```text
/// | sx  shy  w0 |
/// | shx  sy  w1 |
/// | tx   ty  w2 |
/// ```
///
/// Mapping: `w = x*w0 + y*w1 + w2`,
/// `x' = (x*sx + y*shx + tx) / w`, `y' = (x*shy + y*sy + ty) / w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransPerspective {
    pub sx: f64,
    pub shy: f64,
    pub w0: f64,
    pub shx: f64,
    pub sy: f64,
    pub w1: f64,
    pub tx: f64,
    pub ty: f64,
    pub w2: f64,
}

impl TransPerspective {
    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    /// Identity matrix.
    pub fn new() -> Self {
        Self::new_from_array(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }

    /// Matrix from 9 values in storage order
    /// `[sx, shy, w0, shx, sy, w1, tx, ty, w2]`.
    pub fn new_from_array(m: &[f64; 9]) -> Self {
        Self {
            sx: m[0],
            shy: m[1],
            w0: m[2],
            shx: m[3],
            sy: m[4],
            w1: m[5],
            tx: m[6],
            ty: m[7],
            w2: m[8],
        }
    }

    /// Affine matrix from six components; the perspective row is `(0, 0, 1)`.
    pub fn new_affine(sx: f64, shy: f64, shx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self::new_from_array(&[sx, shy, 0.0, shx, sy, 0.0, tx, ty, 1.0])
    }

    pub fn new_translation(x: f64, y: f64) -> Self {
        Self::new_affine(1.0, 0.0, 0.0, 1.0, x, y)
    }

    pub fn new_scaling(x: f64, y: f64) -> Self {
        Self::new_affine(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    /// Rotation by `a` radians around the origin.
    pub fn new_rotation(a: f64) -> Self {
        let (sa, ca) = a.sin_cos();
        Self::new_affine(ca, sa, -sa, ca, 0.0, 0.0)
    }

    /// Shear by angles `x` and `y` (radians).
    pub fn new_skewing(x: f64, y: f64) -> Self {
        Self::new_affine(1.0, y.tan(), x.tan(), 1.0, 0.0, 0.0)
    }

    /// Pure perspective: identity with the given `w0`, `w1` terms.
    pub fn new_perspective(w0: f64, w1: f64) -> Self {
        Self::new_from_array(&[1.0, 0.0, w0, 0.0, 1.0, w1, 0.0, 0.0, 1.0])
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Concatenate: `self = self then a` (points are mapped by `self` first).
    pub fn multiply(&mut self, a: &TransPerspective) -> &mut Self {
        let b = *self;
        self.sx = a.sx * b.sx + a.shx * b.shy + a.tx * b.w0;
        self.shx = a.sx * b.shx + a.shx * b.sy + a.tx * b.w1;
        self.tx = a.sx * b.tx + a.shx * b.ty + a.tx * b.w2;
        self.shy = a.shy * b.sx + a.sy * b.shy + a.ty * b.w0;
        self.sy = a.shy * b.shx + a.sy * b.sy + a.ty * b.w1;
        self.ty = a.shy * b.tx + a.sy * b.ty + a.ty * b.w2;
        self.w0 = a.w0 * b.sx + a.w1 * b.shy + a.w2 * b.w0;
        self.w1 = a.w0 * b.shx + a.w1 * b.sy + a.w2 * b.w1;
        self.w2 = a.w0 * b.tx + a.w1 * b.ty + a.w2 * b.w2;
        self
    }

    /// Returns `self then a` without modifying `self`.
    pub fn then(mut self, a: &TransPerspective) -> Self {
        self.multiply(a);
        self
    }

    // ------------------------------------------------------------------------
    // Mapping
    // ------------------------------------------------------------------------

    /// Homogeneous mapping without the divide: `(x, y) -> (x', y', w)`.
    #[inline]
    pub fn map_homogeneous(&self, x: f64, y: f64) -> (f64, f64, f64) {
        (
            x * self.sx + y * self.shx + self.tx,
            x * self.shy + y * self.sy + self.ty,
            x * self.w0 + y * self.w1 + self.w2,
        )
    }

    /// Full mapping with perspective divide.
    #[inline]
    pub fn map_point(&self, x: f64, y: f64) -> (f64, f64) {
        let (px, py, w) = self.map_homogeneous(x, y);
        if self.has_perspective() {
            let iw = 1.0 / w;
            (px * iw, py * iw)
        } else {
            (px, py)
        }
    }

    // ------------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------------

    pub fn is_identity(&self) -> bool {
        *self == Self::new()
    }

    /// Returns `true` unless the perspective row is exactly `(0, 0, 1)`.
    #[inline]
    pub fn has_perspective(&self) -> bool {
        self.w0 != 0.0 || self.w1 != 0.0 || self.w2 != 1.0
    }

    /// Returns `true` if every axis-aligned rectangle maps to an axis-aligned
    /// rectangle: scale and translate, optionally combined with an exact
    /// axis swap (90° rotation or diagonal mirror).
    pub fn rect_stays_rect(&self) -> bool {
        if self.has_perspective() {
            return false;
        }
        if self.shx == 0.0 && self.shy == 0.0 {
            self.sx != 0.0 && self.sy != 0.0
        } else if self.sx == 0.0 && self.sy == 0.0 {
            self.shx != 0.0 && self.shy != 0.0
        } else {
            false
        }
    }

    /// Returns `true` if the matrix is affine, non-degenerate and maps
    /// perpendicular vectors to perpendicular vectors (scale, rotation,
    /// translation and mirroring, but no shear).
    pub fn preserves_right_angles(&self) -> bool {
        if self.has_perspective() {
            return false;
        }
        // Images of the unit x and y axes are (sx, shy) and (shx, sy). Both
        // thresholds scale with their lengths so the answer does not depend
        // on the overall scale of the matrix.
        let tol = NEARLY_ZERO as f64;
        let len = self.sx.hypot(self.shy) * self.shx.hypot(self.sy);
        let det = self.sx * self.sy - self.shx * self.shy;
        if det.abs() <= tol * tol * len {
            return false;
        }
        let dot = self.sx * self.shx + self.shy * self.sy;
        dot.abs() <= tol * tol * len
    }

    /// Returns `true` if the matrix is affine but shears (or collapses)
    /// right angles.
    pub fn has_skew(&self) -> bool {
        !self.has_perspective() && !self.preserves_right_angles()
    }
}

impl Default for TransPerspective {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
