//! Quad type lattice and the transformed-rect classifier.
//!
//! A rectangle transformed by a matrix falls into one of four classes,
//! each a superset of the one before it:
//!
//! 1. `Rect` — still an axis-aligned rectangle (scale, translate, mirror or
//!    an exact axis swap).
//! 2. `Rectilinear` — no skew or perspective, but possibly rotated.
//! 3. `Standard` — any affine image, including skew.
//! 4. `Perspective` — needs a homogeneous divide.
//!
//! Combining quads or lists takes the maximum of their types.

use crate::trans_perspective::TransPerspective;

/// Classification of a quad by how general its geometry is.
///
/// The derived ordering is the join order: `Rect < Rectilinear < Standard <
/// Perspective`, and `max` gives the type of a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuadType {
    #[default]
    Rect,
    Rectilinear,
    Standard,
    Perspective,
}

impl QuadType {
    /// Number of quad types.
    pub const COUNT: usize = 4;

    /// All quad types in increasing generality.
    pub const ALL: [QuadType; Self::COUNT] = [
        QuadType::Rect,
        QuadType::Rectilinear,
        QuadType::Standard,
        QuadType::Perspective,
    ];

    /// Returns `true` if storing this type requires explicit w components.
    #[inline]
    pub fn needs_weights(self) -> bool {
        self == QuadType::Perspective
    }
}

/// The quad type needed to represent any rectangle mapped by `matrix`.
///
/// This only looks at the matrix, so callers can classify once up front
/// and thread the result through construction, list insertion and AA
/// resolution instead of re-deriving it from the mapped points.
pub fn quad_type_for_transformed_rect(matrix: &TransPerspective) -> QuadType {
    if matrix.rect_stays_rect() {
        QuadType::Rect
    } else if matrix.preserves_right_angles() {
        QuadType::Rectilinear
    } else if matrix.has_perspective() {
        QuadType::Perspective
    } else {
        QuadType::Standard
    }
}
