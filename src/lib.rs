//! # quad-batch
//!
//! Classification and batched storage of transformed rectangles on their
//! way to a GPU draw pipeline.
//!
//! A rectangle mapped by a 2D matrix becomes a quadrilateral whose
//! generality depends only on the matrix. This crate:
//!
//! - classifies that generality once, from the matrix
//!   ([`quad_type_for_transformed_rect`]),
//! - stores 2D and perspective quads ([`Quad`], [`PerspQuad`]),
//! - batches them in lists that track the most general type seen and only
//!   allocate the perspective w channel once it is needed ([`QuadList`],
//!   [`TQuadList`]),
//! - simplifies anti-aliasing requests the geometry makes redundant
//!   ([`resolve_aa_type_for_quad`]).
//!
//! ## Contracts
//!
//! Callers thread the classification through every call instead of having
//! the crate re-derive it from points. Fast entry points only verify that
//! classification when [`error::CONTRACT_CHECKS`] is on (debug builds, or
//! the `contract-checks` feature). The `try_*` variants always verify and
//! return a [`QuadError`].
//!
//! ## Example
//!
//! ```
//! use quad_batch::*;
//!
//! let rect = RectF::new(0.0, 0.0, 64.0, 32.0);
//! let m = TransPerspective::new_translation(8.0, 8.0);
//! let ty = quad_type_for_transformed_rect(&m);
//! assert_eq!(ty, QuadType::Rect);
//!
//! let quad = Quad::from_rect_transform(&rect, &m);
//! let mut list: TQuadList<[f32; 4]> = TQuadList::new();
//! list.push_back(&quad, ty, [1.0, 0.0, 0.0, 1.0]);
//!
//! let (aa, edges) = resolve_aa_type_for_quad(AaType::Coverage, QuadAaFlags::ALL, &quad, ty);
//! assert_eq!(aa, AaType::None);
//! assert!(edges.is_empty());
//! ```

pub mod aa;
pub mod basics;
pub mod error;
pub mod quad;
pub mod quad_list;
pub mod quad_type;
pub mod trans_perspective;

pub use aa::{resolve_aa_type_for_quad, try_resolve_aa_type_for_quad, AaType, QuadAaFlags};
pub use basics::{Point3F, PointF, RectF};
pub use error::QuadError;
pub use quad::{PerspQuad, Quad, QuadGeometry};
pub use quad_list::{QuadData, QuadList, TQuadList};
pub use quad_type::{quad_type_for_transformed_rect, QuadType};
pub use trans_perspective::TransPerspective;
