//! Contract violations and the switch that decides when they are checked.
//!
//! Every failure in this crate is a caller bug: a quad type that
//! understates the real geometry, a plain [`Quad`](crate::quad::Quad)
//! built from a perspective matrix, or an AA request that cannot be
//! combined with per-edge flags. The fast entry points only verify these
//! when [`CONTRACT_CHECKS`] is on and panic on failure. In release builds
//! without the `contract-checks` feature they trust the caller and produce
//! a defined but possibly wrong result. The `try_*` entry points always
//! verify and report a [`QuadError`] instead.

use crate::quad_type::QuadType;

/// `true` in debug builds, or when the `contract-checks` feature is on.
pub const CONTRACT_CHECKS: bool = cfg!(any(debug_assertions, feature = "contract-checks"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QuadError {
    #[error("declared quad type {declared:?} understates the quad's actual type {actual:?}")]
    UnderstatedQuadType { declared: QuadType, actual: QuadType },

    #[error("a perspective transform cannot be represented by a 2D quad")]
    PerspectiveTransform,

    #[error("quad index {index} out of bounds for list of {count}")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("mixed-samples anti-aliasing cannot be combined with per-edge AA flags")]
    MixedSamplesWithEdgeFlags,
}

/// Verify that `declared` is at least as general as `actual`.
#[inline]
pub(crate) fn check_quad_type(declared: QuadType, actual: QuadType) -> Result<(), QuadError> {
    if actual <= declared {
        Ok(())
    } else {
        Err(QuadError::UnderstatedQuadType { declared, actual })
    }
}

/// Run a contract check on a fast path. The check is skipped entirely
/// when contract checks are off.
macro_rules! contract_check {
    ($check:expr) => {
        if $crate::error::CONTRACT_CHECKS {
            if let Err(e) = $check {
                panic!("quad contract violation: {}", e);
            }
        }
    };
}

pub(crate) use contract_check;
