//! Reconciling a requested anti-aliasing mode with a quad's geometry.
//!
//! Draw ops ask for an AA mode plus per-edge flags. Depending on the quad,
//! part or all of that request can be dropped: a pixel-aligned rect never
//! needs coverage AA, and per-edge flags only mean something for coverage
//! AA.

use bitflags::bitflags;
use tracing::debug;

use crate::error::{check_quad_type, contract_check, QuadError};
use crate::quad::QuadGeometry;
use crate::quad_type::QuadType;

/// How anti-aliasing is performed for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AaType {
    #[default]
    None,
    /// Analytic coverage computed in the shader, per edge.
    Coverage,
    /// Multisampling of the whole draw.
    Msaa,
    /// Coverage from a multisampled stencil with single-sampled color.
    MixedSamples,
}

bitflags! {
    /// Edges of a quad that should be anti-aliased.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct QuadAaFlags: u8 {
        const LEFT = 1 << 0;
        const TOP = 1 << 1;
        const RIGHT = 1 << 2;
        const BOTTOM = 1 << 3;

        const NONE = 0;
        const ALL = Self::LEFT.bits()
            | Self::TOP.bits()
            | Self::RIGHT.bits()
            | Self::BOTTOM.bits();
    }
}

/// Simplify an AA request for `quad`.
///
/// `known_type` must be the classification of the transform that produced
/// `quad` (from
/// [`quad_type_for_transformed_rect`](crate::quad_type::quad_type_for_transformed_rect)).
/// It is trusted rather than recomputed; an understated type is only caught
/// when contract checks are on, and otherwise can make a non-rect quad lose
/// its AA.
///
/// Rules:
/// - `Coverage` with no edge flags becomes `None`.
/// - `Coverage` on a `Rect` quad whose edges are all pixel aligned becomes
///   `None` with no edge flags.
/// - `None` clears the edge flags, `Msaa` sets all of them.
/// - Anything else is returned unchanged.
///
/// Only the pixel-alignment rule depends on `known_type`. The empty-flags
/// rule and the `None`/`Msaa` flag normalization apply to every type, so a
/// `Rectilinear`, `Standard` or `Perspective` quad does not always get its
/// request back verbatim: `Coverage` with no edge flags still becomes
/// `None`, and `Msaa` still reports all edges.
///
/// `MixedSamples` cannot be combined with edge flags. It is a contract
/// violation; with checks off it is passed through unchanged.
pub fn resolve_aa_type_for_quad<Q: QuadGeometry>(
    requested_aa_type: AaType,
    requested_edge_flags: QuadAaFlags,
    quad: &Q,
    known_type: QuadType,
) -> (AaType, QuadAaFlags) {
    contract_check!(check_quad_type(known_type, quad.quad_type()));
    contract_check!(check_mixed_samples(requested_aa_type));
    resolve(requested_aa_type, requested_edge_flags, quad, known_type)
}

/// Like [`resolve_aa_type_for_quad`], but always verifies `known_type` and
/// rejects `MixedSamples`.
pub fn try_resolve_aa_type_for_quad<Q: QuadGeometry>(
    requested_aa_type: AaType,
    requested_edge_flags: QuadAaFlags,
    quad: &Q,
    known_type: QuadType,
) -> Result<(AaType, QuadAaFlags), QuadError> {
    check_quad_type(known_type, quad.quad_type())?;
    check_mixed_samples(requested_aa_type)?;
    Ok(resolve(requested_aa_type, requested_edge_flags, quad, known_type))
}

fn check_mixed_samples(aa_type: AaType) -> Result<(), QuadError> {
    if aa_type == AaType::MixedSamples {
        Err(QuadError::MixedSamplesWithEdgeFlags)
    } else {
        Ok(())
    }
}

fn resolve<Q: QuadGeometry>(
    aa_type: AaType,
    edge_flags: QuadAaFlags,
    quad: &Q,
    known_type: QuadType,
) -> (AaType, QuadAaFlags) {
    match aa_type {
        AaType::Coverage => {
            if edge_flags.is_empty() {
                debug!("no edges request AA, disabling coverage AA");
                (AaType::None, edge_flags)
            } else if known_type == QuadType::Rect && !quad.aa_has_effect_on_rect() {
                debug!("rect is pixel aligned, disabling coverage AA");
                (AaType::None, QuadAaFlags::NONE)
            } else {
                (aa_type, edge_flags)
            }
        }
        // Edge flags only apply to coverage AA.
        AaType::None => (aa_type, QuadAaFlags::NONE),
        AaType::Msaa => (aa_type, QuadAaFlags::ALL),
        AaType::MixedSamples => (aa_type, edge_flags),
    }
}
