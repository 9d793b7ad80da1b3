//! Growable quad lists that track the most general quad type added.
//!
//! x and y are interleaved with the per-quad metadata so everything about
//! one quad is contiguous. The w channel lives in a separate array that
//! stays empty until the list first sees a perspective quad; at that point
//! it is backfilled with 1s for every earlier quad and kept from then on.
//!
//! [`QuadList`] stores only geometry. [`TQuadList`] also stores a value of
//! a fixed metadata type per quad (a color, a texture domain, ...).

use tracing::trace;

use crate::basics::RectF;
use crate::error::{check_quad_type, contract_check, QuadError};
use crate::quad::{PerspQuad, QuadGeometry};
use crate::quad_type::QuadType;

const NO_PERSPECTIVE_WS: [f32; 4] = [1.0; 4];

// ============================================================================
// QuadData
// ============================================================================

/// One list entry. With `T = ()` the metadata takes no space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadData<T> {
    pub xs: [f32; 4],
    pub ys: [f32; 4],
    pub metadata: T,
}

// ============================================================================
// QuadListBase
// ============================================================================

/// Storage shared by [`QuadList`] and [`TQuadList`]. Both wrappers forward
/// their read access and `reserve` here.
#[derive(Debug, Clone)]
pub(crate) struct QuadListBase<T> {
    xys: Vec<QuadData<T>>,
    // Either empty, or exactly 4 weights per entry once the type is Perspective.
    ws: Vec<f32>,
    ty: QuadType,
}

impl<T> QuadListBase<T> {
    fn new() -> Self {
        Self {
            xys: Vec::new(),
            ws: Vec::new(),
            ty: QuadType::Rect,
        }
    }

    pub fn count(&self) -> usize {
        self.xys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xys.is_empty()
    }

    /// The most general type of any quad ever added. Never decreases.
    pub fn quad_type(&self) -> QuadType {
        self.ty
    }

    /// The materialized w channel, 4 per quad, or `None` while every weight
    /// is implicitly 1.
    pub fn weights(&self) -> Option<&[f32]> {
        if self.ty.needs_weights() {
            Some(&self.ws)
        } else {
            None
        }
    }

    /// Reserve room for `count` more quads. The w channel is only reserved
    /// if the list is, or is about to become, perspective.
    pub fn reserve(&mut self, count: usize, for_type: QuadType) {
        self.xys.reserve(count);
        if for_type.needs_weights() || self.ty.needs_weights() {
            self.ws.reserve(4 * count);
        }
    }

    /// Quad `i` with its weights. Weights read as 1 until the list becomes
    /// perspective.
    ///
    /// # Panics
    ///
    /// Panics if `i >= count()`.
    pub fn quad(&self, i: usize) -> PerspQuad {
        let item = &self.xys[i];
        if self.ty.needs_weights() {
            let w = &self.ws[4 * i..4 * i + 4];
            PerspQuad::from_xyw(item.xs, item.ys, [w[0], w[1], w[2], w[3]])
        } else {
            PerspQuad::from_xyw(item.xs, item.ys, NO_PERSPECTIVE_WS)
        }
    }

    /// Like [`quad`](Self::quad), but reports an out-of-range index.
    pub fn get(&self, i: usize) -> Result<PerspQuad, QuadError> {
        if i < self.count() {
            Ok(self.quad(i))
        } else {
            Err(QuadError::IndexOutOfBounds {
                index: i,
                count: self.count(),
            })
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = PerspQuad> + '_ {
        (0..self.count()).map(move |i| self.quad(i))
    }

    /// Union of all quad bounds, computed at the list's type so perspective
    /// lists divide by w. `None` for an empty list.
    pub fn bounds(&self) -> Option<RectF> {
        let ty = self.ty;
        self.iter().map(|q| q.bounds(ty)).reduce(|a, b| {
            RectF::new(a.x1.min(b.x1), a.y1.min(b.y1), a.x2.max(b.x2), a.y2.max(b.y2))
        })
    }

    fn item(&self, i: usize) -> &QuadData<T> {
        &self.xys[i]
    }

    fn item_mut(&mut self, i: usize) -> &mut QuadData<T> {
        &mut self.xys[i]
    }

    fn upgrade_type(&mut self, ty: QuadType) {
        if ty <= self.ty {
            return;
        }
        trace!(from = ?self.ty, to = ?ty, count = self.count(), "upgrading quad list type");
        self.ty = ty;
        if ty.needs_weights() {
            // Everything stored so far was 2D, so its weights are all 1.
            trace!(count = self.count(), "backfilling quad list w channel");
            self.ws.resize(4 * self.count(), 1.0);
        }
    }

    fn push_back_impl<Q: QuadGeometry>(&mut self, quad: &Q, ty: QuadType, metadata: T) {
        contract_check!(check_quad_type(ty, quad.quad_type()));
        self.upgrade_type(ty);
        self.xys.push(QuadData {
            xs: quad.x4(),
            ys: quad.y4(),
            metadata,
        });
        if self.ty.needs_weights() {
            self.ws.extend_from_slice(&quad.w4().unwrap_or(NO_PERSPECTIVE_WS));
        }
    }

    fn try_push_back_impl<Q: QuadGeometry>(
        &mut self,
        quad: &Q,
        ty: QuadType,
        metadata: T,
    ) -> Result<(), QuadError> {
        check_quad_type(ty, quad.quad_type())?;
        self.push_back_impl(quad, ty, metadata);
        Ok(())
    }

    fn concat_impl(&mut self, that: &Self)
    where
        T: Clone,
    {
        self.upgrade_type(that.ty);
        self.xys.extend_from_slice(&that.xys);
        if self.ty.needs_weights() {
            if that.ty.needs_weights() {
                self.ws.extend_from_slice(&that.ws);
            } else {
                // `that` had implicit 1s; make them explicit here.
                self.ws.resize(self.ws.len() + 4 * that.count(), 1.0);
            }
        }
    }
}

// ============================================================================
// QuadList
// ============================================================================

/// A list of quads with no per-quad metadata.
#[derive(Debug, Clone)]
pub struct QuadList {
    base: QuadListBase<()>,
}

impl QuadList {
    pub fn new() -> Self {
        Self {
            base: QuadListBase::new(),
        }
    }

    /// Append `quad`, whose type must be at most `ty`.
    pub fn push_back<Q: QuadGeometry>(&mut self, quad: &Q, ty: QuadType) {
        self.base.push_back_impl(quad, ty, ());
    }

    /// Like [`push_back`](Self::push_back), but verifies `ty` against the
    /// quad's points and leaves the list untouched on failure.
    pub fn try_push_back<Q: QuadGeometry>(
        &mut self,
        quad: &Q,
        ty: QuadType,
    ) -> Result<(), QuadError> {
        self.base.try_push_back_impl(quad, ty, ())
    }

    /// Append every quad of `that`.
    pub fn concat(&mut self, that: &QuadList) {
        self.base.concat_impl(&that.base);
    }

    pub fn count(&self) -> usize {
        self.base.count()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// The most general type of any quad ever added. Never decreases.
    pub fn quad_type(&self) -> QuadType {
        self.base.quad_type()
    }

    /// The materialized w channel, 4 per quad, or `None` while every weight
    /// is implicitly 1.
    pub fn weights(&self) -> Option<&[f32]> {
        self.base.weights()
    }

    /// Reserve room for `count` more quads of up to `for_type`.
    pub fn reserve(&mut self, count: usize, for_type: QuadType) {
        self.base.reserve(count, for_type);
    }

    /// Quad `i` with its weights (1 until the list becomes perspective).
    ///
    /// # Panics
    ///
    /// Panics if `i >= count()`.
    pub fn quad(&self, i: usize) -> PerspQuad {
        self.base.quad(i)
    }

    pub fn get(&self, i: usize) -> Result<PerspQuad, QuadError> {
        self.base.get(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = PerspQuad> + '_ {
        self.base.iter()
    }

    /// Union of all quad bounds at the list's type. `None` when empty.
    pub fn bounds(&self) -> Option<RectF> {
        self.base.bounds()
    }
}

impl Default for QuadList {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TQuadList
// ============================================================================

/// A list of quads carrying one `T` per quad.
#[derive(Debug, Clone)]
pub struct TQuadList<T> {
    base: QuadListBase<T>,
}

impl<T> TQuadList<T> {
    pub fn new() -> Self {
        Self {
            base: QuadListBase::new(),
        }
    }

    pub fn push_back<Q: QuadGeometry>(&mut self, quad: &Q, ty: QuadType, metadata: T) {
        self.base.push_back_impl(quad, ty, metadata);
    }

    pub fn try_push_back<Q: QuadGeometry>(
        &mut self,
        quad: &Q,
        ty: QuadType,
        metadata: T,
    ) -> Result<(), QuadError> {
        self.base.try_push_back_impl(quad, ty, metadata)
    }

    pub fn concat(&mut self, that: &TQuadList<T>)
    where
        T: Clone,
    {
        self.base.concat_impl(&that.base);
    }

    /// # Panics
    ///
    /// Panics if `i >= count()`.
    pub fn metadata(&self, i: usize) -> &T {
        &self.base.item(i).metadata
    }

    /// # Panics
    ///
    /// Panics if `i >= count()`.
    pub fn metadata_mut(&mut self, i: usize) -> &mut T {
        &mut self.base.item_mut(i).metadata
    }

    pub fn iter_with_metadata(&self) -> impl Iterator<Item = (PerspQuad, &T)> + '_ {
        (0..self.count()).map(move |i| (self.base.quad(i), self.metadata(i)))
    }

    pub fn count(&self) -> usize {
        self.base.count()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// The most general type of any quad ever added. Never decreases.
    pub fn quad_type(&self) -> QuadType {
        self.base.quad_type()
    }

    /// The materialized w channel, 4 per quad, or `None` while every weight
    /// is implicitly 1.
    pub fn weights(&self) -> Option<&[f32]> {
        self.base.weights()
    }

    /// Reserve room for `count` more quads of up to `for_type`.
    pub fn reserve(&mut self, count: usize, for_type: QuadType) {
        self.base.reserve(count, for_type);
    }

    /// Quad `i` with its weights (1 until the list becomes perspective).
    ///
    /// # Panics
    ///
    /// Panics if `i >= count()`.
    pub fn quad(&self, i: usize) -> PerspQuad {
        self.base.quad(i)
    }

    pub fn get(&self, i: usize) -> Result<PerspQuad, QuadError> {
        self.base.get(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = PerspQuad> + '_ {
        self.base.iter()
    }

    /// Union of all quad bounds at the list's type. `None` when empty.
    pub fn bounds(&self) -> Option<RectF> {
        self.base.bounds()
    }
}

impl<T> Default for TQuadList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
