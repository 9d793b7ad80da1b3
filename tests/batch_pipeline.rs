//! Classify -> construct -> batch -> resolve, the way a draw op uses the crate.

use quad_batch::*;
use std::f64::consts::FRAC_PI_2;

/// Build the cheapest quad the classification allows and push it.
fn add_rect(list: &mut TQuadList<u32>, rect: &RectF, m: &TransPerspective, color: u32) -> QuadType {
    let ty = quad_type_for_transformed_rect(m);
    if ty == QuadType::Perspective {
        list.push_back(&PerspQuad::from_rect_transform(rect, m), ty, color);
    } else {
        list.push_back(&Quad::from_rect_transform(rect, m), ty, color);
    }
    ty
}

#[test]
fn identity_rects_stay_rect() {
    let mut list = TQuadList::new();
    for i in 0..10 {
        let r = RectF::new(i as f32, 0.0, i as f32 + 0.5, 3.0);
        assert_eq!(add_rect(&mut list, &r, &TransPerspective::new(), i), QuadType::Rect);
    }
    assert_eq!(list.count(), 10);
    assert_eq!(list.quad_type(), QuadType::Rect);
    assert!(list.weights().is_none());
    assert_eq!(list.bounds(), Some(RectF::new(0.0, 0.0, 9.5, 3.0)));
}

#[test]
fn quarter_turn_is_never_standard() {
    let ty = quad_type_for_transformed_rect(&TransPerspective::new_rotation(FRAC_PI_2));
    assert!(ty <= QuadType::Rectilinear);
}

#[test]
fn classification_holds_at_small_scale() {
    let rect = RectF::new(0.0, 0.0, 1000.0, 1000.0);
    let shrink = TransPerspective::new_scaling(1e-4, 1e-4);
    let mut list = TQuadList::new();

    let skew = TransPerspective::new_skewing(0.3, 0.0).then(&shrink);
    assert_eq!(add_rect(&mut list, &rect, &skew, 1), QuadType::Standard);
    let q = Quad::from_rect_transform(&rect, &skew);
    assert_eq!(q.quad_type(), QuadType::Standard);
    assert!(list.try_push_back(&q, quad_type_for_transformed_rect(&skew), 2).is_ok());

    let turn = TransPerspective::new_rotation(0.5).then(&shrink);
    assert_eq!(add_rect(&mut list, &rect, &turn, 3), QuadType::Rectilinear);
    assert_eq!(list.count(), 3);
    assert_eq!(list.quad_type(), QuadType::Standard);
}

#[test]
fn perspective_matrix_needs_persp_quad() {
    let rect = RectF::new(0.0, 0.0, 10.0, 10.0);
    let m = TransPerspective::new_perspective(0.01, 0.02);
    assert_eq!(quad_type_for_transformed_rect(&m), QuadType::Perspective);
    assert_eq!(
        Quad::try_from_rect_transform(&rect, &m),
        Err(QuadError::PerspectiveTransform)
    );
    let q = PerspQuad::from_rect_transform(&rect, &m);
    assert!(q.has_perspective());
}

#[test]
fn mixed_batch_backfills_and_concats() {
    let rect = RectF::new(0.0, 0.0, 4.0, 4.0);

    let mut flat = TQuadList::new();
    add_rect(&mut flat, &rect, &TransPerspective::new(), 1);
    add_rect(&mut flat, &rect, &TransPerspective::new_rotation(0.4), 2);
    add_rect(&mut flat, &rect, &TransPerspective::new_skewing(0.3, 0.0), 3);
    assert_eq!(flat.quad_type(), QuadType::Standard);
    assert!(flat.weights().is_none());

    let mut persp = TQuadList::new();
    add_rect(&mut persp, &rect, &TransPerspective::new_perspective(0.0, 0.25), 4);
    let persp_quad = persp.quad(0);

    let mut batch = flat.clone();
    batch.concat(&persp);
    assert_eq!(batch.count(), flat.count() + persp.count());
    assert_eq!(batch.quad_type(), QuadType::Perspective);
    assert_eq!(batch.weights().map(|ws| ws.len()), Some(16));
    for i in 0..flat.count() {
        let q = batch.quad(i);
        assert_eq!((q.w(0), q.w(1), q.w(2), q.w(3)), (1.0, 1.0, 1.0, 1.0));
        assert_eq!(q, flat.quad(i));
        assert_eq!(batch.metadata(i), flat.metadata(i));
    }
    assert_eq!(batch.quad(3), persp_quad);
    assert_eq!(*batch.metadata(3), 4);

    // The other order: 2D entries appended after perspective ones get
    // explicit unit weights.
    let mut batch = persp.clone();
    batch.concat(&flat);
    assert_eq!(batch.quad_type(), QuadType::Perspective);
    assert_eq!(batch.weights().map(|ws| ws.len()), Some(16));
    for i in 0..flat.count() {
        assert_eq!(batch.quad(1 + i), flat.quad(i));
    }
}

#[test]
fn persp_bounds_divide_by_weight() {
    let mut list = QuadList::new();
    let q = Quad::from_rect(&RectF::new(2.0, 4.0, 6.0, 8.0));
    list.push_back(&q, QuadType::Rect);
    assert_eq!(list.quad(0).bounds(QuadType::Perspective), RectF::new(2.0, 4.0, 6.0, 8.0));

    // Uniform w = 2 everywhere halves the projected coordinates.
    let m = TransPerspective::new_from_array(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0]);
    let pq = PerspQuad::from_rect_transform(&RectF::new(2.0, 4.0, 6.0, 8.0), &m);
    list.push_back(&pq, QuadType::Perspective);
    assert_eq!(list.quad(1).bounds(QuadType::Perspective), RectF::new(1.0, 2.0, 3.0, 4.0));
}

#[test]
fn aa_resolution_end_to_end() {
    let rect = RectF::new(0.0, 0.0, 20.0, 10.0);

    let m = TransPerspective::new_translation(5.0, 5.0);
    let ty = quad_type_for_transformed_rect(&m);
    let q = Quad::from_rect_transform(&rect, &m);
    assert_eq!(ty, QuadType::Rect);
    assert!(!q.aa_has_effect_on_rect());
    assert_eq!(
        resolve_aa_type_for_quad(AaType::Coverage, QuadAaFlags::ALL, &q, ty),
        (AaType::None, QuadAaFlags::NONE)
    );

    let m = TransPerspective::new_rotation(0.3).then(&TransPerspective::new_scaling(1.0, 2.0));
    let ty = quad_type_for_transformed_rect(&m);
    let q = Quad::from_rect_transform(&rect, &m);
    assert_eq!(ty, QuadType::Standard);
    assert_eq!(
        resolve_aa_type_for_quad(AaType::Coverage, QuadAaFlags::ALL, &q, ty),
        (AaType::Coverage, QuadAaFlags::ALL)
    );
}
