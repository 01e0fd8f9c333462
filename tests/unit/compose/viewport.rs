use super::*;
use crate::{
    eval::timeline::Evaluator,
    foundation::core::Point,
    show::registry::{PresentationEntry, ScreenDimensions, Timing},
};

fn approx_pt(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-12 && (a.y - b.y).abs() < 1e-12
}

fn registry() -> PresentationRegistry {
    let mk = |source: &str, x: f64| PresentationEntry {
        timing: Timing {
            start: 0.0,
            duration: 10.0,
            fade_in: 2.0,
            fade_out: 2.0,
        },
        ..PresentationEntry::new(source, Vec2::new(x, 0.0), Vec2::new(0.25, 0.5))
    };
    PresentationRegistry::from_file_order(
        Some(ScreenDimensions::new(1.0, 1.0)),
        vec![mk("A", 0.0), mk("B", 0.25), mk("C", 0.5)],
    )
}

fn handles() -> Vec<ImageHandle> {
    (0..3).map(ImageHandle::from_u32).collect()
}

#[test]
fn full_view_projection_is_identity() {
    let view = MonitorView::full();
    let p = view.projection() * Point::new(0.3, -0.7);
    assert!(approx_pt(p, Point::new(0.3, -0.7)));
}

#[test]
fn frustum_fractions_map_to_screen_fractions() {
    // Left half of a symmetric 4x2 display.
    let view =
        MonitorView::from_frustums([-2.0, 0.0, -1.0, 1.0], [-2.0, 2.0, -1.0, 1.0]).unwrap();
    assert_eq!(view.visible, Rect::new(0.0, 0.0, 0.5, 1.0));

    let view =
        MonitorView::from_frustums([0.0, 2.0, -1.0, 1.0], [-2.0, 2.0, -1.0, 1.0]).unwrap();
    assert_eq!(view.visible, Rect::new(0.5, 0.0, 1.0, 1.0));
}

#[test]
fn frustum_validation() {
    assert!(MonitorView::from_frustums([-1.0, 1.0, -1.0, 1.0], [0.0, 1.0, -1.0, 1.0]).is_err());
    // Right bound left of the left bound.
    assert!(MonitorView::from_frustums([1.0, -1.0, -1.0, 1.0], [-1.0, 1.0, -1.0, 1.0]).is_err());
}

#[test]
fn half_view_projection_maps_its_region_to_ndc() {
    let view = MonitorView::new(Rect::new(0.0, 0.0, 0.5, 1.0)).unwrap();
    let proj = view.projection();
    // Display space x in [-1, 0] covers the left half.
    assert!(approx_pt(proj * Point::new(-1.0, -1.0), Point::new(-1.0, -1.0)));
    assert!(approx_pt(proj * Point::new(0.0, 1.0), Point::new(1.0, 1.0)));
    assert!(approx_pt(proj * Point::new(-0.5, 0.0), Point::new(0.0, 0.0)));
}

#[test]
fn columns_tile_the_screen() {
    let views = MonitorView::columns(3).unwrap();
    assert_eq!(views.len(), 3);
    assert_eq!(views[0].visible.x0, 0.0);
    assert!((views[2].visible.x1 - 1.0).abs() < 1e-12);
    for pair in views.windows(2) {
        assert_eq!(pair[0].visible.x1, pair[1].visible.x0);
    }
    assert!(MonitorView::columns(0).is_err());
}

#[test]
fn model_places_unit_quad_over_rect() {
    let ins = DrawInstruction {
        position: Vec2::new(0.25, 0.5),
        size: Vec2::new(0.5, 0.5),
        opacity: 1.0,
        image: ImageHandle::from_u32(0),
    };
    let m = ins.model();
    assert!(approx_pt(m * Point::new(0.0, 0.0), Point::new(-0.5, 0.0)));
    assert!(approx_pt(m * Point::new(1.0, 1.0), Point::new(0.5, 1.0)));
    assert_eq!(ins.rect(), Rect::new(0.25, 0.5, 0.75, 1.0));
}

#[test]
fn negative_size_mirrors_the_quad() {
    let ins = DrawInstruction {
        position: Vec2::new(0.5, 0.0),
        size: Vec2::new(-0.25, 0.5),
        opacity: 1.0,
        image: ImageHandle::from_u32(0),
    };
    let m = ins.model();
    // The quad's left edge lands on `position`, its right edge further left.
    assert!(approx_pt(m * Point::new(0.0, 0.0), Point::new(0.0, -1.0)));
    assert!(approx_pt(m * Point::new(1.0, 0.0), Point::new(-0.5, -1.0)));
    assert!(approx_pt(m * Point::new(0.0, 1.0), Point::new(0.0, 0.0)));
    assert_eq!(ins.rect(), Rect::new(0.25, 0.0, 0.5, 0.5));
}

#[test]
fn compose_keeps_raw_entry_extent() {
    let reg = PresentationRegistry::from_file_order(
        Some(ScreenDimensions::new(1.0, 1.0)),
        vec![PresentationEntry::new("flip", Vec2::new(1.0, 0.0), Vec2::new(-1.0, 1.0))],
    );
    let frame = Evaluator::eval_frame(&reg, 2.0);
    let draw = Compositor::compose(&frame, &reg, &handles(), MonitorView::full()).unwrap();
    assert_eq!(draw.instructions[0].size, Vec2::new(-1.0, 1.0));
    let m = draw.instructions[0].model();
    assert!(approx_pt(m * Point::new(0.0, 0.0), Point::new(1.0, -1.0)));
    assert!(approx_pt(m * Point::new(1.0, 1.0), Point::new(-1.0, 1.0)));
}

#[test]
fn compose_keeps_registry_order() {
    let reg = registry();
    let frame = Evaluator::eval_frame(&reg, 5.0);
    let draw = Compositor::compose(&frame, &reg, &handles(), MonitorView::full()).unwrap();

    let xs: Vec<f64> = draw.instructions.iter().map(|i| i.position.x).collect();
    // Storage order is C, B, A; A (first in the file) is drawn last, on top.
    assert_eq!(xs, [0.5, 0.25, 0.0]);
    let images: Vec<u32> = draw.instructions.iter().map(|i| i.image.as_u32()).collect();
    assert_eq!(images, [0, 1, 2]);
    assert!(draw.instructions.iter().all(|i| i.opacity == 1.0));
    assert_eq!(draw.projection, Affine::IDENTITY);
}

#[test]
fn compose_carries_opacity_and_drops_invisible() {
    let reg = registry();
    let frame = Evaluator::eval_frame(&reg, 1.0);
    let draw = Compositor::compose(&frame, &reg, &handles(), MonitorView::full()).unwrap();
    assert_eq!(draw.instructions.len(), 3);
    assert!(draw.instructions.iter().all(|i| (i.opacity - 0.5).abs() < 1e-12));

    let frame = Evaluator::eval_frame(&reg, 10.0);
    let draw = Compositor::compose(&frame, &reg, &handles(), MonitorView::full()).unwrap();
    assert!(draw.instructions.is_empty());
}

#[test]
fn compose_requires_a_handle_per_entry() {
    let reg = registry();
    let frame = Evaluator::eval_frame(&reg, 5.0);
    let err = Compositor::compose(&frame, &reg, &handles()[..1], MonitorView::full()).unwrap_err();
    assert!(matches!(err, SlideshowError::Validation(_)));
}
