use super::*;

fn entry(source: &str, start: f64, duration: f64) -> PresentationEntry {
    PresentationEntry {
        timing: Timing {
            start,
            duration,
            ..Timing::default()
        },
        ..PresentationEntry::new(source, Vec2::ZERO, Vec2::new(0.5, 0.5))
    }
}

#[test]
fn default_timing_matches_constructor_defaults() {
    let t = Timing::default();
    assert_eq!(t.start, 0.0);
    assert_eq!(t.duration, 5.0);
    assert_eq!(t.fade_in, 1.0);
    assert_eq!(t.fade_out, 1.0);
    assert_eq!(t.end(), 5.0);
}

#[test]
fn screen_normalizes_both_axes() {
    let s = ScreenDimensions::new(3.0, 1.0);
    assert_eq!(s.normalize(Vec2::new(1.5, 0.5)), Vec2::new(0.5, 0.5));
}

#[test]
fn file_order_is_reversed_once() {
    let reg = PresentationRegistry::from_file_order(
        Some(ScreenDimensions::new(1.0, 1.0)),
        vec![entry("A", 0.0, 1.0), entry("B", 0.0, 1.0), entry("C", 0.0, 1.0)],
    );
    let sources: Vec<&str> = reg.iter().map(|e| e.source.as_str()).collect();
    assert_eq!(sources, ["C", "B", "A"]);
    assert_eq!(reg.get(2).map(|e| e.source.as_str()), Some("A"));
    assert!(reg.get(3).is_none());
    assert_eq!((&reg).into_iter().count(), 3);
}

#[test]
fn show_end_is_latest_entry_end() {
    let reg = PresentationRegistry::from_file_order(
        Some(ScreenDimensions::new(1.0, 1.0)),
        vec![entry("A", 0.0, 4.0), entry("B", 6.0, 1.5), entry("C", 2.0, 3.0)],
    );
    assert_eq!(reg.show_end(), 7.5);
    assert_eq!(PresentationRegistry::default().show_end(), 0.0);
}

#[test]
fn entry_rect_spans_position_and_size() {
    let e = PresentationEntry::new("a", Vec2::new(0.25, 0.5), Vec2::new(0.5, 0.25));
    let r = e.rect();
    assert_eq!((r.x0, r.y0, r.x1, r.y1), (0.25, 0.5, 0.75, 0.75));
}

#[test]
fn registry_serializes_entries_in_draw_order() {
    let reg = PresentationRegistry::from_file_order(
        Some(ScreenDimensions::new(2.0, 1.0)),
        vec![entry("first.png", 0.0, 1.0), entry("second.png", 0.0, 1.0)],
    );
    let json = serde_json::to_value(&reg).unwrap();
    assert_eq!(json["screen"]["width"], 2.0);
    assert_eq!(json["entries"][0]["source"], "second.png");
    assert_eq!(json["entries"][1]["timing"]["fade_in"], 1.0);
}
