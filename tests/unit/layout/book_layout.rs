use super::*;
use crate::assets::cover::{CoverImage, CoverSource, NoCovers};

fn books() -> Vec<BookRecord> {
    vec![
        BookRecord::new("Long", "A", "Jan 10 2025", "Mar 05 2025").with_ratings("5", "4.1"),
        BookRecord::new("Short", "B", "Feb 10 2025", "Feb 12 2025"),
        BookRecord::new("Dropped", "C", "", "Feb 12 2025"),
    ]
}

fn layout() -> BookLayout {
    BookLayout::new(CalendarConfig::default(), 7, books())
}

#[test]
fn segments_are_computed_once_and_in_draw_order() {
    let l = layout();
    assert!(!l.cache().is_filled());

    let segs = l.segments();
    assert_eq!(segs.len(), 4);
    assert!(segs.windows(2).all(|w| w[0].duration >= w[1].duration));
    assert!(l.cache().is_filled());

    let again = l.segments();
    assert!(Rc::ptr_eq(&segs, &again));
    assert_eq!(l.cache().fills(), 1);
}

#[test]
fn reload_invalidates_and_recomputes() {
    let mut l = layout();
    assert_eq!(l.segments().len(), 4);

    l.reload(vec![BookRecord::new("Solo", "D", "Jun 01 2025", "Jun 02 2025")]);
    assert!(!l.cache().is_filled());
    let segs = l.segments();
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].book, 0);
    assert_eq!(l.cache().fills(), 2);

    l.invalidate();
    assert!(!l.cache().is_filled());
}

#[test]
fn short_book_stacks_over_long_february_piece() {
    let segs = layout().segments();
    let feb_long = segs
        .iter()
        .find(|s| s.book == 0 && s.segment_month == 1)
        .unwrap();
    let short = segs.iter().find(|s| s.book == 1).unwrap();
    assert_eq!(feb_long.offset, 0);
    assert_eq!(short.offset, 1);
}

#[test]
fn strokes_apply_lane_offset_and_palette() {
    let l = layout();
    let cfg = LayoutConfig::default();
    let palette = Palette::default();
    let strokes = l.strokes(&cfg, &palette);
    assert_eq!(strokes.len(), 4);

    let short = strokes.iter().find(|s| s.book == 1).unwrap();
    let grid = cfg.grid();
    assert_eq!(short.start.x, grid.project(1, 10).x);
    assert_eq!(short.start.y, grid.project(1, 10).y + 6.0);
    assert_eq!(short.end.y, short.start.y);
    assert_eq!(short.color, palette.color(1));

    let jan = strokes
        .iter()
        .find(|s| s.book == 0 && s.segment_month == 0)
        .unwrap();
    assert_eq!(jan.start, grid.project(0, 10));
    assert_eq!(jan.end, grid.project(0, 31));
}

#[test]
fn tooltip_carries_record_fields_and_optional_cover() {
    struct OneCover;
    impl CoverSource for OneCover {
        fn cover_for(&mut self, title: &str) -> Option<CoverImage> {
            (title == "Long").then(|| CoverImage {
                width: 1,
                height: 1,
                rgba8_premul: std::sync::Arc::new(vec![0, 0, 0, 255]),
            })
        }
    }

    let l = layout();
    let tip = l.tooltip(0, &mut OneCover).unwrap();
    assert_eq!(tip.title, "Long");
    assert_eq!(tip.author, "A");
    assert_eq!(tip.rating, "5");
    assert_eq!(tip.started, "Jan 10 2025");
    assert!(tip.cover.is_some());

    assert!(l.tooltip(1, &mut OneCover).unwrap().cover.is_none());
    assert!(l.tooltip(2, &mut NoCovers).is_some());
    assert!(l.tooltip(9, &mut NoCovers).is_none());
}

#[test]
fn hit_test_prefers_topmost_stroke() {
    let l = layout();
    let cfg = LayoutConfig::default();
    let grid = cfg.grid();

    let on_short = grid.project(1, 11) + kurbo::Vec2::new(0.0, 6.0);
    assert_eq!(l.hit_test(on_short, &cfg, 2.0), Some(1));

    let on_long = grid.project(1, 20);
    assert_eq!(l.hit_test(on_long, &cfg, 2.0), Some(0));

    let nowhere = grid.project(7, 15);
    assert_eq!(l.hit_test(nowhere, &cfg, 2.0), None);
}

#[test]
fn overlapping_tolerance_picks_last_drawn() {
    let l = layout();
    let cfg = LayoutConfig::default();
    let between = cfg.grid().project(1, 11) + kurbo::Vec2::new(0.0, 3.0);
    assert_eq!(l.hit_test(between, &cfg, 4.0), Some(1));
}

#[test]
fn distance_to_degenerate_segment_is_point_distance() {
    let a = Point::new(1.0, 1.0);
    assert_eq!(distance_sq_to_segment(Point::new(4.0, 5.0), a, a), 25.0);
    assert_eq!(
        distance_sq_to_segment(Point::new(5.0, 3.0), a, Point::new(9.0, 1.0)),
        4.0
    );
}
