use super::*;
use crate::span::record::BookRecord;

fn layout_with(records: Vec<BookRecord>) -> BookLayout {
    let cfg = VisualConfig::default();
    BookLayout::new(cfg.calendar.clone(), cfg.palette.len(), records)
}

const GRID_OPS: usize = 12 * 33;
const LABEL_OPS: usize = 1 + 31 + 12;

fn labels(plan: &RenderPlan) -> Vec<(&str, Point, TextAlign)> {
    plan.ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text {
                text,
                anchor,
                align,
                ..
            } => Some((text.as_str(), *anchor, *align)),
            DrawOp::FillPath { .. } => None,
        })
        .collect()
}

#[test]
fn empty_layout_has_grid_and_labels() {
    let plan = compile_calendar(&layout_with(Vec::new()), &VisualConfig::default());
    assert_eq!(plan.op_count(), GRID_OPS + LABEL_OPS);
    assert_eq!(plan.canvas, Canvas { width: 1050, height: 840 });
    assert_eq!(plan.background, Rgb8::new(0xFA, 0xFF, 0xCE));
}

#[test]
fn zero_width_grid_is_skipped() {
    let mut cfg = VisualConfig::default();
    cfg.render.grid_line_width = 0.0;
    let plan = compile_calendar(&layout_with(Vec::new()), &cfg);
    assert_eq!(plan.op_count(), LABEL_OPS);

    cfg.render.labels = false;
    let plan = compile_calendar(&layout_with(Vec::new()), &cfg);
    assert_eq!(plan.op_count(), 0);
}

#[test]
fn labels_name_year_days_and_months_around_the_grid() {
    let mut cfg = VisualConfig::default();
    cfg.calendar.months[0] = "Ene".to_string();
    let plan = compile_calendar(&layout_with(Vec::new()), &cfg);
    let labels = labels(&plan);
    assert_eq!(labels.len(), LABEL_OPS);

    let (year, at, align) = labels[0];
    assert_eq!(year, "2025");
    assert_eq!(at, Point::new(80.0 - 15.0, 40.0));
    assert_eq!(align, TextAlign::RightMiddle);

    let days: Vec<_> = labels[1..32].iter().map(|(t, _, _)| *t).collect();
    assert_eq!(days.first(), Some(&"1"));
    assert_eq!(days.last(), Some(&"31"));
    let (_, first_day, align) = labels[1];
    assert_eq!(first_day, Point::new(95.0, 80.0 - 30.0));
    assert_eq!(align, TextAlign::CenterTop);

    let months: Vec<_> = labels[32..].iter().map(|(t, _, _)| *t).collect();
    assert_eq!(months[0], "Ene");
    assert_eq!(months[11], "Dec");
    let (_, jan, _) = labels[32];
    assert_eq!(jan, Point::new(65.0, 110.0));
}

#[test]
fn labels_shrink_with_the_page() {
    let mut cfg = VisualConfig::default();
    cfg.layout = cfg.layout.scaled(0.5);
    let plan = compile_calendar(&layout_with(Vec::new()), &cfg);
    let sizes: Vec<f32> = plan
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { size_px, .. } => Some(*size_px),
            DrawOp::FillPath { .. } => None,
        })
        .collect();
    assert_eq!(sizes[0], 8.0);
    assert_eq!(sizes[1], 6.0);
    assert_eq!(sizes[32], 7.0);
}

#[test]
fn strokes_follow_grid_and_are_deterministic() {
    let books = vec![
        BookRecord::new("A", "x", "Jan 10 2025", "Mar 05 2025"),
        BookRecord::new("B", "y", "Feb 02 2025", "Feb 03 2025"),
        BookRecord::new("C", "z", "", "Feb 03 2025"),
    ];
    let cfg = VisualConfig::default();
    let a = compile_calendar(&layout_with(books.clone()), &cfg);
    let b = compile_calendar(&layout_with(books), &cfg);
    assert!(a.op_count() > GRID_OPS + LABEL_OPS);
    assert_eq!(a.ops, b.ops);
}

#[test]
fn seed_changes_texture_only() {
    let books = vec![BookRecord::new("A", "x", "Jan 10 2025", "Jan 20 2025")];
    let mut cfg = VisualConfig::default();
    let a = compile_calendar(&layout_with(books.clone()), &cfg);
    cfg.render.seed = 7;
    let b = compile_calendar(&layout_with(books), &cfg);
    assert_eq!(a.op_count(), b.op_count());
    assert_ne!(a.ops, b.ops);
}
