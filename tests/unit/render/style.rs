use super::*;
use kurbo::Shape as _;

const RED: Rgb8 = Rgb8::new(255, 0, 0);

fn all_styles() -> Vec<StrokeStyle> {
    ["marker", "pencil", "ballpen", "watercolor"]
        .into_iter()
        .map(|n| StrokeStyle::from_name(n).unwrap())
        .collect()
}

fn fill(op: &DrawOp) -> (&BezPath, crate::foundation::core::Rgba8) {
    match op {
        DrawOp::FillPath { path, color } => (path, *color),
        other => panic!("strokes emit only fills, got {other:?}"),
    }
}

fn bounds(ops: &[DrawOp]) -> kurbo::Rect {
    ops.iter()
        .map(|op| fill(op).0.bounding_box())
        .reduce(|a, b| a.union(b))
        .unwrap()
}

#[test]
fn names_round_trip() {
    for style in all_styles() {
        assert_eq!(StrokeStyle::from_name(style.name()), Some(style));
    }
    assert_eq!(StrokeStyle::from_name("crayon"), None);
}

#[test]
fn same_seed_draws_identical_ops() {
    let (a, b) = (Point::new(10.0, 20.0), Point::new(200.0, 20.0));
    for style in all_styles() {
        let first = style.draw(a, b, RED, &mut Rng64::new(42));
        let second = style.draw(a, b, RED, &mut Rng64::new(42));
        assert_eq!(first, second, "{}", style.name());
        assert!(!first.is_empty());
    }
}

#[test]
fn marker_fades_alpha_across_passes() {
    let ops = StrokeStyle::from_name("marker").unwrap().draw(
        Point::new(0.0, 0.0),
        Point::new(90.0, 0.0),
        RED,
        &mut Rng64::new(1),
    );
    assert_eq!(ops.len(), 15);
    let alphas: Vec<u8> = ops.iter().map(|op| fill(op).1.a).collect();
    assert_eq!(alphas[0], 200);
    assert!(alphas.windows(2).all(|w| w[0] >= w[1]));
    assert!(*alphas.last().unwrap() > 100);
}

#[test]
fn pencil_grain_count_follows_length() {
    let style = StrokeStyle::from_name("pencil").unwrap();
    let ops = style.draw(
        Point::new(0.0, 50.0),
        Point::new(300.0, 50.0),
        RED,
        &mut Rng64::new(3),
    );
    assert_eq!(ops.len(), 150);
    for op in &ops {
        let (_, color) = fill(op);
        assert!((80..=180).contains(&color.a));
        assert_eq!((color.r, color.g, color.b), (255, 0, 0));
    }
    let bb = bounds(&ops);
    assert!(bb.y0 >= 50.0 - 4.0 - 1.0 && bb.y1 <= 50.0 + 4.0 + 1.0);
}

#[test]
fn zero_length_spans_stay_visible() {
    let p = Point::new(40.0, 40.0);
    for style in all_styles() {
        let ops = style.draw(p, p, RED, &mut Rng64::new(9));
        let bb = bounds(&ops);
        assert!(bb.width() > 0.0 && bb.height() > 0.0, "{}", style.name());
    }
}

#[test]
fn capsule_spans_endpoints_plus_caps() {
    let path = capsule_path(Point::new(10.0, 10.0), Point::new(50.0, 10.0), 4.0);
    let bb = path.bounding_box();
    assert!((bb.x0 - 8.0).abs() < 1e-9);
    assert!((bb.x1 - 52.0).abs() < 1e-9);
    assert!((bb.y0 - 8.0).abs() < 1e-9);
    assert!((bb.y1 - 12.0).abs() < 1e-9);
}

#[test]
fn style_json_is_tagged_by_kind() {
    let style: StrokeStyle =
        serde_json::from_str(r#"{"kind": "watercolor", "washes": 2}"#).unwrap();
    let StrokeStyle::Watercolor(p) = style else {
        panic!("expected watercolor, got {style:?}");
    };
    assert_eq!(p.washes, 2);
    assert_eq!(p.min_width, WatercolorParams::default().min_width);
    assert!(serde_json::from_str::<StrokeStyle>(r#"{"kind": "crayon"}"#).is_err());
}

#[test]
fn inverted_ranges_fail_validation() {
    let bad = StrokeStyle::Ballpen(BallpenParams {
        min_width: 3.0,
        max_width: 1.0,
        ..BallpenParams::default()
    });
    assert!(bad.validate().is_err());
    for style in all_styles() {
        assert!(style.validate().is_ok());
    }
}

#[test]
fn negative_or_non_finite_amounts_fail_validation() {
    let bad = [
        StrokeStyle::Pencil(PencilParams {
            thickness: -40.0,
            ..PencilParams::default()
        }),
        StrokeStyle::Pencil(PencilParams {
            along_jitter: f64::NAN,
            ..PencilParams::default()
        }),
        StrokeStyle::Marker(MarkerParams {
            jitter_y: -1.0,
            ..MarkerParams::default()
        }),
        StrokeStyle::Ballpen(BallpenParams {
            wobble: f64::INFINITY,
            ..BallpenParams::default()
        }),
        StrokeStyle::Watercolor(WatercolorParams {
            jitter: -0.5,
            ..WatercolorParams::default()
        }),
    ];
    for style in bad {
        let err = style.validate().unwrap_err();
        assert!(matches!(err, BookstrokeError::Config(_)), "{style:?}");
    }
}

#[test]
fn runaway_work_counts_fail_validation() {
    let bad = [
        StrokeStyle::Pencil(PencilParams {
            grains_per_px: 1e9,
            ..PencilParams::default()
        }),
        StrokeStyle::Pencil(PencilParams {
            min_grains: u32::MAX,
            ..PencilParams::default()
        }),
        StrokeStyle::Marker(MarkerParams {
            passes: 4_000_000_000,
            ..MarkerParams::default()
        }),
        StrokeStyle::Ballpen(BallpenParams {
            passes: 257,
            ..BallpenParams::default()
        }),
        StrokeStyle::Watercolor(WatercolorParams {
            washes: 10_000,
            ..WatercolorParams::default()
        }),
    ];
    for style in bad {
        let err = style.validate().unwrap_err();
        assert!(err.to_string().contains("must be <="), "{style:?}: {err}");
    }

    let at_limit = StrokeStyle::Marker(MarkerParams {
        passes: 256,
        ..MarkerParams::default()
    });
    assert!(at_limit.validate().is_ok());
}
