use kurbo::Shape as _;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{BezPath, Point, Rgb8, Vec2},
    foundation::error::{BookstrokeError, BookstrokeResult},
    foundation::math::Rng64,
    render::plan::DrawOp,
};

const CAP_STEPS: usize = 8;

/// Upper bounds on per-stroke work.
const MAX_PASSES: u32 = 256;
const MAX_GRAINS_PER_PX: f64 = 64.0;
const MAX_MIN_GRAINS: u32 = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// How a book's span is drawn between its two endpoints.
///
/// Every variant is a pure function of the endpoints, the color, its own parameters and a seeded
/// random stream, producing plain [`DrawOp`]s.
pub enum StrokeStyle {
    /// Broad overlapping translucent bars.
    Marker(MarkerParams),
    /// Scattered grain dots along the span.
    Pencil(PencilParams),
    /// A thin, near-opaque double line.
    Ballpen(BallpenParams),
    /// Wide faint washes that build up where they overlap.
    Watercolor(WatercolorParams),
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::Pencil(PencilParams::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerParams {
    pub passes: u32,
    pub min_width: f64,
    pub max_width: f64,
    pub jitter_x: f64,
    pub jitter_y: f64,
    pub alpha_start: f64,
    pub alpha_end: f64,
}

impl Default for MarkerParams {
    fn default() -> Self {
        Self {
            passes: 15,
            min_width: 15.0,
            max_width: 25.0,
            jitter_x: 3.0,
            jitter_y: 2.0,
            alpha_start: 200.0,
            alpha_end: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PencilParams {
    /// Width of the band the grain is scattered across.
    pub thickness: f64,
    /// Grain dots per pixel of span length.
    pub grains_per_px: f64,
    /// Fewest dots drawn, so single-day spans stay visible.
    pub min_grains: u32,
    /// Jitter along the span, as a fraction of its length.
    pub along_jitter: f64,
    pub min_alpha: f64,
    pub max_alpha: f64,
    pub min_dot: f64,
    pub max_dot: f64,
}

impl Default for PencilParams {
    fn default() -> Self {
        Self {
            thickness: 8.0,
            grains_per_px: 0.5,
            min_grains: 12,
            along_jitter: 0.01,
            min_alpha: 80.0,
            max_alpha: 180.0,
            min_dot: 0.5,
            max_dot: 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BallpenParams {
    pub passes: u32,
    pub min_width: f64,
    pub max_width: f64,
    pub wobble: f64,
    pub alpha: u8,
}

impl Default for BallpenParams {
    fn default() -> Self {
        Self {
            passes: 2,
            min_width: 1.2,
            max_width: 1.8,
            wobble: 0.6,
            alpha: 220,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatercolorParams {
    pub washes: u32,
    pub min_width: f64,
    pub max_width: f64,
    pub jitter: f64,
    pub min_alpha: f64,
    pub max_alpha: f64,
}

impl Default for WatercolorParams {
    fn default() -> Self {
        Self {
            washes: 6,
            min_width: 18.0,
            max_width: 28.0,
            jitter: 2.0,
            min_alpha: 25.0,
            max_alpha: 45.0,
        }
    }
}

impl StrokeStyle {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Marker(_) => "marker",
            Self::Pencil(_) => "pencil",
            Self::Ballpen(_) => "ballpen",
            Self::Watercolor(_) => "watercolor",
        }
    }

    /// Default parameters for a style name (`marker`, `pencil`, `ballpen`, `watercolor`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "marker" => Some(Self::Marker(MarkerParams::default())),
            "pencil" => Some(Self::Pencil(PencilParams::default())),
            "ballpen" => Some(Self::Ballpen(BallpenParams::default())),
            "watercolor" => Some(Self::Watercolor(WatercolorParams::default())),
            _ => None,
        }
    }

    pub fn draw(&self, start: Point, end: Point, color: Rgb8, rng: &mut Rng64) -> Vec<DrawOp> {
        match self {
            Self::Marker(p) => marker(start, end, color, p, rng),
            Self::Pencil(p) => pencil(start, end, color, p, rng),
            Self::Ballpen(p) => ballpen(start, end, color, p, rng),
            Self::Watercolor(p) => watercolor(start, end, color, p, rng),
        }
    }

    pub fn validate(&self) -> BookstrokeResult<()> {
        let name = self.name();
        let (ranges, amounts, counts): (Vec<(&str, f64, f64)>, Vec<(&str, f64)>, Vec<(&str, u32)>) =
            match self {
                Self::Marker(p) => (
                    vec![
                        ("width", p.min_width, p.max_width),
                        ("alpha", p.alpha_end.min(p.alpha_start), p.alpha_start.max(p.alpha_end)),
                    ],
                    vec![("jitter_x", p.jitter_x), ("jitter_y", p.jitter_y)],
                    vec![("passes", p.passes)],
                ),
                Self::Pencil(p) => (
                    vec![
                        ("alpha", p.min_alpha, p.max_alpha),
                        ("dot", p.min_dot, p.max_dot),
                    ],
                    vec![
                        ("thickness", p.thickness),
                        ("grains_per_px", p.grains_per_px),
                        ("along_jitter", p.along_jitter),
                    ],
                    Vec::new(),
                ),
                Self::Ballpen(p) => (
                    vec![("width", p.min_width, p.max_width)],
                    vec![("wobble", p.wobble)],
                    vec![("passes", p.passes)],
                ),
                Self::Watercolor(p) => (
                    vec![
                        ("width", p.min_width, p.max_width),
                        ("alpha", p.min_alpha, p.max_alpha),
                    ],
                    vec![("jitter", p.jitter)],
                    vec![("washes", p.washes)],
                ),
            };

        for (what, lo, hi) in ranges {
            if !lo.is_finite() || !hi.is_finite() || lo < 0.0 || lo > hi {
                return Err(BookstrokeError::config(format!(
                    "{name} stroke {what} range must satisfy 0 <= min <= max, got {lo}..{hi}"
                )));
            }
        }
        for (what, v) in amounts {
            if !v.is_finite() || v < 0.0 {
                return Err(BookstrokeError::config(format!(
                    "{name} stroke {what} must be finite and >= 0, got {v}"
                )));
            }
        }
        for (what, n) in counts {
            if n > MAX_PASSES {
                return Err(BookstrokeError::config(format!(
                    "{name} stroke {what} must be <= {MAX_PASSES}, got {n}"
                )));
            }
        }
        if let Self::Pencil(p) = self {
            if p.grains_per_px > MAX_GRAINS_PER_PX {
                return Err(BookstrokeError::config(format!(
                    "pencil stroke grains_per_px must be <= {MAX_GRAINS_PER_PX}, got {}",
                    p.grains_per_px
                )));
            }
            if p.min_grains > MAX_MIN_GRAINS {
                return Err(BookstrokeError::config(format!(
                    "pencil stroke min_grains must be <= {MAX_MIN_GRAINS}, got {}",
                    p.min_grains
                )));
            }
        }
        Ok(())
    }
}

fn marker(start: Point, end: Point, color: Rgb8, p: &MarkerParams, rng: &mut Rng64) -> Vec<DrawOp> {
    let passes = p.passes.max(1);
    (0..passes)
        .map(|i| {
            let shift = Vec2::new(
                rng.range(-p.jitter_x, p.jitter_x),
                rng.range(-p.jitter_y, p.jitter_y),
            );
            let t = f64::from(i) / f64::from(passes);
            let alpha = p.alpha_start + (p.alpha_end - p.alpha_start) * t;
            let width = rng.range(p.min_width, p.max_width);
            DrawOp::FillPath {
                path: capsule_path(start + shift, end + shift, width),
                color: color.with_alpha(alpha_u8(alpha)),
            }
        })
        .collect()
}

fn pencil(start: Point, end: Point, color: Rgb8, p: &PencilParams, rng: &mut Rng64) -> Vec<DrawOp> {
    let dir = end - start;
    let count = ((dir.hypot() * p.grains_per_px).ceil() as u32).max(p.min_grains);
    let normal = Vec2::from_angle(dir.atan2() + std::f64::consts::FRAC_PI_2);
    let half = p.thickness / 2.0;

    (0..count)
        .map(|i| {
            let t = f64::from(i) / f64::from(count);
            let t = (t + rng.range(-p.along_jitter, p.along_jitter)).clamp(0.0, 1.0);
            let center = start.lerp(end, t) + normal * rng.range(-half, half);
            let alpha = rng.range(p.min_alpha, p.max_alpha);
            let diameter = rng.range(p.min_dot, p.max_dot);
            DrawOp::FillPath {
                path: dot_path(center, diameter / 2.0),
                color: color.with_alpha(alpha_u8(alpha)),
            }
        })
        .collect()
}

fn ballpen(start: Point, end: Point, color: Rgb8, p: &BallpenParams, rng: &mut Rng64) -> Vec<DrawOp> {
    (0..p.passes.max(1))
        .map(|_| {
            let mut wobble = || Vec2::new(0.0, rng.range(-p.wobble, p.wobble));
            let a = start + wobble();
            let b = end + wobble();
            let width = rng.range(p.min_width, p.max_width);
            DrawOp::FillPath {
                path: capsule_path(a, b, width),
                color: color.with_alpha(p.alpha),
            }
        })
        .collect()
}

fn watercolor(
    start: Point,
    end: Point,
    color: Rgb8,
    p: &WatercolorParams,
    rng: &mut Rng64,
) -> Vec<DrawOp> {
    (0..p.washes.max(1))
        .map(|_| {
            let shift = Vec2::new(rng.range(-p.jitter, p.jitter), rng.range(-p.jitter, p.jitter));
            let width = rng.range(p.min_width, p.max_width);
            let alpha = rng.range(p.min_alpha, p.max_alpha);
            DrawOp::FillPath {
                path: capsule_path(start + shift, end + shift, width),
                color: color.with_alpha(alpha_u8(alpha)),
            }
        })
        .collect()
}

fn alpha_u8(a: f64) -> u8 {
    a.round().clamp(0.0, 255.0) as u8
}

pub(crate) fn dot_path(center: Point, radius: f64) -> BezPath {
    kurbo::Circle::new(center, radius).to_path(0.05)
}

/// A bar from `a` to `b` with round caps; collapses to a disc when `a == b`.
pub(crate) fn capsule_path(a: Point, b: Point, width: f64) -> BezPath {
    let r = width / 2.0;
    let dir = b - a;
    let angle = if dir.hypot2() > 0.0 { dir.atan2() } else { 0.0 };
    let half_turn = std::f64::consts::PI;

    let mut path = BezPath::new();
    let mut first = true;
    for (center, from) in [(b, angle - half_turn / 2.0), (a, angle + half_turn / 2.0)] {
        for step in 0..=CAP_STEPS {
            let theta = from + half_turn * (step as f64) / (CAP_STEPS as f64);
            let p = center + Vec2::from_angle(theta) * r;
            if first {
                path.move_to(p);
                first = false;
            } else {
                path.line_to(p);
            }
        }
    }
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/style.rs"]
mod tests;
