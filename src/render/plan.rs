use kurbo::Shape as _;

use crate::{
    calendar::config::{GRID_COLUMNS, GRID_ROWS},
    config::VisualConfig,
    foundation::core::{BezPath, Canvas, Point, Rect, Rgb8, Rgba8},
    foundation::math::Rng64,
    layout::book_layout::BookLayout,
};

#[derive(Clone, Debug)]
/// Backend-agnostic drawing of one calendar page.
///
/// Ops are painted in order over a background fill: grid first, then book strokes in draw order.
pub struct RenderPlan {
    pub canvas: Canvas,
    pub background: Rgb8,
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Debug, PartialEq)]
/// Draw operation emitted by the compiler.
pub enum DrawOp {
    FillPath {
        path: BezPath,
        color: Rgba8,
    },
    /// One line of text placed relative to `anchor` according to `align`.
    Text {
        text: String,
        anchor: Point,
        size_px: f32,
        align: TextAlign,
        color: Rgba8,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which point of a text line's box sits on its anchor.
pub enum TextAlign {
    /// Right edge, vertical middle.
    RightMiddle,
    /// Horizontal center, top edge.
    CenterTop,
}

// Label sizes at the default 30 px cell width; they scale with the grid.
const YEAR_LABEL_PX: f64 = 16.0;
const DAY_LABEL_PX: f64 = 12.0;
const MONTH_LABEL_PX: f64 = 14.0;
const REFERENCE_CELL_WIDTH: f64 = 30.0;

impl RenderPlan {
    pub fn op_count(&self) -> usize {
        self.ops.len()
    }
}

#[tracing::instrument(skip_all, fields(books = layout.records().len()))]
pub fn compile_calendar(layout: &BookLayout, config: &VisualConfig) -> RenderPlan {
    let mut ops = grid_ops(config);
    if config.render.labels {
        ops.extend(label_ops(config));
    }
    let page_ops = ops.len();

    let style = config.render.style;
    for stroke in layout.strokes(&config.layout, &config.palette) {
        let mut rng =
            Rng64::for_stroke(config.render.seed, stroke.book, stroke.segment_month);
        ops.extend(style.draw(stroke.start, stroke.end, stroke.color, &mut rng));
    }

    tracing::debug!(
        page_ops,
        stroke_ops = ops.len() - page_ops,
        style = style.name(),
        "compiled calendar plan"
    );
    RenderPlan {
        canvas: config.layout.canvas(),
        background: config.render.background,
        ops,
    }
}

/// Horizontal rule on top of each month row and day separators inside it.
fn grid_ops(config: &VisualConfig) -> Vec<DrawOp> {
    let grid = config.layout.grid();
    let w = config.render.grid_line_width;
    if w <= 0.0 {
        return Vec::new();
    }
    let color = config.render.grid_color.with_alpha(255);
    let half = w / 2.0;
    let line = |x0: f64, y0: f64, x1: f64, y1: f64| DrawOp::FillPath {
        path: Rect::new(x0 - half, y0 - half, x1 + half, y1 + half).to_path(0.1),
        color,
    };

    let mut ops = Vec::with_capacity((GRID_ROWS * (GRID_COLUMNS + 2)) as usize);
    for month in 0..GRID_ROWS {
        let y = grid.origin_y + f64::from(month) * grid.cell_height;
        ops.push(line(grid.origin_x, y, grid.origin_x + grid.width(), y));
        for day in 0..=GRID_COLUMNS {
            let x = grid.origin_x + f64::from(day) * grid.cell_width;
            ops.push(line(x, y, x, y + grid.cell_height));
        }
    }
    ops
}

/// Year above the month column, day numbers above the grid, month names left of each row.
fn label_ops(config: &VisualConfig) -> Vec<DrawOp> {
    let grid = config.layout.grid();
    let color = config.render.label_color.with_alpha(255);
    let scale = grid.cell_width / REFERENCE_CELL_WIDTH;
    let label = |text: String, anchor: Point, px: f64, align: TextAlign| DrawOp::Text {
        text,
        anchor,
        size_px: (px * scale) as f32,
        align,
        color,
    };

    // Left of the grid by half a cell; day numbers sit half a row above it.
    let label_x = grid.origin_x - grid.cell_width / 2.0;
    let day_y = grid.origin_y - grid.cell_height / 2.0;

    let mut ops = Vec::with_capacity((1 + GRID_COLUMNS + GRID_ROWS) as usize);
    ops.push(label(
        config.calendar.year.to_string(),
        Point::new(label_x, grid.origin_y / 2.0),
        YEAR_LABEL_PX,
        TextAlign::RightMiddle,
    ));
    for day in 1..=GRID_COLUMNS {
        let x = grid.project(0, day).x;
        ops.push(label(
            day.to_string(),
            Point::new(x, day_y),
            DAY_LABEL_PX,
            TextAlign::CenterTop,
        ));
    }
    for (month, name) in (0..GRID_ROWS).zip(&config.calendar.months) {
        let y = grid.project(month, 1).y;
        ops.push(label(
            name.clone(),
            Point::new(label_x, y),
            MONTH_LABEL_PX,
            TextAlign::RightMiddle,
        ));
    }
    ops
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
