use serde::{Deserialize, Serialize};

use crate::{
    calendar::config::{GRID_COLUMNS, GRID_ROWS},
    foundation::core::{Canvas, Point, Rect},
    foundation::error::{BookstrokeError, BookstrokeResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Pixel geometry of the calendar page. Immutable; rescaling yields a new value.
pub struct LayoutConfig {
    #[serde(default = "default_margin_left")]
    pub margin_left: f64,
    #[serde(default = "default_margin_top")]
    pub margin_top: f64,
    #[serde(default = "default_margin_right")]
    pub margin_right: f64,
    #[serde(default = "default_margin_bottom")]
    pub margin_bottom: f64,
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,
    #[serde(default = "default_cell_height")]
    pub cell_height: f64,
    /// Vertical distance between stacking lanes.
    #[serde(default = "default_lane_pitch")]
    pub lane_pitch: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_left: default_margin_left(),
            margin_top: default_margin_top(),
            margin_right: default_margin_right(),
            margin_bottom: default_margin_bottom(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            lane_pitch: default_lane_pitch(),
        }
    }
}

impl LayoutConfig {
    pub fn grid(&self) -> GridGeometry {
        GridGeometry {
            origin_x: self.margin_left,
            origin_y: self.margin_top,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
        }
    }

    /// Unscaled page size: margins around 31 columns by 12 rows.
    pub fn page_size(&self) -> (f64, f64) {
        (
            self.margin_left + f64::from(GRID_COLUMNS) * self.cell_width + self.margin_right,
            self.margin_top + f64::from(GRID_ROWS) * self.cell_height + self.margin_bottom,
        )
    }

    pub fn canvas(&self) -> Canvas {
        let (w, h) = self.page_size();
        Canvas {
            width: w.ceil().max(1.0) as u32,
            height: h.ceil().max(1.0) as u32,
        }
    }

    /// Every pixel dimension multiplied by `s`.
    pub fn scaled(&self, s: f64) -> Self {
        Self {
            margin_left: self.margin_left * s,
            margin_top: self.margin_top * s,
            margin_right: self.margin_right * s,
            margin_bottom: self.margin_bottom * s,
            cell_width: self.cell_width * s,
            cell_height: self.cell_height * s,
            lane_pitch: self.lane_pitch * s,
        }
    }

    /// Shrink (never grow) so the page fits inside `max_width` x `max_height`.
    pub fn fit_within(&self, max_width: f64, max_height: f64) -> Self {
        let (w, h) = self.page_size();
        let scale = (max_width / w).min(max_height / h).min(1.0);
        if scale.is_finite() && scale > 0.0 && scale < 1.0 {
            self.scaled(scale)
        } else {
            *self
        }
    }

    pub fn validate(&self) -> BookstrokeResult<()> {
        let margins = [
            ("margin_left", self.margin_left),
            ("margin_top", self.margin_top),
            ("margin_right", self.margin_right),
            ("margin_bottom", self.margin_bottom),
            ("lane_pitch", self.lane_pitch),
        ];
        for (name, v) in margins {
            if !v.is_finite() || v < 0.0 {
                return Err(BookstrokeError::config(format!(
                    "layout.{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        for (name, v) in [("cell_width", self.cell_width), ("cell_height", self.cell_height)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(BookstrokeError::config(format!(
                    "layout.{name} must be finite and > 0, got {v}"
                )));
            }
        }
        let canvas = self.canvas();
        if canvas.width > u32::from(u16::MAX) || canvas.height > u32::from(u16::MAX) {
            return Err(BookstrokeError::config(format!(
                "layout page {}x{} exceeds {} px",
                canvas.width,
                canvas.height,
                u16::MAX
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Grid origin and cell size; maps calendar coordinates to cell centers.
pub struct GridGeometry {
    pub origin_x: f64,
    pub origin_y: f64,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl GridGeometry {
    /// Center of the cell for zero-based `month` and one-based `day`.
    ///
    /// Out-of-range inputs land outside the grid; they are not rejected.
    pub fn project(&self, month: u32, day: u32) -> Point {
        Point::new(
            self.origin_x + (f64::from(day) - 1.0) * self.cell_width + self.cell_width / 2.0,
            self.origin_y + f64::from(month) * self.cell_height + self.cell_height / 2.0,
        )
    }

    pub fn cell_rect(&self, month: u32, day: u32) -> Rect {
        let x0 = self.origin_x + (f64::from(day) - 1.0) * self.cell_width;
        let y0 = self.origin_y + f64::from(month) * self.cell_height;
        Rect::new(x0, y0, x0 + self.cell_width, y0 + self.cell_height)
    }

    pub fn width(&self) -> f64 {
        f64::from(GRID_COLUMNS) * self.cell_width
    }

    pub fn height(&self) -> f64 {
        f64::from(GRID_ROWS) * self.cell_height
    }
}

fn default_margin_left() -> f64 {
    80.0
}
fn default_margin_top() -> f64 {
    80.0
}
fn default_margin_right() -> f64 {
    40.0
}
fn default_margin_bottom() -> f64 {
    40.0
}
fn default_cell_width() -> f64 {
    30.0
}
fn default_cell_height() -> f64 {
    60.0
}
fn default_lane_pitch() -> f64 {
    6.0
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
