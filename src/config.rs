//! Immutable visualization configuration, loaded once and passed by reference.

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    calendar::config::CalendarConfig,
    foundation::core::Rgb8,
    foundation::error::{BookstrokeError, BookstrokeResult},
    layout::grid::LayoutConfig,
    render::style::StrokeStyle,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Everything the pipeline needs besides the book records.
pub struct VisualConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub render: RenderConfig,
}

impl VisualConfig {
    /// Read and validate a JSON config file. Missing sections and fields take defaults.
    pub fn load(path: &Path) -> BookstrokeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), year = cfg.calendar.year, "loaded config");
        Ok(cfg)
    }

    pub fn from_json(text: &str) -> BookstrokeResult<Self> {
        let cfg: Self =
            serde_json::from_str(text).map_err(|e| BookstrokeError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> BookstrokeResult<()> {
        self.calendar.validate()?;
        self.layout.validate()?;
        self.palette.validate()?;
        self.render.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// Ordered book colors, cycled by book index.
pub struct Palette(pub Vec<Rgb8>);

impl Default for Palette {
    fn default() -> Self {
        Self(vec![
            Rgb8::new(255, 150, 150),
            Rgb8::new(150, 200, 150),
            Rgb8::new(150, 150, 220),
            Rgb8::new(100, 150, 180),
            Rgb8::new(180, 120, 180),
            Rgb8::new(200, 180, 100),
            Rgb8::new(220, 140, 120),
        ])
    }
}

impl Palette {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Color for a palette slot; wraps, and falls back to black for an empty palette.
    pub fn color(&self, index: usize) -> Rgb8 {
        index
            .checked_rem(self.0.len())
            .and_then(|i| self.0.get(i))
            .copied()
            .unwrap_or(Rgb8::BLACK)
    }

    fn validate(&self) -> BookstrokeResult<()> {
        if self.0.is_empty() {
            return Err(BookstrokeError::config("palette must contain at least one color"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default = "default_background")]
    pub background: Rgb8,
    #[serde(default = "default_grid_color")]
    pub grid_color: Rgb8,
    #[serde(default = "default_grid_line_width")]
    pub grid_line_width: f64,
    /// Draw the year, day-number and month labels around the grid.
    #[serde(default = "default_labels")]
    pub labels: bool,
    #[serde(default = "default_label_color")]
    pub label_color: Rgb8,
    #[serde(default)]
    pub style: StrokeStyle,
    /// Seed for stroke texture; equal seeds give identical images.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            grid_color: default_grid_color(),
            grid_line_width: default_grid_line_width(),
            labels: default_labels(),
            label_color: default_label_color(),
            style: StrokeStyle::default(),
            seed: default_seed(),
        }
    }
}

impl RenderConfig {
    fn validate(&self) -> BookstrokeResult<()> {
        if !self.grid_line_width.is_finite() || self.grid_line_width < 0.0 {
            return Err(BookstrokeError::config(format!(
                "render.grid_line_width must be finite and >= 0, got {}",
                self.grid_line_width
            )));
        }
        self.style.validate()
    }
}

fn default_background() -> Rgb8 {
    Rgb8::new(0xFA, 0xFF, 0xCE)
}
fn default_grid_color() -> Rgb8 {
    Rgb8::BLACK
}
fn default_grid_line_width() -> f64 {
    0.5
}
fn default_labels() -> bool {
    true
}
fn default_label_color() -> Rgb8 {
    Rgb8::BLACK
}
fn default_seed() -> u64 {
    42
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
