//! bookstroke draws a year of reading as strokes over a calendar page.
//!
//! The page is a 12 x 31 grid (one row per month, one column per day). Each book becomes one or
//! more strokes from the day reading started to the day it finished.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: raw date cells -> [`CalendarDate`] via [`CalendarConfig::parse_date`]
//! 2. **Normalize**: [`BookRecord`] -> month-bounded [`Segment`]s via [`normalize_record`]
//! 3. **Resolve**: segments -> stacking lanes and draw order via [`resolve_offsets`]
//! 4. **Project**: calendar coordinates -> page points via [`GridGeometry::project`]
//! 5. **Render** (optional): [`compile_calendar`] -> [`RenderPlan`] -> [`CpuRenderer`] -> PNG
//!
//! Steps 1-4 are total: a book with unusable dates is dropped (and logged at debug level),
//! never reported as an error. Only configuration, ingestion and rendering can fail.
//!
//! Layout is deterministic: the same records and config always produce the same lanes, and the
//! same seed produces the same stroke texture.
#![forbid(unsafe_code)]

mod assets;
mod calendar;
mod foundation;
mod ingest;
mod layout;
mod overlap;
mod render;
mod span;

/// Visualization configuration.
pub mod config;
/// `tracing` subscriber setup for the command-line tool.
pub mod logging;

pub use assets::cover::{CoverImage, CoverSource, CoverStore, NoCovers, cover_slug, decode_cover};
pub use calendar::config::{CalendarConfig, GRID_COLUMNS, GRID_ROWS};
pub use calendar::date::{CalendarDate, YearPolicy};
pub use config::{Palette, RenderConfig, VisualConfig};
pub use foundation::core::{BezPath, Canvas, Point, Rect, Rgb8, Rgba8, Vec2};
pub use foundation::error::{BookstrokeError, BookstrokeResult};
pub use foundation::math::Rng64;
pub use ingest::csv::{load_books_csv, read_books_csv};
pub use layout::book_layout::{BookLayout, PlacedStroke, SegmentCache, Tooltip, layout_segments};
pub use layout::grid::{GridGeometry, LayoutConfig};
pub use overlap::resolver::{lane_count, overlaps, resolve_offsets};
pub use render::cpu::{CpuRenderer, FrameRGBA};
pub use render::plan::{DrawOp, RenderPlan, TextAlign, compile_calendar};
pub use render::style::{
    BallpenParams, MarkerParams, PencilParams, StrokeStyle, WatercolorParams,
};
pub use span::record::BookRecord;
pub use span::segment::{DropReason, Segment, normalize_record, try_normalize_record};
