use std::{
    cell::{Cell, OnceCell},
    rc::Rc,
};

use serde::Serialize;

use crate::{
    assets::cover::{CoverImage, CoverSource},
    calendar::config::CalendarConfig,
    config::Palette,
    foundation::core::{Point, Rgb8},
    layout::grid::LayoutConfig,
    overlap::resolver::{lane_count, resolve_offsets},
    span::record::BookRecord,
    span::segment::{Segment, normalize_record},
};

/// Normalize every record and resolve stacking; the result is in draw order.
#[tracing::instrument(skip_all, fields(books = records.len(), year = calendar.year))]
pub fn layout_segments(
    calendar: &CalendarConfig,
    records: &[BookRecord],
    palette_len: usize,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut placed_books = 0usize;
    for (index, record) in records.iter().enumerate() {
        let before = segments.len();
        segments.extend(normalize_record(calendar, record, index, palette_len));
        if segments.len() > before {
            placed_books += 1;
        }
    }

    let placed = resolve_offsets(segments);
    tracing::info!(
        placed_books,
        dropped_books = records.len() - placed_books,
        segments = placed.len(),
        lanes = lane_count(&placed),
        "calendar layout resolved"
    );
    placed
}

#[derive(Debug, Default)]
/// Placed segments computed once per record set, with explicit invalidation.
pub struct SegmentCache {
    placed: OnceCell<Rc<[Segment]>>,
    fills: Cell<u64>,
}

impl SegmentCache {
    pub fn get_or_compute(&self, compute: impl FnOnce() -> Vec<Segment>) -> Rc<[Segment]> {
        self.placed
            .get_or_init(|| {
                self.fills.set(self.fills.get() + 1);
                Rc::from(compute())
            })
            .clone()
    }

    pub fn invalidate(&mut self) {
        self.placed.take();
    }

    pub fn is_filled(&self) -> bool {
        self.placed.get().is_some()
    }

    /// How many times the cache has been (re)computed.
    pub fn fills(&self) -> u64 {
        self.fills.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// One stroke ready for a renderer: offset-adjusted endpoints and a color.
pub struct PlacedStroke {
    pub book: usize,
    pub segment_month: u32,
    pub offset: u32,
    pub start: Point,
    pub end: Point,
    pub color: Rgb8,
}

#[derive(Clone, Debug)]
/// Hover card content for one book.
pub struct Tooltip {
    pub title: String,
    pub author: String,
    pub rating: String,
    pub avg_rating: String,
    pub started: String,
    pub finished: String,
    pub cover: Option<CoverImage>,
}

#[derive(Debug)]
/// A record set bound to one calendar, with its placed segments cached until reload.
pub struct BookLayout {
    calendar: CalendarConfig,
    palette_len: usize,
    records: Vec<BookRecord>,
    cache: SegmentCache,
}

impl BookLayout {
    pub fn new(calendar: CalendarConfig, palette_len: usize, records: Vec<BookRecord>) -> Self {
        Self {
            calendar,
            palette_len,
            records,
            cache: SegmentCache::default(),
        }
    }

    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn cache(&self) -> &SegmentCache {
        &self.cache
    }

    /// Replace the record set; placed segments are recomputed on next use.
    pub fn reload(&mut self, records: Vec<BookRecord>) {
        self.records = records;
        self.cache.invalidate();
    }

    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Placed segments in draw order.
    pub fn segments(&self) -> Rc<[Segment]> {
        self.cache
            .get_or_compute(|| layout_segments(&self.calendar, &self.records, self.palette_len))
    }

    /// Projected strokes in draw order.
    pub fn strokes(&self, layout: &LayoutConfig, palette: &Palette) -> Vec<PlacedStroke> {
        self.segments()
            .iter()
            .map(|s| {
                let (start, end) = endpoints(s, layout);
                PlacedStroke {
                    book: s.book,
                    segment_month: s.segment_month,
                    offset: s.offset,
                    start,
                    end,
                    color: palette.color(s.color_index),
                }
            })
            .collect()
    }

    pub fn tooltip(&self, book: usize, covers: &mut dyn CoverSource) -> Option<Tooltip> {
        let record = self.records.get(book)?;
        Some(Tooltip {
            title: record.title.clone(),
            author: record.author.clone(),
            rating: record.rating.clone(),
            avg_rating: record.avg_rating.clone(),
            started: record.start_date_raw.clone(),
            finished: record.end_date_raw.clone(),
            cover: covers.cover_for(&record.title),
        })
    }

    /// Book under `point`: the last-drawn stroke within `tolerance` pixels of it.
    pub fn hit_test(&self, point: Point, layout: &LayoutConfig, tolerance: f64) -> Option<usize> {
        let limit = tolerance * tolerance;
        self.segments()
            .iter()
            .rev()
            .find(|s| {
                let (start, end) = endpoints(s, layout);
                distance_sq_to_segment(point, start, end) <= limit
            })
            .map(|s| s.book)
    }
}

fn endpoints(s: &Segment, layout: &LayoutConfig) -> (Point, Point) {
    let grid = layout.grid();
    let dy = s.offset_px(layout.lane_pitch);
    let mut start = grid.project(s.start.month, s.start.day);
    let mut end = grid.project(s.end.month, s.end.day);
    start.y += dy;
    end.y += dy;
    (start, end)
}

fn distance_sq_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    let t = if len_sq > 0.0 {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p - a.lerp(b, t)).hypot2()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/book_layout.rs"]
mod tests;
