use serde::{Deserialize, Serialize};

use crate::{
    calendar::config::CalendarConfig,
    calendar::date::{CalendarDate, YearPolicy},
    span::record::BookRecord,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A month-bounded piece of one book's reading span.
pub struct Segment {
    /// Index of the originating [`BookRecord`] in the record set.
    pub book: usize,
    pub start: CalendarDate,
    pub end: CalendarDate,
    /// Palette slot, derived from the book index.
    pub color_index: usize,
    /// True when the book spans several months and this is one of its pieces.
    pub is_split: bool,
    /// The month row this segment is drawn on.
    pub segment_month: u32,
    /// Approximate span length in the 31-day-stride metric; orders stacking only.
    pub duration: i32,
    /// Stacking lane (0 = base lane); set by [`crate::resolve_offsets`].
    pub offset: u32,
}

impl Segment {
    pub(crate) fn new(
        book: usize,
        start: CalendarDate,
        end: CalendarDate,
        color_index: usize,
        is_split: bool,
    ) -> Self {
        Self {
            book,
            start,
            end,
            color_index,
            is_split,
            segment_month: start.month,
            duration: end.ordinal() - start.ordinal(),
            offset: 0,
        }
    }

    /// Vertical displacement in pixels for a lane pitch.
    pub fn offset_px(&self, lane_pitch: f64) -> f64 {
        f64::from(self.offset) * lane_pitch
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
/// Why a book contributes no segments.
pub enum DropReason {
    #[error("start or end date is empty")]
    MissingDate,
    #[error("end date is not a usable date in the target year")]
    InvalidEnd,
    #[error("start date falls after end date")]
    InvertedSpan,
}

/// Split one record into month-bounded segments, or say why it has none.
///
/// - The end date is mandatory; a December end in the prior year is folded onto the target
///   year's December row.
/// - An unusable start date, or one before the target year, reads as January 1.
/// - A span crossing months yields one segment per touched month.
pub fn try_normalize_record(
    calendar: &CalendarConfig,
    record: &BookRecord,
    index: usize,
    palette_len: usize,
) -> Result<Vec<Segment>, DropReason> {
    if record.start_date_raw.trim().is_empty() || record.end_date_raw.trim().is_empty() {
        return Err(DropReason::MissingDate);
    }

    let mut end = calendar
        .parse_date(record.end_date_raw.as_str(), YearPolicy::AllowPriorDecember)
        .ok_or(DropReason::InvalidEnd)?;
    if end.year == calendar.year - 1 {
        end.year = calendar.year;
    }

    let start = match calendar.parse_date(record.start_date_raw.as_str(), YearPolicy::TargetOnly) {
        Some(d) if d.year >= calendar.year => d,
        _ => CalendarDate::new(calendar.year, 0, 1),
    };

    if start.ordinal() > end.ordinal() {
        return Err(DropReason::InvertedSpan);
    }

    let color_index = index.checked_rem(palette_len).unwrap_or(0);

    if start.month == end.month {
        return Ok(vec![Segment::new(index, start, end, color_index, false)]);
    }

    let segments = (start.month..=end.month)
        .map(|m| {
            let seg_start = if m == start.month {
                start
            } else {
                CalendarDate::new(calendar.year, m, 1)
            };
            let seg_end = if m == end.month {
                end
            } else {
                // A start day past the month's length still ends on itself.
                let last = calendar.days_in(m).max(seg_start.day);
                CalendarDate::new(calendar.year, m, last)
            };
            Segment::new(index, seg_start, seg_end, color_index, true)
        })
        .collect();
    Ok(segments)
}

/// [`try_normalize_record`], with dropped books logged and mapped to no segments.
pub fn normalize_record(
    calendar: &CalendarConfig,
    record: &BookRecord,
    index: usize,
    palette_len: usize,
) -> Vec<Segment> {
    try_normalize_record(calendar, record, index, palette_len).unwrap_or_else(|reason| {
        tracing::debug!(
            book = index,
            title = %record.title,
            start = %record.start_date_raw,
            end = %record.end_date_raw,
            %reason,
            "book dropped from calendar"
        );
        Vec::new()
    })
}

#[cfg(test)]
#[path = "../../tests/unit/span/segment.rs"]
mod tests;
