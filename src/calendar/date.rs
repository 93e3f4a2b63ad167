use serde::{Deserialize, Serialize};

use crate::calendar::config::{CalendarConfig, GRID_COLUMNS, GRID_ROWS};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A parsed calendar coordinate: zero-based month, one-based day.
pub struct CalendarDate {
    pub year: i32,
    /// Month index in `0..=11`.
    pub month: u32,
    /// Day of month in `1..=31`.
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Ordering key with a fixed 31-day month stride.
    ///
    /// Not a day count: it only orders dates within one year and measures spans approximately.
    pub fn ordinal(self) -> i32 {
        (self.month * GRID_COLUMNS + self.day) as i32
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Which years [`CalendarConfig::parse_date`] accepts.
pub enum YearPolicy {
    /// Only the configured target year.
    #[default]
    TargetOnly,
    /// The target year, or December of the year before it (returned with its real year).
    AllowPriorDecember,
}

impl CalendarConfig {
    /// Parse one raw date cell.
    ///
    /// Accepted shapes, tried in order: `Mon DD YYYY` / `Mon YYYY` (any ASCII letter selects this
    /// form), `YYYY-MM-DD`, `MM/DD/YYYY`. Returns `None` for anything empty, unrecognized,
    /// out of grid range, or outside the years allowed by `policy`.
    pub fn parse_date<'a>(
        &self,
        raw: impl Into<Option<&'a str>>,
        policy: YearPolicy,
    ) -> Option<CalendarDate> {
        let raw = raw.into()?;
        if raw.trim().is_empty() {
            return None;
        }

        let (year, month, day) = if raw.chars().any(|c| c.is_ascii_alphabetic()) {
            self.parse_textual(raw)?
        } else if raw.contains('-') {
            let mut parts = raw.split('-');
            let year = int_prefix(parts.next()?)?;
            let month = int_prefix(parts.next()?)? - 1;
            let day = int_prefix(parts.next()?)?;
            (year, month, day)
        } else if raw.contains('/') {
            let mut parts = raw.split('/');
            let month = int_prefix(parts.next()?)? - 1;
            let day = int_prefix(parts.next()?)?;
            let year = int_prefix(parts.next()?)?;
            (year, month, day)
        } else {
            return None;
        };

        let year = i32::try_from(year).ok()?;
        let month = u32::try_from(month).ok().filter(|m| *m < GRID_ROWS)?;
        let day = u32::try_from(day)
            .ok()
            .filter(|d| (1..=GRID_COLUMNS).contains(d))?;

        let accepted = year == self.year
            || (policy == YearPolicy::AllowPriorDecember
                && month == GRID_ROWS - 1
                && year == self.year - 1);
        accepted.then(|| CalendarDate::new(year, month, day))
    }

    fn parse_textual(&self, raw: &str) -> Option<(i64, i64, i64)> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let month = i64::from(self.month_index(tokens.first()?)?);
        match tokens.as_slice() {
            [_, day, year] => Some((int_prefix(year)?, month, int_prefix(day)?)),
            [_, year] => Some((int_prefix(year)?, month, 1)),
            _ => None,
        }
    }
}

/// Leading integer of a token (`"05"` -> 5, `"15T10:00"` -> 15); `None` without leading digits.
fn int_prefix(token: &str) -> Option<i64> {
    let t = token.trim_start();
    let (neg, digits) = match t.as_bytes().first()? {
        b'-' => (true, &t[1..]),
        b'+' => (false, &t[1..]),
        _ => (false, t),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if neg { -value } else { value })
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/date.rs"]
mod tests;
