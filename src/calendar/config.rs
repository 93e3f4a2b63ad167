use serde::{Deserialize, Serialize};

use crate::foundation::error::{BookstrokeError, BookstrokeResult};

/// Number of month rows in the calendar grid.
pub const GRID_ROWS: u32 = 12;
/// Number of day columns in the calendar grid.
pub const GRID_COLUMNS: u32 = 31;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// The single year a visualization is pinned to, plus its month vocabulary.
pub struct CalendarConfig {
    /// Target year; every accepted date falls in it (or its prior December, for end dates).
    #[serde(default = "default_year")]
    pub year: i32,
    /// Month abbreviations matched exactly (case-sensitive) by the textual date form.
    #[serde(default = "default_months")]
    pub months: [String; 12],
    /// Length of each month, used when splitting a span at month boundaries.
    #[serde(default = "default_days_in_month")]
    pub days_in_month: [u32; 12],
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            year: default_year(),
            months: default_months(),
            days_in_month: default_days_in_month(),
        }
    }
}

impl CalendarConfig {
    /// Default configuration pinned to `year`.
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    /// Zero-based index of an exactly matching month abbreviation.
    pub fn month_index(&self, name: &str) -> Option<u32> {
        self.months
            .iter()
            .position(|m| m == name)
            .and_then(|i| u32::try_from(i).ok())
    }

    /// Last day of zero-based `month`; out-of-range months fall back to the grid width.
    pub fn days_in(&self, month: u32) -> u32 {
        usize::try_from(month)
            .ok()
            .and_then(|m| self.days_in_month.get(m))
            .copied()
            .unwrap_or(GRID_COLUMNS)
    }

    pub fn validate(&self) -> BookstrokeResult<()> {
        for (idx, name) in self.months.iter().enumerate() {
            if name.trim().is_empty() || name.chars().any(char::is_whitespace) {
                return Err(BookstrokeError::config(format!(
                    "calendar.months[{idx}] must be a single non-empty token, got {name:?}"
                )));
            }
            if name.chars().all(|c| c.is_ascii_digit()) {
                return Err(BookstrokeError::config(format!(
                    "calendar.months[{idx}] must not be numeric, got {name:?}"
                )));
            }
        }
        for (idx, name) in self.months.iter().enumerate() {
            if self.months[..idx].contains(name) {
                return Err(BookstrokeError::config(format!(
                    "calendar.months contains duplicate abbreviation {name:?}"
                )));
            }
        }
        for (idx, &days) in self.days_in_month.iter().enumerate() {
            if !(1..=GRID_COLUMNS).contains(&days) {
                return Err(BookstrokeError::config(format!(
                    "calendar.days_in_month[{idx}] must be in 1..={GRID_COLUMNS}, got {days}"
                )));
            }
        }
        Ok(())
    }
}

fn default_year() -> i32 {
    2025
}

fn default_months() -> [String; 12] {
    [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ]
    .map(String::from)
}

fn default_days_in_month() -> [u32; 12] {
    [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/config.rs"]
mod tests;
