//! Month date grids and the string projections used for lookups and headers.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Format of date keys, e.g. `2024-05-01`.
pub const KEY_FORMAT: &str = "%Y-%m-%d";

/// Format of month keys, e.g. `2024-05`.
pub const MONTH_FORMAT: &str = "%Y-%m";

/// Weekday abbreviations, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["CN", "T2", "T3", "T4", "T5", "T6", "T7"];

/// Days per display chunk.
pub const WEEK_LEN: usize = 7;

/// Errors from parsing or moving through calendar values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid month {0:?}, expected YYYY-MM")]
    InvalidMonth(String),
    #[error("range start {start} is after end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("month offset leaves the supported calendar")]
    OutOfRange,
}

/// An inclusive span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// # Errors
    ///
    /// Returns [`CalendarError::InvertedRange`] when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Inclusive on both ends.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day in the range, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(|d| *d <= self.end)
    }
}

/// Display header for one day column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayLabel {
    /// `dd/mm`
    pub label: String,
    /// One of [`WEEKDAY_LABELS`].
    pub weekday: &'static str,
}

/// The first day of the month containing `anchor`.
#[must_use]
pub fn first_of_month(anchor: NaiveDate) -> NaiveDate {
    anchor - Days::new(u64::from(anchor.day0()))
}

/// Every date of the month containing `anchor`, day 1 through the last day.
#[must_use]
pub fn month_dates(anchor: NaiveDate) -> Vec<NaiveDate> {
    let first = first_of_month(anchor);
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .collect()
}

/// Inclusive range covering the month containing `anchor`.
#[must_use]
pub fn month_range(anchor: NaiveDate) -> DateRange {
    let first = first_of_month(anchor);
    let last = month_dates(anchor).last().copied().unwrap_or(first);
    DateRange {
        start: first,
        end: last,
    }
}

/// Slice `items` into consecutive windows of seven; the last may be shorter.
///
/// Windows start at the first element, not at a Monday or Sunday.
#[must_use]
pub fn week_chunks<T>(items: &[T]) -> Vec<&[T]> {
    items.chunks(WEEK_LEN).collect()
}

/// Lookup key for a date, `YYYY-MM-DD`.
#[must_use]
pub fn format_key(date: NaiveDate) -> String {
    date.format(KEY_FORMAT).to_string()
}

/// Inverse of [`format_key`].
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] for anything that is not a real
/// `YYYY-MM-DD` date.
pub fn parse_key(key: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(key, KEY_FORMAT).map_err(|_| CalendarError::InvalidDate(key.to_owned()))
}

/// Column header for a date: `dd/mm` and the weekday abbreviation.
#[must_use]
pub fn format_display(date: NaiveDate) -> DayLabel {
    DayLabel {
        label: date.format("%d/%m").to_string(),
        weekday: weekday_label(date.weekday()),
    }
}

/// Abbreviation for a weekday from [`WEEKDAY_LABELS`].
#[must_use]
pub const fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => WEEKDAY_LABELS[0],
        Weekday::Mon => WEEKDAY_LABELS[1],
        Weekday::Tue => WEEKDAY_LABELS[2],
        Weekday::Wed => WEEKDAY_LABELS[3],
        Weekday::Thu => WEEKDAY_LABELS[4],
        Weekday::Fri => WEEKDAY_LABELS[5],
        Weekday::Sat => WEEKDAY_LABELS[6],
    }
}

/// Month key, `YYYY-MM`.
#[must_use]
pub fn format_month(anchor: NaiveDate) -> String {
    anchor.format(MONTH_FORMAT).to_string()
}

/// Parse a `YYYY-MM` month key into the first day of that month.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if the key is malformed.
pub fn parse_month(key: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(&format!("{key}-01"), KEY_FORMAT)
        .map_err(|_| CalendarError::InvalidMonth(key.to_owned()))
}

/// First day of the month `offset` months away from the one containing `anchor`.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] past chrono's supported dates.
pub fn shift_month(anchor: NaiveDate, offset: i32) -> Result<NaiveDate, CalendarError> {
    let first = first_of_month(anchor);
    let months = Months::new(offset.unsigned_abs());
    if offset >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    }
    .ok_or(CalendarError::OutOfRange)
}
