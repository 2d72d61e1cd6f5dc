//! Time-of-day values and optional shift windows.

use core::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`TimeOfDay`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid time of day {0:?}, expected HH:MM")]
pub struct TimeOfDayError(pub String);

/// A wall-clock time with minute precision for display.
///
/// Accepts `HH:MM` and `HH:MM:SS`; always displays as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Parse `HH:MM` or `HH:MM:SS`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeOfDayError`] if the input matches neither format.
    pub fn parse(s: &str) -> Result<Self, TimeOfDayError> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map(Self)
            .map_err(|_| TimeOfDayError(s.to_owned()))
    }

    /// Wrap a [`NaiveTime`].
    #[must_use]
    pub const fn from_naive(time: NaiveTime) -> Self {
        Self(time)
    }

    /// The wrapped [`NaiveTime`].
    #[must_use]
    pub const fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeOfDayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for TimeOfDay {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <NaiveTime as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <NaiveTime as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for TimeOfDay {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        <NaiveTime as sqlx::Decode<sqlx::Postgres>>::decode(value).map(Self)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for TimeOfDay {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <NaiveTime as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

/// The optional start/end times of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftWindow {
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
}

impl ShiftWindow {
    #[must_use]
    pub const fn new(start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> Self {
        Self { start, end }
    }

    /// `false` only when both ends are set and the start is not before the end.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start < end,
            _ => true,
        }
    }

    /// Human-readable label for the row header.
    ///
    /// ```
    /// use shift_planner_core::{ShiftWindow, TimeOfDay};
    ///
    /// let start = TimeOfDay::parse("08:00").ok();
    /// let end = TimeOfDay::parse("12:00:00").ok();
    /// assert_eq!(ShiftWindow::new(start, end).label(), "08:00 - 12:00");
    /// assert_eq!(ShiftWindow::new(start, None).label(), "from 08:00");
    /// assert_eq!(ShiftWindow::new(None, end).label(), "until 12:00");
    /// assert_eq!(ShiftWindow::default().label(), "");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => format!("{start} - {end}"),
            (Some(start), None) => format!("from {start}"),
            (None, Some(end)) => format!("until {end}"),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_seconds() {
        let t = TimeOfDay::parse("18:30:45").unwrap();
        assert_eq!(t.to_string(), "18:30");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TimeOfDay::parse("25:00").is_err());
        assert!(TimeOfDay::parse("noon").is_err());
        assert!(TimeOfDay::parse("").is_err());
    }

    #[test]
    fn test_window_ordering() {
        let eight = TimeOfDay::parse("08:00").ok();
        let noon = TimeOfDay::parse("12:00").ok();

        assert!(ShiftWindow::new(eight, noon).is_ordered());
        assert!(!ShiftWindow::new(noon, eight).is_ordered());
        assert!(!ShiftWindow::new(noon, noon).is_ordered());
        assert!(ShiftWindow::new(noon, None).is_ordered());
        assert!(ShiftWindow::default().is_ordered());
    }

    #[test]
    fn test_serde_as_string() {
        let t = TimeOfDay::parse("09:05").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"09:05\"");
        let back: TimeOfDay = serde_json::from_str("\"09:05:00\"").unwrap();
        assert_eq!(back, t);
    }
}
