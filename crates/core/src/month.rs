//! Canonical `YYYY-MM` month keys.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// A canonical year-month aggregation bucket.
///
/// The wire form is always the 7-character string `YYYY-MM`. Inputs that
/// arrive as full dates (`YYYY-MM-DD`) are truncated to the month prefix,
/// and anything unrecognizable falls back to [`MonthKey::FALLBACK`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "String", from = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Bucket assigned to records with a missing or invalid month.
    pub const FALLBACK: MonthKey = MonthKey {
        year: 2025,
        month: 1,
    };

    /// Creates a validated month key.
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::Validation(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }

        if !(0..=9999).contains(&year) {
            return Err(AppError::Validation(format!(
                "year must be between 0 and 9999, got {year}"
            )));
        }

        Ok(Self { year, month })
    }

    /// Normalizes arbitrary input to a canonical month key.
    ///
    /// Accepts `YYYY-MM` and longer date strings such as `YYYY-MM-DD`, which
    /// are truncated to their first seven characters before parsing. Invalid
    /// or missing input yields [`MonthKey::FALLBACK`] rather than an error.
    #[must_use]
    pub fn normalize(value: &str) -> Self {
        Self::parse_prefix(value).unwrap_or(Self::FALLBACK)
    }

    fn parse_prefix(value: &str) -> Option<Self> {
        let prefix = value.get(0..7)?;
        let (year, month) = prefix.split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }

        let year = year.parse::<i32>().ok()?;
        let month = month.parse::<u32>().ok()?;
        Self::new(year, month).ok()
    }

    /// Returns the calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the calendar month, 1 through 12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the following month, saturating at `9999-12`.
    #[must_use]
    pub fn next(&self) -> Self {
        match (self.year, self.month) {
            (9999, 12) => *self,
            (year, 12) => Self {
                year: year + 1,
                month: 1,
            },
            (year, month) => Self {
                year,
                month: month + 1,
            },
        }
    }

    /// Returns the preceding month, saturating at `0000-01`.
    #[must_use]
    pub fn previous(&self) -> Self {
        match (self.year, self.month) {
            (0, 1) => *self,
            (year, 1) => Self {
                year: year - 1,
                month: 12,
            },
            (year, month) => Self {
                year,
                month: month - 1,
            },
        }
    }
}

impl Display for MonthKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}

impl From<String> for MonthKey {
    fn from(value: String) -> Self {
        Self::normalize(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::MonthKey;

    #[test]
    fn normalize_truncates_full_dates() {
        assert_eq!(MonthKey::normalize("2025-03-17").to_string(), "2025-03");
    }

    #[test]
    fn normalize_accepts_canonical_form() {
        assert_eq!(MonthKey::normalize("2024-11").to_string(), "2024-11");
    }

    #[test]
    fn normalize_falls_back_on_garbage() {
        assert_eq!(MonthKey::normalize("next sprint"), MonthKey::FALLBACK);
        assert_eq!(MonthKey::normalize(""), MonthKey::FALLBACK);
        assert_eq!(MonthKey::normalize("2025-13"), MonthKey::FALLBACK);
    }

    #[test]
    fn next_and_previous_wrap_at_year_boundaries() {
        let december = MonthKey::new(2024, 12).unwrap_or_else(|_| unreachable!());
        assert_eq!(december.next().to_string(), "2025-01");

        let january = MonthKey::new(2025, 1).unwrap_or_else(|_| unreachable!());
        assert_eq!(january.previous().to_string(), "2024-12");
    }

    #[test]
    fn new_rejects_out_of_range_month() {
        assert!(MonthKey::new(2025, 0).is_err());
        assert!(MonthKey::new(2025, 13).is_err());
    }
}
