//! Remaining-validity calculation for document expiry dates.
//!
//! Months are a fixed 30 days: `months = days / 30`, `days = days % 30`.
//! This is not calendar-accurate and is kept that way so reports stay
//! comparable with the ones already in circulation.

use chrono::{Datelike, NaiveDate};

use crate::models::{CellValue, ExpiryStatus};

/// Number of days counted as one month.
pub const DAYS_PER_MONTH: i64 = 30;

/// Computes remaining validity against a fixed reference date.
///
/// One calculator is created per run so every employee is measured against
/// the same day.
///
/// # Example
///
/// ```
/// use staff_report::extraction::ExpiryCalculator;
/// use staff_report::models::{CellValue, ExpiryStatus};
/// use chrono::NaiveDate;
///
/// let calculator = ExpiryCalculator::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
///
/// let cell = CellValue::from("06.04.2026");
/// assert_eq!(
///     calculator.remaining(Some(&cell)),
///     ExpiryStatus::Remaining { months: 3, days: 5 }
/// );
/// assert_eq!(calculator.remaining(None), ExpiryStatus::NoData);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryCalculator {
    today: NaiveDate,
}

impl ExpiryCalculator {
    /// Creates a calculator measuring from `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Returns the reference date.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Returns the remaining validity for a raw expiry cell.
    ///
    /// Never fails: absent or blank input is [`ExpiryStatus::NoData`], input
    /// that is not a date is [`ExpiryStatus::DateError`], a date before today
    /// is [`ExpiryStatus::Overdue`].
    pub fn remaining(&self, raw: Option<&CellValue>) -> ExpiryStatus {
        let date = match raw {
            None => return ExpiryStatus::NoData,
            Some(cell) if cell.is_blank() => return ExpiryStatus::NoData,
            Some(CellValue::Date(date)) => Some(*date),
            Some(CellValue::Text(text)) => parse_expiry_date(text, self.today),
            Some(_) => None,
        };

        match date {
            Some(date) => self.remaining_until(date),
            None => ExpiryStatus::DateError,
        }
    }

    /// Returns the remaining validity until `expiry`.
    pub fn remaining_until(&self, expiry: NaiveDate) -> ExpiryStatus {
        let delta_days = expiry.signed_duration_since(self.today).num_days();
        if delta_days < 0 {
            return ExpiryStatus::Overdue;
        }

        ExpiryStatus::Remaining {
            months: delta_days / DAYS_PER_MONTH,
            days: delta_days % DAYS_PER_MONTH,
        }
    }
}

/// Parses a free-form expiry date, day first.
///
/// Any time of day after the date is ignored. The date is split on `.`, `/`
/// or `-`; a four-digit first part is read as year-month-day, otherwise as
/// day-month-year. When the day-first reading is impossible but the
/// month-first one is valid, the month-first reading is used. Two-digit
/// years resolve to the century that puts them within 50 years of
/// `reference`.
///
/// # Example
///
/// ```
/// use staff_report::extraction::parse_expiry_date;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let expected = NaiveDate::from_ymd_opt(2026, 2, 3);
/// assert_eq!(parse_expiry_date("03.02.2026", today), expected);
/// assert_eq!(parse_expiry_date("03/02/26", today), expected);
/// assert_eq!(parse_expiry_date("2026-02-03 00:00:00", today), expected);
/// assert_eq!(parse_expiry_date("03.02.99", today), NaiveDate::from_ymd_opt(1999, 2, 3));
/// assert_eq!(parse_expiry_date("soon", today), None);
/// ```
pub fn parse_expiry_date(raw: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let date_part = raw
        .trim()
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()?;

    let parts: Vec<&str> = date_part.split(['.', '/', '-']).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };

    if [first, second, third]
        .iter()
        .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    if first.len() == 4 {
        return NaiveDate::from_ymd_opt(
            first.parse().ok()?,
            second.parse().ok()?,
            third.parse().ok()?,
        );
    }

    if first.len() > 2 || second.len() > 2 {
        return None;
    }

    let year = match third.len() {
        1 | 2 => expand_two_digit_year(third.parse().ok()?, reference.year()),
        4 => third.parse::<i32>().ok()?,
        _ => return None,
    };
    let day: u32 = first.parse().ok()?;
    let month: u32 = second.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, day, month))
}

fn expand_two_digit_year(short: i32, reference_year: i32) -> i32 {
    let year = reference_year - reference_year.rem_euclid(100) + short;
    if year >= reference_year + 50 {
        year - 100
    } else if year < reference_year - 50 {
        year + 100
    } else {
        year
    }
}
