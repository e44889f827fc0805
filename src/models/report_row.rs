//! Report row model and remaining-validity status.

use std::fmt;

use serde::{Serialize, Serializer};

/// Label used when a value is absent.
pub const NO_DATA_LABEL: &str = "Нет данных";

/// Label used when the expiry date has already passed.
pub const OVERDUE_LABEL: &str = "Просрочено";

/// Label used when the expiry value cannot be read as a date.
pub const DATE_ERROR_LABEL: &str = "Ошибка даты";

/// Column headers of the report, in output order.
pub const REPORT_HEADERS: [&str; 5] = [
    "Сотрудник",
    "Рег. номер",
    "Рег. срок",
    "Патент номер",
    "Патент срок",
];

/// Remaining validity of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    /// Time left, using 30-day months.
    Remaining {
        /// Whole 30-day months.
        months: i64,
        /// Days left over after the months.
        days: i64,
    },
    /// No expiry value was available.
    NoData,
    /// The expiry date is before today.
    Overdue,
    /// The expiry value is not a readable date.
    DateError,
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryStatus::Remaining { months, days } => write!(f, "{} мес. {} дн.", months, days),
            ExpiryStatus::NoData => f.write_str(NO_DATA_LABEL),
            ExpiryStatus::Overdue => f.write_str(OVERDUE_LABEL),
            ExpiryStatus::DateError => f.write_str(DATE_ERROR_LABEL),
        }
    }
}

impl Serialize for ExpiryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One employee line of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Trimmed employee name.
    pub employee: String,
    /// Registration number, or [`NO_DATA_LABEL`].
    pub registration_number: String,
    /// Remaining registration validity.
    pub registration_remaining: ExpiryStatus,
    /// Work permit number, or [`NO_DATA_LABEL`].
    pub permit_number: String,
    /// Remaining work permit validity.
    pub permit_remaining: ExpiryStatus,
}

impl ReportRow {
    /// Returns the row's cells in [`REPORT_HEADERS`] order.
    pub fn cells(&self) -> [String; 5] {
        [
            self.employee.clone(),
            self.registration_number.clone(),
            self.registration_remaining.to_string(),
            self.permit_number.clone(),
            self.permit_remaining.to_string(),
        ]
    }
}
