//! Text summaries of a finished report, for chat delivery.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::engine::ReportOutcome;

/// What started the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Requested by a person.
    Manual,
    /// Started by the weekly scheduler.
    Scheduled,
}

impl Trigger {
    fn heading(self) -> &'static str {
        match self {
            Trigger::Manual => "📊 Ручная выгрузка",
            Trigger::Scheduled => "🔄 Автоматическая выгрузка",
        }
    }
}

/// Renders the statistics header of a report message.
///
/// # Example
///
/// ```
/// use staff_report::engine::ReportOutcome;
/// use staff_report::summary::{Trigger, render_header};
/// use chrono::NaiveDate;
///
/// let outcome = ReportOutcome {
///     location_key: "kievskaya".to_string(),
///     display_name: "Моремания Киевская".to_string(),
///     path: "выгрузки/выгрузка_по_точке_kievskaya.xlsx".into(),
///     rows: vec![],
/// };
/// let at = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap().and_hms_opt(14, 24, 0).unwrap();
///
/// assert_eq!(
///     render_header(&outcome, Trigger::Manual, at),
///     "📊 Ручная выгрузка\nЛокация: Моремания Киевская\nЗаписей: 0\nВремя: 2026-03-06 14:24:00"
/// );
/// ```
pub fn render_header(outcome: &ReportOutcome, trigger: Trigger, at: NaiveDateTime) -> String {
    format!(
        "{}\nЛокация: {}\nЗаписей: {}\nВремя: {}",
        trigger.heading(),
        outcome.display_name,
        outcome.rows.len(),
        at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Renders one block per employee with the remaining validity of both
/// documents.
pub fn render_rows(outcome: &ReportOutcome) -> String {
    let mut text = String::new();
    for row in &outcome.rows {
        let _ = write!(
            text,
            "{}\n\tСрок действия регистрации: {}\n\tСрок действия патента: {}\n\n",
            row.employee, row.registration_remaining, row.permit_remaining
        );
    }
    text
}

/// Renders the full message: header, a blank line, then the rows.
pub fn render_summary(outcome: &ReportOutcome, trigger: Trigger, at: NaiveDateTime) -> String {
    let header = render_header(outcome, trigger, at);
    let rows = render_rows(outcome);
    if rows.is_empty() {
        header
    } else {
        format!("{}\n\n{}", header, rows.trim_end())
    }
}
