//! Employee block extraction from the staff roster.
//!
//! The roster is a header-less sheet where each location starts with a
//! marker row (column 0 holds the location's display name) followed by the
//! names of the people working there. Sub-headers and noise rows sit between
//! the names and are skipped.

use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::models::{CellValue, Table};

/// Collects the employee names listed under a location marker.
///
/// Scanning starts at the row after the first row whose column 0 equals
/// `display_name` exactly, and stops before the next row whose column 0
/// contains `family_marker`. Blank rows are skipped, and a row is accepted
/// only if its trimmed text has at least two whitespace-separated words.
///
/// # Returns
///
/// The trimmed names in roster order, duplicates included, or:
/// - `LocationNotFound` if no marker row matches `display_name`
/// - `EmptyEmployeeList` if no row in the block looks like a name
///
/// # Example
///
/// ```
/// use staff_report::extraction::extract_employee_block;
/// use staff_report::models::Table;
///
/// let roster = Table::from_text_rows(&[
///     &["Моремания Киевская"],
///     &["  Иванов Иван "],
///     &["Повара"],
///     &["Моремания Дмитровка"],
///     &["Петров Пётр"],
/// ]);
///
/// let names = extract_employee_block(&roster, "Моремания Киевская", "Моремания").unwrap();
/// assert_eq!(names, vec!["Иванов Иван".to_string()]);
/// ```
pub fn extract_employee_block(
    roster: &Table,
    display_name: &str,
    family_marker: &str,
) -> ReportResult<Vec<String>> {
    let anchor = roster
        .rows()
        .iter()
        .position(|row| {
            row.first()
                .and_then(CellValue::as_text)
                .is_some_and(|text| text == display_name)
        })
        .ok_or_else(|| ReportError::LocationNotFound {
            display_name: display_name.to_string(),
        })?;

    let mut employees = Vec::new();

    for row_idx in anchor + 1..roster.len() {
        let cell = roster.cell(row_idx, 0);
        if cell.is_blank() {
            continue;
        }

        let text = cell.to_string();
        if text.contains(family_marker) {
            debug!(row = row_idx, marker = %text, "Reached next location block");
            break;
        }

        let name = text.trim();
        if name.split_whitespace().count() >= 2 {
            employees.push(name.to_string());
        } else {
            debug!(row = row_idx, value = %name, "Skipping roster row that is not a full name");
        }
    }

    if employees.is_empty() {
        return Err(ReportError::EmptyEmployeeList {
            display_name: display_name.to_string(),
        });
    }

    Ok(employees)
}
