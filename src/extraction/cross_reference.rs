//! Cross-referencing employees against the registration and permit tables.
//!
//! Both reference tables share one layout: column 0 is the employee name,
//! column 1 the document number and column 3 the expiry date. Column 2 is
//! not used.

use crate::error::{ReportError, ReportResult};
use crate::models::{CellValue, NO_DATA_LABEL, Table};

/// Column holding the employee name.
pub const NAME_COLUMN: usize = 0;

/// Column holding the document number.
pub const NUMBER_COLUMN: usize = 1;

/// Column holding the expiry date.
pub const EXPIRY_COLUMN: usize = 3;

/// The document cells of the row that matched an employee.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMatch {
    /// Row index of the match within the reference table.
    pub row: usize,
    /// The document number cell.
    pub number: CellValue,
    /// The expiry date cell.
    pub expiry: CellValue,
}

impl DocumentMatch {
    /// Returns the document number as report text, or [`NO_DATA_LABEL`] if
    /// the cell is blank.
    ///
    /// Fails if the cell holds a spreadsheet error value.
    pub fn number_label(&self, employee: &str) -> ReportResult<String> {
        match &self.number {
            CellValue::Error(code) => Err(ReportError::RowProcessing {
                employee: employee.to_string(),
                message: format!("error value {} in number column (row {})", code, self.row + 1),
            }),
            cell if cell.is_blank() => Ok(NO_DATA_LABEL.to_string()),
            cell => Ok(cell.to_string()),
        }
    }
}

/// Finds the first row of `table` whose trimmed name equals `employee`.
///
/// Matching is exact and case-sensitive after trimming the table cell; the
/// first matching row in table order wins and later duplicates are ignored.
/// Name cells holding an error value never match.
///
/// # Example
///
/// ```
/// use staff_report::extraction::find_document;
/// use staff_report::models::{CellValue, Table};
///
/// let registrations = Table::from_text_rows(&[
///     &["иванов иван", "1", "", "01.01.2030"],
///     &[" Иванов Иван ", "2", "", "01.01.2031"],
///     &["Иванов Иван", "3", "", "01.01.2032"],
/// ]);
///
/// let found = find_document(&registrations, "Иванов Иван").unwrap();
/// assert_eq!(found.number, CellValue::from("2"));
/// assert!(find_document(&registrations, "Петров Пётр").is_none());
/// ```
pub fn find_document(table: &Table, employee: &str) -> Option<DocumentMatch> {
    table
        .rows()
        .iter()
        .enumerate()
        .find(|(_, row)| {
            row.get(NAME_COLUMN)
                .is_some_and(|cell| !cell.is_error() && cell.to_string().trim() == employee)
        })
        .map(|(row_idx, _)| DocumentMatch {
            row: row_idx,
            number: table.cell(row_idx, NUMBER_COLUMN).clone(),
            expiry: table.cell(row_idx, EXPIRY_COLUMN).clone(),
        })
}
