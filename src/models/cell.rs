//! Spreadsheet cell and table models.
//!
//! Cells are read into an explicit variant instead of being coerced on the
//! fly, so every consumer decides how to treat numbers, dates and error
//! values.

use std::fmt;

use chrono::NaiveDate;

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// No value.
    Empty,
    /// A text value, stored as written.
    Text(String),
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Bool(bool),
    /// A cell stored as a date by the spreadsheet.
    Date(NaiveDate),
    /// A spreadsheet error value such as `#N/A`.
    Error(String),
}

impl CellValue {
    /// Returns true for empty cells and text cells holding only whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// use staff_report::models::CellValue;
    ///
    /// assert!(CellValue::Empty.is_blank());
    /// assert!(CellValue::from("   ").is_blank());
    /// assert!(!CellValue::Number(0.0).is_blank());
    /// ```
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Returns the text if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this is a spreadsheet error value.
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            // Integral numbers without the trailing ".0"
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
            CellValue::Date(d) => write!(f, "{}", d.format("%d.%m.%Y")),
            CellValue::Error(code) => f.write_str(code),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

static EMPTY: CellValue = CellValue::Empty;

/// A header-less table of cells, indexed from the sheet's first row and
/// first column.
///
/// Row order is the row order of the source sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Creates a table from rows of cells.
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Creates a table from rows of text, mapping `""` to an empty cell.
    ///
    /// # Example
    ///
    /// ```
    /// use staff_report::models::{CellValue, Table};
    ///
    /// let table = Table::from_text_rows(&[&["Моремания Киевская"], &["", "x"]]);
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.cell(1, 0), &CellValue::Empty);
    /// assert_eq!(table.cell(1, 1), &CellValue::from("x"));
    /// ```
    pub fn from_text_rows(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|s| CellValue::from(*s)).collect())
                .collect(),
        )
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns all rows in source order.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Returns the cell at `(row, col)`, or an empty cell when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}
