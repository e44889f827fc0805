//! Reading input workbooks into [`Table`]s.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::models::{CellValue, Table};

/// Which sheet of a workbook to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSelector<'a> {
    /// The sheet with this name.
    Named(&'a str),
    /// The first sheet of the workbook.
    First,
}

/// Reads one sheet of a workbook into a header-less table.
///
/// Cell positions are absolute: the table's first row and column are the
/// sheet's row 1 and column A even when those are empty.
///
/// # Returns
///
/// Returns `SourceRead` if the file is missing, is not a readable
/// spreadsheet, or lacks the requested sheet.
pub fn read_table(path: &Path, sheet: SheetSelector<'_>) -> ReportResult<Table> {
    let source_error = |message: String| ReportError::SourceRead {
        path: path.display().to_string(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| source_error(e.to_string()))?;

    let range = match sheet {
        SheetSelector::Named(name) => workbook
            .worksheet_range(name)
            .map_err(|e| source_error(format!("sheet '{}': {}", name, e)))?,
        SheetSelector::First => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| source_error("workbook has no sheets".to_string()))?
            .map_err(|e| source_error(e.to_string()))?,
    };

    let table = range_to_table(&range);
    debug!(path = %path.display(), rows = table.len(), "Workbook sheet loaded");
    Ok(table)
}

fn range_to_table(range: &Range<Data>) -> Table {
    let (row_offset, col_offset) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let mut rows = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; col_offset];
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }

    Table::new(rows)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            excel_serial_to_date(serial)
                .map(CellValue::Date)
                .unwrap_or(CellValue::Number(serial))
        }
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::from(s.clone())),
        Data::DurationIso(s) => CellValue::from(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

/// Converts a 1900-system Excel serial number to a date, dropping the time
/// of day.
///
/// Serials below 60 sit before the 29 February 1900 that Excel counts but
/// that never existed.
///
/// # Example
///
/// ```
/// use staff_report::workbook::excel_serial_to_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(excel_serial_to_date(1.0), NaiveDate::from_ymd_opt(1900, 1, 1));
/// assert_eq!(excel_serial_to_date(46023.75), NaiveDate::from_ymd_opt(2026, 1, 1));
/// ```
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }

    let days = serial.floor() as u64;
    let epoch = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    epoch.checked_add_days(Days::new(days))
}
