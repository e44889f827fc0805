//! Writing the report workbook.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, FormatBorder, Workbook};
use tracing::info;

use crate::error::{ReportError, ReportResult};
use crate::models::{REPORT_HEADERS, ReportRow};

const COLUMN_WIDTHS: [f64; 5] = [34.0, 16.0, 16.0, 16.0, 16.0];

/// Writes the report rows to `path`, replacing any existing file.
///
/// The workbook is saved to a uniquely named temporary file next to `path`
/// and then renamed over it, so the destination never holds a partial
/// report, even when several runs target the same path at once. The parent
/// directory is created when missing.
///
/// # Returns
///
/// The absolute path of the written report, or `OutputWrite`.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> ReportResult<PathBuf> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| write_error(path, e))?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);

    for (col, header) in REPORT_HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| write_error(path, e))?;
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(|e| write_error(path, e))?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, value) in row.cells().iter().enumerate() {
            worksheet
                .write_string(row_num, col as u16, value)
                .map_err(|e| write_error(path, e))?;
        }
    }

    // Removed on drop unless persisted
    let staging = tempfile::Builder::new()
        .prefix(".report-")
        .suffix(".xlsx.partial")
        .tempfile_in(dir)
        .map_err(|e| write_error(path, e))?;
    workbook
        .save(staging.path())
        .map_err(|e| write_error(path, e))?;
    staging
        .persist(path)
        .map_err(|e| write_error(path, e.error))?;

    let written = fs::canonicalize(path).map_err(|e| write_error(path, e))?;
    info!(path = %written.display(), rows = rows.len(), "Report written");
    Ok(written)
}

fn write_error(path: &Path, error: impl Display) -> ReportError {
    ReportError::OutputWrite {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
