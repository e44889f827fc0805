//! Workbook fixtures shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::TempDir;

use staff_report::config::ReportConfig;
use staff_report::models::{CellValue, Table};
use staff_report::workbook::{SheetSelector, read_table};

/// A cell to write into a fixture workbook.
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Date(NaiveDate),
    Blank,
}

pub use Cell::{Blank, Date, Number, Text};

/// Writes `rows` to a single-sheet workbook.
pub fn write_workbook(path: &Path, sheet_name: &str, rows: &[Vec<Cell<'_>>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).unwrap();
    let date_format = Format::new().set_num_format("dd.mm.yyyy");

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32, col_idx as u16);
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(r, c, *text).unwrap();
                }
                Cell::Number(n) => {
                    worksheet.write_number(r, c, *n).unwrap();
                }
                Cell::Date(date) => {
                    let value = ExcelDateTime::from_ymd(
                        date.year() as u16,
                        date.month() as u8,
                        date.day() as u8,
                    )
                    .unwrap();
                    worksheet
                        .write_datetime_with_format(r, c, &value, &date_format)
                        .unwrap();
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save(path).unwrap();
}

/// A scratch directory holding the three input workbooks.
pub struct Fixture {
    pub dir: TempDir,
    pub config: ReportConfig,
}

impl Fixture {
    /// Creates the directory and a configuration pointing into it.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ReportConfig::default();
        config.sources.tables_dir = dir.path().join("tables");
        config.output_dir = dir.path().join("выгрузки");
        std::fs::create_dir_all(&config.sources.tables_dir).unwrap();
        Self { dir, config }
    }

    pub fn roster(&self, rows: &[Vec<Cell<'_>>]) -> &Self {
        write_workbook(
            &self.config.sources.roster_path(),
            &self.config.sources.roster_sheet,
            rows,
        );
        self
    }

    pub fn registration(&self, rows: &[Vec<Cell<'_>>]) -> &Self {
        write_workbook(&self.config.sources.registration_path(), "Лист1", rows);
        self
    }

    pub fn permit(&self, rows: &[Vec<Cell<'_>>]) -> &Self {
        write_workbook(&self.config.sources.permit_path(), "Лист1", rows);
        self
    }

    pub fn output_path(&self, key: &str) -> PathBuf {
        self.config.output_path(key)
    }
}

/// Reads a written report back.
pub fn read_report(path: &Path) -> Table {
    read_table(path, SheetSelector::First).unwrap()
}

/// Text of a report cell.
pub fn text(table: &Table, row: usize, col: usize) -> String {
    match table.cell(row, col) {
        CellValue::Text(s) => s.clone(),
        other => panic!("Expected text at ({}, {}), got {:?}", row, col, other),
    }
}
