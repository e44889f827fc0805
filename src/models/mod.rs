//! Core data models for the report engine.
//!
//! This module contains the spreadsheet cell model, locations, and the rows
//! of the produced report.

mod cell;
mod location;
mod report_row;

pub use cell::{CellValue, Table};
pub use location::Location;
pub use report_row::{
    DATE_ERROR_LABEL, ExpiryStatus, NO_DATA_LABEL, OVERDUE_LABEL, REPORT_HEADERS, ReportRow,
};
