//! Spreadsheet input and output.
//!
//! Input workbooks are read with `calamine` into [`crate::models::Table`];
//! the report is written with `rust_xlsxwriter`.

mod reader;
mod writer;

pub use reader::{SheetSelector, excel_serial_to_date, read_table};
pub use writer::write_report;
