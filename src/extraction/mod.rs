//! Extraction logic for the report engine.
//!
//! This module contains the pipeline stages: location resolution, employee
//! block extraction from the staff roster, role-based exclusion,
//! cross-referencing against the registration and permit tables, and the
//! remaining-validity calculation.

mod cross_reference;
mod employee_block;
mod exclusion;
mod expiry;
mod location;
mod report_rows;

pub use cross_reference::{
    DocumentMatch, EXPIRY_COLUMN, NAME_COLUMN, NUMBER_COLUMN, find_document,
};
pub use employee_block::extract_employee_block;
pub use exclusion::ExclusionFilter;
pub use expiry::{DAYS_PER_MONTH, ExpiryCalculator, parse_expiry_date};
pub use location::LocationRegistry;
pub use report_rows::{ReferenceTables, build_report_rows};
