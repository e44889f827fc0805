//! Assembly of report rows from the extracted employees.

use tracing::{debug, warn};

use crate::error::ReportResult;
use crate::models::{NO_DATA_LABEL, ReportRow, Table};

use super::cross_reference::{DocumentMatch, find_document};
use super::exclusion::ExclusionFilter;
use super::expiry::ExpiryCalculator;

/// The two reference tables an employee is looked up in.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceTables<'a> {
    /// Registration table.
    pub registration: &'a Table,
    /// Work permit table.
    pub permit: &'a Table,
}

/// Builds the report rows for `employees`, in roster order.
///
/// Excluded employees and employees found in neither reference table are
/// left out. A failure while building one employee's row is logged and only
/// drops that employee.
pub fn build_report_rows(
    employees: &[String],
    tables: ReferenceTables<'_>,
    filter: &ExclusionFilter,
    calculator: &ExpiryCalculator,
) -> Vec<ReportRow> {
    let mut rows = Vec::with_capacity(employees.len());

    for employee in employees {
        let employee = employee.trim();

        if let Some(keyword) = filter.matching_keyword(employee) {
            debug!(employee, keyword, "Employee excluded by role keyword");
            continue;
        }

        match build_row(employee, tables, calculator) {
            Ok(Some(row)) => rows.push(row),
            Ok(None) => {
                debug!(employee, "Employee has no registration or permit record");
            }
            Err(err) => {
                warn!(employee, error = %err, "Skipping employee");
            }
        }
    }

    rows
}

fn build_row(
    employee: &str,
    tables: ReferenceTables<'_>,
    calculator: &ExpiryCalculator,
) -> ReportResult<Option<ReportRow>> {
    let registration = find_document(tables.registration, employee);
    let permit = find_document(tables.permit, employee);

    if registration.is_none() && permit.is_none() {
        return Ok(None);
    }

    let number = |found: &Option<DocumentMatch>| match found {
        Some(found) => found.number_label(employee),
        None => Ok(NO_DATA_LABEL.to_string()),
    };

    Ok(Some(ReportRow {
        employee: employee.to_string(),
        registration_number: number(&registration)?,
        registration_remaining: calculator.remaining(registration.as_ref().map(|m| &m.expiry)),
        permit_number: number(&permit)?,
        permit_remaining: calculator.remaining(permit.as_ref().map(|m| &m.expiry)),
    }))
}
