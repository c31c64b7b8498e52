//! Date display helpers.

use chrono::NaiveDate;

/// Display pattern for every date in the report (`DD/MM/YYYY`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Excel number format matching [`DATE_FORMAT`].
pub const EXCEL_DATE_FORMAT: &str = "dd/mm/yyyy";

/// Formats a date as `DD/MM/YYYY`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats an inclusive period as `DD/MM/YYYY - DD/MM/YYYY`.
#[must_use]
pub fn format_period(first: NaiveDate, last: NaiveDate) -> String {
    format!("{} - {}", format_date(first), format_date(last))
}
