//! Aggregation error types.

use sales_report_shared::ReportError;
use thiserror::Error;

/// Errors that can occur while aggregating sales records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// No records to group; no maximal element or date range exists.
    #[error("No sales records to aggregate")]
    EmptyInput,

    /// A running sum left the range of its type.
    #[error("Sum of {field} overflows")]
    Overflow {
        /// The summed field, `quantity_sold` or `total_value`.
        field: &'static str,
    },
}

impl AggregateError {
    pub(crate) const QUANTITY: Self = Self::Overflow {
        field: "quantity_sold",
    };
    pub(crate) const VALUE: Self = Self::Overflow {
        field: "total_value",
    };
}

impl From<AggregateError> for ReportError {
    fn from(err: AggregateError) -> Self {
        match err {
            AggregateError::EmptyInput => Self::EmptyInput,
            AggregateError::Overflow { .. } => Self::Overflow(err.to_string()),
        }
    }
}
