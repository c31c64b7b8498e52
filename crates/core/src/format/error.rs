//! Formatting error types.

use rust_decimal::Decimal;
use sales_report_shared::ReportError;
use thiserror::Error;

/// Errors raised while rendering or parsing display values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// NaN or infinite input.
    #[error("value {0} is not finite")]
    NonFinite(f64),

    /// Finite input outside the decimal range.
    #[error("value {0} is out of the representable range")]
    OutOfRange(f64),

    /// Negative input given to a formatter that disallows it.
    #[error("negative amount {0} is not allowed")]
    Negative(Decimal),

    /// Unknown locale identifier.
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Display string that is not a currency amount of this locale.
    #[error("cannot parse currency amount: {0:?}")]
    Unparsable(String),
}

impl From<FormatError> for ReportError {
    fn from(err: FormatError) -> Self {
        Self::Format(err.to_string())
    }
}
