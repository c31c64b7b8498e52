//! Locale-aware display formatting.
//!
//! Formatting is display-only: it runs after every sum is computed and its
//! output never flows back into aggregation.

pub mod currency;
pub mod date;
pub mod error;
pub mod locale;

#[cfg(test)]
mod props;

pub use currency::CurrencyFormatter;
pub use date::{format_date, format_period};
pub use error::FormatError;
pub use locale::Locale;
