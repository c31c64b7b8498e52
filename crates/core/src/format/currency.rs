//! Currency formatting with explicit locale.
//!
//! The locale is fixed when the formatter is built; there is no process-wide
//! locale state, so formatters for different locales can coexist.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use super::error::FormatError;
use super::locale::{Locale, SymbolPosition};

/// Fraction digits of every currency display value.
pub const FRACTION_DIGITS: u32 = 2;

/// Renders amounts as locale-specific currency strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormatter {
    locale: Locale,
    allow_negative: bool,
}

impl CurrencyFormatter {
    /// Creates a formatter for `locale`. Negative amounts are allowed.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self {
            locale,
            allow_negative: true,
        }
    }

    /// Makes the formatter fail on negative amounts.
    #[must_use]
    pub const fn reject_negative(mut self) -> Self {
        self.allow_negative = false;
        self
    }

    /// Spreadsheet number format code rendering amounts like [`format`](Self::format).
    ///
    /// Format codes always use `,` for grouping and `.` for the decimal
    /// point; the spreadsheet application substitutes its own separators.
    #[must_use]
    pub fn excel_num_format(&self) -> String {
        let conventions = self.locale.conventions();
        let space = if conventions.spaced { " " } else { "" };
        let positive = match conventions.position {
            SymbolPosition::Prefix => format!("\"{}{space}\"#,##0.00", conventions.symbol),
            SymbolPosition::Suffix => format!("#,##0.00\"{space}{}\"", conventions.symbol),
        };
        format!("{positive};-{positive}")
    }

    /// Returns the currency symbol of the locale.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        self.locale.conventions().symbol
    }

    /// Formats `amount` with two fraction digits and thousands grouping.
    ///
    /// Rounds with Banker's Rounding (MidpointNearestEven). Negative amounts
    /// carry a leading minus before the symbol.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use sales_report_core::format::{CurrencyFormatter, Locale};
    ///
    /// let formatter = CurrencyFormatter::new(Locale::PtBr);
    /// assert_eq!(formatter.format(dec!(1234.5)).unwrap(), "R$ 1.234,50");
    /// ```
    pub fn format(&self, amount: Decimal) -> Result<String, FormatError> {
        if !self.allow_negative && amount.is_sign_negative() && !amount.is_zero() {
            return Err(FormatError::Negative(amount));
        }

        let rounded =
            amount.round_dp_with_strategy(FRACTION_DIGITS, RoundingStrategy::MidpointNearestEven);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = format!("{:.2}", rounded.abs());
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let conventions = self.locale.conventions();
        let number = format!(
            "{}{}{}",
            group_thousands(integer, conventions.grouping),
            conventions.decimal,
            fraction
        );
        let space = if conventions.spaced { " " } else { "" };
        let sign = if negative { "-" } else { "" };

        Ok(match conventions.position {
            SymbolPosition::Prefix => format!("{sign}{}{space}{number}", conventions.symbol),
            SymbolPosition::Suffix => format!("{sign}{number}{space}{}", conventions.symbol),
        })
    }

    /// Formats a floating-point amount, as used for chart axis labels.
    pub fn format_f64(&self, amount: f64) -> Result<String, FormatError> {
        if !amount.is_finite() {
            return Err(FormatError::NonFinite(amount));
        }
        let decimal = Decimal::from_f64(amount).ok_or(FormatError::OutOfRange(amount))?;
        self.format(decimal)
    }

    /// Parses a string produced by [`format`](Self::format) back into an amount.
    pub fn parse(&self, display: &str) -> Result<Decimal, FormatError> {
        let conventions = self.locale.conventions();
        let unparsable = || FormatError::Unparsable(display.to_string());

        let trimmed = display.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let number: String = rest
            .replace(conventions.symbol, "")
            .chars()
            .filter(|c| !c.is_whitespace() && *c != conventions.grouping)
            .map(|c| if c == conventions.decimal { '.' } else { c })
            .collect();

        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(unparsable());
        }
        let value = Decimal::from_str(&number).map_err(|_| unparsable())?;
        Ok(if negative { -value } else { value })
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

/// Inserts `separator` every three digits from the right.
fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
