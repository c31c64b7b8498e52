//! Property-based tests for currency formatting.

use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use super::currency::CurrencyFormatter;
use super::locale::Locale;

/// Strategy to generate amounts with up to 4 decimal places, signed.
fn amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn locale() -> impl Strategy<Value = Locale> {
    prop_oneof![Just(Locale::PtBr), Just(Locale::EnUs), Just(Locale::DeDe)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Parsing a formatted amount yields the amount rounded to cents.
    #[test]
    fn prop_parse_inverts_format(amount in amount(), locale in locale()) {
        let formatter = CurrencyFormatter::new(locale);
        let display = formatter.format(amount).unwrap();
        let expected = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

        prop_assert_eq!(formatter.parse(&display).unwrap(), expected);
    }

    /// Formatting is a pure function of amount and locale.
    #[test]
    fn prop_format_is_deterministic(amount in amount(), locale in locale()) {
        let formatter = CurrencyFormatter::new(locale);
        prop_assert_eq!(formatter.format(amount).unwrap(), formatter.format(amount).unwrap());
    }

    /// Every display string carries the symbol and exactly two fraction digits.
    #[test]
    fn prop_display_shape(amount in amount(), locale in locale()) {
        let formatter = CurrencyFormatter::new(locale);
        let display = formatter.format(amount).unwrap();
        let conventions = locale.conventions();

        prop_assert!(display.contains(conventions.symbol));
        let number = display.replace(conventions.symbol, "");
        let fraction = number.trim().rsplit(conventions.decimal).next().unwrap();
        prop_assert_eq!(fraction.len(), 2);
        prop_assert!(fraction.chars().all(|c| c.is_ascii_digit()));
    }
}
