//! Property-based tests for sheet building and sizing.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::builder::SheetBuilder;
use super::width::DEFAULT_PADDING;
use crate::aggregate::DimensionAggregate;
use crate::sales::{Dimension, DimensionKey};

fn aggregate(dimension: Dimension) -> impl Strategy<Value = DimensionAggregate> {
    (
        "[A-Za-zÀ-ú ]{1,30}",
        0u32..3650,
        0u64..1_000_000,
        (0i64..10_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
    )
        .prop_map(move |(name, days, quantity_sold, total_value)| {
            let key = match dimension {
                Dimension::Date => DimensionKey::Date(
                    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + chrono::Days::new(days.into()),
                ),
                _ => DimensionKey::Text(name),
            };
            DimensionAggregate {
                key,
                quantity_sold,
                total_value,
            }
        })
}

fn dimension() -> impl Strategy<Value = Dimension> {
    prop_oneof![
        Just(Dimension::Date),
        Just(Dimension::Product),
        Just(Dimension::Seller),
        Just(Dimension::Location),
    ]
}

fn sheet_input() -> impl Strategy<Value = (Dimension, Vec<DimensionAggregate>)> {
    dimension().prop_flat_map(|d| (Just(d), prop::collection::vec(aggregate(d), 0..40)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every column is at least as wide as its widest cell and header plus padding.
    #[test]
    fn prop_width_covers_content((dimension, aggregates) in sheet_input()) {
        let sheet = SheetBuilder::default().build_dimension(dimension, &aggregates).unwrap();

        prop_assert_eq!(sheet.column_widths.len(), sheet.headers.len());
        for (index, width) in sheet.column_widths.iter().enumerate() {
            prop_assert!(*width >= sheet.headers[index].chars().count() + DEFAULT_PADDING);
            for value in sheet.column_values(index) {
                prop_assert!(*width >= value.chars().count() + DEFAULT_PADDING);
            }
        }
    }

    /// One row per aggregate, in aggregate order, with the raw value preserved.
    #[test]
    fn prop_rows_mirror_aggregates((dimension, aggregates) in sheet_input()) {
        let sheet = SheetBuilder::default().build_dimension(dimension, &aggregates).unwrap();

        prop_assert_eq!(sheet.rows.len(), aggregates.len());
        for (row, aggregate) in sheet.rows.iter().zip(&aggregates) {
            prop_assert_eq!(row.len(), 3);
            match &row[2] {
                super::model::Cell::Currency { value, .. } => {
                    prop_assert_eq!(*value, aggregate.total_value);
                }
                other => prop_assert!(false, "unexpected value cell {:?}", other),
            }
        }
    }
}
