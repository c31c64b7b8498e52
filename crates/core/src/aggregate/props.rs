//! Property-based tests for aggregation.
//!
//! - Aggregation is a partition of the input (no record lost or duplicated)
//! - Output order is independent of input order
//! - Summary totals match direct sums

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::{AggregationEngine, grand_total_quantity, grand_total_value};
use super::summary::SummaryRecord;
use crate::sales::{Dimension, SalesRecord};

/// Strategy to generate non-negative amounts (0.00 to 100,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to pick a name from a small pool so groups collide.
fn name(prefix: &'static str) -> impl Strategy<Value = String> {
    (0u8..5).prop_map(move |i| format!("{prefix} {i}"))
}

fn record() -> impl Strategy<Value = SalesRecord> {
    (
        0u32..60,
        name("Produto"),
        name("Vendedor"),
        name("Loja"),
        0u64..500,
        amount(),
    )
        .prop_map(|(offset, product, seller, location, quantity_sold, total_value)| {
            SalesRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(offset.into()),
                product,
                seller,
                location,
                quantity_sold,
                total_value,
            }
        })
}

fn records() -> impl Strategy<Value = Vec<SalesRecord>> {
    prop::collection::vec(record(), 1..80)
}

fn dimension() -> impl Strategy<Value = Dimension> {
    prop_oneof![
        Just(Dimension::Date),
        Just(Dimension::Product),
        Just(Dimension::Seller),
        Just(Dimension::Location),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* non-empty records and dimension, group totals sum to the
    /// grand totals.
    #[test]
    fn prop_aggregation_is_partition(records in records(), dimension in dimension()) {
        let groups = AggregationEngine::aggregate(&records, dimension).unwrap();

        let value: Decimal = groups.iter().map(|g| g.total_value).sum();
        let quantity: u64 = groups.iter().map(|g| g.quantity_sold).sum();

        prop_assert_eq!(Ok(value), grand_total_value(&records));
        prop_assert_eq!(Ok(quantity), grand_total_quantity(&records));
    }

    /// *For any* group, its totals equal the sums over exactly the matching records.
    #[test]
    fn prop_group_matches_its_records(records in records(), dimension in dimension()) {
        let groups = AggregationEngine::aggregate(&records, dimension).unwrap();

        for group in &groups {
            let matching: Vec<&SalesRecord> =
                records.iter().filter(|r| r.key(dimension) == group.key).collect();
            prop_assert!(!matching.is_empty());
            prop_assert_eq!(
                group.total_value,
                matching.iter().map(|r| r.total_value).sum::<Decimal>()
            );
            prop_assert_eq!(
                group.quantity_sold,
                matching.iter().map(|r| r.quantity_sold).sum::<u64>()
            );
        }
    }

    /// Groups are strictly ascending and independent of input order.
    #[test]
    fn prop_order_is_deterministic(records in records(), dimension in dimension()) {
        let forward = AggregationEngine::aggregate(&records, dimension).unwrap();
        let reversed: Vec<SalesRecord> = records.iter().rev().cloned().collect();
        let backward = AggregationEngine::aggregate(&reversed, dimension).unwrap();

        prop_assert!(forward.windows(2).all(|w| w[0].key < w[1].key));
        prop_assert_eq!(forward, backward);
    }

    /// Summary totals and top performers are consistent with the groups.
    #[test]
    fn prop_summary_consistent(records in records()) {
        let summary = SummaryRecord::compute(&records).unwrap();

        prop_assert_eq!(Ok(summary.total_value), grand_total_value(&records));
        prop_assert_eq!(Ok(summary.total_quantity), grand_total_quantity(&records));
        prop_assert!(summary.first_date <= summary.last_date);

        let sellers = AggregationEngine::aggregate(&records, Dimension::Seller).unwrap();
        let best = sellers.iter().map(|g| g.quantity_sold).max().unwrap();
        let first_best = sellers.iter().find(|g| g.quantity_sold == best).unwrap();
        prop_assert_eq!(first_best.key.to_string(), summary.top_seller);
    }
}
