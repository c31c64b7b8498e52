//! Aggregation engine.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::AggregateError;
use super::summary::SummaryRecord;
use crate::sales::{Dimension, DimensionKey, SalesRecord};

/// Summed sales for one value of a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionAggregate {
    /// The dimension value shared by every record in the group.
    pub key: DimensionKey,
    /// Sum of `quantity_sold` over the group.
    pub quantity_sold: u64,
    /// Sum of `total_value` over the group.
    pub total_value: Decimal,
}

/// Engine computing grouped sums over sales records.
pub struct AggregationEngine;

impl AggregationEngine {
    /// Groups `records` by `dimension`, summing quantity and value per group.
    ///
    /// Groups are returned in ascending key order: chronological for dates,
    /// lexical for names.
    pub fn aggregate(
        records: &[SalesRecord],
        dimension: Dimension,
    ) -> Result<Vec<DimensionAggregate>, AggregateError> {
        if records.is_empty() {
            return Err(AggregateError::EmptyInput);
        }

        let mut groups: BTreeMap<DimensionKey, (u64, Decimal)> = BTreeMap::new();
        for record in records {
            let entry = groups
                .entry(record.key(dimension))
                .or_insert((0, Decimal::ZERO));
            entry.0 = entry
                .0
                .checked_add(record.quantity_sold)
                .ok_or(AggregateError::QUANTITY)?;
            entry.1 = entry
                .1
                .checked_add(record.total_value)
                .ok_or(AggregateError::VALUE)?;
        }

        tracing::trace!(%dimension, groups = groups.len(), "aggregated records");

        Ok(groups
            .into_iter()
            .map(|(key, (quantity_sold, total_value))| DimensionAggregate {
                key,
                quantity_sold,
                total_value,
            })
            .collect())
    }

    /// Grand totals and top performers of `records`.
    ///
    /// See [`SummaryRecord::compute`].
    pub fn summarize(records: &[SalesRecord]) -> Result<SummaryRecord, AggregateError> {
        SummaryRecord::compute(records)
    }
}

/// Sum of `total_value` over all records.
pub fn grand_total_value(records: &[SalesRecord]) -> Result<Decimal, AggregateError> {
    records.iter().try_fold(Decimal::ZERO, |sum, r| {
        sum.checked_add(r.total_value).ok_or(AggregateError::VALUE)
    })
}

/// Sum of `quantity_sold` over all records.
pub fn grand_total_quantity(records: &[SalesRecord]) -> Result<u64, AggregateError> {
    records.iter().try_fold(0u64, |sum, r| {
        sum.checked_add(r.quantity_sold).ok_or(AggregateError::QUANTITY)
    })
}

/// Returns the group with the largest summed quantity.
///
/// Ties go to the first group in the slice, i.e. the smallest key when the
/// slice comes from [`AggregationEngine::aggregate`].
#[must_use]
pub fn top_by_quantity(aggregates: &[DimensionAggregate]) -> Option<&DimensionAggregate> {
    aggregates
        .iter()
        .fold(None, |best: Option<&DimensionAggregate>, candidate| match best {
            Some(current) if current.quantity_sold >= candidate.quantity_sold => Some(current),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sale(day: u32, product: &str, seller: &str, qty: u64, value: Decimal) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            product: product.to_string(),
            seller: seller.to_string(),
            location: "Loja Centro".to_string(),
            quantity_sold: qty,
            total_value: value,
        }
    }

    #[test]
    fn test_aggregate_by_product_sums_and_sorts() {
        let records = vec![
            sale(2, "Mouse", "Ana", 3, dec!(150.00)),
            sale(1, "Headset", "Bruno", 1, dec!(250.00)),
            sale(3, "Mouse", "Bruno", 2, dec!(100.00)),
        ];

        let result = AggregationEngine::aggregate(&records, Dimension::Product).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].key, DimensionKey::Text("Headset".into()));
        assert_eq!(result[0].quantity_sold, 1);
        assert_eq!(result[0].total_value, dec!(250.00));
        assert_eq!(result[1].key, DimensionKey::Text("Mouse".into()));
        assert_eq!(result[1].quantity_sold, 5);
        assert_eq!(result[1].total_value, dec!(250.00));
    }

    #[test]
    fn test_aggregate_by_date_is_chronological() {
        let records = vec![
            sale(15, "A", "X", 1, dec!(1)),
            sale(3, "A", "X", 1, dec!(1)),
            sale(9, "A", "X", 1, dec!(1)),
            sale(3, "B", "Y", 4, dec!(2)),
        ];

        let result = AggregationEngine::aggregate(&records, Dimension::Date).unwrap();
        let days: Vec<_> = result.iter().map(|a| a.key.as_date().unwrap()).collect();

        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            ]
        );
        assert_eq!(result[0].quantity_sold, 5);
        assert_eq!(result[0].total_value, dec!(3));
    }

    #[test]
    fn test_aggregate_empty_input_fails() {
        for dimension in Dimension::ALL {
            assert_eq!(
                AggregationEngine::aggregate(&[], dimension),
                Err(AggregateError::EmptyInput)
            );
        }
    }

    #[test]
    fn test_aggregate_quantity_overflow_fails() {
        let records = vec![
            sale(1, "A", "X", u64::MAX, dec!(1)),
            sale(2, "A", "Y", 1, dec!(1)),
        ];
        assert_eq!(
            AggregationEngine::aggregate(&records, Dimension::Product),
            Err(AggregateError::QUANTITY)
        );
        assert_eq!(grand_total_quantity(&records), Err(AggregateError::QUANTITY));
        // Separate groups never add up.
        assert!(AggregationEngine::aggregate(&records, Dimension::Seller).is_ok());
        assert_eq!(
            SummaryRecord::compute(&records),
            Err(AggregateError::QUANTITY)
        );
    }

    #[test]
    fn test_aggregate_value_overflow_fails() {
        let records = vec![
            sale(1, "A", "X", 1, Decimal::MAX),
            sale(1, "A", "X", 1, Decimal::MAX),
        ];
        assert_eq!(
            AggregationEngine::aggregate(&records, Dimension::Date),
            Err(AggregateError::VALUE)
        );
        assert_eq!(grand_total_value(&records), Err(AggregateError::VALUE));
        assert_eq!(AggregationEngine::summarize(&records), Err(AggregateError::VALUE));
    }

    #[test]
    fn test_summarize_matches_compute() {
        let records = vec![
            sale(1, "A", "X", 2, dec!(20.0)),
            sale(1, "B", "X", 3, dec!(45.0)),
        ];
        let summary = AggregationEngine::summarize(&records).unwrap();
        assert_eq!(summary, SummaryRecord::compute(&records).unwrap());
        assert_eq!(summary.top_product, "B");
        assert_eq!(
            AggregationEngine::summarize(&[]),
            Err(AggregateError::EmptyInput)
        );
    }

    #[test]
    fn test_grand_totals() {
        let records = vec![
            sale(1, "A", "X", 2, dec!(20.0)),
            sale(1, "B", "X", 3, dec!(45.0)),
        ];
        assert_eq!(grand_total_value(&records), Ok(dec!(65.0)));
        assert_eq!(grand_total_quantity(&records), Ok(5));
        assert_eq!(grand_total_value(&[]), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_top_by_quantity_prefers_first_on_tie() {
        let aggregates = vec![
            DimensionAggregate {
                key: DimensionKey::Text("A".into()),
                quantity_sold: 3,
                total_value: dec!(1),
            },
            DimensionAggregate {
                key: DimensionKey::Text("B".into()),
                quantity_sold: 3,
                total_value: dec!(99),
            },
            DimensionAggregate {
                key: DimensionKey::Text("C".into()),
                quantity_sold: 2,
                total_value: dec!(5),
            },
        ];

        let top = top_by_quantity(&aggregates).unwrap();
        assert_eq!(top.key, DimensionKey::Text("A".into()));
        assert!(top_by_quantity(&[]).is_none());
    }
}
