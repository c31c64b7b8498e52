//! Whole-report summary statistics.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::engine::{AggregationEngine, grand_total_quantity, grand_total_value, top_by_quantity};
use super::error::AggregateError;
use crate::sales::{Dimension, DimensionKey, SalesRecord};

/// Single synthetic row describing the whole report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Sum of `total_value` over every record.
    pub total_value: Decimal,
    /// Sum of `quantity_sold` over every record.
    pub total_quantity: u64,
    /// Seller with the most units sold.
    pub top_seller: String,
    /// Product with the most units sold.
    pub top_product: String,
    /// Location with the most units sold.
    pub top_location: String,
    /// Earliest sale date (inclusive).
    pub first_date: NaiveDate,
    /// Latest sale date (inclusive).
    pub last_date: NaiveDate,
    /// Number of records summarized.
    pub record_count: usize,
}

impl SummaryRecord {
    /// Computes the summary of `records`.
    ///
    /// Top performers are ranked by summed quantity; ties go to the
    /// lexicographically smallest name.
    pub fn compute(records: &[SalesRecord]) -> Result<Self, AggregateError> {
        let (first_date, last_date) = records
            .iter()
            .map(|r| r.date)
            .fold(None, |range: Option<(NaiveDate, NaiveDate)>, date| {
                Some(match range {
                    Some((min, max)) => (min.min(date), max.max(date)),
                    None => (date, date),
                })
            })
            .ok_or(AggregateError::EmptyInput)?;

        Ok(Self {
            total_value: grand_total_value(records)?,
            total_quantity: grand_total_quantity(records)?,
            top_seller: top_name(records, Dimension::Seller)?,
            top_product: top_name(records, Dimension::Product)?,
            top_location: top_name(records, Dimension::Location)?,
            first_date,
            last_date,
            record_count: records.len(),
        })
    }
}

fn top_name(records: &[SalesRecord], dimension: Dimension) -> Result<String, AggregateError> {
    let aggregates = AggregationEngine::aggregate(records, dimension)?;
    match top_by_quantity(&aggregates).map(|a| &a.key) {
        Some(DimensionKey::Text(name)) => Ok(name.clone()),
        Some(key @ DimensionKey::Date(_)) => Ok(key.to_string()),
        None => Err(AggregateError::EmptyInput),
    }
}
