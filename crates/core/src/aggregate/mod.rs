//! Grouped sums over sales dimensions.
//!
//! This module provides the aggregation engine used by every sheet and chart:
//! - Per-dimension totals (date, product, seller, location)
//! - The whole-report summary (grand totals, top performers, period)

pub mod engine;
pub mod error;
pub mod summary;

#[cfg(test)]
mod props;

pub use engine::{
    AggregationEngine, DimensionAggregate, grand_total_quantity, grand_total_value,
    top_by_quantity,
};
pub use error::AggregateError;
pub use summary::SummaryRecord;
