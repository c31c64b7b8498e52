//! Sales record types.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single sales transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Day of the sale.
    pub date: NaiveDate,
    /// Product sold.
    pub product: String,
    /// Seller responsible for the sale.
    pub seller: String,
    /// Store or region where the sale happened.
    pub location: String,
    /// Units sold.
    pub quantity_sold: u64,
    /// Total value of the sale.
    pub total_value: Decimal,
}

impl SalesRecord {
    /// Returns the value of `dimension` for this record.
    #[must_use]
    pub fn key(&self, dimension: Dimension) -> DimensionKey {
        match dimension {
            Dimension::Date => DimensionKey::Date(self.date),
            Dimension::Product => DimensionKey::Text(self.product.clone()),
            Dimension::Seller => DimensionKey::Text(self.seller.clone()),
            Dimension::Location => DimensionKey::Text(self.location.clone()),
        }
    }
}

/// Attribute used as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Calendar day.
    Date,
    /// Product name.
    Product,
    /// Seller name.
    Seller,
    /// Location name.
    Location,
}

impl Dimension {
    /// All dimensions, in sheet order.
    pub const ALL: [Self; 4] = [Self::Date, Self::Product, Self::Seller, Self::Location];
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Product => write!(f, "product"),
            Self::Seller => write!(f, "seller"),
            Self::Location => write!(f, "location"),
        }
    }
}

/// Value of a dimension for one group.
///
/// Ordering is chronological for dates and byte-wise lexical for names,
/// which is the row order of every aggregate sheet.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionKey {
    /// A calendar day.
    Date(NaiveDate),
    /// A categorical name.
    Text(String),
}

impl DimensionKey {
    /// Returns the date, if this is a date key.
    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{date}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// In-memory store of every ingested sales record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    /// Creates a table from ingested records.
    #[must_use]
    pub const fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    /// Returns the records in ingestion order.
    #[must_use]
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no record was ingested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<SalesRecord>> for SalesTable {
    fn from(records: Vec<SalesRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<SalesRecord> for SalesTable {
    fn from_iter<I: IntoIterator<Item = SalesRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
