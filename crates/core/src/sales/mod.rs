//! Sales records and the in-memory tabular store.

pub mod record;

pub use record::{Dimension, DimensionKey, SalesRecord, SalesTable};
