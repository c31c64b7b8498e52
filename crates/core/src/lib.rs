//! Core report logic for the sales report generator.
//!
//! This crate contains pure report logic with ZERO spreadsheet or filesystem
//! dependencies. Records come in, rendered sheet models and chart drawings
//! come out.
//!
//! # Modules
//!
//! - `sales` - Sales records and grouping dimensions
//! - `aggregate` - Per-dimension sums and the report summary
//! - `format` - Locale-aware currency and date display
//! - `sheet` - Tabular sheet models with fitted column widths
//! - `chart` - Chart series, SVG drawing and image placement

pub mod aggregate;
pub mod chart;
pub mod format;
pub mod sales;
pub mod sheet;
