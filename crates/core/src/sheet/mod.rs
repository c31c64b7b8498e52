//! Rendered sheets: formatted tables ready for the workbook.

pub mod builder;
pub mod model;
pub mod width;

#[cfg(test)]
mod props;

pub use builder::SheetBuilder;
pub use model::{Cell, QUANTITY_HEADER, RenderedSheet, SheetKind, VALUE_HEADER};
pub use width::{CellSizeAdjuster, DEFAULT_PADDING};
