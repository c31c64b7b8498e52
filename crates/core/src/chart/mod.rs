//! Charts: series extraction, SVG drawing and sheet placement.
//!
//! The bar, pie and line charts are drawn with plotters' SVG backend by
//! [`svg::to_svg`]; turning markup into PNG bytes is left to a
//! [`ChartRenderer`] implementation.

pub mod data;
pub mod error;
pub mod layout;
pub mod renderer;
pub mod svg;

pub use data::{ChartData, ChartKind, ChartPoint, FigureSize};
pub use error::ChartError;
pub use layout::{Anchor, ChartLayout, ChartSlot, PixelRect};
pub use renderer::{ChartRenderer, EmbeddedChart};
pub use svg::{Svg, to_svg};
