//! Chart rendering seam.

use super::data::{ChartData, ChartKind};
use super::error::ChartError;
use super::layout::ChartSlot;

/// Turns chart data into an encoded PNG image.
///
/// Implementations must not touch the filesystem; persisting images is the
/// caller's concern.
pub trait ChartRenderer {
    /// Renders `chart` to PNG bytes.
    fn render(&self, chart: &ChartData) -> Result<Vec<u8>, ChartError>;
}

/// A rendered chart ready to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedChart {
    /// Which chart.
    pub kind: ChartKind,
    /// Placement in the charts sheet.
    pub slot: ChartSlot,
    /// Encoded PNG.
    pub png: Vec<u8>,
}

impl EmbeddedChart {
    /// Renders `chart` with `renderer` at its standard slot.
    pub fn render(renderer: &dyn ChartRenderer, chart: &ChartData) -> Result<Self, ChartError> {
        let png = renderer.render(chart)?;
        Ok(Self {
            kind: chart.kind,
            slot: chart.kind.slot(),
            png,
        })
    }
}
