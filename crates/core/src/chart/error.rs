//! Chart error types.

use sales_report_shared::ReportError;
use thiserror::Error;

use super::data::ChartKind;
use crate::format::FormatError;

/// Errors that can occur while producing a chart image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// Nothing to plot.
    #[error("chart {chart} has no data to plot")]
    EmptyAggregate {
        /// The chart being rendered.
        chart: ChartKind,
    },

    /// Data present but not plottable (e.g. a pie of zeros).
    #[error("chart {chart} cannot be plotted: {reason}")]
    Degenerate {
        /// The chart being rendered.
        chart: ChartKind,
        /// What makes the data unplottable.
        reason: String,
    },

    /// An axis label could not be formatted.
    #[error("chart label formatting failed: {0}")]
    Format(#[from] FormatError),

    /// The plotting backend failed.
    #[error("chart drawing failed: {0}")]
    Draw(String),

    /// The drawing could not be turned into an image.
    #[error("rasterization failed: {0}")]
    Rasterize(String),
}

impl ChartError {
    /// Create a drawing error from a plotting backend error.
    #[must_use]
    pub fn draw(err: impl std::fmt::Display) -> Self {
        Self::Draw(err.to_string())
    }

    /// Create a rasterization error.
    #[must_use]
    pub fn rasterize(msg: impl Into<String>) -> Self {
        Self::Rasterize(msg.into())
    }
}

impl From<ChartError> for ReportError {
    fn from(err: ChartError) -> Self {
        Self::ChartRender(err.to_string())
    }
}
