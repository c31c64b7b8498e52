//! Pipeline-wide error types.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result type alias using `ReportError`.
pub type ReportResult<T> = Result<T, ReportError>;

/// Stages of report generation, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Reading the sales source.
    Ingest,
    /// Building the summary sheet.
    BuildSummarySheet,
    /// Persisting the summary-only workbook.
    Checkpoint,
    /// Building the sales-by-day sheet.
    BuildDailySheet,
    /// Building the sales-by-product sheet.
    BuildProductSheet,
    /// Building the sales-by-seller sheet.
    BuildSellerSheet,
    /// Building the sales-by-location sheet.
    BuildLocationSheet,
    /// Rendering and embedding the charts.
    BuildChartsSheet,
    /// Writing the complete workbook.
    Finalize,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Self; 9] = [
        Self::Ingest,
        Self::BuildSummarySheet,
        Self::Checkpoint,
        Self::BuildDailySheet,
        Self::BuildProductSheet,
        Self::BuildSellerSheet,
        Self::BuildLocationSheet,
        Self::BuildChartsSheet,
        Self::Finalize,
    ];

    /// Returns true if the stage runs after the summary checkpoint was written.
    #[must_use]
    pub const fn is_after_checkpoint(self) -> bool {
        !matches!(
            self,
            Self::Ingest | Self::BuildSummarySheet | Self::Checkpoint
        )
    }

    /// Stable snake_case name, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ingest => "ingest",
            Self::BuildSummarySheet => "build_summary_sheet",
            Self::Checkpoint => "checkpoint",
            Self::BuildDailySheet => "build_daily_sheet",
            Self::BuildProductSheet => "build_product_sheet",
            Self::BuildSellerSheet => "build_seller_sheet",
            Self::BuildLocationSheet => "build_location_sheet",
            Self::BuildChartsSheet => "build_charts_sheet",
            Self::Finalize => "finalize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report generation errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Sales source missing or malformed.
    #[error("Ingestion failed: {0}")]
    Ingestion(String),

    /// No records to aggregate.
    #[error("No sales records to aggregate")]
    EmptyInput,

    /// A sum exceeded the range of its numeric type.
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    /// A value could not be rendered in the target locale.
    #[error("Format error: {0}")]
    Format(String),

    /// A chart could not be produced.
    #[error("Chart rendering failed: {0}")]
    ChartRender(String),

    /// An artifact could not be written.
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// A stage failed before anything was persisted.
    #[error("Stage {stage} failed: {source}")]
    Stage {
        /// The failing stage.
        stage: Stage,
        /// Underlying error.
        #[source]
        source: Box<ReportError>,
    },

    /// A stage failed after the summary checkpoint was written.
    #[error(
        "Report incomplete: stage {stage} failed after checkpoint {}: {source}",
        checkpoint.display()
    )]
    PartialReport {
        /// The failing stage.
        stage: Stage,
        /// Path of the summary-only workbook left on disk.
        checkpoint: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<ReportError>,
    },
}

impl ReportError {
    /// Wraps an error with the stage it occurred in.
    ///
    /// Stage-tagged errors are returned unchanged.
    #[must_use]
    pub fn at(self, stage: Stage) -> Self {
        match self {
            Self::Stage { .. } | Self::PartialReport { .. } => self,
            other => Self::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Marks an error as occurring after the checkpoint at `checkpoint`.
    #[must_use]
    pub fn after_checkpoint(self, stage: Stage, checkpoint: impl Into<PathBuf>) -> Self {
        let source = match self {
            Self::PartialReport { .. } => return self,
            Self::Stage { source, .. } => source,
            other => Box::new(other),
        };
        Self::PartialReport {
            stage,
            checkpoint: checkpoint.into(),
            source,
        }
    }

    /// Returns the stage the error was reported against, if any.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::Stage { stage, .. } | Self::PartialReport { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Returns the innermost error, skipping stage wrappers.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Stage { source, .. } | Self::PartialReport { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns true if a valid summary-only workbook was left on disk.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        matches!(self, Self::PartialReport { .. })
    }

    /// Returns the error code for logs and machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Ingestion(_) => "INGESTION_ERROR",
            Self::EmptyInput => "EMPTY_INPUT",
            Self::Overflow(_) => "OVERFLOW_ERROR",
            Self::Format(_) => "FORMAT_ERROR",
            Self::ChartRender(_) => "CHART_RENDER_ERROR",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::PartialReport { .. } => "PARTIAL_REPORT",
            Self::Stage { source, .. } => source.error_code(),
        }
    }

    /// Returns the process exit status for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.is_partial() {
            3
        } else if matches!(self.root(), Self::EmptyInput) {
            4
        } else {
            1
        }
    }
}
