//! I/O error types.

use std::path::PathBuf;

use sales_report_shared::ReportError;
use thiserror::Error;

/// Errors reading sales records from a tabular source.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The source file could not be opened or decoded.
    #[error("cannot open {}: {message}", path.display())]
    Open {
        /// Source path.
        path: PathBuf,
        /// Underlying reader message.
        message: String,
    },

    /// The file extension is not a supported tabular format.
    #[error("unsupported input format: {}", path.display())]
    UnsupportedFormat {
        /// Source path.
        path: PathBuf,
    },

    /// The requested sheet does not exist.
    #[error("sheet '{sheet}' not found (available: {})", available.join(", "))]
    SheetNotFound {
        /// Requested sheet.
        sheet: String,
        /// Sheets present in the workbook.
        available: Vec<String>,
    },

    /// Required columns are absent from the header row.
    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns {
        /// Canonical names of the absent columns.
        missing: Vec<&'static str>,
    },

    /// The sheet does not hold one row per dimension value.
    #[error("sheet '{0}' is not a dimension sheet")]
    NotDimensional(String),

    /// A cell could not be converted to its column's type.
    #[error("row {row}, column '{column}': {reason} (value: {value:?})")]
    InvalidCell {
        /// One-based row number as shown by spreadsheet software.
        row: usize,
        /// Canonical column name.
        column: &'static str,
        /// Raw cell text.
        value: String,
        /// Why conversion failed.
        reason: String,
    },
}

impl IngestError {
    /// Create an open error.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Open {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create an invalid cell error.
    #[must_use]
    pub fn invalid_cell(
        row: usize,
        column: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidCell {
            row,
            column,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl From<IngestError> for ReportError {
    fn from(err: IngestError) -> Self {
        Self::Ingestion(err.to_string())
    }
}

/// Errors writing report artifacts.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem failure.
    #[error("cannot write {}: {source}", path.display())]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The spreadsheet library rejected an operation.
    #[error("workbook error: {0}")]
    Workbook(String),

    /// A sheet with the same name was already added.
    #[error("duplicate sheet name '{0}'")]
    DuplicateSheet(String),
}

impl PersistError {
    /// Create an I/O error for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for PersistError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Workbook(err.to_string())
    }
}

impl From<PersistError> for ReportError {
    fn from(err: PersistError) -> Self {
        Self::Persistence(err.to_string())
    }
}
