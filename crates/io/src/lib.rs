//! Report I/O for the sales report generator.
//!
//! Everything that touches files lives here: reading sales sources,
//! rasterizing charts, writing the workbook, and the [`ReportGenerator`]
//! pipeline that ties the pure logic of `sales-report-core` to them.
//!
//! # Modules
//!
//! - `ingest` - Sales records from XLSX/ODS/XLS (calamine) and CSV
//! - `raster` - SVG to PNG with resvg
//! - `workbook` - Multi-sheet `.xlsx` writing with rust_xlsxwriter
//! - `persist` - Atomic file writes
//! - `generator` - Stage sequencing, checkpoint and outcome
//! - `roundtrip` - Reading generated dimension sheets back

pub mod error;
pub mod generator;
pub mod ingest;
pub mod persist;
pub mod raster;
pub mod roundtrip;
pub mod workbook;

pub use error::{IngestError, PersistError};
pub use generator::{ReportGenerator, ReportOutcome, ReportSettings};
pub use ingest::SalesReader;
pub use raster::SvgRasterizer;
pub use roundtrip::read_dimension_sheet;
pub use workbook::WorkbookWriter;
