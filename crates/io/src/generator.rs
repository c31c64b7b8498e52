//! Report orchestration.
//!
//! [`ReportGenerator`] runs the report as a linear sequence of stages:
//!
//! ```text
//! Ingest → BuildSummarySheet → Checkpoint → BuildDailySheet → BuildProductSheet
//!        → BuildSellerSheet → BuildLocationSheet → BuildChartsSheet → Finalize
//! ```
//!
//! The checkpoint saves a summary-only workbook at the output path. A failure
//! after it is reported as [`ReportError::PartialReport`] naming that file; a
//! failure before it leaves no output behind.

use std::collections::HashMap;
use std::path::PathBuf;

use sales_report_core::aggregate::{AggregationEngine, DimensionAggregate, SummaryRecord};
use sales_report_core::chart::{ChartData, ChartKind, ChartRenderer, EmbeddedChart};
use sales_report_core::format::{CurrencyFormatter, Locale};
use sales_report_core::sales::{Dimension, SalesTable};
use sales_report_core::sheet::{RenderedSheet, SheetBuilder, SheetKind};
use sales_report_shared::{AppConfig, ReportError, ReportResult, Stage};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::ingest::SalesReader;
use crate::persist::write_atomic;
use crate::raster::SvgRasterizer;
use crate::workbook::WorkbookWriter;

/// Where report artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSettings {
    /// Final workbook path (also the checkpoint path).
    pub output_path: PathBuf,
    /// Directory for the chart images.
    pub graphics_dir: PathBuf,
}

impl ReportSettings {
    /// Settings from the output configuration section.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            output_path: config.output.path.clone(),
            graphics_dir: config.output.graphics_dir.clone(),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutcome {
    /// Written workbook.
    pub output_path: PathBuf,
    /// Sheets of the workbook, in order.
    pub sheet_names: Vec<String>,
    /// Written chart images, in embedding order.
    pub chart_paths: Vec<PathBuf>,
    /// Report summary.
    pub summary: SummaryRecord,
}

/// Drives ingestion, sheet building, chart rendering and persistence.
pub struct ReportGenerator {
    reader: Option<SalesReader>,
    settings: ReportSettings,
    builder: SheetBuilder,
    renderer: Box<dyn ChartRenderer>,
}

/// Dimension sheets after the checkpoint, in workbook order.
const DIMENSION_STAGES: [(Stage, Dimension); 4] = [
    (Stage::BuildDailySheet, Dimension::Date),
    (Stage::BuildProductSheet, Dimension::Product),
    (Stage::BuildSellerSheet, Dimension::Seller),
    (Stage::BuildLocationSheet, Dimension::Location),
];

impl ReportGenerator {
    /// Creates a generator writing to `settings` with the given formatter and
    /// chart renderer. It has no input source; use [`generate`](Self::generate)
    /// or attach one with [`with_reader`](Self::with_reader).
    #[must_use]
    pub fn new(
        settings: ReportSettings,
        formatter: CurrencyFormatter,
        renderer: Box<dyn ChartRenderer>,
    ) -> Self {
        Self {
            reader: None,
            settings,
            builder: SheetBuilder::new(formatter),
            renderer,
        }
    }

    /// Creates a generator from the application configuration, rasterizing
    /// charts with [`SvgRasterizer`].
    pub fn from_config(config: &AppConfig) -> ReportResult<Self> {
        let locale: Locale = config.report.locale.parse()?;
        let formatter = CurrencyFormatter::new(locale);
        let renderer = SvgRasterizer::new(config.report.chart_dpi, formatter);

        Ok(
            Self::new(ReportSettings::from_config(config), formatter, Box::new(renderer))
                .with_reader(SalesReader::from_config(&config.input)),
        )
    }

    /// Sets the input source used by [`run`](Self::run).
    #[must_use]
    pub fn with_reader(mut self, reader: SalesReader) -> Self {
        self.reader = Some(reader);
        self
    }

    /// Reads the configured source and generates the report.
    pub fn run(&self) -> ReportResult<ReportOutcome> {
        let table = stage(Stage::Ingest, || {
            let reader = self
                .reader
                .as_ref()
                .ok_or_else(|| ReportError::Ingestion("no input source configured".into()))?;
            Ok(reader.read()?)
        })
        .map_err(|e| e.at(Stage::Ingest))?;

        self.generate(&table)
    }

    /// Generates the report from already-loaded records.
    pub fn generate(&self, table: &SalesTable) -> ReportResult<ReportOutcome> {
        let records = table.records();
        let mut writer = WorkbookWriter::new(self.builder.formatter());

        let (summary, summary_sheet) = stage(Stage::BuildSummarySheet, || {
            let summary = SummaryRecord::compute(records)?;
            let sheet = self.builder.build_summary(&summary)?;
            writer.write_sheet(&sheet)?;
            Ok((summary, sheet))
        })
        .map_err(|e| e.at(Stage::BuildSummarySheet))?;

        let checkpoint = &self.settings.output_path;
        stage(Stage::Checkpoint, || self.save_checkpoint(&summary_sheet))
            .map_err(|e| e.at(Stage::Checkpoint))?;

        let mut aggregates: HashMap<Dimension, Vec<DimensionAggregate>> = HashMap::new();
        for (current, dimension) in DIMENSION_STAGES {
            let rows = stage(current, || {
                let rows = AggregationEngine::aggregate(records, dimension)?;
                let sheet = self.builder.build_dimension(dimension, &rows)?;
                writer.write_sheet(&sheet)?;
                Ok(rows)
            })
            .map_err(|e| e.after_checkpoint(current, checkpoint))?;
            aggregates.insert(dimension, rows);
        }

        let chart_paths = stage(Stage::BuildChartsSheet, || {
            let mut charts = Vec::with_capacity(ChartKind::ALL.len());
            let mut paths = Vec::with_capacity(ChartKind::ALL.len());
            for kind in ChartKind::ALL {
                let rows = aggregates
                    .get(&kind.dimension())
                    .map_or(&[][..], Vec::as_slice);
                let data = ChartData::from_aggregates(kind, rows)?;
                let chart = EmbeddedChart::render(&*self.renderer, &data)?;

                let path = self.settings.graphics_dir.join(kind.file_name());
                write_atomic(&path, &chart.png)?;
                debug!(chart = %kind, path = %path.display(), "Wrote chart image");

                charts.push(chart);
                paths.push(path);
            }
            writer.add_chart_sheet(SheetKind::Charts.name(), &charts)?;
            Ok(paths)
        })
        .map_err(|e| e.after_checkpoint(Stage::BuildChartsSheet, checkpoint))?;

        stage(Stage::Finalize, || writer.save_atomic(checkpoint).map_err(ReportError::from))
            .map_err(|e| e.after_checkpoint(Stage::Finalize, checkpoint))?;

        let outcome = ReportOutcome {
            output_path: checkpoint.clone(),
            sheet_names: writer.sheet_names().to_vec(),
            chart_paths,
            summary,
        };
        info!(
            path = %outcome.output_path.display(),
            sheets = outcome.sheet_names.len(),
            records = records.len(),
            "Report written"
        );
        Ok(outcome)
    }

    fn save_checkpoint(&self, summary_sheet: &RenderedSheet) -> ReportResult<()> {
        let mut checkpoint = WorkbookWriter::new(self.builder.formatter());
        checkpoint.write_sheet(summary_sheet)?;
        checkpoint.save_atomic(&self.settings.output_path)?;
        Ok(())
    }
}

impl std::fmt::Debug for ReportGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportGenerator")
            .field("reader", &self.reader)
            .field("settings", &self.settings)
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

/// Runs `f` inside a span for `current`, logging completion.
fn stage<T>(current: Stage, f: impl FnOnce() -> ReportResult<T>) -> ReportResult<T> {
    let span = info_span!("stage", stage = %current);
    let _guard = span.enter();
    let result = f();
    if result.is_ok() {
        info!("Stage complete");
    }
    result
}
