//! Integration tests for ReportGenerator.
//!
//! Runs the whole pipeline against temporary directories and reads the
//! produced workbooks back with calamine.

use std::fs;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sales_report_core::aggregate::AggregationEngine;
use sales_report_core::chart::{ChartData, ChartError, ChartKind, ChartRenderer};
use sales_report_core::format::{CurrencyFormatter, Locale};
use sales_report_core::sales::{Dimension, SalesRecord, SalesTable};
use sales_report_core::sheet::SheetKind;
use sales_report_io::{
    ReportGenerator, ReportSettings, SalesReader, SvgRasterizer, read_dimension_sheet,
};
use sales_report_shared::{AppConfig, ReportError, Stage};
use tempfile::TempDir;

fn sale(
    day: u32,
    product: &str,
    seller: &str,
    location: &str,
    qty: u64,
    value: Decimal,
) -> SalesRecord {
    SalesRecord {
        date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        product: product.into(),
        seller: seller.into(),
        location: location.into(),
        quantity_sold: qty,
        total_value: value,
    }
}

fn table() -> SalesTable {
    SalesTable::new(vec![
        sale(1, "Monitor", "Ana", "Centro", 2, dec!(1799.80)),
        sale(1, "Mouse", "Bruno", "Norte", 5, dec!(249.50)),
        sale(2, "Teclado", "Ana", "Centro", 1, dec!(149.90)),
        sale(4, "Mouse", "Carla", "Sul", 3, dec!(149.70)),
        sale(4, "Monitor", "Bruno", "Norte", 1, dec!(899.90)),
        sale(7, "Cabo HDMI", "Carla", "Centro", 10, dec!(250.00)),
    ])
}

fn settings(dir: &TempDir) -> ReportSettings {
    ReportSettings {
        output_path: dir.path().join("output/General_Report.xlsx"),
        graphics_dir: dir.path().join("graphics"),
    }
}

fn generator(dir: &TempDir) -> ReportGenerator {
    let formatter = CurrencyFormatter::default();
    ReportGenerator::new(
        settings(dir),
        formatter,
        Box::new(SvgRasterizer::new(20, formatter)),
    )
}

fn sheet_names(path: &Path) -> Vec<String> {
    open_workbook_auto(path).unwrap().sheet_names()
}

/// Renders every chart except one.
struct FailingRenderer {
    fails: ChartKind,
}

impl ChartRenderer for FailingRenderer {
    fn render(&self, chart: &ChartData) -> Result<Vec<u8>, ChartError> {
        if chart.kind == self.fails {
            return Err(ChartError::rasterize("renderer unavailable"));
        }
        SvgRasterizer::new(10, CurrencyFormatter::default()).render(chart)
    }
}

// ============================================================================
// Full report
// ============================================================================

#[test]
fn test_generate_writes_all_sheets_in_order() {
    let dir = TempDir::new().unwrap();
    let outcome = generator(&dir).generate(&table()).unwrap();

    let expected: Vec<String> = SheetKind::ALL.iter().map(|k| k.name().to_string()).collect();
    assert_eq!(outcome.sheet_names, expected);
    assert_eq!(sheet_names(&outcome.output_path), expected);
    assert_eq!(
        expected,
        vec![
            "Relatório Geral",
            "Vendas Diárias",
            "Vendas por Produto",
            "Vendas por Vendedor",
            "Vendas por Localização",
            "Gráficos",
        ]
    );
}

#[test]
fn test_generate_summary_sheet_contents() {
    let dir = TempDir::new().unwrap();
    let outcome = generator(&dir).generate(&table()).unwrap();

    assert_eq!(outcome.summary.total_value, dec!(3498.80));
    assert_eq!(outcome.summary.total_quantity, 22);
    assert_eq!(outcome.summary.top_product, "Cabo HDMI");
    assert_eq!(outcome.summary.top_location, "Centro");

    let mut workbook = open_workbook_auto(&outcome.output_path).unwrap();
    let range = workbook.worksheet_range("Relatório Geral").unwrap();
    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String("Total de Vendas (R$)".into()))
    );
    assert_eq!(range.get_value((1, 0)), Some(&Data::Float(3498.8)));
    assert_eq!(range.get_value((1, 1)), Some(&Data::Float(22.0)));
    assert_eq!(
        range.get_value((1, 5)),
        Some(&Data::String("01/03/2024 - 07/03/2024".into()))
    );
}

#[test]
fn test_generate_writes_chart_images() {
    let dir = TempDir::new().unwrap();
    let outcome = generator(&dir).generate(&table()).unwrap();

    let names: Vec<String> = outcome
        .chart_paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "total_value_by_product_graphic.png",
            "sales_by_location_graphic.png",
            "evolution_of_sales_graphic.png",
        ]
    );
    for path in &outcome.chart_paths {
        let bytes = fs::read(path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}

#[test]
fn test_generate_is_deterministic() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let a = generator(&first).generate(&table()).unwrap();
    let b = generator(&second).generate(&table()).unwrap();

    assert_eq!(a.summary, b.summary);
    for kind in [SheetKind::Daily, SheetKind::ByProduct] {
        let formatter = CurrencyFormatter::default();
        assert_eq!(
            read_dimension_sheet(&a.output_path, kind, &formatter).unwrap(),
            read_dimension_sheet(&b.output_path, kind, &formatter).unwrap()
        );
    }
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_dimension_sheets_round_trip() {
    let dir = TempDir::new().unwrap();
    let table = table();
    let outcome = generator(&dir).generate(&table).unwrap();
    let formatter = CurrencyFormatter::default();

    for kind in [
        SheetKind::Daily,
        SheetKind::ByProduct,
        SheetKind::BySeller,
        SheetKind::ByLocation,
    ] {
        let dimension = kind.dimension().unwrap();
        let expected = AggregationEngine::aggregate(table.records(), dimension).unwrap();
        let read = read_dimension_sheet(&outcome.output_path, kind, &formatter).unwrap();
        assert_eq!(read, expected, "sheet {}", kind.name());
    }
}

#[test]
fn test_round_trip_keeps_sub_cent_values() {
    let dir = TempDir::new().unwrap();
    let table = SalesTable::new(vec![
        sale(1, "Parafuso", "Ana", "Centro", 1, dec!(10.005)),
        sale(2, "Porca", "Bruno", "Norte", 3, dec!(3.333)),
    ]);
    let outcome = generator(&dir).generate(&table).unwrap();

    let read = read_dimension_sheet(
        &outcome.output_path,
        SheetKind::ByProduct,
        &CurrencyFormatter::default(),
    )
    .unwrap();
    assert_eq!(
        read,
        AggregationEngine::aggregate(table.records(), Dimension::Product).unwrap()
    );
    assert_eq!(read[0].total_value, dec!(10.005));
    assert_eq!(read[1].total_value, dec!(3.333));
}

#[test]
fn test_round_trip_of_dates_before_1900() {
    let dir = TempDir::new().unwrap();
    let mut old = sale(1, "Relógio", "Ana", "Centro", 1, dec!(12.50));
    old.date = NaiveDate::from_ymd_opt(1850, 3, 2).unwrap();
    let table = SalesTable::new(vec![old, sale(5, "Relógio", "Ana", "Centro", 2, dec!(25.00))]);
    let outcome = generator(&dir).generate(&table).unwrap();

    let mut workbook = open_workbook_auto(&outcome.output_path).unwrap();
    let range = workbook.worksheet_range("Vendas Diárias").unwrap();
    assert_eq!(
        range.get_value((1, 0)),
        Some(&Data::String("02/03/1850".into()))
    );

    let read = read_dimension_sheet(
        &outcome.output_path,
        SheetKind::Daily,
        &CurrencyFormatter::default(),
    )
    .unwrap();
    assert_eq!(
        read,
        AggregationEngine::aggregate(table.records(), Dimension::Date).unwrap()
    );
}

#[test]
fn test_round_trip_with_other_locale() {
    let dir = TempDir::new().unwrap();
    let formatter = CurrencyFormatter::new(Locale::EnUs);
    let generator = ReportGenerator::new(
        settings(&dir),
        formatter,
        Box::new(SvgRasterizer::new(20, formatter)),
    );
    let outcome = generator.generate(&table()).unwrap();

    let read = read_dimension_sheet(&outcome.output_path, SheetKind::BySeller, &formatter).unwrap();
    assert_eq!(read[0].total_value, dec!(1949.70));
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn test_chart_failure_is_partial_report_with_checkpoint() {
    let dir = TempDir::new().unwrap();
    let generator = ReportGenerator::new(
        settings(&dir),
        CurrencyFormatter::default(),
        Box::new(FailingRenderer {
            fails: ChartKind::SalesByLocation,
        }),
    );

    let err = generator.generate(&table()).unwrap_err();
    match &err {
        ReportError::PartialReport {
            stage, checkpoint, ..
        } => {
            assert_eq!(*stage, Stage::BuildChartsSheet);
            assert_eq!(checkpoint, &settings(&dir).output_path);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.error_code(), "PARTIAL_REPORT");
    assert_eq!(err.exit_code(), 3);
    assert!(matches!(err.root(), ReportError::ChartRender(_)));

    let output = settings(&dir).output_path;
    assert_eq!(sheet_names(&output), vec!["Relatório Geral"]);
    let leftovers: Vec<_> = fs::read_dir(output.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![output.file_name().unwrap().to_owned()]);
}

#[test]
fn test_empty_input_fails_before_checkpoint() {
    let dir = TempDir::new().unwrap();
    let err = generator(&dir).generate(&SalesTable::default()).unwrap_err();

    assert_eq!(err.stage(), Some(Stage::BuildSummarySheet));
    assert!(!err.is_partial());
    assert!(matches!(err.root(), ReportError::EmptyInput));
    assert_eq!(err.exit_code(), 4);
    assert!(!settings(&dir).output_path.exists());
    assert!(!settings(&dir).graphics_dir.exists());
}

#[test]
fn test_quantity_overflow_fails_before_checkpoint() {
    let dir = TempDir::new().unwrap();
    let table = SalesTable::new(vec![
        sale(1, "Monitor", "Ana", "Centro", u64::MAX, dec!(1)),
        sale(2, "Mouse", "Bruno", "Norte", 1, dec!(1)),
    ]);

    let err = generator(&dir).generate(&table).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::BuildSummarySheet));
    assert_eq!(err.error_code(), "OVERFLOW_ERROR");
    assert_eq!(err.exit_code(), 1);
    assert!(!settings(&dir).output_path.exists());
}

#[test]
fn test_negative_value_rejected_when_configured() {
    let dir = TempDir::new().unwrap();
    let formatter = CurrencyFormatter::default().reject_negative();
    let generator = ReportGenerator::new(
        settings(&dir),
        formatter,
        Box::new(SvgRasterizer::new(20, formatter)),
    );
    let mut records = table().records().to_vec();
    records.push(sale(9, "Devolução", "Ana", "Centro", 0, dec!(-50.00)));

    let err = generator.generate(&SalesTable::new(records)).unwrap_err();
    assert_eq!(err.error_code(), "PARTIAL_REPORT");
    assert_eq!(err.stage(), Some(Stage::BuildDailySheet));
    assert!(matches!(err.root(), ReportError::Format(_)));
}

// ============================================================================
// Run from configuration
// ============================================================================

#[test]
fn test_run_reads_configured_csv() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sales.csv");
    fs::write(
        &input,
        "Data,Produto,Vendedor,Localização,Quantidade Vendida,Valor Total\n\
         2024-01-01,A,X,L1,2,20.0\n\
         2024-01-01,B,X,L1,3,45.0\n",
    )
    .unwrap();

    let outcome = generator(&dir)
        .with_reader(SalesReader::new(&input, "ignored"))
        .run()
        .unwrap();

    assert_eq!(outcome.summary.total_value, dec!(65.0));
    assert_eq!(outcome.summary.total_quantity, 5);
    assert_eq!(outcome.summary.top_seller, "X");
    assert_eq!(outcome.summary.top_product, "B");
}

#[test]
fn test_run_missing_sheet_is_ingest_error() {
    let source_dir = TempDir::new().unwrap();
    let source = generator(&source_dir).generate(&table()).unwrap();

    let dir = TempDir::new().unwrap();
    let err = generator(&dir)
        .with_reader(SalesReader::new(&source.output_path, "Vendas"))
        .run()
        .unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Ingest));
    assert_eq!(err.error_code(), "INGESTION_ERROR");
    assert!(err.to_string().contains("'Vendas' not found"));
    assert!(!settings(&dir).output_path.exists());
}

#[test]
fn test_run_without_reader_is_ingest_error() {
    let dir = TempDir::new().unwrap();
    let err = generator(&dir).run().unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Ingest));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_from_config_rejects_unknown_locale() {
    let mut config = AppConfig::default();
    config.report.locale = "xx_YY".into();
    let err = ReportGenerator::from_config(&config).unwrap_err();
    assert_eq!(err.error_code(), "FORMAT_ERROR");
}
