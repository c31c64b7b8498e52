//! Reading generated dimension sheets back into aggregates.

use std::path::Path;

use rust_decimal::Decimal;
use sales_report_core::aggregate::DimensionAggregate;
use sales_report_core::format::CurrencyFormatter;
use sales_report_core::sales::{Dimension, DimensionKey};
use sales_report_core::sheet::SheetKind;

use crate::error::IngestError;
use crate::ingest::{RawCell, decimal_from_f64, parse_date, parse_quantity, read_sheet_rows};

/// Re-ingests the `kind` sheet of a generated report.
///
/// Currency cells are read as numbers. Text cells are parsed with
/// `formatter`, which must use the locale the report was written with.
pub fn read_dimension_sheet(
    path: &Path,
    kind: SheetKind,
    formatter: &CurrencyFormatter,
) -> Result<Vec<DimensionAggregate>, IngestError> {
    let dimension = kind
        .dimension()
        .ok_or_else(|| IngestError::NotDimensional(kind.name().to_string()))?;

    read_sheet_rows(path, kind.name())?
        .into_iter()
        .skip(1)
        .map(|(row, cells)| -> Result<DimensionAggregate, IngestError> {
            let cell = |index: usize| cells.get(index).unwrap_or(&RawCell::Empty);
            Ok(DimensionAggregate {
                key: parse_key(row, dimension, cell(0))?,
                quantity_sold: parse_quantity(row, cell(1))?,
                total_value: parse_amount(row, cell(2), formatter)?,
            })
        })
        .collect()
}

fn parse_amount(
    row: usize,
    cell: &RawCell,
    formatter: &CurrencyFormatter,
) -> Result<Decimal, IngestError> {
    let invalid =
        |reason: String| IngestError::invalid_cell(row, "total_value", cell.text(), reason);
    match cell {
        RawCell::Number(n) => {
            decimal_from_f64(*n).ok_or_else(|| invalid("not a finite number".into()))
        }
        RawCell::Int(n) => Ok(Decimal::from(*n)),
        RawCell::Text(display) => formatter.parse(display).map_err(|err| invalid(err.to_string())),
        RawCell::Empty | RawCell::Date(_) => Err(invalid("expected a currency amount".into())),
    }
}

fn parse_key(
    row: usize,
    dimension: Dimension,
    cell: &RawCell,
) -> Result<DimensionKey, IngestError> {
    match (dimension, cell) {
        (Dimension::Date, _) => parse_date(row, cell).map(DimensionKey::Date),
        (_, RawCell::Text(text)) if !text.is_empty() => Ok(DimensionKey::Text(text.clone())),
        (_, other) => Err(IngestError::invalid_cell(
            row,
            "key",
            format!("{other:?}"),
            "expected a name",
        )),
    }
}
