//! Workbook writing with rust_xlsxwriter.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{ExcelDateTime, Format, Image, Workbook, Worksheet};
use sales_report_core::chart::EmbeddedChart;
use sales_report_core::format::date::EXCEL_DATE_FORMAT;
use sales_report_core::format::{CurrencyFormatter, format_date};
use sales_report_core::sheet::{Cell, RenderedSheet};
use tracing::debug;

use crate::error::PersistError;
use crate::ingest::decimal_from_f64;
use crate::persist::write_atomic;

/// Widest column the spreadsheet format accepts, in characters.
const MAX_COLUMN_WIDTH: usize = 255;

/// Largest integer every `f64` below it represents exactly.
const MAX_EXACT_INTEGER: u64 = 1 << 53;

#[derive(Clone)]
struct CellFormats {
    date: Format,
    currency: Format,
}

/// Accumulates sheets in order and saves them as one `.xlsx` file.
pub struct WorkbookWriter {
    workbook: Workbook,
    names: Vec<String>,
    header: Format,
    cells: CellFormats,
}

impl WorkbookWriter {
    /// Creates an empty workbook whose currency cells render like `formatter`.
    #[must_use]
    pub fn new(formatter: &CurrencyFormatter) -> Self {
        Self {
            workbook: Workbook::new(),
            names: Vec::new(),
            header: Format::new().set_bold(),
            cells: CellFormats {
                date: Format::new().set_num_format(EXCEL_DATE_FORMAT),
                currency: Format::new().set_num_format(formatter.excel_num_format()),
            },
        }
    }

    /// Names of the sheets added so far, in order.
    #[must_use]
    pub fn sheet_names(&self) -> &[String] {
        &self.names
    }

    /// Appends a rendered sheet: bold header row, typed cells, fitted widths.
    pub fn write_sheet(&mut self, sheet: &RenderedSheet) -> Result<(), PersistError> {
        let (header_format, formats) = (self.header.clone(), self.cells.clone());
        let worksheet = self.add_named(sheet.name())?;

        for (col, header) in (0u16..).zip(&sheet.headers) {
            worksheet.write_string_with_format(0, col, header, &header_format)?;
        }

        for (row, cells) in (1u32..).zip(&sheet.rows) {
            for (col, cell) in (0u16..).zip(cells) {
                write_cell(worksheet, row, col, cell, &formats)?;
            }
        }

        for (col, width) in (0u16..).zip(&sheet.column_widths) {
            let width = u32::try_from((*width).min(MAX_COLUMN_WIDTH)).unwrap_or(255);
            worksheet.set_column_width(col, f64::from(width))?;
        }

        debug!(sheet = sheet.name(), rows = sheet.rows.len(), "Wrote sheet");
        Ok(())
    }

    /// Appends a sheet holding `charts`, each at its anchor and display size.
    pub fn add_chart_sheet(
        &mut self,
        name: &str,
        charts: &[EmbeddedChart],
    ) -> Result<(), PersistError> {
        let worksheet = self.add_named(name)?;

        for chart in charts {
            let image = Image::new_from_buffer(&chart.png)?.set_scale_to_size(
                chart.slot.width,
                chart.slot.height,
                false,
            );
            worksheet.insert_image(chart.slot.anchor.row, chart.slot.anchor.col, &image)?;
            debug!(chart = %chart.kind, anchor = %chart.slot.anchor, "Embedded chart");
        }
        Ok(())
    }

    /// Serializes the workbook.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, PersistError> {
        Ok(self.workbook.save_to_buffer()?)
    }

    /// Serializes the workbook and writes it atomically to `path`.
    pub fn save_atomic(&mut self, path: &Path) -> Result<(), PersistError> {
        let bytes = self.to_bytes()?;
        write_atomic(path, &bytes)
    }

    fn add_named(&mut self, name: &str) -> Result<&mut Worksheet, PersistError> {
        let lowered = name.to_lowercase();
        if self.names.iter().any(|n| n.to_lowercase() == lowered) {
            return Err(PersistError::DuplicateSheet(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(self.workbook.add_worksheet().set_name(name)?)
    }
}

#[allow(clippy::cast_precision_loss)]
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    formats: &CellFormats,
) -> Result<(), PersistError> {
    match cell {
        Cell::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
        Cell::Integer(n) if *n <= MAX_EXACT_INTEGER => {
            worksheet.write_number(row, col, *n as f64)?;
        }
        Cell::Integer(n) => {
            worksheet.write_string(row, col, n.to_string())?;
        }
        Cell::Date(date) => match excel_date(*date) {
            Some(datetime) => {
                worksheet.write_datetime_with_format(row, col, &datetime, &formats.date)?;
            }
            None => {
                worksheet.write_string(row, col, format_date(*date))?;
            }
        },
        Cell::Currency { value, .. } => {
            let number = exact_number(*value)?;
            worksheet.write_number_with_format(row, col, number, &formats.currency)?;
        }
    }
    Ok(())
}

/// Converts `value` to the `f64` that reads back as the same decimal.
fn exact_number(value: Decimal) -> Result<f64, PersistError> {
    value
        .to_f64()
        .filter(|n| decimal_from_f64(*n) == Some(value))
        .ok_or_else(|| {
            PersistError::Workbook(format!("amount {value} has no exact spreadsheet number"))
        })
}

/// Spreadsheet date of `date`, or `None` before 1900 or after 9999.
fn excel_date(date: NaiveDate) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;
    let month = u8::try_from(date.month()).ok()?;
    let day = u8::try_from(date.day()).ok()?;
    ExcelDateTime::from_ymd(year, month, day).ok()
}
