//! Sales ingestion from spreadsheet and CSV sources.
//!
//! The header row is the first non-blank row. Headers are matched
//! case-insensitively against Portuguese and English aliases, so both the
//! seeded `Vendas` sheet and hand-made English exports load unchanged.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{Days, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use sales_report_core::sales::{SalesRecord, SalesTable};
use sales_report_shared::config::InputConfig;
use tracing::{debug, info};

use crate::error::IngestError;

/// A source cell, independent of the file format it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// No content.
    Empty,
    /// Text content.
    Text(String),
    /// Integer content.
    Int(i64),
    /// Floating-point content (also date serials).
    Number(f64),
    /// A date already decoded by the reader.
    Date(NaiveDate),
}

impl RawCell {
    fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    pub(crate) fn text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.trim().to_string(),
            Self::Int(n) => n.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Date(date) => date.to_string(),
        }
    }
}

impl From<&Data> for RawCell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Self::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Self::Text(s.clone()),
            Data::Int(n) => Self::Int(*n),
            Data::Float(n) => Self::Number(*n),
            Data::DateTime(dt) => Self::Number(dt.as_f64()),
            Data::Bool(b) => Self::Text(b.to_string()),
            Data::Error(e) => Self::Text(format!("#{e:?}")),
        }
    }
}

/// The input columns, in record field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Date,
    Product,
    Seller,
    Location,
    QuantitySold,
    TotalValue,
}

impl Column {
    const ALL: [Self; 6] = [
        Self::Date,
        Self::Product,
        Self::Seller,
        Self::Location,
        Self::QuantitySold,
        Self::TotalValue,
    ];

    const fn name(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Product => "product",
            Self::Seller => "seller",
            Self::Location => "location",
            Self::QuantitySold => "quantity_sold",
            Self::TotalValue => "total_value",
        }
    }

    /// Accepted header spellings, lowercase.
    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Date => &["data", "date"],
            Self::Product => &["produto", "product"],
            Self::Seller => &["vendedor", "seller"],
            Self::Location => &["localização", "localizacao", "location"],
            Self::QuantitySold => &[
                "quantidade vendida",
                "quantity_sold",
                "quantity sold",
                "quantity",
            ],
            Self::TotalValue => &["valor total", "total_value", "total value", "value"],
        }
    }

    fn matches(self, header: &str) -> bool {
        let normalized = header.trim().to_lowercase();
        self.aliases().contains(&normalized.as_str())
    }
}

/// Reads sales records from a file.
#[derive(Debug, Clone)]
pub struct SalesReader {
    path: PathBuf,
    sheet: String,
}

impl SalesReader {
    /// Creates a reader for `sheet` of the workbook at `path`.
    ///
    /// The sheet name is ignored for CSV files.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, sheet: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet: sheet.into(),
        }
    }

    /// Creates a reader from the input configuration section.
    #[must_use]
    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(config.path.clone(), config.sheet.clone())
    }

    /// Source path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every record of the source.
    pub fn read(&self) -> Result<SalesTable, IngestError> {
        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let rows = match extension.as_str() {
            "csv" => read_csv_rows(&self.path)?,
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_sheet_rows(&self.path, &self.sheet)?,
            _ => {
                return Err(IngestError::UnsupportedFormat {
                    path: self.path.clone(),
                });
            }
        };

        let table = parse_rows(rows)?;
        info!(
            path = %self.path.display(),
            sheet = %self.sheet,
            records = table.len(),
            "Loaded sales records"
        );
        Ok(table)
    }
}

/// Rows of a spreadsheet sheet, paired with their one-based row numbers.
pub(crate) fn read_sheet_rows(
    path: &Path,
    sheet: &str,
) -> Result<Vec<(usize, Vec<RawCell>)>, IngestError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::open(path, e))?;

    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(IngestError::SheetNotFound {
            sheet: sheet.to_string(),
            available,
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| IngestError::open(path, e))?;
    let first_row = range
        .start()
        .map_or(0, |(row, _)| usize::try_from(row).unwrap_or(0));

    debug!(sheet, rows = range.height(), "Read worksheet range");

    Ok(range
        .rows()
        .enumerate()
        .map(|(i, row)| (first_row + i + 1, row.iter().map(RawCell::from).collect()))
        .collect())
}

fn read_csv_rows(path: &Path) -> Result<Vec<(usize, Vec<RawCell>)>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::open(path, e))?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IngestError::open(path, e))?;
        let cells = record
            .iter()
            .map(|field| {
                if field.trim().is_empty() {
                    RawCell::Empty
                } else {
                    RawCell::Text(field.to_string())
                }
            })
            .collect();
        rows.push((i + 1, cells));
    }
    Ok(rows)
}

/// Converts numbered rows (header first) into a sales table.
pub fn parse_rows(rows: Vec<(usize, Vec<RawCell>)>) -> Result<SalesTable, IngestError> {
    let mut rows = rows
        .into_iter()
        .filter(|(_, cells)| !cells.iter().all(RawCell::is_blank));

    let Some((_, header)) = rows.next() else {
        return Err(IngestError::MissingColumns {
            missing: Column::ALL.iter().map(|c| c.name()).collect(),
        });
    };

    let positions: Vec<Option<usize>> = Column::ALL
        .iter()
        .map(|column| {
            header
                .iter()
                .position(|cell| matches!(cell, RawCell::Text(text) if column.matches(text)))
        })
        .collect();

    let missing: Vec<&'static str> = Column::ALL
        .iter()
        .zip(&positions)
        .filter(|(_, position)| position.is_none())
        .map(|(column, _)| column.name())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns { missing });
    }
    let positions: Vec<usize> = positions.into_iter().flatten().collect();

    rows.map(|(number, cells)| -> Result<SalesRecord, IngestError> {
        let cell = |column: Column| {
            let index = positions[column as usize];
            cells.get(index).unwrap_or(&RawCell::Empty)
        };
        Ok(SalesRecord {
            date: parse_date(number, cell(Column::Date))?,
            product: parse_text(number, Column::Product, cell(Column::Product))?,
            seller: parse_text(number, Column::Seller, cell(Column::Seller))?,
            location: parse_text(number, Column::Location, cell(Column::Location))?,
            quantity_sold: parse_quantity(number, cell(Column::QuantitySold))?,
            total_value: parse_value(number, cell(Column::TotalValue))?,
        })
    })
    .collect()
}

fn parse_text(row: usize, column: Column, cell: &RawCell) -> Result<String, IngestError> {
    if cell.is_blank() {
        return Err(IngestError::invalid_cell(row, column.name(), "", "empty cell"));
    }
    Ok(cell.text())
}

pub(crate) fn parse_date(row: usize, cell: &RawCell) -> Result<NaiveDate, IngestError> {
    let column = Column::Date.name();
    match cell {
        RawCell::Date(date) => Ok(*date),
        RawCell::Int(serial) => from_serial(*serial).ok_or_else(|| {
            IngestError::invalid_cell(row, column, cell.text(), "date serial out of range")
        }),
        RawCell::Number(serial) => serial_days(*serial).and_then(from_serial).ok_or_else(|| {
            IngestError::invalid_cell(row, column, cell.text(), "date serial out of range")
        }),
        RawCell::Text(text) => parse_date_text(text.trim()).ok_or_else(|| {
            IngestError::invalid_cell(row, column, text.as_str(), "expected a date")
        }),
        RawCell::Empty => Err(IngestError::invalid_cell(row, column, "", "empty cell")),
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%d/%m/%Y"))
        .ok()
        .or_else(|| {
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Whole days of a spreadsheet date serial; the time of day is dropped.
#[allow(clippy::cast_possible_truncation)]
fn serial_days(serial: f64) -> Option<i64> {
    serial.is_finite().then(|| serial.floor() as i64)
}

/// Converts a 1900-system date serial (day zero is 1899-12-30).
fn from_serial(days: i64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(u64::try_from(days).ok()?))
}

pub(crate) fn parse_quantity(row: usize, cell: &RawCell) -> Result<u64, IngestError> {
    let column = Column::QuantitySold.name();
    let invalid = |reason: &str| IngestError::invalid_cell(row, column, cell.text(), reason);

    let amount = match cell {
        RawCell::Int(n) => Decimal::from(*n),
        RawCell::Number(n) => decimal_from_f64(*n).ok_or_else(|| invalid("not a number"))?,
        RawCell::Text(text) => {
            Decimal::from_str(text.trim()).map_err(|_| invalid("not a whole number"))?
        }
        RawCell::Empty => return Err(invalid("empty cell")),
        RawCell::Date(_) => return Err(invalid("not a whole number")),
    };

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(invalid("quantity cannot be negative"));
    }
    if !amount.fract().is_zero() {
        return Err(invalid("not a whole number"));
    }
    amount.to_u64().ok_or_else(|| invalid("quantity out of range"))
}

fn parse_value(row: usize, cell: &RawCell) -> Result<Decimal, IngestError> {
    let column = Column::TotalValue.name();
    let invalid = |reason: &str| IngestError::invalid_cell(row, column, cell.text(), reason);

    match cell {
        RawCell::Int(n) => Ok(Decimal::from(*n)),
        RawCell::Number(n) => decimal_from_f64(*n).ok_or_else(|| invalid("not a finite number")),
        RawCell::Text(text) => parse_decimal_text(text.trim()).ok_or_else(|| invalid("not a number")),
        RawCell::Empty => Err(invalid("empty cell")),
        RawCell::Date(_) => Err(invalid("not a number")),
    }
}

/// Converts a spreadsheet number back to the decimal it was written from.
///
/// Goes through the shortest text that reads back as the same `f64`, so a
/// stored `10.005` yields `10.005` rather than its binary expansion.
pub(crate) fn decimal_from_f64(n: f64) -> Option<Decimal> {
    if !n.is_finite() {
        return None;
    }
    Decimal::from_str(&n.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(n))
}

/// Parses a decimal amount written with either separator convention.
///
/// `1234.5` parses directly. When both separators appear the rightmost one
/// is the decimal point (`1,234.50`, `1.234,50`). A comma without any dot
/// is thousands grouping when the text reads as grouped digits, a leading
/// group of one to three digits not starting with zero followed by groups
/// of exactly three (`1,234`, `12,345,678`). Otherwise it is a decimal comma
/// (`19,9`, `1234,50`, `0,125`).
fn parse_decimal_text(text: &str) -> Option<Decimal> {
    if let Ok(value) = Decimal::from_str(text) {
        return Some(value);
    }
    let comma = text.rfind(',')?;
    let normalized = match text.rfind('.') {
        Some(dot) if dot > comma => text.replace(',', ""),
        Some(_) => text.replace('.', "").replace(',', "."),
        None if is_comma_grouped(text) => text.replace(',', ""),
        None => text.replace(',', "."),
    };
    Decimal::from_str(&normalized).ok()
}

fn is_comma_grouped(text: &str) -> bool {
    let mut groups = text.split(',');
    let lead = groups.next().unwrap_or_default().trim_start_matches('-');
    let digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    (1..=3).contains(&lead.len())
        && !lead.starts_with('0')
        && digits(lead)
        && groups.all(|g| g.len() == 3 && digits(g))
}
