//! Rendered sheet model.

use std::borrow::Cow;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::format::format_date;
use crate::sales::Dimension;

/// Header of the quantity column in dimensional sheets.
pub const QUANTITY_HEADER: &str = "Quantidade Vendida";
/// Header of the value column in dimensional sheets.
pub const VALUE_HEADER: &str = "Valor Total";

/// The sheets of a report, in workbook order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SheetKind {
    /// Whole-report statistics.
    Summary,
    /// Sales by day.
    Daily,
    /// Sales by product.
    ByProduct,
    /// Sales by seller.
    BySeller,
    /// Sales by location.
    ByLocation,
    /// Rendered charts.
    Charts,
}

impl SheetKind {
    /// All sheets in workbook order.
    pub const ALL: [Self; 6] = [
        Self::Summary,
        Self::Daily,
        Self::ByProduct,
        Self::BySeller,
        Self::ByLocation,
        Self::Charts,
    ];

    /// Fixed sheet name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Summary => "Relatório Geral",
            Self::Daily => "Vendas Diárias",
            Self::ByProduct => "Vendas por Produto",
            Self::BySeller => "Vendas por Vendedor",
            Self::ByLocation => "Vendas por Localização",
            Self::Charts => "Gráficos",
        }
    }

    /// The dimension a sheet groups by, for dimensional sheets.
    #[must_use]
    pub const fn dimension(self) -> Option<Dimension> {
        match self {
            Self::Daily => Some(Dimension::Date),
            Self::ByProduct => Some(Dimension::Product),
            Self::BySeller => Some(Dimension::Seller),
            Self::ByLocation => Some(Dimension::Location),
            Self::Summary | Self::Charts => None,
        }
    }

    /// The dimensional sheet grouping by `dimension`.
    #[must_use]
    pub const fn for_dimension(dimension: Dimension) -> Self {
        match dimension {
            Dimension::Date => Self::Daily,
            Dimension::Product => Self::ByProduct,
            Dimension::Seller => Self::BySeller,
            Dimension::Location => Self::ByLocation,
        }
    }

    /// Header of the index column, for dimensional sheets.
    #[must_use]
    pub const fn index_header(self) -> Option<&'static str> {
        match self.dimension() {
            Some(Dimension::Date) => Some("Data"),
            Some(Dimension::Product) => Some("Produto"),
            Some(Dimension::Seller) => Some("Vendedor"),
            Some(Dimension::Location) => Some("Localização"),
            None => None,
        }
    }
}

/// A typed, formatted cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Cell {
    /// Plain text.
    Text(String),
    /// Whole number.
    Integer(u64),
    /// Calendar date, shown as `DD/MM/YYYY`.
    Date(NaiveDate),
    /// Monetary amount and its locale display string.
    Currency {
        /// The amount stored in the sheet.
        value: Decimal,
        /// How the sheet's currency number format renders `value`; sizes the column.
        display: String,
    },
}

impl Cell {
    /// The string shown in the spreadsheet for this cell.
    #[must_use]
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Integer(n) => Cow::Owned(n.to_string()),
            Self::Date(date) => Cow::Owned(format_date(*date)),
            Self::Currency { display, .. } => Cow::Borrowed(display),
        }
    }
}

/// A named table of formatted cells plus column widths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSheet {
    /// Which report sheet this is.
    pub kind: SheetKind,
    /// Column headers; the first is the index column when `has_index` is set.
    pub headers: Vec<String>,
    /// Data rows, each as long as `headers`.
    pub rows: Vec<Vec<Cell>>,
    /// Display width per column, in characters. Empty until adjusted.
    pub column_widths: Vec<usize>,
    /// Whether the first column labels rows with the dimension value.
    pub has_index: bool,
}

impl RenderedSheet {
    /// Creates a sheet without column widths.
    #[must_use]
    pub fn new(kind: SheetKind, headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            kind,
            has_index: kind.dimension().is_some(),
            headers,
            rows,
            column_widths: Vec::new(),
        }
    }

    /// The sheet's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Iterates the display strings of column `index`, header excluded.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Cow<'_, str>> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(index).map(Cell::display))
    }
}
