//! Sheet builder: aggregate tables to rendered sheets.

use crate::aggregate::{DimensionAggregate, SummaryRecord};
use crate::format::{CurrencyFormatter, FormatError, format_period};
use crate::sales::{Dimension, DimensionKey};

use super::model::{Cell, QUANTITY_HEADER, RenderedSheet, SheetKind, VALUE_HEADER};
use super::width::CellSizeAdjuster;

/// Builds formatted, sized sheets from aggregates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetBuilder {
    formatter: CurrencyFormatter,
    adjuster: CellSizeAdjuster,
}

impl SheetBuilder {
    /// Creates a builder formatting currency with `formatter`.
    #[must_use]
    pub fn new(formatter: CurrencyFormatter) -> Self {
        Self {
            formatter,
            adjuster: CellSizeAdjuster::default(),
        }
    }

    /// The currency formatter used for value columns.
    #[must_use]
    pub const fn formatter(&self) -> &CurrencyFormatter {
        &self.formatter
    }

    /// Headers of the summary sheet, in column order.
    #[must_use]
    pub fn summary_headers(&self) -> Vec<String> {
        vec![
            format!("Total de Vendas ({})", self.formatter.symbol()),
            "Total de Produtos Vendidos".to_string(),
            "Vendedor com mais Vendas".to_string(),
            "Produto mais Vendido".to_string(),
            "Loja com mais Vendas".to_string(),
            "Vendas no Período".to_string(),
        ]
    }

    /// Builds the single-row summary sheet (no index column).
    pub fn build_summary(&self, summary: &SummaryRecord) -> Result<RenderedSheet, FormatError> {
        let row = vec![
            self.currency(summary.total_value)?,
            Cell::Integer(summary.total_quantity),
            Cell::Text(summary.top_seller.clone()),
            Cell::Text(summary.top_product.clone()),
            Cell::Text(summary.top_location.clone()),
            Cell::Text(format_period(summary.first_date, summary.last_date)),
        ];

        Ok(self.finish(RenderedSheet::new(
            SheetKind::Summary,
            self.summary_headers(),
            vec![row],
        )))
    }

    /// Builds the sheet for `dimension`: one row per aggregate, labelled by
    /// its dimension value.
    pub fn build_dimension(
        &self,
        dimension: Dimension,
        aggregates: &[DimensionAggregate],
    ) -> Result<RenderedSheet, FormatError> {
        let kind = SheetKind::for_dimension(dimension);
        let headers = vec![
            kind.index_header().unwrap_or_default().to_string(),
            QUANTITY_HEADER.to_string(),
            VALUE_HEADER.to_string(),
        ];

        let rows = aggregates
            .iter()
            .map(|aggregate| {
                let label = match &aggregate.key {
                    DimensionKey::Date(date) => Cell::Date(*date),
                    DimensionKey::Text(text) => Cell::Text(text.clone()),
                };
                Ok(vec![
                    label,
                    Cell::Integer(aggregate.quantity_sold),
                    self.currency(aggregate.total_value)?,
                ])
            })
            .collect::<Result<Vec<_>, FormatError>>()?;

        Ok(self.finish(RenderedSheet::new(kind, headers, rows)))
    }

    fn currency(&self, value: rust_decimal::Decimal) -> Result<Cell, FormatError> {
        Ok(Cell::Currency {
            value,
            display: self.formatter.format(value)?,
        })
    }

    fn finish(&self, mut sheet: RenderedSheet) -> RenderedSheet {
        self.adjuster.adjust(&mut sheet);
        sheet
    }
}
