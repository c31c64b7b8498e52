//! Chart kinds and the series they plot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::ChartError;
use super::layout::{Anchor, ChartSlot};
use crate::aggregate::{AggregateError, AggregationEngine, DimensionAggregate};
use crate::format::format_date;
use crate::sales::{Dimension, DimensionKey, SalesRecord};

/// The charts of the report, in embedding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartKind {
    /// Bar chart of summed value per product.
    ValueByProduct,
    /// Pie chart of summed quantity per location.
    SalesByLocation,
    /// Line chart of summed quantity per day.
    EvolutionOfSales,
}

/// Figure size in inches, before rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FigureSize {
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
}

impl ChartKind {
    /// All charts in embedding order.
    pub const ALL: [Self; 3] = [
        Self::ValueByProduct,
        Self::SalesByLocation,
        Self::EvolutionOfSales,
    ];

    /// Dimension the chart groups by.
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::ValueByProduct => Dimension::Product,
            Self::SalesByLocation => Dimension::Location,
            Self::EvolutionOfSales => Dimension::Date,
        }
    }

    /// Chart title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ValueByProduct => "Valor Total de Vendas por Produto",
            Self::SalesByLocation => "Distribuição das Vendas por Localização",
            Self::EvolutionOfSales => "Evolução da Quantidade de Vendas",
        }
    }

    /// Name of the plotted series, shown in the legend.
    #[must_use]
    pub const fn series_name(self) -> &'static str {
        match self {
            Self::ValueByProduct => "Valor Total",
            Self::SalesByLocation | Self::EvolutionOfSales => "Quantidade Vendida",
        }
    }

    /// File name of the intermediate image.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::ValueByProduct => "total_value_by_product_graphic.png",
            Self::SalesByLocation => "sales_by_location_graphic.png",
            Self::EvolutionOfSales => "evolution_of_sales_graphic.png",
        }
    }

    /// Figure size the chart is drawn at.
    #[must_use]
    pub const fn figure(self) -> FigureSize {
        match self {
            Self::ValueByProduct | Self::EvolutionOfSales => FigureSize {
                width: 15.0,
                height: 6.0,
            },
            Self::SalesByLocation => FigureSize {
                width: 6.4,
                height: 4.8,
            },
        }
    }

    /// Where the image is embedded and its display size.
    #[must_use]
    pub const fn slot(self) -> ChartSlot {
        match self {
            Self::ValueByProduct => ChartSlot {
                anchor: Anchor::new(1, 1),
                width: 800,
                height: 400,
            },
            Self::SalesByLocation => ChartSlot {
                anchor: Anchor::new(25, 1),
                width: 300,
                height: 300,
            },
            Self::EvolutionOfSales => ChartSlot {
                anchor: Anchor::new(44, 1),
                width: 850,
                height: 350,
            },
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValueByProduct => write!(f, "value_by_product"),
            Self::SalesByLocation => write!(f, "sales_by_location"),
            Self::EvolutionOfSales => write!(f, "evolution_of_sales"),
        }
    }
}

/// One plotted category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// Axis or slice label.
    pub label: String,
    /// Day of the point, for time series.
    pub date: Option<NaiveDate>,
    /// Plotted value.
    pub value: Decimal,
}

/// A chart and the series it plots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    /// Which chart this is.
    pub kind: ChartKind,
    /// Points in plotting order.
    pub points: Vec<ChartPoint>,
}

impl ChartData {
    /// Builds the chart's series from already-computed aggregates.
    ///
    /// The aggregates must group by [`ChartKind::dimension`].
    pub fn from_aggregates(
        kind: ChartKind,
        aggregates: &[DimensionAggregate],
    ) -> Result<Self, ChartError> {
        if aggregates.is_empty() {
            return Err(ChartError::EmptyAggregate { chart: kind });
        }

        let points = aggregates
            .iter()
            .map(|aggregate| {
                let value = match kind {
                    ChartKind::ValueByProduct => aggregate.total_value,
                    ChartKind::SalesByLocation | ChartKind::EvolutionOfSales => {
                        Decimal::from(aggregate.quantity_sold)
                    }
                };
                let (label, date) = match &aggregate.key {
                    DimensionKey::Date(date) => (format_date(*date), Some(*date)),
                    DimensionKey::Text(text) => (text.clone(), None),
                };
                ChartPoint { label, date, value }
            })
            .collect();

        Ok(Self { kind, points })
    }

    /// Aggregates `records` by the chart's dimension and builds its series.
    pub fn from_records(kind: ChartKind, records: &[SalesRecord]) -> Result<Self, ChartError> {
        let aggregates = AggregationEngine::aggregate(records, kind.dimension()).map_err(
            |err| match err {
                AggregateError::EmptyInput => ChartError::EmptyAggregate { chart: kind },
                AggregateError::Overflow { .. } => ChartError::Degenerate {
                    chart: kind,
                    reason: err.to_string(),
                },
            },
        )?;
        Self::from_aggregates(kind, &aggregates)
    }
}
