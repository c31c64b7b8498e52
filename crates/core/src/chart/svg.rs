//! Chart drawing with the plotters SVG backend.
//!
//! Figures are laid out in points (72 per inch) at the size given by
//! [`ChartKind::figure`]; the rasterizer scales them to the target DPI.
#![allow(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use std::ops::Range;

use chrono::NaiveDate;
use plotters::coord::Shift;
use plotters::coord::ranged1d::Ranged;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use rust_decimal::prelude::ToPrimitive;

use super::data::{ChartData, ChartKind};
use super::error::ChartError;
use crate::format::{CurrencyFormatter, format_date};

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

const FONT: &str = "sans-serif";
const TITLE_SIZE: f64 = 14.0;
const LABEL_SIZE: f64 = 11.0;
const TICK_SIZE: f64 = 10.0;
const Y_LABELS: usize = 8;
const X_LABELS: usize = 12;
const GRID: RGBColor = RGBColor(255, 0, 0);
const DASH: u32 = 4;
const GAP: u32 = 3;

/// Categorical palette, cycled for pie slices.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// A drawn chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Svg {
    /// SVG document.
    pub markup: String,
    /// Canvas width in points.
    pub width_pt: u32,
    /// Canvas height in points.
    pub height_pt: u32,
}

/// Draws `chart` as an SVG document.
///
/// Currency axis labels are formatted with `formatter`.
pub fn to_svg(chart: &ChartData, formatter: &CurrencyFormatter) -> Result<Svg, ChartError> {
    if chart.points.is_empty() {
        return Err(ChartError::EmptyAggregate { chart: chart.kind });
    }

    let figure = chart.kind.figure();
    let width_pt = (figure.width * POINTS_PER_INCH).round() as u32;
    let height_pt = (figure.height * POINTS_PER_INCH).round() as u32;
    let values = plotted_values(chart)?;

    let mut markup = String::new();
    {
        let root = SVGBackend::with_string(&mut markup, (width_pt, height_pt)).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::draw)?;
        match chart.kind {
            ChartKind::ValueByProduct => draw_bars(&root, chart, &values, formatter)?,
            ChartKind::SalesByLocation => draw_pie(&root, chart, &values)?,
            ChartKind::EvolutionOfSales => draw_line(&root, chart, &values)?,
        }
        root.present().map_err(ChartError::draw)?;
    }

    Ok(Svg {
        markup,
        width_pt,
        height_pt,
    })
}

fn plotted_values(chart: &ChartData) -> Result<Vec<f64>, ChartError> {
    chart
        .points
        .iter()
        .map(|point| {
            point
                .value
                .to_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ChartError::Degenerate {
                    chart: chart.kind,
                    reason: format!("value {} is not representable", point.value),
                })
        })
        .collect()
}

fn draw_bars(
    root: &Area<'_>,
    chart: &ChartData,
    values: &[f64],
    formatter: &CurrencyFormatter,
) -> Result<(), ChartError> {
    let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
    let mut ctx = ChartBuilder::on(root)
        .caption(chart.kind.title(), (FONT, TITLE_SIZE))
        .margin(16)
        .x_label_area_size(32)
        .y_label_area_size(110)
        .build_cartesian_2d(labels.as_slice().into_segmented(), value_range(values))
        .map_err(ChartError::draw)?;

    let ticks = ctx.as_coord_spec().y_spec().key_points(Y_LABELS);
    for tick in &ticks {
        formatter.format_f64(*tick)?;
    }

    ctx.configure_mesh()
        .disable_mesh()
        .x_labels(labels.len())
        .y_labels(Y_LABELS)
        .x_label_formatter(&|v| match v {
            SegmentValue::Exact(label) | SegmentValue::CenterOf(label) => label.to_string(),
            SegmentValue::Last => String::new(),
        })
        .y_label_formatter(&|v| formatter.format_f64(*v).unwrap_or_default())
        .y_desc(format!("{} ({})", chart.kind.series_name(), formatter.symbol()))
        .label_style((FONT, TICK_SIZE))
        .axis_desc_style((FONT, LABEL_SIZE))
        .draw()
        .map_err(ChartError::draw)?;

    let first = &labels[0];
    for tick in ticks {
        ctx.draw_series(DashedLineSeries::new(
            [(SegmentValue::Exact(first), tick), (SegmentValue::Last, tick)],
            DASH,
            GAP,
            grid_style(),
        ))
        .map_err(ChartError::draw)?;
    }

    let color = PALETTE[0];
    ctx.draw_series(
        Histogram::vertical(&ctx)
            .style(color.filled())
            .margin(12)
            .data(labels.iter().zip(values).map(|(label, value)| (label, *value))),
    )
    .map_err(ChartError::draw)?
    .label(chart.kind.series_name())
    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, LABEL_SIZE))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(ChartError::draw)
}

fn draw_pie(root: &Area<'_>, chart: &ChartData, values: &[f64]) -> Result<(), ChartError> {
    if let Some(negative) = values.iter().find(|v| **v < 0.0) {
        return Err(ChartError::Degenerate {
            chart: chart.kind,
            reason: format!("negative slice {negative}"),
        });
    }
    if values.iter().sum::<f64>() <= 0.0 {
        return Err(ChartError::Degenerate {
            chart: chart.kind,
            reason: "all slices are zero".to_string(),
        });
    }

    let area = root
        .titled(chart.kind.title(), (FONT, TITLE_SIZE))
        .map_err(ChartError::draw)?;
    let (width, height) = area.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.36;

    let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
    let colors: Vec<RGBColor> = (0..values.len())
        .map(|i| PALETTE[i % PALETTE.len()])
        .collect();

    let mut pie = Pie::new(&center, &radius, values, &colors, &labels);
    pie.label_style((FONT, TICK_SIZE));
    pie.percentages((FONT, TICK_SIZE));
    area.draw(&pie).map_err(ChartError::draw)?;

    for (i, (label, color)) in labels.iter().zip(&colors).enumerate() {
        let y = 8 + 16 * i as i32;
        area.draw(&Rectangle::new([(8, y), (22, y + 10)], color.filled()))
            .map_err(ChartError::draw)?;
        area.draw(&Text::new(*label, (28, y), (FONT, LABEL_SIZE)))
            .map_err(ChartError::draw)?;
    }
    Ok(())
}

fn draw_line(root: &Area<'_>, chart: &ChartData, values: &[f64]) -> Result<(), ChartError> {
    let dates = chart
        .points
        .iter()
        .map(|p| p.date)
        .collect::<Option<Vec<NaiveDate>>>()
        .ok_or_else(|| ChartError::Degenerate {
            chart: chart.kind,
            reason: "points without dates".to_string(),
        })?;
    let (Some(first), Some(last)) = (dates.first().copied(), dates.last().copied()) else {
        return Err(ChartError::EmptyAggregate { chart: chart.kind });
    };

    // One day of padding keeps a single day off the frame edges.
    let x_range = first.pred_opt().unwrap_or(first)..last.succ_opt().unwrap_or(last);
    let y_range = value_range(values);

    let mut ctx = ChartBuilder::on(root)
        .caption(chart.kind.title(), (FONT, TITLE_SIZE))
        .margin(16)
        .x_label_area_size(32)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .map_err(ChartError::draw)?;

    let x_ticks = ctx.as_coord_spec().x_spec().key_points(X_LABELS);
    let y_ticks = ctx.as_coord_spec().y_spec().key_points(Y_LABELS);

    ctx.configure_mesh()
        .disable_mesh()
        .x_labels(X_LABELS)
        .y_labels(Y_LABELS)
        .x_label_formatter(&|d| format_date(*d))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .y_desc(chart.kind.series_name())
        .label_style((FONT, TICK_SIZE))
        .axis_desc_style((FONT, LABEL_SIZE))
        .draw()
        .map_err(ChartError::draw)?;

    for tick in y_ticks {
        ctx.draw_series(DashedLineSeries::new(
            [(x_range.start, tick), (x_range.end, tick)],
            DASH,
            GAP,
            grid_style(),
        ))
        .map_err(ChartError::draw)?;
    }
    for tick in x_ticks {
        ctx.draw_series(DashedLineSeries::new(
            [(tick, y_range.start), (tick, y_range.end)],
            DASH,
            GAP,
            grid_style(),
        ))
        .map_err(ChartError::draw)?;
    }

    let color = PALETTE[0];
    ctx.draw_series(
        LineSeries::new(
            dates.iter().copied().zip(values.iter().copied()),
            color.stroke_width(2),
        )
        .point_size(3),
    )
    .map_err(ChartError::draw)?
    .label(chart.kind.series_name())
    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2)));

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT, LABEL_SIZE))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(ChartError::draw)
}

/// Value axis range, always including zero with a little headroom.
fn value_range(values: &[f64]) -> Range<f64> {
    let (lo, hi) = values
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let span = if hi - lo > 0.0 { hi - lo } else { 1.0 };
    let pad = span * 0.05;
    let start = if lo < 0.0 { lo - pad } else { 0.0 };
    start..hi + pad
}

fn grid_style() -> ShapeStyle {
    GRID.mix(0.6).stroke_width(1)
}
