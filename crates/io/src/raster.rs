//! SVG to PNG rasterization with resvg.
#![allow(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use std::fmt;

use png::{BitDepth, ColorType, Encoder, PixelDimensions, Unit};
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use sales_report_core::chart::{ChartData, ChartError, ChartRenderer, Svg, to_svg};
use sales_report_core::format::CurrencyFormatter;
use tracing::trace;

/// Points per inch of the drawn SVG.
const POINTS_PER_INCH: u32 = 72;

/// Renders charts by drawing SVG and rasterizing it at a fixed resolution.
pub struct SvgRasterizer {
    dpi: u32,
    formatter: CurrencyFormatter,
    options: Options<'static>,
}

impl SvgRasterizer {
    /// Creates a rasterizer at `dpi` dots per inch, loading system fonts.
    #[must_use]
    pub fn new(dpi: u32, formatter: CurrencyFormatter) -> Self {
        let mut options = Options::default();
        options.fontdb_mut().load_system_fonts();
        trace!(faces = options.fontdb.len(), "Loaded font faces");
        Self {
            dpi,
            formatter,
            options,
        }
    }

    /// Rasterizes drawn markup to PNG bytes on a white background.
    pub fn rasterize(&self, svg: &Svg) -> Result<Vec<u8>, ChartError> {
        if self.dpi == 0 {
            return Err(ChartError::rasterize("dpi must be positive"));
        }

        let tree = Tree::from_data(svg.markup.as_bytes(), &self.options)
            .map_err(|e| ChartError::rasterize(format!("SVG parse failed: {e}")))?;

        let scale = self.dpi as f32 / POINTS_PER_INCH as f32;
        let size = tree.size();
        let width = (size.width() * scale).ceil() as u32;
        let height = (size.height() * scale).ceil() as u32;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ChartError::rasterize(format!("cannot allocate {width}x{height} pixmap"))
        })?;
        pixmap.fill(Color::WHITE);
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        self.encode(&pixmap)
    }

    fn encode(&self, pixmap: &Pixmap) -> Result<Vec<u8>, ChartError> {
        // Pixels per meter: dpi / 0.0254.
        let per_meter = u32::try_from(u64::from(self.dpi) * 10_000 / 254)
            .map_err(|_| ChartError::rasterize("dpi out of range"))?;

        let mut out = Vec::new();
        let mut encoder = Encoder::new(&mut out, pixmap.width(), pixmap.height());
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_pixel_dims(Some(PixelDimensions {
            xppu: per_meter,
            yppu: per_meter,
            unit: Unit::Meter,
        }));
        encoder
            .write_header()
            .map_err(|e| ChartError::rasterize(e.to_string()))?
            .write_image_data(pixmap.data())
            .map_err(|e| ChartError::rasterize(e.to_string()))?;

        Ok(out)
    }
}

impl ChartRenderer for SvgRasterizer {
    fn render(&self, chart: &ChartData) -> Result<Vec<u8>, ChartError> {
        let svg = to_svg(chart, &self.formatter)?;
        self.rasterize(&svg)
    }
}

impl fmt::Debug for SvgRasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SvgRasterizer")
            .field("dpi", &self.dpi)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}
