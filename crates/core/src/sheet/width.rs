//! Column width adjustment.

use super::model::RenderedSheet;

/// Characters added to the widest value of each column.
pub const DEFAULT_PADDING: usize = 2;

/// Sizes columns to fit their formatted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSizeAdjuster {
    padding: usize,
}

impl CellSizeAdjuster {
    /// Creates an adjuster adding `padding` characters to every column.
    #[must_use]
    pub const fn new(padding: usize) -> Self {
        Self { padding }
    }

    /// Sets `sheet.column_widths` from the display strings of its cells.
    ///
    /// Must run after all formatting: it measures what the reader sees.
    pub fn adjust(&self, sheet: &mut RenderedSheet) {
        let widths = (0..sheet.headers.len())
            .map(|index| {
                let longest_value = sheet
                    .column_values(index)
                    .map(|value| value.chars().count())
                    .max()
                    .unwrap_or(0);
                longest_value.max(sheet.headers[index].chars().count()) + self.padding
            })
            .collect();
        sheet.column_widths = widths;
    }
}

impl Default for CellSizeAdjuster {
    fn default() -> Self {
        Self::new(DEFAULT_PADDING)
    }
}
