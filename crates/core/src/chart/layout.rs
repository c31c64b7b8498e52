//! Fixed placement of chart images in the charts sheet.
//!
//! Pixel geometry assumes the spreadsheet defaults of 20 px rows and 64 px
//! columns; placement is independent of the data.

use std::fmt;

use serde::Serialize;

use super::data::ChartKind;

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT_PX: u32 = 20;
/// Default column width in pixels.
pub const DEFAULT_COLUMN_WIDTH_PX: u32 = 64;

/// Zero-based cell position an image's top-left corner is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Anchor {
    /// Zero-based row.
    pub row: u32,
    /// Zero-based column.
    pub col: u16,
}

impl Anchor {
    /// Creates an anchor from zero-based coordinates.
    #[must_use]
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Anchor {
    /// Writes the A1-style reference (`B2` for row 1, col 1).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = u32::from(self.col) + 1;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push(char::from(b'A' + u8::try_from(rem).unwrap_or(0)));
            n = (n - 1) / 26;
        }
        letters.reverse();
        let column: String = letters.into_iter().collect();
        write!(f, "{column}{}", self.row + 1)
    }
}

/// Pixel rectangle within the sheet, right/bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    /// Left edge.
    pub left: u64,
    /// Top edge.
    pub top: u64,
    /// Right edge (exclusive).
    pub right: u64,
    /// Bottom edge (exclusive).
    pub bottom: u64,
}

impl PixelRect {
    /// Returns true if the two rectangles share any pixel.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// Where a chart goes and how large it is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSlot {
    /// Top-left cell.
    pub anchor: Anchor,
    /// Display width in pixels.
    pub width: u32,
    /// Display height in pixels.
    pub height: u32,
}

impl ChartSlot {
    /// Area covered by the image in the sheet.
    #[must_use]
    pub fn bounds(&self) -> PixelRect {
        let left = u64::from(self.anchor.col) * u64::from(DEFAULT_COLUMN_WIDTH_PX);
        let top = u64::from(self.anchor.row) * u64::from(DEFAULT_ROW_HEIGHT_PX);
        PixelRect {
            left,
            top,
            right: left + u64::from(self.width),
            bottom: top + u64::from(self.height),
        }
    }
}

/// Placement of every chart in the charts sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLayout {
    slots: Vec<(ChartKind, ChartSlot)>,
}

impl ChartLayout {
    /// The report layout: bar chart at `B2`, pie at `B26`, line at `B45`.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            slots: ChartKind::ALL.iter().map(|k| (*k, k.slot())).collect(),
        }
    }

    /// Slots in embedding order.
    #[must_use]
    pub fn slots(&self) -> &[(ChartKind, ChartSlot)] {
        &self.slots
    }

    /// Pairs of charts whose images would overlap.
    #[must_use]
    pub fn overlapping_pairs(&self) -> Vec<(ChartKind, ChartKind)> {
        let mut pairs = Vec::new();
        for (i, (a, slot_a)) in self.slots.iter().enumerate() {
            for (b, slot_b) in &self.slots[i + 1..] {
                if slot_a.bounds().intersects(&slot_b.bounds()) {
                    pairs.push((*a, *b));
                }
            }
        }
        pairs
    }
}
