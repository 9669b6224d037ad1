//! Atlas packing: lays palette units into a grid of vertical gradient bars.
//!
//! Cells are filled row-major, one unit per cell, in palette order. Each
//! cell samples its unit once per pixel row (`t` runs from 0 at the first row
//! of the cell to 1 at its last) and repeats that color across the cell
//! width. Cells left over once the units run out stay opaque black.

use palette_common::{Color, Palette, PaletteUnit};
use tracing::{debug, warn};

/// How buffer row 0 maps onto image rows when exporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// Row 0 is the bottom image row, matching GPU texture addressing.
    #[default]
    BottomUp,
    /// Row 0 is the top image row.
    TopDown,
}

/// A rectangular buffer of floating-point RGBA pixels.
///
/// Pixels are stored row-major: `pixels[y * width + x]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Atlas {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
}

impl Atlas {
    /// Allocate a buffer filled with opaque black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// One buffer row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[Color] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Fill `len` pixels of row `y` starting at `x`. Spans are clipped to the buffer.
    fn fill_span(&mut self, x: usize, y: usize, len: usize, color: Color) {
        if y >= self.height || x >= self.width {
            return;
        }
        let end = (x + len).min(self.width);
        let start = y * self.width;
        self.pixels[start + x..start + end].fill(color);
    }

    /// Quantize to RGBA8 bytes in image row order.
    pub fn to_rgba8(&self, order: RowOrder) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.width * self.height * 4);
        for image_row in 0..self.height {
            let y = match order {
                RowOrder::TopDown => image_row,
                RowOrder::BottomUp => self.height - 1 - image_row,
            };
            for color in self.row(y) {
                bytes.extend_from_slice(&color.to_rgba8());
            }
        }
        bytes
    }
}

/// What a render pass drew and what it had to leave out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub drawn_units: usize,
    /// Units beyond the grid capacity.
    pub skipped_units: usize,
    /// Pixels left unused at the right edge by truncating cell width.
    pub unused_columns_px: usize,
    /// Pixels left unused at the bottom edge by truncating cell height.
    pub unused_rows_px: usize,
}

/// Render the palette's units into a square atlas.
pub fn render_atlas(palette: &Palette) -> Atlas {
    render_atlas_with_summary(palette).0
}

/// Render the atlas and report how the units fit the grid.
pub fn render_atlas_with_summary(palette: &Palette) -> (Atlas, RenderSummary) {
    let layout = &palette.layout;
    let resolution = layout.resolution();
    let columns = layout.columns.max(1) as usize;
    let rows = layout.rows.max(1) as usize;
    let cell_width = layout.cell_width();
    let cell_height = layout.cell_height();

    let mut atlas = Atlas::new(resolution, resolution);

    let mut units = palette.units.iter();
    let mut drawn = 0;
    'grid: for row in 0..rows {
        for col in 0..columns {
            let Some(unit) = units.next() else {
                break 'grid;
            };
            draw_unit(&mut atlas, unit, col * cell_width, row * cell_height, cell_width, cell_height);
            drawn += 1;
        }
    }

    let (unused_columns_px, unused_rows_px) = layout.unused_margin();
    let summary = RenderSummary {
        drawn_units: drawn,
        skipped_units: palette.units.len() - drawn,
        unused_columns_px,
        unused_rows_px,
    };

    if summary.skipped_units > 0 {
        warn!(
            skipped = summary.skipped_units,
            capacity = layout.capacity(),
            "Palette has more units than atlas cells"
        );
    }
    debug!(
        resolution,
        cell_width,
        cell_height,
        drawn = summary.drawn_units,
        "Rendered palette atlas"
    );

    (atlas, summary)
}

/// Draw one unit as a vertical gradient bar filling its cell.
fn draw_unit(
    atlas: &mut Atlas,
    unit: &PaletteUnit,
    offset_x: usize,
    offset_y: usize,
    cell_width: usize,
    cell_height: usize,
) {
    for y in 0..cell_height {
        let color = unit.interpolate(sample_position(y, cell_height));
        atlas.fill_span(offset_x, offset_y + y, cell_width, color);
    }
}

/// `t` for sample `i` of `count`, spanning `[0, 1]` inclusive. A single sample reads `t = 0`.
pub(crate) fn sample_position(i: usize, count: usize) -> f32 {
    if count <= 1 {
        0.0
    } else {
        i as f32 / (count - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette_common::{AtlasLayout, InterpolationMode, SortWeights};

    fn palette(units: Vec<PaletteUnit>, layout: AtlasLayout) -> Palette {
        Palette::new(units, SortWeights::default(), layout)
    }

    #[test]
    fn test_sample_position() {
        assert_eq!(sample_position(0, 1), 0.0);
        assert_eq!(sample_position(0, 5), 0.0);
        assert_eq!(sample_position(4, 5), 1.0);
        assert_eq!(sample_position(2, 5), 0.5);
    }

    #[test]
    fn test_empty_palette_is_black() {
        let (atlas, summary) = render_atlas_with_summary(&palette(Vec::new(), AtlasLayout::default()));
        assert_eq!(atlas.pixels.len(), 16 * 16);
        assert!(atlas.pixels.iter().all(|p| *p == Color::BLACK));
        assert_eq!(summary.drawn_units, 0);
    }

    #[test]
    fn test_single_row_cells_sample_start() {
        // 16 rows of 16px each gives a cell height of 1
        let unit = PaletteUnit::new(InterpolationMode::Linear, vec![Color::WHITE, Color::BLACK]);
        let atlas = render_atlas(&palette(vec![unit], AtlasLayout::new(4, 1, 16)));
        assert_eq!(atlas.get(0, 0), Some(Color::WHITE));
        assert_eq!(atlas.get(0, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_skipped_units_reported() {
        let units = vec![PaletteUnit::default(); 6];
        let (_, summary) = render_atlas_with_summary(&palette(units, AtlasLayout::new(4, 2, 2)));
        assert_eq!(summary.drawn_units, 4);
        assert_eq!(summary.skipped_units, 2);
    }

    #[test]
    fn test_row_and_get_bounds() {
        let atlas = Atlas::new(3, 2);
        assert_eq!(atlas.row(1).len(), 3);
        assert_eq!(atlas.get(0, 2), None);
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_bounds_panics() {
        Atlas::new(3, 2).row(2);
    }

    #[test]
    fn test_row_order_flips_rows() {
        let mut atlas = Atlas::new(1, 2);
        atlas.pixels[0] = Color::WHITE;

        let top_down = atlas.to_rgba8(RowOrder::TopDown);
        assert_eq!(&top_down[0..4], &[255, 255, 255, 255]);

        let bottom_up = atlas.to_rgba8(RowOrder::BottomUp);
        assert_eq!(&bottom_up[0..4], &[0, 0, 0, 255]);
        assert_eq!(&bottom_up[4..8], &[255, 255, 255, 255]);
    }
}
