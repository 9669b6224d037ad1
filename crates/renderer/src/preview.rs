//! Single-unit preview strips used for thumbnails.

use palette_common::PaletteUnit;

use crate::atlas::{sample_position, Atlas};

/// Width of the standard preview strip.
pub const PREVIEW_WIDTH: usize = 128;

/// Sample a unit across a `width x 1` strip, `t` running 0..=1 left to right.
pub fn render_strip(unit: &PaletteUnit, width: usize) -> Atlas {
    let mut strip = Atlas::new(width, 1);
    for (x, pixel) in strip.pixels.iter_mut().enumerate() {
        *pixel = unit.interpolate(sample_position(x, width));
    }
    strip
}

/// The standard 128x1 preview strip.
pub fn render_preview(unit: &PaletteUnit) -> Atlas {
    render_strip(unit, PREVIEW_WIDTH)
}
