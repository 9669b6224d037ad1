//! Common test fixtures for palette tests.
//!
//! This module provides pre-defined colors, units and palettes that represent
//! common authoring scenarios.

/// Named colors used across the test suite.
pub mod colors {
    use palette_common::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const MID_GRAY: Color = Color::rgb(0.5, 0.5, 0.5);

    /// Half-transparent orange, for checking that alpha is forced to 1.
    pub const TRANSLUCENT_ORANGE: Color = Color::new(1.0, 0.5, 0.0, 0.5);
}

/// Common units for testing.
pub mod units {
    use super::colors::*;
    use palette_common::{Color, InterpolationMode, PaletteUnit};

    /// Black to white, linear blend.
    pub fn grayscale() -> PaletteUnit {
        PaletteUnit::new(InterpolationMode::Linear, vec![BLACK, WHITE]).named("grayscale")
    }

    /// Red to blue; differs from its gamma-corrected twin at the midpoint.
    pub fn red_blue(mode: InterpolationMode) -> PaletteUnit {
        PaletteUnit::new(mode, vec![RED, BLUE]).named("red-blue")
    }

    /// Red, green, blue as three stepped bands.
    pub fn rgb_bands() -> PaletteUnit {
        PaletteUnit::new(InterpolationMode::Fixed, vec![RED, GREEN, BLUE]).named("rgb-bands")
    }

    /// A single flat color.
    pub fn solid(color: Color) -> PaletteUnit {
        PaletteUnit::new(InterpolationMode::Linear, vec![color])
    }

    /// A unit with no colors at all.
    pub fn empty() -> PaletteUnit {
        PaletteUnit::new(InterpolationMode::Linear, Vec::new())
    }
}

/// Common palettes for testing.
pub mod palettes {
    use super::{colors, units};
    use palette_common::{AtlasLayout, InterpolationMode, Palette, PaletteUnit, SortWeights};

    /// The smallest useful palette: one white unit in a 16x16, 1x1 atlas.
    pub fn single_white() -> Palette {
        Palette::new(
            vec![units::solid(colors::WHITE)],
            SortWeights::default(),
            AtlasLayout::new(4, 1, 1),
        )
    }

    /// Four distinct units in a 256x256, 2x2 atlas.
    pub fn quadrants() -> Palette {
        Palette::new(
            vec![
                units::grayscale(),
                units::red_blue(InterpolationMode::Gamma),
                units::rgb_bands(),
                PaletteUnit::new(InterpolationMode::Linear, vec![colors::YELLOW, colors::GREEN]),
            ],
            SortWeights::default(),
            AtlasLayout::new(8, 2, 2),
        )
    }

    /// A palette document exercising every color notation.
    pub const SUNSET_YAML: &str = r##"
name: sunset
sort:
  contrast: 4
  saturation: 3
  hue: 2
  brightness: 1
texture:
  resolution_factor: 6
  columns: 4
  rows: 2
units:
  - name: dusk
    mode: gamma
    colors: ["#ff5500", "#3300aa"]
  - name: sand
    mode: linear
    colors:
      - [1.0, 0.9, 0.6]
      - {r: 0.8, g: 0.6, b: 0.3}
  - name: steps
    mode: fixed
    colors: ["#000000", "#808080ff", "#ffffff"]
"##;
}
