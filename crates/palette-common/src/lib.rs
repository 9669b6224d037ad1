//! Shared types for palette authoring and atlas baking.
//!
//! - [`Color`] and the color math behind it (sRGB curves, HSV)
//! - [`PaletteUnit`]: one gradient, its sampling and its sort key
//! - [`Palette`]: ordered units plus the atlas layout they bake into

pub mod color;
pub mod error;
pub mod palette;
pub mod unit;

pub use color::{Color, Hsv};
pub use error::{PaletteError, PaletteResult};
pub use palette::{AtlasLayout, DocumentFormat, Palette};
pub use unit::{InterpolationMode, PaletteUnit, SortWeights, UnitStatistics};
