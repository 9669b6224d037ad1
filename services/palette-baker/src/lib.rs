//! Palette baker.
//!
//! Loads palette documents, sorts their units perceptually and writes the
//! gradient atlas and per-unit preview strips as PNG files.

pub mod commands;
pub mod config;
pub mod loader;

pub use commands::{bake, palette_info, sort_palette, write_previews, BakeOptions, BakeOutcome, PaletteInfo, SortedUnit};
pub use config::{BakerConfig, LogFormat};
pub use loader::{load_palette, LoadedPalette};
