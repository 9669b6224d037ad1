//! Generators for synthetic palettes and palette documents on disk.
//!
//! These generators create predictable, verifiable data that can be used
//! across the test suite.

use std::path::PathBuf;

use palette_common::{
    AtlasLayout, Color, DocumentFormat, InterpolationMode, Palette, PaletteUnit, SortWeights,
};
use tempfile::TempDir;

/// Creates `count` two-color units with predictable colors.
///
/// Unit `i` runs from `(i/count, 0, 1 - i/count)` to `(0, i/count, 0.5)`,
/// cycling through all three interpolation modes.
pub fn create_test_units(count: usize) -> Vec<PaletteUnit> {
    let modes = [
        InterpolationMode::Linear,
        InterpolationMode::Gamma,
        InterpolationMode::Fixed,
    ];

    (0..count)
        .map(|i| {
            let f = i as f32 / count.max(1) as f32;
            PaletteUnit::new(
                modes[i % modes.len()],
                vec![Color::rgb(f, 0.0, 1.0 - f), Color::rgb(0.0, f, 0.5)],
            )
            .named(format!("unit-{}", i))
        })
        .collect()
}

/// Creates a palette with `count` generated units in the given grid.
pub fn create_test_palette(count: usize, resolution_factor: u32, columns: u32, rows: u32) -> Palette {
    Palette::new(
        create_test_units(count),
        SortWeights::default(),
        AtlasLayout::new(resolution_factor, columns, rows),
    )
}

/// Creates a unit whose colors differ only in spread around mid gray.
///
/// Larger `spread` means larger contrast with the same average color.
pub fn create_contrast_unit(spread: f32) -> PaletteUnit {
    PaletteUnit::new(
        InterpolationMode::Linear,
        vec![
            Color::rgb(0.5 - spread, 0.5 - spread, 0.5 - spread),
            Color::rgb(0.5 + spread, 0.5 + spread, 0.5 + spread),
        ],
    )
}

/// Writes a palette to a temporary document and returns its path.
///
/// The returned `TempDir` must be kept alive while the file is in use.
pub fn write_palette_document(
    palette: &Palette,
    format: DocumentFormat,
) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let file_name = match format {
        DocumentFormat::Json => "palette.json",
        DocumentFormat::Yaml => "palette.yaml",
    };
    let path = dir.path().join(file_name);
    let content = palette
        .to_document(format)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    std::fs::write(&path, content)?;
    Ok((dir, path))
}

/// Writes raw document text to a temporary file with the given name.
pub fn write_raw_document(file_name: &str, content: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(file_name);
    std::fs::write(&path, content)?;
    Ok((dir, path))
}
