//! Palette document loading with validation and packing warnings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use palette_common::{DocumentFormat, Palette};
use tracing::{info, warn};

/// A palette together with where and how it was stored.
#[derive(Debug, Clone)]
pub struct LoadedPalette {
    pub palette: Palette,
    pub path: PathBuf,
    pub format: DocumentFormat,
}

impl LoadedPalette {
    /// Display name: the document's `name`, else the file stem.
    pub fn display_name(&self) -> String {
        self.palette
            .name
            .clone()
            .or_else(|| {
                self.path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "palette".to_string())
    }

    /// Write the palette back in its original format.
    pub fn save(&self) -> Result<()> {
        let content = self
            .palette
            .to_document(self.format)
            .context("Failed to serialize palette")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        info!(path = %self.path.display(), "Saved palette document");
        Ok(())
    }
}

/// Load, validate and sanity-check a palette document.
///
/// Range violations are errors. Grids that do not divide the resolution and
/// palettes with more units than cells only produce warnings.
pub fn load_palette(path: impl AsRef<Path>) -> Result<LoadedPalette> {
    let path = path.as_ref();
    let palette = Palette::from_file(path)
        .with_context(|| format!("Failed to load palette from {}", path.display()))?;
    palette
        .validate()
        .with_context(|| format!("Invalid palette configuration in {}", path.display()))?;

    let layout = &palette.layout;
    if !layout.divides_evenly() {
        let (right, bottom) = layout.unused_margin();
        warn!(
            resolution = layout.resolution(),
            columns = layout.columns,
            rows = layout.rows,
            unused_right_px = right,
            unused_bottom_px = bottom,
            "Grid does not divide the atlas evenly; edge pixels stay black"
        );
    }
    if palette.units.len() > layout.capacity() {
        warn!(
            units = palette.units.len(),
            capacity = layout.capacity(),
            "Palette has more units than the atlas can hold"
        );
    }

    info!(
        path = %path.display(),
        units = palette.units.len(),
        resolution = palette.resolution(),
        "Loaded palette"
    );

    Ok(LoadedPalette {
        palette,
        path: path.to_path_buf(),
        format: DocumentFormat::from_path(path),
    })
}
