//! Baker operations behind each subcommand.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use palette_common::{Palette, PaletteUnit};
use renderer::{png, render_atlas_with_summary, RenderSummary, RowOrder, ThumbnailCache};
use serde::Serialize;
use tracing::{debug, info};

/// Layout facts shown by `info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteInfo {
    pub resolution: usize,
    pub max_units: usize,
    pub unit_width: usize,
    pub unit_height: usize,
    pub units: usize,
    pub divides_evenly: bool,
}

pub fn palette_info(palette: &Palette) -> PaletteInfo {
    let layout = &palette.layout;
    PaletteInfo {
        resolution: layout.resolution(),
        max_units: layout.capacity(),
        unit_width: layout.cell_width(),
        unit_height: layout.cell_height(),
        units: palette.units.len(),
        divides_evenly: layout.divides_evenly(),
    }
}

/// One line of the `sort` report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortedUnit {
    pub position: usize,
    pub name: String,
    pub order: f32,
}

/// Sort with the palette's own priorities and report the new order.
pub fn sort_palette(palette: &mut Palette) -> Vec<SortedUnit> {
    palette.sort_units();
    let weights = palette.sort_weights;

    palette
        .units
        .iter()
        .enumerate()
        .map(|(position, unit)| SortedUnit {
            position,
            name: unit_label(unit, position),
            order: unit.sorting_order(&weights),
        })
        .collect()
}

/// Options for `bake`.
#[derive(Debug, Clone)]
pub struct BakeOptions {
    pub output: PathBuf,
    pub sort: bool,
    pub row_order: RowOrder,
}

/// Result of a bake.
#[derive(Debug, Clone)]
pub struct BakeOutcome {
    pub output: PathBuf,
    pub summary: RenderSummary,
    pub bytes: usize,
}

/// Optionally sort, render the atlas and write it as PNG.
pub fn bake(palette: &Palette, options: &BakeOptions) -> Result<BakeOutcome> {
    let mut palette = palette.clone();
    if options.sort {
        palette.sort_units();
    }

    let (atlas, summary) = render_atlas_with_summary(&palette);
    let encoded = png::encode_atlas(&atlas, options.row_order).context("Failed to encode atlas")?;

    ensure_parent_dir(&options.output)?;
    std::fs::write(&options.output, &encoded)
        .with_context(|| format!("Failed to write {}", options.output.display()))?;

    info!(
        path = %options.output.display(),
        resolution = atlas.width,
        drawn = summary.drawn_units,
        bytes = encoded.len(),
        "Baked palette atlas"
    );

    Ok(BakeOutcome {
        output: options.output.clone(),
        summary,
        bytes: encoded.len(),
    })
}

/// Write one preview strip PNG per unit into `dir`.
///
/// Strips come from `cache` in a single pass, so identical units render once
/// and strips of units no longer in the palette are evicted.
pub fn write_previews(
    palette: &Palette,
    dir: &Path,
    cache: &mut ThumbnailCache,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create preview directory {}", dir.display()))?;

    cache.begin_pass();
    let mut written = Vec::with_capacity(palette.units.len());
    for (position, unit) in palette.units.iter().enumerate() {
        let strip = cache.get_or_render(unit);
        let encoded = png::encode_atlas(strip, RowOrder::TopDown)
            .with_context(|| format!("Failed to encode preview for unit {}", position))?;

        let path = dir.join(format!("{:02}-{}.png", position, file_safe(&unit_label(unit, position))));
        std::fs::write(&path, encoded)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), "Wrote preview strip");
        written.push(path);
    }
    let evicted = cache.end_pass();

    let stats = cache.stats();
    info!(
        previews = written.len(),
        rendered = stats.misses,
        reused = stats.hits,
        evicted,
        "Wrote preview strips"
    );

    Ok(written)
}

fn unit_label(unit: &PaletteUnit, position: usize) -> String {
    unit.name
        .clone()
        .unwrap_or_else(|| format!("unit-{}", position))
}

/// Replace characters that are awkward in file names.
fn file_safe(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}
