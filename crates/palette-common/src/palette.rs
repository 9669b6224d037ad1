//! Palette: ordered gradient units plus the atlas layout they bake into.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{PaletteError, PaletteResult};
use crate::unit::{PaletteUnit, SortWeights, MAX_PRIORITY};

pub const MIN_RESOLUTION_FACTOR: u32 = 4;
pub const MAX_RESOLUTION_FACTOR: u32 = 11;
pub const MAX_GRID_DIMENSION: u32 = 32;

/// Grid and resolution of the baked atlas.
///
/// The atlas is square with side `2^resolution_factor`. Cells are sized by
/// truncating division, so a side that is not a multiple of `columns` or
/// `rows` leaves an unused margin at the right or bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasLayout {
    pub resolution_factor: u32,
    pub columns: u32,
    pub rows: u32,
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self {
            resolution_factor: 4,
            columns: 2,
            rows: 2,
        }
    }
}

impl AtlasLayout {
    pub fn new(resolution_factor: u32, columns: u32, rows: u32) -> Self {
        Self {
            resolution_factor,
            columns,
            rows,
        }
    }

    /// Side length of the atlas in pixels.
    pub fn resolution(&self) -> usize {
        1usize << self.resolution_factor.min(MAX_RESOLUTION_FACTOR)
    }

    pub fn cell_width(&self) -> usize {
        self.resolution() / self.columns.max(1) as usize
    }

    pub fn cell_height(&self) -> usize {
        self.resolution() / self.rows.max(1) as usize
    }

    /// Number of units the grid can hold.
    pub fn capacity(&self) -> usize {
        self.columns.max(1) as usize * self.rows.max(1) as usize
    }

    /// True when cells tile the atlas exactly in both directions.
    pub fn divides_evenly(&self) -> bool {
        let resolution = self.resolution();
        resolution % self.columns.max(1) as usize == 0 && resolution % self.rows.max(1) as usize == 0
    }

    /// Pixels left unused at the right and bottom edges.
    pub fn unused_margin(&self) -> (usize, usize) {
        let resolution = self.resolution();
        (
            resolution - self.cell_width() * self.columns.max(1) as usize,
            resolution - self.cell_height() * self.rows.max(1) as usize,
        )
    }

    pub fn validate(&self) -> PaletteResult<()> {
        if !(MIN_RESOLUTION_FACTOR..=MAX_RESOLUTION_FACTOR).contains(&self.resolution_factor) {
            return Err(PaletteError::invalid(
                "resolution_factor",
                format!(
                    "{} is outside {}..={}",
                    self.resolution_factor, MIN_RESOLUTION_FACTOR, MAX_RESOLUTION_FACTOR
                ),
            ));
        }
        for (param, value) in [("columns", self.columns), ("rows", self.rows)] {
            if !(1..=MAX_GRID_DIMENSION).contains(&value) {
                return Err(PaletteError::invalid(
                    param,
                    format!("{} is outside 1..={}", value, MAX_GRID_DIMENSION),
                ));
            }
        }
        Ok(())
    }
}

/// Ordered units, sorting priorities and atlas layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "sort")]
    pub sort_weights: SortWeights,
    #[serde(default, rename = "texture")]
    pub layout: AtlasLayout,
    #[serde(default)]
    pub units: Vec<PaletteUnit>,
}

impl Palette {
    pub fn new(units: Vec<PaletteUnit>, sort_weights: SortWeights, layout: AtlasLayout) -> Self {
        Self {
            name: None,
            sort_weights,
            layout,
            units,
        }
    }

    /// Load a palette document from a JSON string.
    pub fn from_json(json_str: &str) -> PaletteResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Load a palette document from a YAML string.
    pub fn from_yaml(yaml_str: &str) -> PaletteResult<Self> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Load from a file; `.json` files are read as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> PaletteResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if DocumentFormat::from_path(path) == DocumentFormat::Json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Serialize in the given document format.
    pub fn to_document(&self, format: DocumentFormat) -> PaletteResult<String> {
        match format {
            DocumentFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            DocumentFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }

    pub fn resolution(&self) -> usize {
        self.layout.resolution()
    }

    /// Check priorities, color channels and layout against their accepted ranges.
    ///
    /// Uneven grids are accepted; they are a packing approximation, not an error.
    pub fn validate(&self) -> PaletteResult<()> {
        for (unit_index, unit) in self.units.iter().enumerate() {
            for (color_index, color) in unit.colors.iter().enumerate() {
                if ![color.r, color.g, color.b, color.a].iter().all(|c| c.is_finite()) {
                    return Err(PaletteError::InvalidColor(format!(
                        "unit {} color {} has a non-finite channel",
                        unit_index, color_index
                    )));
                }
            }
        }
        for (param, value) in self.sort_weights.priorities() {
            if value > MAX_PRIORITY {
                return Err(PaletteError::invalid(
                    param,
                    format!("priority {} is above {}", value, MAX_PRIORITY),
                ));
            }
        }
        self.layout.validate()
    }

    /// Reorder units by descending sorting order under `weights`.
    ///
    /// Stable: units with equal orders keep their relative positions. Units
    /// whose order is NaN sort last.
    pub fn sort(&mut self, weights: &SortWeights) {
        let mut keyed: Vec<(f32, PaletteUnit)> = self
            .units
            .drain(..)
            .map(|unit| (sort_key(unit.sorting_order(weights)), unit))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| b.total_cmp(a));

        debug!(units = keyed.len(), ?weights, "Sorted palette units");
        self.units = keyed.into_iter().map(|(_, unit)| unit).collect();
    }

    /// Sort with the palette's own priorities.
    pub fn sort_units(&mut self) {
        let weights = self.sort_weights;
        self.sort(&weights);
    }

    /// Sorting order of every unit in current order.
    pub fn sorting_orders(&self, weights: &SortWeights) -> Vec<f32> {
        self.units.iter().map(|u| u.sorting_order(weights)).collect()
    }
}

/// Total sort key: NaN maps to negative infinity and -0.0 to 0.0.
fn sort_key(order: f32) -> f32 {
    if order.is_nan() {
        f32::NEG_INFINITY
    } else {
        order + 0.0
    }
}

/// On-disk notation of a palette document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults() {
        let layout = AtlasLayout::default();
        assert_eq!(layout.resolution(), 16);
        assert_eq!(layout.capacity(), 4);
        assert_eq!((layout.cell_width(), layout.cell_height()), (8, 8));
        assert!(layout.divides_evenly());
    }

    #[test]
    fn test_layout_uneven_margin() {
        let layout = AtlasLayout::new(4, 3, 5);
        assert_eq!(layout.cell_width(), 5);
        assert_eq!(layout.cell_height(), 3);
        assert_eq!(layout.unused_margin(), (1, 1));
        assert!(!layout.divides_evenly());
    }

    #[test]
    fn test_layout_validation() {
        assert!(AtlasLayout::new(3, 2, 2).validate().is_err());
        assert!(AtlasLayout::new(12, 2, 2).validate().is_err());
        assert!(AtlasLayout::new(8, 0, 2).validate().is_err());
        assert!(AtlasLayout::new(8, 2, 33).validate().is_err());
        assert!(AtlasLayout::new(11, 32, 32).validate().is_ok());
    }

    #[test]
    fn test_palette_validation_priority() {
        let mut palette = Palette::default();
        palette.sort_weights.hue = 5;
        let err = palette.validate().unwrap_err();
        assert!(err.to_string().contains("hue"));
    }

    #[test]
    fn test_document_format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a")), DocumentFormat::Yaml);
    }
}
