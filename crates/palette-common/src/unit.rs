//! A single gradient unit: an interpolation mode over an ordered color list.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::color::{inverse_lerp, Color};

/// Highest accepted sorting priority.
pub const MAX_PRIORITY: u8 = 4;

/// How a unit blends between its colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMode {
    /// Component-wise blend in the colors' native (gamma-encoded) space.
    #[default]
    Linear,
    /// Blend in linear light, then re-encode.
    Gamma,
    /// No blending; each color owns an equal band of `t`.
    Fixed,
}

/// Sorting priorities for contrast, saturation, hue and brightness.
///
/// Each priority `p` contributes with weight `10^p`, so distinct priorities
/// behave close to a lexicographic ordering for colors in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SortWeights {
    pub contrast: u8,
    pub saturation: u8,
    pub hue: u8,
    pub brightness: u8,
}

impl Default for SortWeights {
    fn default() -> Self {
        Self {
            contrast: 4,
            saturation: 3,
            hue: 2,
            brightness: 1,
        }
    }
}

impl SortWeights {
    pub fn new(contrast: u8, saturation: u8, hue: u8, brightness: u8) -> Self {
        Self {
            contrast,
            saturation,
            hue,
            brightness,
        }
    }

    /// Power-of-ten weights in contrast, saturation, hue, brightness order.
    /// Priorities above [`MAX_PRIORITY`] are treated as the maximum.
    pub fn weights(&self) -> [f32; 4] {
        [self.contrast, self.saturation, self.hue, self.brightness]
            .map(|p| 10f32.powi(p.min(MAX_PRIORITY) as i32))
    }

    /// Named priorities, for validation messages.
    pub fn priorities(&self) -> [(&'static str, u8); 4] {
        [
            ("contrast", self.contrast),
            ("saturation", self.saturation),
            ("hue", self.hue),
            ("brightness", self.brightness),
        ]
    }
}

/// Mean color of a unit and the spread of its colors around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitStatistics {
    /// Mean squared r,g,b distance of each color from the average.
    pub contrast: f32,
    /// Per-channel mean of r, g, b. Alpha is always 1.
    pub average: Color,
}

/// One gradient of the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteUnit {
    /// Display label. Not part of the unit's content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub mode: InterpolationMode,
    #[serde(default)]
    pub colors: Vec<Color>,
}

impl Default for PaletteUnit {
    fn default() -> Self {
        Self::new(InterpolationMode::Linear, vec![Color::WHITE])
    }
}

impl Hash for PaletteUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mode.hash(state);
        self.colors.hash(state);
    }
}

impl PaletteUnit {
    pub fn new(mode: InterpolationMode, colors: Vec<Color>) -> Self {
        Self {
            name: None,
            mode,
            colors,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Hash over mode and colors. Two units with the same content produce the
    /// same hash within a process, regardless of their names.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Sample the gradient at `t` in `[0, 1]`. The result is always opaque.
    ///
    /// `t` is clamped (NaN reads as 0). An empty unit samples as black.
    pub fn interpolate(&self, t: f32) -> Color {
        let count = self.colors.len();
        match count {
            0 => return Color::BLACK,
            1 => return self.colors[0].opaque(),
            _ => {}
        }

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        if self.mode == InterpolationMode::Fixed {
            let index = ((t * count as f32).floor() as usize).min(count - 1);
            return self.colors[index].opaque();
        }

        let last = count - 1;
        let scaled = t * last as f32;
        let lo = (scaled.floor() as usize).min(last);
        let hi = (scaled.ceil() as usize).min(last);
        let local_t = inverse_lerp(lo as f32, hi as f32, scaled);

        let start = self.colors[lo];
        let end = self.colors[hi];
        let blended = match self.mode {
            InterpolationMode::Gamma => start.lerp_gamma_corrected(end, local_t),
            _ => start.lerp(end, local_t),
        };

        blended.opaque()
    }

    /// Average color and contrast. Empty units report zero contrast and black.
    pub fn statistics(&self) -> UnitStatistics {
        if self.colors.is_empty() {
            return UnitStatistics {
                contrast: 0.0,
                average: Color::BLACK,
            };
        }

        let n = self.colors.len() as f32;
        let mut sum = [0.0f32; 3];
        for color in &self.colors {
            for (acc, c) in sum.iter_mut().zip(color.rgb_vector()) {
                *acc += c;
            }
        }
        let average = Color::rgb(sum[0] / n, sum[1] / n, sum[2] / n);

        let contrast = self
            .colors
            .iter()
            .map(|c| average.distance_squared_rgb(*c))
            .sum::<f32>()
            / n;

        UnitStatistics { contrast, average }
    }

    /// Scalar sort key: weighted sum of contrast and the HSV components of the
    /// average color. Higher values sort first.
    pub fn sorting_order(&self, weights: &SortWeights) -> f32 {
        let [contrast_w, saturation_w, hue_w, value_w] = weights.weights();
        let stats = self.statistics();
        let hsv = stats.average.to_hsv();

        stats.contrast * contrast_w + hsv.s * saturation_w + hsv.h * hue_w + hsv.v * value_w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(mode: InterpolationMode, colors: &[Color]) -> PaletteUnit {
        PaletteUnit::new(mode, colors.to_vec())
    }

    #[test]
    fn test_weights_are_powers_of_ten() {
        let w = SortWeights::new(4, 0, 2, 1).weights();
        assert_eq!(w, [10000.0, 1.0, 100.0, 10.0]);
    }

    #[test]
    fn test_weights_clamp_priority() {
        let w = SortWeights::new(9, 0, 0, 0).weights();
        assert_eq!(w[0], 10000.0);
    }

    #[test]
    fn test_empty_unit_is_black() {
        let u = unit(InterpolationMode::Linear, &[]);
        assert_eq!(u.interpolate(0.3), Color::BLACK);
        assert_eq!(u.sorting_order(&SortWeights::default()), 0.0);
    }

    #[test]
    fn test_single_color_forces_alpha() {
        let u = unit(InterpolationMode::Gamma, &[Color::new(0.2, 0.4, 0.6, 0.1)]);
        for t in [0.0, 0.5, 1.0, 7.0] {
            assert_eq!(u.interpolate(t), Color::rgb(0.2, 0.4, 0.6));
        }
    }

    #[test]
    fn test_nan_reads_as_start() {
        let u = unit(InterpolationMode::Linear, &[Color::BLACK, Color::WHITE]);
        assert_eq!(u.interpolate(f32::NAN), Color::BLACK);
    }

    #[test]
    fn test_fixed_bands() {
        let colors = [
            Color::rgb(1.0, 0.0, 0.0),
            Color::rgb(0.0, 1.0, 0.0),
            Color::rgb(0.0, 0.0, 1.0),
        ];
        let u = unit(InterpolationMode::Fixed, &colors);
        assert_eq!(u.interpolate(0.0), colors[0]);
        assert_eq!(u.interpolate(0.32), colors[0]);
        assert_eq!(u.interpolate(0.34), colors[1]);
        assert_eq!(u.interpolate(0.66), colors[1]);
        assert_eq!(u.interpolate(0.67), colors[2]);
        assert_eq!(u.interpolate(1.0), colors[2]);
    }

    #[test]
    fn test_linear_midpoint() {
        let u = unit(InterpolationMode::Linear, &[Color::BLACK, Color::WHITE]);
        let mid = u.interpolate(0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert_eq!(mid.a, 1.0);
    }

    #[test]
    fn test_statistics_of_identical_colors() {
        let c = Color::rgb(0.3, 0.6, 0.9);
        let stats = unit(InterpolationMode::Linear, &[c, c, c]).statistics();
        assert_eq!(stats.contrast, 0.0);
        assert!((stats.average.g - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_statistics_black_white() {
        let stats = unit(InterpolationMode::Linear, &[Color::BLACK, Color::WHITE]).statistics();
        // each color is 0.5 away on all three channels: 3 * 0.25
        assert!((stats.contrast - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_content_hash_ignores_name() {
        let a = unit(InterpolationMode::Gamma, &[Color::WHITE, Color::BLACK]);
        let b = a.clone().named("night");
        assert_eq!(a.content_hash(), b.content_hash());

        let mut c = a.clone();
        c.mode = InterpolationMode::Linear;
        assert_ne!(a.content_hash(), c.content_hash());
    }
}
