//! Floating-point RGBA color and the small amount of color math the
//! palette core needs: sRGB transfer curves, HSV conversion and lerps.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::error::PaletteError;

/// Color value with four `f32` channels, nominally in `[0, 1]`.
///
/// Channels are not clamped; out-of-range values pass through the math and
/// are only clamped when quantized with [`Color::to_rgba8`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const CLEAR: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from three channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, PaletteError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 && digits.len() != 8 {
            return Err(PaletteError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got '{}'",
                hex
            )));
        }

        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| PaletteError::InvalidColor(format!("bad hex digits in '{}'", hex)))
        };

        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        let a = if digits.len() == 8 { channel(6..8)? } else { 255 };

        Ok(Self::from_rgba8(r, g, b, a))
    }

    /// Same color with a different alpha.
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha forced to 1.
    #[must_use]
    pub fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }

    /// Component-wise linear interpolation over all four channels. `t` is not clamped.
    #[must_use]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color::new(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
            lerp(self.a, other.a, t),
        )
    }

    /// Interpolate in linear light and re-encode the result to gamma space.
    #[must_use]
    pub fn lerp_gamma_corrected(self, other: Color, t: f32) -> Color {
        self.to_linear().lerp(other.to_linear(), t).to_gamma()
    }

    /// Decode gamma-encoded (sRGB) channels to linear light. Alpha is untouched.
    #[must_use]
    pub fn to_linear(self) -> Color {
        Color::new(
            gamma_to_linear(self.r),
            gamma_to_linear(self.g),
            gamma_to_linear(self.b),
            self.a,
        )
    }

    /// Encode linear-light channels back to sRGB. Alpha is untouched.
    #[must_use]
    pub fn to_gamma(self) -> Color {
        Color::new(
            linear_to_gamma(self.r),
            linear_to_gamma(self.g),
            linear_to_gamma(self.b),
            self.a,
        )
    }

    /// The r, g, b channels as a vector.
    pub fn rgb_vector(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared euclidean distance between two colors in r, g, b space.
    pub fn distance_squared_rgb(self, other: Color) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }

    /// Convert to hue/saturation/value. Hue is normalized to `[0, 1)`.
    pub fn to_hsv(self) -> Hsv {
        let (r, g, b) = (self.r, self.g, self.b);
        if b > g && b > r {
            hsv_from_dominant(4.0, b, r, g)
        } else if g > r {
            hsv_from_dominant(2.0, g, b, r)
        } else {
            hsv_from_dominant(0.0, r, g, b)
        }
    }

    /// Quantize to 8-bit channels, clamping to `[0, 1]` first.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // +0.0 folds -0.0 onto 0.0 so colors that compare equal hash equally
        for channel in [self.r, self.g, self.b, self.a] {
            (channel + 0.0).to_bits().hash(state);
        }
    }
}

/// Hue, saturation and value, each nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

fn hsv_from_dominant(offset: f32, dominant: f32, c1: f32, c2: f32) -> Hsv {
    if dominant == 0.0 {
        return Hsv::default();
    }

    let smallest = c1.min(c2);
    let delta = dominant - smallest;
    let (s, h) = if delta != 0.0 {
        (delta / dominant, offset + (c1 - c2) / delta)
    } else {
        (0.0, offset + (c1 - c2))
    };

    let mut h = h / 6.0;
    if h < 0.0 {
        h += 1.0;
    }

    Hsv { h, s, v: dominant }
}

/// Scalar linear interpolation, unclamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `value` between `a` and `b`, clamped to `[0, 1]`.
/// Returns 0 when the range is empty.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// sRGB decode for one channel.
#[inline]
pub fn gamma_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB encode for one channel.
#[inline]
pub fn linear_to_gamma(l: f32) -> f32 {
    if l <= 0.003_130_8 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn quantize(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn default_alpha() -> f32 {
    1.0
}

/// Accepted notations for colors in palette documents.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Channels(Vec<f32>),
    Map {
        r: f32,
        g: f32,
        b: f32,
        #[serde(default = "default_alpha")]
        a: f32,
    },
}

impl TryFrom<ColorRepr> for Color {
    type Error = PaletteError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(hex) => Color::from_hex(&hex),
            ColorRepr::Channels(channels) => match channels.as_slice() {
                [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Color::new(*r, *g, *b, *a)),
                other => Err(PaletteError::InvalidColor(format!(
                    "expected 3 or 4 channels, got {}",
                    other.len()
                ))),
            },
            ColorRepr::Map { r, g, b, a } => Ok(Color::new(r, g, b, a)),
        }
    }
}
