//! Shared test utilities for the palette workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Approximate equality macros for floats and colors
//! - Fixture colors, units and palettes
//! - Generators for synthetic palettes and on-disk palette documents
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of two colors, channel by channel.
///
/// ```ignore
/// use palette_common::Color;
/// use test_utils::assert_color_approx_eq;
///
/// assert_color_approx_eq!(Color::rgb(0.5, 0.5, 0.5), Color::rgb(0.5001, 0.5, 0.5), 0.001);
/// ```
#[macro_export]
macro_rules! assert_color_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left = $left;
        let right = $right;
        $crate::assert_approx_eq!(left.r, right.r, $epsilon);
        $crate::assert_approx_eq!(left.g, right.g, $epsilon);
        $crate::assert_approx_eq!(left.b, right.b, $epsilon);
        $crate::assert_approx_eq!(left.a, right.a, $epsilon);
    }};
}
