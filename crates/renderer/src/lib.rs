//! Pixel output for palettes.
//!
//! - Atlas packing of palette units into a grid of gradient bars
//! - Single-unit preview strips and a content-keyed strip cache
//! - PNG encoding of the resulting buffers

pub mod atlas;
pub mod error;
pub mod png;
pub mod preview;
pub mod thumbnail_cache;

pub use atlas::{render_atlas, render_atlas_with_summary, Atlas, RenderSummary, RowOrder};
pub use error::{RenderError, RenderResult};
pub use preview::{render_preview, render_strip, PREVIEW_WIDTH};
pub use thumbnail_cache::{ThumbnailCache, ThumbnailCacheStats};
