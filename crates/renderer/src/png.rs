//! PNG encoding for baked atlases and preview strips.
//!
//! Supports two encoding modes:
//! - **Indexed PNG (color type 3)**: Used when image has ≤256 unique colors.
//!   Stepped (fixed-mode) palettes and small atlases usually qualify.
//! - **RGBA PNG (color type 6)**: Fallback for images with >256 colors,
//!   typical of large smooth gradients.
//!
//! Use `encode_atlas` for float buffers, `create_png_auto` for raw RGBA8
//! bytes with automatic mode selection, or `create_png` for explicit RGBA.

use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;
use tracing::debug;

use crate::atlas::{Atlas, RowOrder};
use crate::error::{RenderError, RenderResult};

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 4096; // 64x64 or larger

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Quantize an atlas to RGBA8 and encode it as PNG.
pub fn encode_atlas(atlas: &Atlas, order: RowOrder) -> RenderResult<Vec<u8>> {
    let pixels = atlas.to_rgba8(order);
    create_png_auto(&pixels, atlas.width, atlas.height)
}

/// Create a PNG image with automatic format selection.
///
/// Analyzes the pixel data and chooses the most efficient encoding:
/// - If ≤256 unique colors: uses indexed PNG
/// - Otherwise: uses RGBA PNG (full color)
///
/// # Arguments
/// - `pixels`: RGBA pixel data (4 bytes per pixel)
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png_auto(pixels: &[u8], width: usize, height: usize) -> RenderResult<Vec<u8>> {
    check_buffer(pixels.len(), width, height, 4)?;
    let num_pixels = pixels.len() / 4;

    // Use the parallel extractor for larger images
    let palette_result = if num_pixels >= PARALLEL_THRESHOLD {
        extract_palette_parallel(pixels)
    } else {
        extract_palette_sequential(pixels)
    };

    match palette_result {
        Some((palette, indices)) => {
            debug!(colors = palette.len(), width, height, "Encoding indexed PNG");
            create_png_indexed(width, height, &palette, &indices)
        }
        None => {
            debug!(width, height, "Too many colors for indexed PNG, encoding RGBA");
            create_png(pixels, width, height)
        }
    }
}

/// PNG requires both dimensions to be non-zero.
fn check_buffer(actual: usize, width: usize, height: usize, bytes_per_pixel: usize) -> RenderResult<()> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }
    let expected = width * height * bytes_per_pixel;
    if actual != expected {
        return Err(RenderError::BufferSize {
            width,
            height,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Pack RGBA bytes into a u32 for faster hashing and comparison
#[inline(always)]
fn pack_color(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24)
}

/// Unpack u32 back to RGBA tuple
#[inline(always)]
fn unpack_color(packed: u32) -> (u8, u8, u8, u8) {
    (
        packed as u8,
        (packed >> 8) as u8,
        (packed >> 16) as u8,
        (packed >> 24) as u8,
    )
}

/// Sequential palette extraction for small images.
fn extract_palette_sequential(pixels: &[u8]) -> Option<(Vec<(u8, u8, u8, u8)>, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<(u8, u8, u8, u8)> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for chunk in pixels.chunks_exact(4) {
        let packed = pack_color(chunk[0], chunk[1], chunk[2], chunk[3]);

        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push((chunk[0], chunk[1], chunk[2], chunk[3]));
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Parallel palette extraction for larger images.
///
/// 1. Collect unique colors per chunk in parallel
/// 2. Merge them and bail out above 256
/// 3. Map each pixel to its palette index in parallel
///
/// Atlases are mostly long runs of identical rows, so the per-chunk sets stay small.
fn extract_palette_parallel(pixels: &[u8]) -> Option<(Vec<(u8, u8, u8, u8)>, Vec<u8>)> {
    let chunk_size = (pixels.len() / 4 / rayon::current_num_threads()).max(256) * 4;

    let chunk_colors: Vec<Vec<u32>> = pixels
        .par_chunks(chunk_size)
        .map(|chunk| {
            // Keep first-seen order so the palette matches the sequential path
            let mut seen: HashMap<u32, ()> = HashMap::with_capacity(MAX_PALETTE_SIZE);
            let mut ordered = Vec::new();
            for pixel in chunk.chunks_exact(4) {
                let packed = pack_color(pixel[0], pixel[1], pixel[2], pixel[3]);
                if seen.insert(packed, ()).is_none() {
                    ordered.push(packed);
                    if ordered.len() > MAX_PALETTE_SIZE {
                        break;
                    }
                }
            }
            ordered
        })
        .collect();

    let mut global_colors: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<(u8, u8, u8, u8)> = Vec::with_capacity(MAX_PALETTE_SIZE);

    for packed in chunk_colors.into_iter().flatten() {
        if !global_colors.contains_key(&packed) {
            if palette.len() >= MAX_PALETTE_SIZE {
                return None;
            }
            let idx = palette.len() as u8;
            global_colors.insert(packed, idx);
            palette.push(unpack_color(packed));
        }
    }

    let indices: Vec<u8> = pixels
        .par_chunks_exact(4)
        .map(|p| {
            global_colors
                .get(&pack_color(p[0], p[1], p[2], p[3]))
                .copied()
                .unwrap_or(0)
        })
        .collect();

    Some((palette, indices))
}

/// Create an indexed PNG (color type 3) from palette and indices.
///
/// More compact than RGBA when the image has few unique colors:
/// 1 byte per pixel instead of 4, less data to compress.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[(u8, u8, u8, u8)],
    indices: &[u8],
) -> RenderResult<Vec<u8>> {
    check_buffer(indices.len(), width, height, 1)?;
    let mut png = Vec::new();

    png.extend_from_slice(&PNG_SIGNATURE);

    // IHDR: 8-bit palette indices
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    // PLTE chunk (palette)
    let mut plte_data = Vec::with_capacity(palette.len() * 3);
    for (r, g, b, _) in palette {
        plte_data.push(*r);
        plte_data.push(*g);
        plte_data.push(*b);
    }
    write_chunk(&mut png, b"PLTE", &plte_data);

    // tRNS chunk only if any color has alpha < 255
    if palette.iter().any(|(_, _, _, a)| *a < 255) {
        let trns_data: Vec<u8> = palette.iter().map(|(_, _, _, a)| *a).collect();
        write_chunk(&mut png, b"tRNS", &trns_data);
    }

    let idat_data = deflate_scanlines(indices, width, height, 1)?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Create a PNG image from RGBA pixel data (color type 6).
///
/// # Arguments
/// - `pixels`: RGBA pixel data (4 bytes per pixel)
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> RenderResult<Vec<u8>> {
    check_buffer(pixels.len(), width, height, 4)?;
    let mut png = Vec::new();

    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));

    let idat_data = deflate_scanlines(pixels, width, height, 4)?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// IHDR payload for 8-bit images of the given color type.
fn ihdr(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&(width as u32).to_be_bytes());
    data.extend_from_slice(&(height as u32).to_be_bytes());
    data.push(8); // bit depth
    data.push(color_type);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix each scanline with filter byte 0 and zlib-compress the result.
fn deflate_scanlines(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> RenderResult<Vec<u8>> {
    let stride = width * bytes_per_pixel;
    let mut uncompressed = Vec::with_capacity(height * (1 + stride));
    for row in data.chunks_exact(stride.max(1)).take(height) {
        uncompressed.push(0); // filter type: none
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&uncompressed)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_palette_simple() {
        // 4 pixels: red, green, blue, red (3 unique colors)
        let pixels = [
            255, 0, 0, 255, // red
            0, 255, 0, 255, // green
            0, 0, 255, 255, // blue
            255, 0, 0, 255, // red again
        ];

        let (palette, indices) = extract_palette_sequential(&pixels).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(indices.len(), 4);
        assert_eq!(indices[0], indices[3]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        // 128 rows of a 64px vertical ramp with 64 distinct grays
        let mut pixels = Vec::with_capacity(64 * 128 * 4);
        for y in 0..128u32 {
            let v = (y / 2 * 4) as u8;
            for _ in 0..64 {
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }

        let seq = extract_palette_sequential(&pixels).unwrap();
        let par = extract_palette_parallel(&pixels).unwrap();
        assert_eq!(seq.0, par.0);
        assert_eq!(seq.1, par.1);
    }

    #[test]
    fn test_rgba_fallback_above_256_colors() {
        let mut pixels = Vec::with_capacity(300 * 4);
        for i in 0..300u32 {
            pixels.extend_from_slice(&[(i % 256) as u8, (i / 256) as u8, 0, 255]);
        }

        assert!(extract_palette_sequential(&pixels).is_none());
        let png = create_png_auto(&pixels, 300, 1).unwrap();
        // color type byte lives at offset 25: signature(8) + len(4) + type(4) + w(4) + h(4) + depth(1)
        assert_eq!(png[25], 6);
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let err = create_png(&[0u8; 12], 2, 2).unwrap_err();
        assert!(matches!(err, RenderError::BufferSize { expected: 16, actual: 12, .. }));
    }
}
