//! Tests for PNG encoding of atlases and strips.
//!
//! Covers:
//! - PNG structure (signature, IHDR, chunk order)
//! - Format selection (indexed vs RGBA)
//! - Row order of exported atlases

use flate2::read::ZlibDecoder;
use renderer::png::{create_png, create_png_auto, encode_atlas};
use renderer::{render_atlas, render_strip, RenderError, RowOrder};
use std::io::Read;
use test_utils::{palettes, units};

// ============================================================================
// Helper functions
// ============================================================================

/// Walk PNG chunks and return (type, data) pairs.
fn chunks(png: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut out = Vec::new();
    let mut pos = 8;
    while pos + 8 <= png.len() {
        let len = u32::from_be_bytes([png[pos], png[pos + 1], png[pos + 2], png[pos + 3]]) as usize;
        let kind = String::from_utf8_lossy(&png[pos + 4..pos + 8]).to_string();
        let data = png[pos + 8..pos + 8 + len].to_vec();
        out.push((kind, data));
        pos += 12 + len;
    }
    out
}

/// Decompress IDAT and strip filter bytes, returning raw scanlines.
fn decode_scanlines(png: &[u8], stride: usize) -> Vec<Vec<u8>> {
    let idat: Vec<u8> = chunks(png)
        .into_iter()
        .filter(|(kind, _)| kind == "IDAT")
        .flat_map(|(_, data)| data)
        .collect();

    let mut raw = Vec::new();
    ZlibDecoder::new(idat.as_slice()).read_to_end(&mut raw).unwrap();

    raw.chunks(stride + 1)
        .map(|line| {
            assert_eq!(line[0], 0, "filter byte");
            line[1..].to_vec()
        })
        .collect()
}

// ============================================================================
// Structure tests
// ============================================================================

#[test]
fn test_png_signature_and_chunk_order() {
    let pixels = [255u8, 0, 0, 255, 0, 255, 0, 255, 0, 255, 0, 255, 255, 0, 0, 255];
    let png = create_png(&pixels, 2, 2).unwrap();

    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

    let kinds: Vec<String> = chunks(&png).into_iter().map(|(k, _)| k).collect();
    assert_eq!(kinds, vec!["IHDR", "IDAT", "IEND"]);
}

#[test]
fn test_ihdr_dimensions() {
    let atlas = render_atlas(&palettes::single_white());
    let png = encode_atlas(&atlas, RowOrder::BottomUp).unwrap();

    let (_, ihdr) = chunks(&png).into_iter().next().unwrap();
    assert_eq!(u32::from_be_bytes([ihdr[0], ihdr[1], ihdr[2], ihdr[3]]), 16);
    assert_eq!(u32::from_be_bytes([ihdr[4], ihdr[5], ihdr[6], ihdr[7]]), 16);
    assert_eq!(ihdr[8], 8);
}

#[test]
fn test_flat_atlas_uses_indexed_png() {
    let atlas = render_atlas(&palettes::single_white());
    let png = encode_atlas(&atlas, RowOrder::TopDown).unwrap();

    let chunks = chunks(&png);
    assert_eq!(chunks[0].1[9], 3, "color type should be indexed");
    assert_eq!(chunks[1].0, "PLTE");
    assert_eq!(chunks[1].1, vec![255, 255, 255]);
    // fully opaque: no tRNS chunk
    assert!(chunks.iter().all(|(k, _)| k != "tRNS"));
}

#[test]
fn test_translucent_pixels_emit_trns() {
    let pixels = [0u8, 0, 0, 0, 255, 255, 255, 255];
    let png = create_png_auto(&pixels, 2, 1).unwrap();

    let trns = chunks(&png).into_iter().find(|(k, _)| k == "tRNS").unwrap();
    assert_eq!(trns.1, vec![0, 255]);
}

#[test]
fn test_indexed_is_smaller_for_stepped_palette() {
    let mut palette = palettes::quadrants();
    palette.units = vec![units::rgb_bands(); 4];
    let atlas = render_atlas(&palette);
    let rgba = atlas.to_rgba8(RowOrder::TopDown);

    let indexed = create_png_auto(&rgba, atlas.width, atlas.height).unwrap();
    let full = create_png(&rgba, atlas.width, atlas.height).unwrap();
    assert!(indexed.len() < full.len());
}

// ============================================================================
// Row order tests
// ============================================================================

#[test]
fn test_row_order_in_encoded_image() {
    // black at t=0 (buffer row 0), white at t=1 (last buffer row)
    let atlas = render_atlas(&palettes::quadrants());
    let stride = atlas.width * 4;

    let png = create_png(&atlas.to_rgba8(RowOrder::TopDown), atlas.width, atlas.height).unwrap();
    let lines = decode_scanlines(&png, stride);
    assert_eq!(&lines[0][0..4], &[0, 0, 0, 255]);

    let png = create_png(&atlas.to_rgba8(RowOrder::BottomUp), atlas.width, atlas.height).unwrap();
    let lines = decode_scanlines(&png, stride);
    assert_eq!(&lines[atlas.height - 1][0..4], &[0, 0, 0, 255]);
}

#[test]
fn test_strip_encodes_single_row() {
    let strip = render_strip(&units::grayscale(), 128);
    let png = encode_atlas(&strip, RowOrder::TopDown).unwrap();

    let lines = decode_scanlines(&png, 128);
    assert_eq!(lines.len(), 1);
    // 128 distinct grays fit an indexed image: first and last index differ
    assert_ne!(lines[0][0], lines[0][127]);
}

#[test]
fn test_zero_dimensions_rejected() {
    let strip = render_strip(&units::grayscale(), 0);
    let err = encode_atlas(&strip, RowOrder::TopDown).unwrap_err();
    assert!(matches!(err, RenderError::EmptyImage { width: 0, height: 1 }));

    assert!(matches!(
        create_png(&[], 0, 0),
        Err(RenderError::EmptyImage { .. })
    ));
    assert!(matches!(
        create_png_auto(&[], 4, 0),
        Err(RenderError::EmptyImage { .. })
    ));
}
