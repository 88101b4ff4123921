//! PNG encoding for finished rasters.
//!
//! Supports two encoding modes:
//! - **Indexed PNG (color type 3)**: used when the raster has ≤256 unique
//!   colors, which is the normal case for palette-mapped heatmaps.
//! - **RGB PNG (color type 2)**: fallback for blended images with more colors.
//!
//! Encoding happens entirely in memory; writing the bytes somewhere is up to
//! the caller.

use heatmap_common::{HeatmapError, HeatmapResult, Raster};
use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 4096; // 64x64 or larger

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

type PaletteEntries = Vec<(u8, u8, u8)>;

/// Encode a raster, picking indexed or RGB mode automatically.
pub fn encode_raster(raster: &Raster) -> HeatmapResult<Vec<u8>> {
    let (width, height) = raster.dimensions();
    let pixels = raster.as_bytes();

    let palette_result = if width * height >= PARALLEL_THRESHOLD {
        extract_palette_parallel(pixels)
    } else {
        extract_palette_sequential(pixels)
    };

    match palette_result {
        Some((palette, indices)) => create_png_indexed(width, height, &palette, &indices),
        None => create_png_rgb(pixels, width, height),
    }
}

/// Pack RGB bytes into a u32 for faster hashing and comparison
#[inline(always)]
fn pack_color(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16)
}

/// Unpack u32 back to RGB tuple
#[inline(always)]
fn unpack_color(packed: u32) -> (u8, u8, u8) {
    (packed as u8, (packed >> 8) as u8, (packed >> 16) as u8)
}

/// Sequential palette extraction for small rasters.
fn extract_palette_sequential(pixels: &[u8]) -> Option<(PaletteEntries, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: PaletteEntries = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 3);

    for chunk in pixels.chunks_exact(3) {
        let packed = pack_color(chunk[0], chunk[1], chunk[2]);

        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push((chunk[0], chunk[1], chunk[2]));
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Parallel palette extraction for larger rasters.
///
/// Unique colors are collected per chunk, merged, then every pixel is mapped
/// to its index in a second parallel pass.
fn extract_palette_parallel(pixels: &[u8]) -> Option<(PaletteEntries, Vec<u8>)> {
    let pixels_per_chunk = (pixels.len() / 3 / rayon::current_num_threads()).max(256);
    let chunk_size = pixels_per_chunk * 3;

    let unique_colors: Vec<u32> = pixels
        .par_chunks(chunk_size)
        .flat_map(|chunk| {
            let mut local_colors: HashMap<u32, ()> = HashMap::with_capacity(MAX_PALETTE_SIZE);
            for pixel in chunk.chunks_exact(3) {
                local_colors.insert(pack_color(pixel[0], pixel[1], pixel[2]), ());
                // Early exit if we definitely have too many colors
                if local_colors.len() > MAX_PALETTE_SIZE {
                    break;
                }
            }
            local_colors.into_keys().collect::<Vec<_>>()
        })
        .collect();

    let mut global_colors: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: PaletteEntries = Vec::with_capacity(MAX_PALETTE_SIZE);

    for packed in unique_colors {
        if !global_colors.contains_key(&packed) {
            if palette.len() >= MAX_PALETTE_SIZE {
                return None;
            }
            let idx = palette.len() as u8;
            global_colors.insert(packed, idx);
            palette.push(unpack_color(packed));
        }
    }

    let mut indices = vec![0u8; pixels.len() / 3];
    indices
        .par_chunks_mut(pixels_per_chunk)
        .zip(pixels.par_chunks(chunk_size))
        .for_each(|(idx_chunk, pixel_chunk)| {
            for (idx, pixel) in idx_chunk.iter_mut().zip(pixel_chunk.chunks_exact(3)) {
                let packed = pack_color(pixel[0], pixel[1], pixel[2]);
                *idx = global_colors.get(&packed).copied().unwrap_or(0);
            }
        });

    Some((palette, indices))
}

/// Create an indexed PNG (color type 3) from palette and indices.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[(u8, u8, u8)],
    indices: &[u8],
) -> HeatmapResult<Vec<u8>> {
    if indices.len() != width * height {
        return Err(HeatmapError::BufferSize {
            expected: width * height,
            actual: indices.len(),
        });
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    // IHDR: bit depth 8, color type 3
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    // PLTE
    let mut plte_data = Vec::with_capacity(palette.len() * 3);
    for (r, g, b) in palette {
        plte_data.extend_from_slice(&[*r, *g, *b]);
    }
    write_chunk(&mut png, b"PLTE", &plte_data);

    let idat_data = deflate_scanlines(indices, width, height)?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Create a truecolor PNG (color type 2) from interleaved RGB bytes.
pub fn create_png_rgb(pixels: &[u8], width: usize, height: usize) -> HeatmapResult<Vec<u8>> {
    if pixels.len() != width * height * 3 {
        return Err(HeatmapError::BufferSize {
            expected: width * height * 3,
            actual: pixels.len(),
        });
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 2));

    let idat_data = deflate_scanlines(pixels, width * 3, height)?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

fn ihdr(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(color_type);
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    ihdr_data
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

/// Prefix each `row_bytes`-wide scanline with filter type 0 and zlib it.
fn deflate_scanlines(data: &[u8], row_bytes: usize, height: usize) -> HeatmapResult<Vec<u8>> {
    let mut uncompressed = Vec::with_capacity(height * (1 + row_bytes));
    for row in data.chunks_exact(row_bytes).take(height) {
        uncompressed.push(0); // filter type: none
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&uncompressed)
        .map_err(|e| HeatmapError::Encode(format!("IDAT compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| HeatmapError::Encode(format!("IDAT compression failed: {}", e)))
}
