// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacore

//! Color-grid container codec.
//!
//! Serializes an arbitrary byte buffer into a PNG image of solid-color square
//! cells and reconstructs the buffer from such an image. The container format:
//!
//! ```text
//! [payload bytes][0x00 padding to a multiple of 3]
//!       |
//!       v  split into 3-byte triples, one per cell
//! cell idx i -> row i / num_cols, col i % num_cols   (row-major)
//! cell color  = (triple[0], triple[1], triple[2])    (RGB)
//! cell size   = CELL_SIZE x CELL_SIZE pixels, uniformly filled
//! ```
//!
//! Grid cells left over in the final row (the rectangle can exceed the cell
//! count by up to `num_cols - 1`) stay at the black background, which is
//! byte-identical to padding. Decoding reads one triple per cell and strips
//! all trailing zero bytes.
//!
//! Guarantees:
//! - `decode(encode(p)) == p` for every payload `p` not ending in `0x00`.
//! - Deterministic output: same payload, same image, on every platform.
//! - Decode verifies that every pixel inside a cell matches the cell color
//!   and rejects the image as corrupt otherwise (a lossy recompression or
//!   resize breaks this invariant).
//!
//! Known limitation, by contract: payload bytes equal to `0x00` at the very
//! end of the buffer are indistinguishable from padding and are stripped on
//! decode. Callers that need exact round-trips for arbitrary buffers must
//! make their payload self-delimiting (the envelope layer's frame does).

pub mod error;
pub mod geometry;

use std::io::Cursor;

use image::{ImageFormat, ImageOutputFormat, Rgb, RgbImage};

use error::{GridError, Result};
use geometry::{padding_for, GridShape};

/// Edge length of one grid cell in pixels.
pub const CELL_SIZE: u32 = 50;

/// A decoded or freshly painted grid image.
///
/// Created either from a payload with [`ColorGrid::from_payload`] or by
/// parsing a PNG byte stream with [`ColorGrid::from_png_bytes`]. The pixel
/// buffer and the cell layout always agree: the image is exactly
/// `num_cols * CELL_SIZE` by `num_rows * CELL_SIZE` pixels.
#[derive(Clone)]
pub struct ColorGrid {
    image: RgbImage,
    shape: GridShape,
}

impl ColorGrid {
    /// Paint a payload into a grid image.
    ///
    /// The payload is zero-padded to a multiple of 3, split into RGB triples
    /// and painted row-major, one uniformly colored cell per triple. An empty
    /// payload produces a single all-black cell.
    pub fn from_payload(payload: &[u8]) -> ColorGrid {
        let shape = GridShape::for_payload_len(payload.len());

        let mut padded = payload.to_vec();
        padded.resize(payload.len() + padding_for(payload.len()), 0);

        // RgbImage::new zero-fills, so padding cells and the unused remainder
        // of the last row are already black.
        let mut image = RgbImage::new(shape.pixel_width(), shape.pixel_height());
        for (idx, triple) in padded.chunks_exact(3).enumerate() {
            let (row, col) = shape.cell_position(idx);
            let color = Rgb([triple[0], triple[1], triple[2]]);
            let x0 = col as u32 * CELL_SIZE;
            let y0 = row as u32 * CELL_SIZE;
            for dy in 0..CELL_SIZE {
                for dx in 0..CELL_SIZE {
                    image.put_pixel(x0 + dx, y0 + dy, color);
                }
            }
        }

        ColorGrid { image, shape }
    }

    /// Parse a PNG byte stream as a grid image.
    ///
    /// # Errors
    /// - [`GridError::Png`] if the bytes are not a decodable PNG.
    /// - [`GridError::NonCellDimensions`] if either pixel dimension is zero
    ///   or not an exact multiple of [`CELL_SIZE`].
    pub fn from_png_bytes(bytes: &[u8]) -> Result<ColorGrid> {
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgb8();

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 || width % CELL_SIZE != 0 || height % CELL_SIZE != 0 {
            return Err(GridError::NonCellDimensions { width, height });
        }

        let num_cols = (width / CELL_SIZE) as usize;
        let num_rows = (height / CELL_SIZE) as usize;
        let shape = GridShape {
            num_cells: num_cols * num_rows,
            num_cols,
            num_rows,
        };

        Ok(ColorGrid { image, shape })
    }

    /// Encode the grid image as PNG bytes (lossless).
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
        Ok(bytes)
    }

    /// Reconstruct the payload from the grid.
    ///
    /// Reads each cell's color as one 3-byte triple in row-major order,
    /// verifying on the way that every pixel of the cell matches its
    /// top-left corner, then strips all trailing zero bytes.
    ///
    /// # Errors
    /// [`GridError::CorruptCell`] if any cell is not a uniform color block.
    pub fn payload(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.shape.num_cells * 3);
        for idx in 0..self.shape.num_cells {
            let (row, col) = self.shape.cell_position(idx);
            let x0 = col as u32 * CELL_SIZE;
            let y0 = row as u32 * CELL_SIZE;
            let sample = *self.image.get_pixel(x0, y0);
            for dy in 0..CELL_SIZE {
                for dx in 0..CELL_SIZE {
                    if *self.image.get_pixel(x0 + dx, y0 + dy) != sample {
                        return Err(GridError::CorruptCell { row, col });
                    }
                }
            }
            bytes.extend_from_slice(&sample.0);
        }

        let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
        bytes.truncate(end);
        Ok(bytes)
    }

    /// The underlying pixel buffer.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// The cell layout of this grid.
    pub fn shape(&self) -> GridShape {
        self.shape
    }
}

/// Serialize a payload straight to PNG bytes.
pub fn encode(payload: &[u8]) -> Result<Vec<u8>> {
    ColorGrid::from_payload(payload).to_png_bytes()
}

/// Reconstruct a payload straight from PNG bytes.
pub fn decode(png_bytes: &[u8]) -> Result<Vec<u8>> {
    ColorGrid::from_png_bytes(png_bytes)?.payload()
}
