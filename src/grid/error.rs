// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacore

//! Error types for the color-grid container codec.

use std::fmt;

/// Errors that can occur while reading or writing a color grid.
#[derive(Debug)]
pub enum GridError {
    /// The byte stream could not be decoded (or re-encoded) as a PNG.
    Png(image::ImageError),
    /// Image dimensions are zero or not exact multiples of the cell size.
    NonCellDimensions { width: u32, height: u32 },
    /// A cell contains more than one color. The image was recompressed,
    /// resized, or otherwise altered after encoding.
    CorruptCell { row: usize, col: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png(e) => write!(f, "PNG codec error: {e}"),
            Self::NonCellDimensions { width, height } => {
                write!(f, "image dimensions {width}x{height} are not a whole number of cells")
            }
            Self::CorruptCell { row, col } => {
                write!(f, "cell ({row}, {col}) is not a uniform color block")
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Png(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for GridError {
    fn from(e: image::ImageError) -> Self {
        Self::Png(e)
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
