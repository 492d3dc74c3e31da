// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacore

//! Conceal/reveal pipeline.
//!
//! Composes the envelope with the grid container:
//!
//! ```text
//! conceal:  text --seal--> sealed blob --grid encode--> PNG bytes
//! reveal:   PNG bytes --grid decode--> sealed blob --open--> text
//! ```
//!
//! The grid codec strips trailing zero bytes, which could otherwise eat the
//! tail of a sealed blob; the frame's length prefix restores them on open,
//! so the composition round-trips for every message.

use crate::envelope::crypto::{self, Key};
use crate::envelope::error::EnvelopeError;
use crate::grid::ColorGrid;

/// Encrypt a message and paint the sealed blob into a grid PNG.
///
/// Returns the PNG bytes; persisting them (and choosing where) is the
/// caller's concern.
///
/// # Errors
/// [`EnvelopeError::InvalidImage`] if PNG encoding fails (out-of-memory
/// class failures only; the painted grid is always well-formed).
pub fn conceal(message: &str, key: &Key) -> Result<Vec<u8>, EnvelopeError> {
    let sealed = crypto::seal(message.as_bytes(), key);
    let grid = ColorGrid::from_payload(&sealed);
    Ok(grid.to_png_bytes()?)
}

/// Recover a message from a grid PNG.
///
/// # Errors
/// - [`EnvelopeError::InvalidImage`] if the bytes are not a PNG, the
///   dimensions are not a whole number of cells, or a cell is not uniform.
/// - [`EnvelopeError::DecryptionFailed`] if authentication fails.
/// - [`EnvelopeError::InvalidUtf8`] if the authenticated plaintext is not
///   valid UTF-8.
pub fn reveal(png_bytes: &[u8], key: &Key) -> Result<String, EnvelopeError> {
    let grid = ColorGrid::from_png_bytes(png_bytes)?;
    let sealed = grid.payload()?;
    crypto::open_text(&sealed, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conceal_reveal_roundtrip() {
        let key = Key::generate();
        let png = conceal("meet me at the mosaic", &key).unwrap();
        assert_eq!(reveal(&png, &key).unwrap(), "meet me at the mosaic");
    }

    #[test]
    fn reveal_with_wrong_key_fails() {
        let png = conceal("secret", &Key::generate()).unwrap();
        let result = reveal(&png, &Key::generate());
        assert!(matches!(result, Err(EnvelopeError::DecryptionFailed)));
    }

    #[test]
    fn reveal_rejects_non_png_bytes() {
        let result = reveal(b"definitely not a png", &Key::generate());
        assert!(matches!(result, Err(EnvelopeError::InvalidImage(_))));
    }
}
