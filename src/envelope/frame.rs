// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacore

//! Sealed-blob frame construction and parsing.
//!
//! The frame is the self-describing container produced by `seal`:
//!
//! ```text
//! [4 bytes ] plaintext length (big-endian u32)
//! [12 bytes] AES-GCM-SIV nonce
//! [N bytes ] ciphertext (plaintext_len + 16 bytes for auth tag)
//! ```
//!
//! Total frame size = 32 + plaintext_len bytes.
//!
//! The grid carrier strips trailing zero bytes on decode, and a frame may
//! genuinely end in `0x00` (the auth tag is pseudorandom). The explicit
//! length prefix makes those bytes recoverable: [`parse_frame`] computes the
//! true frame length from the prefix and re-appends the zeros the carrier
//! removed. Input longer than the declared frame is tolerated and ignored.

use crate::envelope::crypto::{NONCE_LEN, TAG_LEN};
use crate::envelope::error::EnvelopeError;
use crate::grid::geometry::ceil_sqrt;

/// Length-prefix size in bytes.
pub const LEN_PREFIX: usize = 4;

/// Fixed overhead: length(4) + nonce(12) + tag(16) = 32 bytes.
/// Ciphertext length equals plaintext length, so total frame
/// = 32 + plaintext_len.
pub const FRAME_OVERHEAD: usize = LEN_PREFIX + NONCE_LEN + TAG_LEN;

/// Upper bound on the zero bytes a conforming grid carrier may have stripped
/// from a frame of `total` bytes: the 3-byte alignment padding, the unused
/// black cells completing the final grid row, and the frame's own trailing
/// zero run (64 is far beyond any realistic run of a pseudorandom tail).
fn max_stripped_zeros(total: usize) -> usize {
    let cells = (total + 2) / 3;
    2 + 3 * ceil_sqrt(cells) + 64
}

/// Build a sealed-blob frame from encrypted components.
pub fn build_frame(plaintext_len: u32, nonce: &[u8; NONCE_LEN], ciphertext: &[u8]) -> Vec<u8> {
    debug_assert_eq!(
        ciphertext.len(),
        plaintext_len as usize + TAG_LEN,
        "ciphertext length mismatch"
    );

    let mut frame = Vec::with_capacity(LEN_PREFIX + NONCE_LEN + ciphertext.len());
    frame.extend_from_slice(&plaintext_len.to_be_bytes());
    frame.extend_from_slice(nonce);
    frame.extend_from_slice(ciphertext);
    frame
}

/// Parsed sealed-blob frame.
pub struct ParsedFrame {
    /// Original plaintext length in bytes (before encryption).
    pub plaintext_len: u32,
    /// AES-GCM-SIV nonce.
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext including the 16-byte authentication tag.
    pub ciphertext: Vec<u8>,
}

/// Parse a sealed-blob frame, restoring carrier-stripped trailing zeros.
///
/// Returns `Err(EnvelopeError::DecryptionFailed)` for any shape the declared
/// length cannot explain; the caller must not distinguish malformed frames
/// from failed authentication.
pub fn parse_frame(data: &[u8]) -> Result<ParsedFrame, EnvelopeError> {
    // The prefix itself may have lost trailing zeros (only possible when
    // every byte after it was zero too), so zero-extend before reading.
    let mut prefix = [0u8; LEN_PREFIX];
    for (dst, src) in prefix.iter_mut().zip(data.iter()) {
        *dst = *src;
    }
    let plaintext_len = u32::from_be_bytes(prefix);

    let total = (plaintext_len as usize)
        .checked_add(FRAME_OVERHEAD)
        .ok_or(EnvelopeError::DecryptionFailed)?;

    // Reject before allocating if the missing bytes cannot all be stripped
    // zeros. This bounds restoration for garbage length prefixes.
    if total > data.len().saturating_add(max_stripped_zeros(total)) {
        return Err(EnvelopeError::DecryptionFailed);
    }

    let mut frame = data.to_vec();
    frame.resize(total, 0);

    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&frame[LEN_PREFIX..LEN_PREFIX + NONCE_LEN]);
    let ciphertext = frame[LEN_PREFIX + NONCE_LEN..].to_vec();

    Ok(ParsedFrame { plaintext_len, nonce, ciphertext })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame(plaintext_len: u32) -> Vec<u8> {
        let nonce = [0xAB; NONCE_LEN];
        let ciphertext = vec![0x5C; plaintext_len as usize + TAG_LEN];
        build_frame(plaintext_len, &nonce, &ciphertext)
    }

    #[test]
    fn build_parse_roundtrip() {
        let frame = sample_frame(7);
        assert_eq!(frame.len(), FRAME_OVERHEAD + 7);

        let parsed = parse_frame(&frame).unwrap();
        assert_eq!(parsed.plaintext_len, 7);
        assert_eq!(parsed.nonce, [0xAB; NONCE_LEN]);
        assert_eq!(parsed.ciphertext, vec![0x5C; 7 + TAG_LEN]);
    }

    #[test]
    fn stripped_trailing_zeros_are_restored() {
        let nonce = [0x11; NONCE_LEN];
        let mut ciphertext = vec![0x42; 5 + TAG_LEN];
        // Force a zero tail, as a real auth tag occasionally has.
        let n = ciphertext.len();
        ciphertext[n - 3..].fill(0);

        let frame = build_frame(5, &nonce, &ciphertext);
        let stripped = &frame[..frame.len() - 3];

        let parsed = parse_frame(stripped).unwrap();
        assert_eq!(parsed.ciphertext, ciphertext);
    }

    #[test]
    fn surplus_trailing_bytes_are_ignored() {
        let mut frame = sample_frame(3);
        frame.extend_from_slice(&[9, 9, 9]);

        let parsed = parse_frame(&frame).unwrap();
        assert_eq!(parsed.ciphertext.len(), 3 + TAG_LEN);
    }

    #[test]
    fn truncation_beyond_zero_restoration_is_rejected() {
        // Declared length says ~64 KiB but almost nothing is present, far
        // more loss than stripped zeros can account for.
        let frame = sample_frame(65_000);
        let result = parse_frame(&frame[..10]);
        assert!(matches!(result, Err(EnvelopeError::DecryptionFailed)));
    }

    #[test]
    fn garbage_length_prefix_is_rejected() {
        let mut frame = sample_frame(3);
        frame[0] = 0xFF; // declares a ~4 GiB plaintext
        let result = parse_frame(&frame);
        assert!(matches!(result, Err(EnvelopeError::DecryptionFailed)));
    }

    #[test]
    fn empty_input_parses_as_all_zero_frame() {
        // Everything after the prefix could legitimately have been stripped
        // zeros, so this restores a 32-byte zero frame; the all-zero tag
        // then fails authentication downstream.
        let parsed = parse_frame(&[]).unwrap();
        assert_eq!(parsed.plaintext_len, 0);
        assert_eq!(parsed.nonce, [0u8; NONCE_LEN]);
        assert_eq!(parsed.ciphertext, vec![0u8; TAG_LEN]);
    }
}
