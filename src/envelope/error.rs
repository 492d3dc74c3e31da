// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacore

//! Error types for the encryption envelope and key handling.
//!
//! [`EnvelopeError`] covers all failure modes from key file I/O through
//! grid decoding and authenticated decryption. Wrong key, tampered bytes
//! and malformed sealed blobs are deliberately collapsed into
//! [`EnvelopeError::DecryptionFailed`]: nothing about a failed open is
//! allowed to leak which part of the verification gave out.

use core::fmt;

use crate::grid::error::GridError;

/// Errors that can occur while sealing, opening, or managing keys.
#[derive(Debug)]
pub enum EnvelopeError {
    /// The carrier image could not be decoded as a color grid.
    InvalidImage(GridError),
    /// Key file I/O failed for a reason other than absence.
    Io(std::io::Error),
    /// The key file does not exist. A fresh session with no key yet is a
    /// normal state, so this is kept apart from [`EnvelopeError::Io`].
    KeyNotFound,
    /// Key material has the wrong length for the cipher.
    InvalidKeyLength { expected: usize, found: usize },
    /// Authentication failed: wrong key, corrupted or truncated data, or
    /// bytes that were never a sealed blob.
    DecryptionFailed,
    /// Authentication succeeded but the plaintext is not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidImage(e) => write!(f, "invalid grid image: {e}"),
            Self::Io(e) => write!(f, "key file I/O error: {e}"),
            Self::KeyNotFound => write!(f, "key file not found"),
            Self::InvalidKeyLength { expected, found } => {
                write!(f, "invalid key length: expected {expected} bytes, found {found}")
            }
            Self::DecryptionFailed => write!(f, "decryption failed (wrong key or corrupted data)"),
            Self::InvalidUtf8 => write!(f, "decrypted payload is not valid UTF-8"),
        }
    }
}

impl std::error::Error for EnvelopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidImage(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for EnvelopeError {
    fn from(e: GridError) -> Self {
        Self::InvalidImage(e)
    }
}
