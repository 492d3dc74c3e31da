// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacore

//! Key persistence.
//!
//! The key file holds the raw key bytes, nothing else: no header, no length
//! prefix, no encoding. The material is at rest in plaintext; restricting
//! access to the file is the caller's responsibility.
//!
//! A missing key file is a normal state for a fresh session, so it is
//! reported as [`EnvelopeError::KeyNotFound`] (or `Ok(None)` from
//! [`try_load_key`]) rather than a generic I/O failure.

use std::fs;
use std::io;
use std::path::Path;

use zeroize::Zeroizing;

use crate::envelope::crypto::Key;
use crate::envelope::error::EnvelopeError;

/// Write the raw key bytes to `path`, replacing any existing file.
pub fn save_key(key: &Key, path: impl AsRef<Path>) -> Result<(), EnvelopeError> {
    fs::write(path, key.as_bytes()).map_err(EnvelopeError::Io)
}

/// Read a key back from `path`.
///
/// # Errors
/// - [`EnvelopeError::KeyNotFound`] if the file does not exist.
/// - [`EnvelopeError::Io`] for any other read failure.
/// - [`EnvelopeError::InvalidKeyLength`] if the file is not exactly
///   [`KEY_LEN`](crate::envelope::crypto::KEY_LEN) bytes.
pub fn load_key(path: impl AsRef<Path>) -> Result<Key, EnvelopeError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => Zeroizing::new(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(EnvelopeError::KeyNotFound),
        Err(e) => return Err(EnvelopeError::Io(e)),
    };
    Key::from_bytes(&bytes)
}

/// Read a key from `path`, treating absence as `Ok(None)`.
///
/// This is the fresh-session entry point: no key yet is not an error.
pub fn try_load_key(path: impl AsRef<Path>) -> Result<Option<Key>, EnvelopeError> {
    match load_key(path) {
        Ok(key) => Ok(Some(key)),
        Err(EnvelopeError::KeyNotFound) => Ok(None),
        Err(e) => Err(e),
    }
}
