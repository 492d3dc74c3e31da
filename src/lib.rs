// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacore

//! # chroma-core
//!
//! Pure-Rust codec for archiving encrypted text as color-grid PNG mosaics.
//! A message is sealed with AES-256-GCM-SIV and the resulting blob is
//! painted as a grid of solid-color cells, three bytes per cell; the grid
//! image decodes back to the blob exactly, and opening verifies the
//! authentication tag before any plaintext is produced.
//!
//! The crate has two layers:
//!
//! - **`grid`**: the raster container codec. Maps arbitrary bytes to a
//!   row-major grid of uniform `CELL_SIZE` x `CELL_SIZE` RGB cells in a
//!   lossless PNG, and back. Knows nothing about encryption.
//! - **`envelope`**: the authenticated-encryption envelope (seal/open), key
//!   generation and persistence, and the `conceal`/`reveal` pipeline that
//!   composes both layers.
//!
//! All processing is in-memory and synchronous; the core never touches the
//! filesystem except through the explicit keystore functions, and never
//! logs. Errors are typed and recoverable at the caller boundary.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use chroma_core::{conceal, reveal, Key};
//!
//! let key = Key::generate();
//! let png = conceal("meet me at noon", &key).unwrap();
//! std::fs::write("note.png", &png).unwrap();
//!
//! let text = reveal(&std::fs::read("note.png").unwrap(), &key).unwrap();
//! assert_eq!(text, "meet me at noon");
//! ```

pub mod envelope;
pub mod grid;

pub use envelope::{
    conceal, load_key, open, open_text, reveal, save_key, seal, try_load_key, EnvelopeError, Key,
    KEY_LEN, NONCE_LEN, TAG_LEN,
};
pub use grid::error::GridError;
pub use grid::geometry::GridShape;
pub use grid::{ColorGrid, CELL_SIZE};
