// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacore

//! Authenticated encryption envelope, key handling, and the conceal/reveal
//! pipeline.
//!
//! The envelope seals UTF-8 text into a self-describing blob
//! (AES-256-GCM-SIV, fresh random nonce per seal, length-prefixed frame)
//! and opens such blobs with tag verification before any byte of plaintext
//! is interpreted. [`keystore`] persists the raw 32-byte key; [`pipeline`]
//! composes sealing with the grid container codec.
//!
//! All operations are pure functions over their inputs. The key is an
//! explicit value threaded through every call; there is no process-wide
//! current key.

pub mod crypto;
pub mod error;
pub mod frame;
pub mod keystore;
mod pipeline;

pub use crypto::{open, open_text, seal, Key, KEY_LEN, NONCE_LEN, TAG_LEN};
pub use error::EnvelopeError;
pub use keystore::{load_key, save_key, try_load_key};
pub use pipeline::{conceal, reveal};
