// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacore

//! Authenticated encryption for grid payloads.
//!
//! Uses AES-256-GCM-SIV with a raw 32-byte key and a fresh random nonce per
//! seal. GCM-SIV's nonce-misuse resistance gives an extra safety margin
//! since the nonce is randomly generated and shipped alongside the
//! ciphertext in the frame.
//!
//! Opening verifies the authentication tag before a single plaintext byte
//! is interpreted; wrong keys, bit flips and malformed blobs are all
//! reported as the same [`EnvelopeError::DecryptionFailed`].

use aes_gcm_siv::aead::Aead;
use aes_gcm_siv::{Aes256GcmSiv, KeyInit, Nonce};
use zeroize::Zeroizing;

use crate::envelope::error::EnvelopeError;
use crate::envelope::frame;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;
/// AES-GCM-SIV nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// AES-GCM-SIV authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// A symmetric encryption key.
///
/// Key material is zeroized when the value is dropped. There is no
/// versioning or rotation; replacing a key means constructing a new `Key`.
#[derive(Clone)]
pub struct Key(Zeroizing<[u8; KEY_LEN]>);

impl Key {
    /// Generate a fresh key from the OS CSPRNG.
    pub fn generate() -> Key {
        use rand::RngCore;
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        rand::thread_rng().fill_bytes(&mut *bytes);
        Key(bytes)
    }

    /// Construct a key from raw bytes.
    ///
    /// # Errors
    /// [`EnvelopeError::InvalidKeyLength`] unless `bytes` is exactly
    /// [`KEY_LEN`] bytes. Length is checked here, at construction, never
    /// deferred to first use.
    pub fn from_bytes(bytes: &[u8]) -> Result<Key, EnvelopeError> {
        if bytes.len() != KEY_LEN {
            return Err(EnvelopeError::InvalidKeyLength {
                expected: KEY_LEN,
                found: bytes.len(),
            });
        }
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        key.copy_from_slice(bytes);
        Ok(Key(key))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &*self.0
    }
}

impl core::fmt::Debug for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Key(<{KEY_LEN} bytes>)")
    }
}

/// Seal a plaintext into an authenticated frame.
///
/// Each call draws a fresh random nonce, so sealing the same plaintext
/// twice under the same key yields different blobs. Infallible for any
/// plaintext that fits in memory.
pub fn seal(plaintext: &[u8], key: &Key) -> Vec<u8> {
    use rand::RngCore;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);

    let cipher = Aes256GcmSiv::new_from_slice(key.as_bytes()).expect("valid key length");
    let nonce = Nonce::from_slice(&nonce_bytes);
    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .expect("AES-GCM-SIV encrypt should not fail");

    let plaintext_len =
        u32::try_from(plaintext.len()).expect("plaintext exceeds the frame length field");
    frame::build_frame(plaintext_len, &nonce_bytes, &ciphertext)
}

/// Open a sealed blob, verifying authenticity first.
///
/// # Errors
/// [`EnvelopeError::DecryptionFailed`] for a wrong key, any corruption or
/// truncation, or bytes that were never produced by [`seal`].
pub fn open(sealed: &[u8], key: &Key) -> Result<Vec<u8>, EnvelopeError> {
    let parsed = frame::parse_frame(sealed)?;

    let cipher = Aes256GcmSiv::new_from_slice(key.as_bytes()).expect("valid key length");
    let nonce = Nonce::from_slice(&parsed.nonce);

    cipher
        .decrypt(nonce, parsed.ciphertext.as_slice())
        .map_err(|_| EnvelopeError::DecryptionFailed)
}

/// Open a sealed blob and decode the plaintext as UTF-8 text.
///
/// # Errors
/// - [`EnvelopeError::DecryptionFailed`] if authentication fails.
/// - [`EnvelopeError::InvalidUtf8`] if authentication succeeds but the
///   plaintext is not valid UTF-8. Kept distinct so callers can tell a
///   wrong key from a non-text payload.
pub fn open_text(sealed: &[u8], key: &Key) -> Result<String, EnvelopeError> {
    let plaintext = open(sealed, key)?;
    String::from_utf8(plaintext).map_err(|_| EnvelopeError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_open_roundtrip() {
        let key = Key::generate();
        let msg = b"Hello, color grids!";

        let sealed = seal(msg, &key);
        assert_eq!(sealed.len(), frame::FRAME_OVERHEAD + msg.len());

        let opened = open(&sealed, &key).unwrap();
        assert_eq!(opened, msg);
    }

    #[test]
    fn wrong_key_fails() {
        let sealed = seal(b"secret message", &Key::generate());
        let result = open(&sealed, &Key::generate());
        assert!(matches!(result, Err(EnvelopeError::DecryptionFailed)));
    }

    #[test]
    fn seal_is_nondeterministic() {
        let key = Key::generate();
        let a = seal(b"same plaintext", &key);
        let b = seal(b"same plaintext", &key);
        assert_ne!(a, b);
    }

    #[test]
    fn empty_plaintext_roundtrip() {
        let key = Key::generate();
        let sealed = seal(b"", &key);
        assert_eq!(open(&sealed, &key).unwrap(), b"");
    }

    #[test]
    fn any_flipped_bit_fails_authentication() {
        let key = Key::generate();
        let sealed = seal(b"ab", &key);

        for byte in 0..sealed.len() {
            for bit in 0..8 {
                let mut tampered = sealed.clone();
                tampered[byte] ^= 1 << bit;
                assert!(
                    open(&tampered, &key).is_err(),
                    "bit {bit} of byte {byte} flipped but open succeeded"
                );
            }
        }
    }

    #[test]
    fn garbage_inputs_fail_closed() {
        let key = Key::generate();
        assert!(open(&[], &key).is_err());
        assert!(open(b"short", &key).is_err());
        assert!(open(&[0u8; 100], &key).is_err());
        assert!(open(&[0xFF; 100], &key).is_err());
    }

    #[test]
    fn non_utf8_plaintext_is_a_distinct_error() {
        let key = Key::generate();
        let sealed = seal(&[0xFF, 0xFE, 0xFD], &key);
        let result = open_text(&sealed, &key);
        assert!(matches!(result, Err(EnvelopeError::InvalidUtf8)));
    }

    #[test]
    fn key_from_bytes_validates_length() {
        let result = Key::from_bytes(&[0u8; 16]);
        assert!(matches!(
            result,
            Err(EnvelopeError::InvalidKeyLength { expected: KEY_LEN, found: 16 })
        ));
        assert!(Key::from_bytes(&[7u8; KEY_LEN]).is_ok());
    }
}
