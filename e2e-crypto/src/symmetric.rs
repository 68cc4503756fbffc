//! Authenticated symmetric encryption of message content.
//!
//! Every call to [`SymmetricCodec::encrypt`] draws a fresh 256-bit key and a
//! 256-bit IV, so the codec itself holds no key state. The tag is detached
//! from the ciphertext and travels next to it.
//!
//! AES-256-GCM with a 32-byte IV derives its pre-counter block through GHASH
//! (NIST SP 800-38D §7.1), which is what OpenSSL-backed runtimes do for the
//! same IV length.

use crate::encoding::{base64_bytes, hex_array};
use crate::error::{CryptoError, CryptoResult};
use crate::key::{KeyMaterial, IV_SIZE, KEY_SIZE};
use aes_gcm::aead::consts::{U16, U32};
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce, Tag};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// AES-256-GCM parameterised with a 32-byte nonce.
type Aes256Gcm32 = AesGcm<Aes256, U32>;

/// Symmetric algorithm identifier. Fixed per codec at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SymmetricAlgorithm {
    #[default]
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
}

impl SymmetricAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256Gcm => "aes-256-gcm",
        }
    }
}

impl fmt::Display for SymmetricAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymmetricAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aes-256-gcm" => Ok(Self::Aes256Gcm),
            other => Err(CryptoError::Encoding(format!(
                "unsupported symmetric algorithm: {other}"
            ))),
        }
    }
}

/// Ciphertext plus its detached authentication tag.
///
/// Both halves are required to decrypt; changing either one makes
/// decryption fail with [`CryptoError::AuthenticationTag`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymmetricCiphertext {
    /// Encrypted message bytes (same length as the plaintext).
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
    /// GCM tag (16 bytes).
    #[serde(with = "hex_array")]
    pub tag: [u8; TAG_SIZE],
}

/// Symmetric primitive seam used by the envelope layer.
///
/// [`SymmetricCodec`] is the production implementation; the trait exists so
/// callers can instrument or replace the cipher.
pub trait SymmetricCipher: Send + Sync {
    /// Encrypts under freshly generated key material.
    fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<(KeyMaterial, SymmetricCiphertext)>;

    /// Authenticates and decrypts. No plaintext is returned unless the tag
    /// verifies.
    fn decrypt(
        &self,
        cipher: &SymmetricCiphertext,
        password: &[u8],
        iv: &[u8],
    ) -> CryptoResult<Vec<u8>>;
}

/// Stateless AEAD codec with per-call key material.
#[derive(Clone, Copy, Debug, Default)]
pub struct SymmetricCodec {
    algorithm: SymmetricAlgorithm,
}

impl SymmetricCodec {
    pub fn new(algorithm: SymmetricAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> SymmetricAlgorithm {
        self.algorithm
    }

    /// Encrypts with explicit key material.
    ///
    /// Crate-private: a public caller could reuse a key/IV pair, which breaks
    /// GCM.
    fn seal(&self, keys: &KeyMaterial, plaintext: &[u8]) -> CryptoResult<SymmetricCiphertext> {
        match self.algorithm {
            SymmetricAlgorithm::Aes256Gcm => {
                let cipher = Aes256Gcm32::new_from_slice(keys.password())
                    .map_err(|e| CryptoError::Encryption(e.to_string()))?;
                let mut content = plaintext.to_vec();
                let tag = cipher
                    .encrypt_in_place_detached(Nonce::<U32>::from_slice(keys.iv()), b"", &mut content)
                    .map_err(|e| CryptoError::Encryption(e.to_string()))?;

                let mut tag_bytes = [0u8; TAG_SIZE];
                tag_bytes.copy_from_slice(&tag);
                Ok(SymmetricCiphertext {
                    content,
                    tag: tag_bytes,
                })
            }
        }
    }
}

impl SymmetricCipher for SymmetricCodec {
    fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<(KeyMaterial, SymmetricCiphertext)> {
        let keys = KeyMaterial::generate()?;
        let cipher = self.seal(&keys, plaintext)?;
        Ok((keys, cipher))
    }

    fn decrypt(
        &self,
        cipher: &SymmetricCiphertext,
        password: &[u8],
        iv: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        if password.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: password.len(),
            });
        }
        if iv.len() != IV_SIZE {
            return Err(CryptoError::InvalidNonceLength {
                expected: IV_SIZE,
                actual: iv.len(),
            });
        }

        match self.algorithm {
            SymmetricAlgorithm::Aes256Gcm => {
                let aead = Aes256Gcm32::new_from_slice(password)
                    .map_err(|e| CryptoError::Encryption(e.to_string()))?;
                let mut buffer = cipher.content.clone();
                // The tag is checked before the keystream is applied, so a
                // mismatch leaves `buffer` as ciphertext and it is dropped.
                aead.decrypt_in_place_detached(
                    Nonce::<U32>::from_slice(iv),
                    b"",
                    &mut buffer,
                    Tag::<U16>::from_slice(&cipher.tag),
                )
                .map_err(|_| CryptoError::AuthenticationTag)?;
                Ok(buffer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let codec = SymmetricCodec::default();
        let (keys, cipher) = codec.encrypt(b"Hello World").unwrap();
        let plaintext = codec.decrypt(&cipher, keys.password(), keys.iv()).unwrap();
        assert_eq!(plaintext, b"Hello World");
    }

    #[test]
    fn ciphertext_length_matches_plaintext() {
        let codec = SymmetricCodec::default();
        let (_, cipher) = codec.encrypt(b"exactly 21 characters").unwrap();
        assert_eq!(cipher.content.len(), 21);
        assert_ne!(cipher.content, b"exactly 21 characters");
    }

    #[test]
    fn empty_plaintext_still_produces_a_tag() {
        let codec = SymmetricCodec::default();
        let (keys, cipher) = codec.encrypt(b"").unwrap();
        assert!(cipher.content.is_empty());
        assert_ne!(cipher.tag, [0u8; TAG_SIZE]);
        assert!(codec.decrypt(&cipher, keys.password(), keys.iv()).unwrap().is_empty());
    }

    #[test]
    fn explicit_key_material_is_deterministic() {
        let codec = SymmetricCodec::default();
        let keys = KeyMaterial::from_parts([7u8; KEY_SIZE], [9u8; IV_SIZE]);
        let a = codec.seal(&keys, b"same input").unwrap();
        let b = codec.seal(&keys, b"same input").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn wrong_key_length_rejected_before_decrypting() {
        let codec = SymmetricCodec::default();
        let (keys, cipher) = codec.encrypt(b"data").unwrap();
        let err = codec.decrypt(&cipher, &keys.password()[..16], keys.iv()).unwrap_err();
        assert!(matches!(
            err,
            CryptoError::InvalidKeyLength { expected: 32, actual: 16 }
        ));
    }

    #[test]
    fn wrong_iv_length_rejected_before_decrypting() {
        let codec = SymmetricCodec::default();
        let (keys, cipher) = codec.encrypt(b"data").unwrap();
        let err = codec.decrypt(&cipher, keys.password(), &[0u8; 12]).unwrap_err();
        assert!(matches!(
            err,
            CryptoError::InvalidNonceLength { expected: 32, actual: 12 }
        ));
    }

    #[test]
    fn algorithm_parses_case_insensitively() {
        assert_eq!(
            "AES-256-GCM".parse::<SymmetricAlgorithm>().unwrap(),
            SymmetricAlgorithm::Aes256Gcm
        );
        assert!("des-ede".parse::<SymmetricAlgorithm>().is_err());
        assert_eq!(SymmetricAlgorithm::Aes256Gcm.to_string(), "aes-256-gcm");
    }
}
