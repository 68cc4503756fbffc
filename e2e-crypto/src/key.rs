//! Ephemeral symmetric key material.

use crate::encoding::hex_array;
use crate::error::{CryptoError, CryptoResult};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// AES-256 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// GCM initialization vector size in bytes.
pub const IV_SIZE: usize = 32;

/// Key and IV for a single message.
///
/// Generated fresh for every encryption and zeroized on drop. The serde form
/// is also the canonical encoding that gets signed:
/// `{"pwd":"<hex>","iv":"<hex>"}`, lowercase hex, fields in that order.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(deny_unknown_fields)]
pub struct KeyMaterial {
    #[serde(rename = "pwd", with = "hex_array")]
    password: [u8; KEY_SIZE],
    #[serde(with = "hex_array")]
    iv: [u8; IV_SIZE],
}

impl KeyMaterial {
    /// Draws a fresh key and IV from the OS CSPRNG.
    ///
    /// Fails if the random source is unavailable; there is no fallback.
    pub fn generate() -> CryptoResult<Self> {
        let mut material = Self {
            password: [0u8; KEY_SIZE],
            iv: [0u8; IV_SIZE],
        };
        OsRng
            .try_fill_bytes(&mut material.password)
            .and_then(|()| OsRng.try_fill_bytes(&mut material.iv))
            .map_err(|e| CryptoError::Randomness(e.to_string()))?;
        Ok(material)
    }

    pub fn from_parts(password: [u8; KEY_SIZE], iv: [u8; IV_SIZE]) -> Self {
        Self { password, iv }
    }

    pub fn password(&self) -> &[u8; KEY_SIZE] {
        &self.password
    }

    pub fn iv(&self) -> &[u8; IV_SIZE] {
        &self.iv
    }

    /// The exact bytes a signature over this key material covers.
    ///
    /// Signer and verifier must both call this; re-encoding the parsed
    /// structure any other way breaks verification.
    pub fn canonical_bytes(&self) -> CryptoResult<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(serde_json::to_vec(self)?))
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("password", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .finish()
    }
}
