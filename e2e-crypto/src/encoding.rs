//! Text encodings for binary fields.
//!
//! The wire format carries bulk bytes (ciphertext, wrapped keys, signatures)
//! as standard padded base64 and fixed-size secrets (keys, IVs, tags) as
//! lowercase hex. The `serde(with = ...)` modules below are the only place
//! those encodings are defined.

use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose::STANDARD, Engine};

/// Encodes bytes as standard padded base64.
pub fn encode_base64(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

/// Decodes standard padded base64.
pub fn decode_base64(encoded: &str) -> CryptoResult<Vec<u8>> {
    STANDARD
        .decode(encoded.trim())
        .map_err(|e| CryptoError::Encoding(format!("invalid base64: {e}")))
}

/// `Vec<u8>` <-> base64 string.
pub mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsRef<[u8]>,
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes.as_ref()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

/// `[u8; N]` <-> lowercase hex string of exactly `2 * N` characters.
pub mod hex_array {
    use serde::{Deserialize, Deserializer, Serializer};
    use zeroize::Zeroizing;

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = Zeroizing::new(hex::encode(bytes));
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        // Key and IV hex passes through here.
        let encoded = Zeroizing::new(String::deserialize(deserializer)?);
        let mut out = [0u8; N];
        hex::decode_to_slice(encoded.as_bytes(), &mut out).map_err(serde::de::Error::custom)?;
        Ok(out)
    }
}
