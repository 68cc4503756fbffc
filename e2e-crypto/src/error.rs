//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors raised by the symmetric codec and the identity capabilities.
///
/// Primitive crate errors (aes-gcm, crypto_box, ed25519) never escape this
/// crate: they are flattened into one of these variants.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("authentication tag mismatch (wrong key or tampered data)")]
    AuthenticationTag,

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid iv length: expected {expected}, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    #[error("message too large: {size} bytes exceeds limit of {limit}")]
    MessageTooLarge { size: usize, limit: usize },

    #[error("secure random source unavailable: {0}")]
    Randomness(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("key wrap failed: {0}")]
    Wrap(String),

    #[error("key unwrap failed (wrong identity or tampered data)")]
    Unwrap,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
