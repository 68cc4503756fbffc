//! Envelope error types.
//!
//! Every failure on the encrypt path is an [`EnvelopeError::Encryption`];
//! every failure on the decrypt path is an [`EnvelopeError::Decryption`]
//! whose [`DecryptionCause`] says what went wrong. Authentication failures
//! (bad signature, bad tag) stay distinguishable inside that wrapper.

use e2e_crypto::CryptoError;
use thiserror::Error;

/// Result type for envelope operations.
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

/// Errors surfaced by [`EnvelopeCodec`](crate::EnvelopeCodec).
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Uniform encrypt-path failure. The primitive cause is kept as the
    /// error source for logging; the message itself does not expose it.
    #[error("envelope encryption failed")]
    Encryption(#[source] CryptoError),

    #[error("envelope decryption failed: {0}")]
    Decryption(#[source] DecryptionCause),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a decryption failed.
#[derive(Debug, Error)]
pub enum DecryptionCause {
    #[error("key package could not be unwrapped: {0}")]
    Unwrap(#[source] CryptoError),

    #[error("malformed key package: {0}")]
    MalformedPackage(String),

    #[error(transparent)]
    Authentication(#[from] AuthenticationFailure),

    #[error("symmetric decryption failed: {0}")]
    Symmetric(#[source] CryptoError),

    #[error("decrypted message is not valid UTF-8")]
    InvalidUtf8(#[source] std::string::FromUtf8Error),
}

/// Integrity check that rejected an envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AuthenticationFailure {
    /// The key package signature did not verify against the sender's
    /// public identity. Raised before any symmetric decryption.
    #[error("unable to verify the integrity of the key package; it might have been tampered with")]
    Signature,

    /// The message tag did not match the ciphertext.
    #[error("message authentication tag mismatch; the ciphertext might have been tampered with")]
    Tag,
}

impl EnvelopeError {
    /// The authentication failure behind a decryption error, if any.
    pub fn authentication_failure(&self) -> Option<AuthenticationFailure> {
        match self {
            Self::Decryption(DecryptionCause::Authentication(failure)) => Some(*failure),
            _ => None,
        }
    }

    /// Returns the decryption cause, if this is a decryption error.
    pub fn decryption_cause(&self) -> Option<&DecryptionCause> {
        match self {
            Self::Decryption(cause) => Some(cause),
            _ => None,
        }
    }
}

impl From<DecryptionCause> for EnvelopeError {
    fn from(cause: DecryptionCause) -> Self {
        Self::Decryption(cause)
    }
}
