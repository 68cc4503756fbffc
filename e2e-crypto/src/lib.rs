//! Primitive layer for hybrid-e2e.
//!
//! Provides the two building blocks the envelope protocol is made of:
//! - AES-256-GCM with a fresh 256-bit key and 256-bit IV per message
//!   ([`SymmetricCodec`])
//! - Asymmetric identity capabilities for signing and key wrapping
//!   ([`PrivateCapability`], [`PublicCapability`])
//!
//! # Architecture
//!
//! Message content is never encrypted to an identity directly. Instead:
//!
//! 1. **Key material**: a random key and IV are generated per message and
//!    used once for AEAD encryption of the content.
//! 2. **Identity**: the key material is signed with the sender's private
//!    capability and wrapped with the recipient's public capability.
//!
//! The orchestration lives in `e2e-envelope`; this crate only supplies the
//! pieces and keeps every primitive crate's error type behind
//! [`CryptoError`].

pub mod encoding;
mod error;
pub mod identity;
mod key;
pub mod symmetric;

pub use error::{CryptoError, CryptoResult};
pub use identity::{
    Identity, PrivateCapability, PublicCapability, PublicIdentity, PUBLIC_IDENTITY_SIZE,
    SIGNATURE_SIZE, WRAP_OVERHEAD,
};
pub use key::{KeyMaterial, IV_SIZE, KEY_SIZE};
pub use symmetric::{
    SymmetricAlgorithm, SymmetricCipher, SymmetricCiphertext, SymmetricCodec, TAG_SIZE,
};
pub use zeroize::Zeroizing;
