//! Hybrid envelope construction and verification.
//!
//! Encrypt:
//! 1. AEAD-encrypt the message under fresh key material.
//! 2. Sign the key material with the local (sender) private capability.
//! 3. Wrap `{signature, keys}` with the peer (recipient) public capability.
//!
//! Decrypt runs the inverse, and the signature check is a hard gate: the
//! symmetric cipher is never handed key material that failed verification.
//!
//! The signature covers the key material only, not the ciphertext. Swapping
//! `msg` between two envelopes is therefore not caught by the signature; it
//! is caught by the GCM tag, because each ciphertext only authenticates
//! under its own key.

use crate::config::EnvelopeConfig;
use crate::error::{AuthenticationFailure, DecryptionCause, EnvelopeError, EnvelopeResult};
use crate::package::KeyPackage;
use e2e_crypto::encoding::base64_bytes;
use e2e_crypto::{
    CryptoError, CryptoResult, Identity, PrivateCapability, PublicCapability, PublicIdentity,
    SymmetricCipher, SymmetricCiphertext, SymmetricCodec,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The transmissible unit: wrapped key package plus message ciphertext.
///
/// Wire form:
/// `{"keys":"<base64>","msg":{"content":"<base64>","tag":"<hex>"}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    #[serde(rename = "keys", with = "base64_bytes")]
    wrapped_keys: Vec<u8>,
    #[serde(rename = "msg")]
    cipher: SymmetricCiphertext,
}

impl Envelope {
    /// Reassembles an envelope from its parts (e.g. after a custom transport
    /// split them).
    pub fn from_parts(wrapped_keys: Vec<u8>, cipher: SymmetricCiphertext) -> Self {
        Self {
            wrapped_keys,
            cipher,
        }
    }

    /// Asymmetrically wrapped key package.
    pub fn wrapped_keys(&self) -> &[u8] {
        &self.wrapped_keys
    }

    pub fn cipher(&self) -> &SymmetricCiphertext {
        &self.cipher
    }

    pub fn into_parts(self) -> (Vec<u8>, SymmetricCiphertext) {
        (self.wrapped_keys, self.cipher)
    }

    pub fn to_json(&self) -> EnvelopeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> EnvelopeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Produces and consumes envelopes between a local and a peer identity.
///
/// `local` signs outgoing key material and unwraps incoming packages;
/// `peer` wraps outgoing packages and verifies incoming signatures. The
/// codec holds no mutable state and can be shared across threads.
pub struct EnvelopeCodec<L, P, S = SymmetricCodec> {
    local: L,
    peer: P,
    symmetric: S,
    config: EnvelopeConfig,
}

impl<L, P> EnvelopeCodec<L, P>
where
    L: PrivateCapability,
    P: PublicCapability,
{
    pub fn new(local: L, peer: P) -> Self {
        let config = EnvelopeConfig::default();
        Self {
            local,
            peer,
            symmetric: SymmetricCodec::new(config.algorithm),
            config,
        }
    }

    pub fn with_config(local: L, peer: P, config: EnvelopeConfig) -> EnvelopeResult<Self> {
        config.validate()?;
        Ok(Self {
            local,
            peer,
            symmetric: SymmetricCodec::new(config.algorithm),
            config,
        })
    }
}

impl EnvelopeCodec<Identity, PublicIdentity> {
    /// Codec whose sender and recipient are the same identity.
    ///
    /// The private and public halves are still held as separate values.
    pub fn self_addressed(identity: &Identity) -> Self {
        Self::new(identity.clone(), identity.public_identity())
    }
}

impl<L, P, S> EnvelopeCodec<L, P, S>
where
    L: PrivateCapability,
    P: PublicCapability,
    S: SymmetricCipher,
{
    /// Replaces the symmetric cipher, keeping identities and config.
    pub fn with_symmetric<T: SymmetricCipher>(self, symmetric: T) -> EnvelopeCodec<L, P, T> {
        EnvelopeCodec {
            local: self.local,
            peer: self.peer,
            symmetric,
            config: self.config,
        }
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    pub fn symmetric(&self) -> &S {
        &self.symmetric
    }

    /// Encrypts `message` into a new envelope for the peer.
    pub fn encrypt(&self, message: &[u8]) -> EnvelopeResult<Envelope> {
        match self.seal(message) {
            Ok(envelope) => {
                debug!(
                    "sealed envelope ({} byte message, {} byte key package)",
                    message.len(),
                    envelope.wrapped_keys.len()
                );
                Ok(envelope)
            }
            Err(e) => {
                warn!("envelope encryption failed: {e}");
                Err(EnvelopeError::Encryption(e))
            }
        }
    }

    pub fn encrypt_string(&self, message: &str) -> EnvelopeResult<Envelope> {
        self.encrypt(message.as_bytes())
    }

    /// Verifies and decrypts an envelope from the peer.
    pub fn decrypt(&self, envelope: &Envelope) -> EnvelopeResult<Vec<u8>> {
        match self.open(envelope) {
            Ok(plaintext) => {
                debug!("opened envelope ({} byte message)", plaintext.len());
                Ok(plaintext)
            }
            Err(cause) => {
                warn!("envelope decryption failed: {cause}");
                Err(EnvelopeError::Decryption(cause))
            }
        }
    }

    pub fn decrypt_string(&self, envelope: &Envelope) -> EnvelopeResult<String> {
        let plaintext = self.decrypt(envelope)?;
        String::from_utf8(plaintext).map_err(|e| DecryptionCause::InvalidUtf8(e).into())
    }

    fn seal(&self, message: &[u8]) -> CryptoResult<Envelope> {
        if message.len() > self.config.max_message_bytes {
            return Err(CryptoError::MessageTooLarge {
                size: message.len(),
                limit: self.config.max_message_bytes,
            });
        }

        let (keys, cipher) = self.symmetric.encrypt(message)?;
        let package = KeyPackage::sign(keys, &self.local)?;
        let wrapped_keys = self.peer.wrap_key(&package.to_bytes()?)?;

        Ok(Envelope {
            wrapped_keys,
            cipher,
        })
    }

    fn open(&self, envelope: &Envelope) -> Result<Vec<u8>, DecryptionCause> {
        let package_bytes = self
            .local
            .unwrap_key(&envelope.wrapped_keys)
            .map_err(DecryptionCause::Unwrap)?;
        let package = KeyPackage::from_bytes(&package_bytes)
            .map_err(|e| DecryptionCause::MalformedPackage(e.to_string()))?;

        let verified = package
            .verify(&self.peer)
            .map_err(|e| DecryptionCause::MalformedPackage(e.to_string()))?;
        if !verified {
            return Err(AuthenticationFailure::Signature.into());
        }

        self.symmetric
            .decrypt(&envelope.cipher, package.keys.password(), package.keys.iv())
            .map_err(|e| match e {
                CryptoError::AuthenticationTag => AuthenticationFailure::Tag.into(),
                other => DecryptionCause::Symmetric(other),
            })
    }
}

impl<L, P, S> std::fmt::Debug for EnvelopeCodec<L, P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeCodec")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
