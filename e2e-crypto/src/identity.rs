//! Asymmetric identity capabilities.
//!
//! An identity is split into two values that are never aliased:
//!
//! - [`Identity`] (private half): signs key material and unwraps key
//!   packages addressed to it.
//! - [`PublicIdentity`] (public half): verifies signatures and wraps key
//!   packages for its owner.
//!
//! Signatures are Ed25519. Wrapping is an anonymous sealed box: an ephemeral
//! X25519 keypair per call plus XSalsa20-Poly1305, so the wrapped bytes
//! reveal nothing about the sender. Wrapped layout:
//!
//! ```text
//! ephemeral_pk (32) || nonce (24) || ciphertext + Poly1305 tag (len + 16)
//! ```
//!
//! The envelope layer only talks to the [`PrivateCapability`] and
//! [`PublicCapability`] traits, so other key types can be plugged in.

use crate::encoding::{decode_base64, encode_base64};
use crate::error::{CryptoError, CryptoResult};
use crypto_box::aead::Aead;
use crypto_box::{PublicKey, SalsaBox, SecretKey};
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;
use zeroize::Zeroizing;

/// X25519 / Ed25519 key size in bytes.
pub const IDENTITY_KEY_SIZE: usize = 32;

/// Serialized size of a public identity (verifying key || exchange key).
pub const PUBLIC_IDENTITY_SIZE: usize = 2 * IDENTITY_KEY_SIZE;

/// Ed25519 signature size in bytes.
pub const SIGNATURE_SIZE: usize = 64;

const WRAP_NONCE_SIZE: usize = 24;

/// Bytes a wrap adds on top of its plaintext.
pub const WRAP_OVERHEAD: usize = IDENTITY_KEY_SIZE + WRAP_NONCE_SIZE + 16;

/// Private half of an identity: sign and unwrap.
pub trait PrivateCapability: Send + Sync {
    fn sign(&self, message: &[u8]) -> CryptoResult<Vec<u8>>;

    /// Opens bytes produced by the matching [`PublicCapability::wrap_key`].
    fn unwrap_key(&self, wrapped: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>>;
}

/// Public half of an identity: verify and wrap.
pub trait PublicCapability: Send + Sync {
    /// Returns `false` for a bad or malformed signature; never errors.
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool;

    fn wrap_key(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>>;
}

impl<T: PrivateCapability + ?Sized> PrivateCapability for &T {
    fn sign(&self, message: &[u8]) -> CryptoResult<Vec<u8>> {
        (**self).sign(message)
    }

    fn unwrap_key(&self, wrapped: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>> {
        (**self).unwrap_key(wrapped)
    }
}

impl<T: PrivateCapability + ?Sized> PrivateCapability for Arc<T> {
    fn sign(&self, message: &[u8]) -> CryptoResult<Vec<u8>> {
        (**self).sign(message)
    }

    fn unwrap_key(&self, wrapped: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>> {
        (**self).unwrap_key(wrapped)
    }
}

impl<T: PublicCapability + ?Sized> PublicCapability for &T {
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        (**self).verify(message, signature)
    }

    fn wrap_key(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        (**self).wrap_key(plaintext)
    }
}

impl<T: PublicCapability + ?Sized> PublicCapability for Arc<T> {
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        (**self).verify(message, signature)
    }

    fn wrap_key(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        (**self).wrap_key(plaintext)
    }
}

fn fill_random(dest: &mut [u8]) -> CryptoResult<()> {
    OsRng
        .try_fill_bytes(dest)
        .map_err(|e| CryptoError::Randomness(e.to_string()))
}

/// Private identity: Ed25519 signing key + X25519 secret key.
///
/// Both keys zeroize on drop (ed25519-dalek and crypto_box handle it).
#[derive(Clone)]
pub struct Identity {
    signing: SigningKey,
    exchange: SecretKey,
}

impl Identity {
    /// Generates a new identity from the OS CSPRNG.
    pub fn generate() -> CryptoResult<Self> {
        let mut secret = Zeroizing::new([0u8; 2 * IDENTITY_KEY_SIZE]);
        fill_random(&mut secret[..])?;
        Ok(Self::from_secret_bytes(*secret))
    }

    /// Rebuilds an identity from `signing_seed || exchange_secret`.
    pub fn from_secret_bytes(bytes: [u8; 2 * IDENTITY_KEY_SIZE]) -> Self {
        let bytes = Zeroizing::new(bytes);
        let mut seed = Zeroizing::new([0u8; IDENTITY_KEY_SIZE]);
        let mut exchange = Zeroizing::new([0u8; IDENTITY_KEY_SIZE]);
        seed.copy_from_slice(&bytes[..IDENTITY_KEY_SIZE]);
        exchange.copy_from_slice(&bytes[IDENTITY_KEY_SIZE..]);
        Self {
            signing: SigningKey::from_bytes(&seed),
            exchange: SecretKey::from(*exchange),
        }
    }

    /// Returns `signing_seed || exchange_secret`.
    pub fn secret_bytes(&self) -> Zeroizing<[u8; 2 * IDENTITY_KEY_SIZE]> {
        let mut out = Zeroizing::new([0u8; 2 * IDENTITY_KEY_SIZE]);
        out[..IDENTITY_KEY_SIZE].copy_from_slice(&self.signing.to_bytes());
        out[IDENTITY_KEY_SIZE..].copy_from_slice(&self.exchange.to_bytes());
        out
    }

    /// Derives the public half.
    pub fn public_identity(&self) -> PublicIdentity {
        PublicIdentity {
            verifying: self.signing.verifying_key(),
            exchange: self.exchange.public_key(),
        }
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("public", &self.public_identity().to_base64())
            .finish_non_exhaustive()
    }
}

impl PrivateCapability for Identity {
    fn sign(&self, message: &[u8]) -> CryptoResult<Vec<u8>> {
        let signature = self
            .signing
            .try_sign(message)
            .map_err(|e| CryptoError::Signing(e.to_string()))?;
        Ok(signature.to_bytes().to_vec())
    }

    fn unwrap_key(&self, wrapped: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>> {
        if wrapped.len() < WRAP_OVERHEAD {
            return Err(CryptoError::Unwrap);
        }
        let (ephemeral, rest) = wrapped.split_at(IDENTITY_KEY_SIZE);
        let (nonce, ciphertext) = rest.split_at(WRAP_NONCE_SIZE);

        let mut ephemeral_bytes = [0u8; IDENTITY_KEY_SIZE];
        ephemeral_bytes.copy_from_slice(ephemeral);
        let salsa_box = SalsaBox::new(&PublicKey::from(ephemeral_bytes), &self.exchange);

        salsa_box
            .decrypt(crypto_box::Nonce::from_slice(nonce), ciphertext)
            .map(Zeroizing::new)
            .map_err(|_| CryptoError::Unwrap)
    }
}

/// Public identity: Ed25519 verifying key + X25519 public key.
#[derive(Clone, Debug)]
pub struct PublicIdentity {
    verifying: VerifyingKey,
    exchange: PublicKey,
}

impl PublicIdentity {
    /// Returns `verifying_key || exchange_key`.
    pub fn to_bytes(&self) -> [u8; PUBLIC_IDENTITY_SIZE] {
        let mut out = [0u8; PUBLIC_IDENTITY_SIZE];
        out[..IDENTITY_KEY_SIZE].copy_from_slice(self.verifying.as_bytes());
        out[IDENTITY_KEY_SIZE..].copy_from_slice(self.exchange.as_bytes());
        out
    }

    /// Parses `verifying_key || exchange_key`, rejecting invalid Ed25519
    /// points.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != PUBLIC_IDENTITY_SIZE {
            return Err(CryptoError::InvalidPublicKey(format!(
                "expected {PUBLIC_IDENTITY_SIZE} bytes, got {}",
                bytes.len()
            )));
        }
        let mut verifying = [0u8; IDENTITY_KEY_SIZE];
        let mut exchange = [0u8; IDENTITY_KEY_SIZE];
        verifying.copy_from_slice(&bytes[..IDENTITY_KEY_SIZE]);
        exchange.copy_from_slice(&bytes[IDENTITY_KEY_SIZE..]);

        let verifying = VerifyingKey::from_bytes(&verifying)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Ok(Self {
            verifying,
            exchange: PublicKey::from(exchange),
        })
    }

    pub fn to_base64(&self) -> String {
        encode_base64(self.to_bytes())
    }

    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        Self::from_bytes(&decode_base64(encoded)?)
    }
}

impl PartialEq for PublicIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PublicIdentity {}

impl PublicCapability for PublicIdentity {
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        self.verifying.verify_strict(message, &signature).is_ok()
    }

    fn wrap_key(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        let mut ephemeral_bytes = Zeroizing::new([0u8; IDENTITY_KEY_SIZE]);
        let mut nonce = [0u8; WRAP_NONCE_SIZE];
        fill_random(&mut ephemeral_bytes[..])?;
        fill_random(&mut nonce)?;

        let ephemeral = SecretKey::from(*ephemeral_bytes);
        let salsa_box = SalsaBox::new(&self.exchange, &ephemeral);
        let ciphertext = salsa_box
            .encrypt(crypto_box::Nonce::from_slice(&nonce), plaintext)
            .map_err(|e| CryptoError::Wrap(e.to_string()))?;

        let mut wrapped = Vec::with_capacity(IDENTITY_KEY_SIZE + WRAP_NONCE_SIZE + ciphertext.len());
        wrapped.extend_from_slice(ephemeral.public_key().as_bytes());
        wrapped.extend_from_slice(&nonce);
        wrapped.extend_from_slice(&ciphertext);
        Ok(wrapped)
    }
}
