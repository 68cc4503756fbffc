//! Hybrid end-to-end encryption envelope.
//!
//! Message content is encrypted with AES-256-GCM under a fresh key and IV;
//! that key material is signed by the sender and wrapped for the recipient.
//! On receipt the package is unwrapped, the signature is verified, and only
//! then is the content decrypted.
//!
//! ```no_run
//! use e2e_crypto::Identity;
//! use e2e_envelope::EnvelopeCodec;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let alice = Identity::generate()?;
//! let bob = Identity::generate()?;
//!
//! let to_bob = EnvelopeCodec::new(alice.clone(), bob.public_identity());
//! let envelope = to_bob.encrypt_string("Hello World")?;
//! let wire = envelope.to_json()?;
//!
//! let from_alice = EnvelopeCodec::new(bob, alice.public_identity());
//! let received = e2e_envelope::Envelope::from_json(&wire)?;
//! assert_eq!(from_alice.decrypt_string(&received)?, "Hello World");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod package;

pub use config::EnvelopeConfig;
pub use envelope::{Envelope, EnvelopeCodec};
pub use error::{AuthenticationFailure, DecryptionCause, EnvelopeError, EnvelopeResult};
pub use package::KeyPackage;
