//! Shared helpers for envelope integration tests.

#![allow(dead_code)]

use e2e_crypto::{
    CryptoResult, Identity, KeyMaterial, PublicIdentity, SymmetricCipher, SymmetricCiphertext,
    SymmetricCodec,
};
use e2e_envelope::EnvelopeCodec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

/// Routes `tracing` output through the test harness (`RUST_LOG=debug`).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A sender/recipient pair with codecs pointing at each other.
pub struct Pair {
    pub alice: Identity,
    pub bob: Identity,
    /// Alice -> Bob: signs as Alice, wraps for Bob.
    pub to_bob: EnvelopeCodec<Identity, PublicIdentity>,
    /// Bob receiving from Alice: unwraps as Bob, verifies Alice.
    pub from_alice: EnvelopeCodec<Identity, PublicIdentity>,
}

pub fn pair() -> Pair {
    init_tracing();
    let alice = Identity::generate().unwrap();
    let bob = Identity::generate().unwrap();
    Pair {
        to_bob: EnvelopeCodec::new(alice.clone(), bob.public_identity()),
        from_alice: EnvelopeCodec::new(bob.clone(), alice.public_identity()),
        alice,
        bob,
    }
}

/// Symmetric cipher wrapper that counts calls.
#[derive(Clone, Default)]
pub struct CountingCipher {
    inner: SymmetricCodec,
    encrypts: Arc<AtomicUsize>,
    decrypts: Arc<AtomicUsize>,
}

impl CountingCipher {
    pub fn encrypt_calls(&self) -> usize {
        self.encrypts.load(Ordering::SeqCst)
    }

    pub fn decrypt_calls(&self) -> usize {
        self.decrypts.load(Ordering::SeqCst)
    }
}

impl SymmetricCipher for CountingCipher {
    fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<(KeyMaterial, SymmetricCiphertext)> {
        self.encrypts.fetch_add(1, Ordering::SeqCst);
        self.inner.encrypt(plaintext)
    }

    fn decrypt(
        &self,
        cipher: &SymmetricCiphertext,
        password: &[u8],
        iv: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        self.decrypts.fetch_add(1, Ordering::SeqCst);
        self.inner.decrypt(cipher, password, iv)
    }
}
