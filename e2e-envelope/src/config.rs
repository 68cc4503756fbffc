//! Envelope codec configuration.

use crate::error::{EnvelopeError, EnvelopeResult};
use e2e_crypto::SymmetricAlgorithm;
use serde::{Deserialize, Serialize};

/// Default upper bound on a single message (64 MiB).
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 64 * 1024 * 1024;

/// Configuration for an [`EnvelopeCodec`](crate::EnvelopeCodec).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Symmetric algorithm for message content.
    pub algorithm: SymmetricAlgorithm,

    /// Largest plaintext accepted by `encrypt`. Messages are handled as one
    /// in-memory buffer, so this bounds peak memory per call.
    pub max_message_bytes: usize,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            algorithm: SymmetricAlgorithm::Aes256Gcm,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}

impl EnvelopeConfig {
    pub fn validate(&self) -> EnvelopeResult<()> {
        if self.max_message_bytes == 0 {
            return Err(EnvelopeError::Config(
                "max_message_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses a JSON config document; missing fields take their defaults.
    pub fn from_json(json: &str) -> EnvelopeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
