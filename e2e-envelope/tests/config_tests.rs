use e2e_crypto::{Identity, SymmetricAlgorithm};
use e2e_envelope::config::DEFAULT_MAX_MESSAGE_BYTES;
use e2e_envelope::{EnvelopeCodec, EnvelopeConfig, EnvelopeError};
use pretty_assertions::assert_eq;

#[test]
fn default_algorithm_is_aes_256_gcm() {
    let config = EnvelopeConfig::default();
    assert_eq!(config.algorithm, SymmetricAlgorithm::Aes256Gcm);
}

#[test]
fn default_max_message_bytes() {
    let config = EnvelopeConfig::default();
    assert_eq!(config.max_message_bytes, DEFAULT_MAX_MESSAGE_BYTES);
    assert_eq!(DEFAULT_MAX_MESSAGE_BYTES, 64 * 1024 * 1024);
}

#[test]
fn default_is_valid() {
    assert!(EnvelopeConfig::default().validate().is_ok());
}

#[test]
fn zero_limit_rejected() {
    let config = EnvelopeConfig {
        max_message_bytes: 0,
        ..EnvelopeConfig::default()
    };
    assert!(matches!(config.validate(), Err(EnvelopeError::Config(_))));

    let identity = Identity::generate().unwrap();
    let result = EnvelopeCodec::with_config(identity.clone(), identity.public_identity(), config);
    assert!(matches!(result, Err(EnvelopeError::Config(_))));
}

#[test]
fn serialization_roundtrip() {
    let config = EnvelopeConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(
        json,
        format!(r#"{{"algorithm":"aes-256-gcm","max_message_bytes":{DEFAULT_MAX_MESSAGE_BYTES}}}"#)
    );
    let deserialized: EnvelopeConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, config);
}

#[test]
fn missing_fields_take_defaults() {
    let config = EnvelopeConfig::from_json(r#"{"max_message_bytes":1024}"#).unwrap();
    assert_eq!(config.algorithm, SymmetricAlgorithm::Aes256Gcm);
    assert_eq!(config.max_message_bytes, 1024);

    assert_eq!(EnvelopeConfig::from_json("{}").unwrap(), EnvelopeConfig::default());
}

#[test]
fn unknown_algorithm_rejected() {
    let err = EnvelopeConfig::from_json(r#"{"algorithm":"rc4"}"#).unwrap_err();
    assert!(matches!(err, EnvelopeError::Serialization(_)));
}

#[test]
fn from_json_validates() {
    let err = EnvelopeConfig::from_json(r#"{"max_message_bytes":0}"#).unwrap_err();
    assert!(matches!(err, EnvelopeError::Config(_)));
}

#[test]
fn codec_exposes_its_config() {
    let identity = Identity::generate().unwrap();
    let config = EnvelopeConfig {
        max_message_bytes: 2048,
        ..EnvelopeConfig::default()
    };
    let codec =
        EnvelopeCodec::with_config(identity.clone(), identity.public_identity(), config.clone())
            .unwrap();
    assert_eq!(codec.config(), &config);
    assert_eq!(codec.symmetric().algorithm(), SymmetricAlgorithm::Aes256Gcm);
}
