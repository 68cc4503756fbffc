//! Signed key package: the plaintext that gets wrapped for the recipient.

use e2e_crypto::encoding::base64_bytes;
use e2e_crypto::{CryptoResult, KeyMaterial, PrivateCapability, PublicCapability, Zeroizing};
use serde::{Deserialize, Serialize};

/// Key material plus the sender's signature over it.
///
/// The signature covers `keys` alone (its canonical encoding), never the
/// wrapped bytes or the message ciphertext. Serialized as
/// `{"signature":"<base64>","keys":{"pwd":"<hex>","iv":"<hex>"}}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyPackage {
    #[serde(with = "base64_bytes")]
    pub signature: Vec<u8>,
    pub keys: KeyMaterial,
}

impl KeyPackage {
    /// Signs `keys` with the sender's private capability.
    pub fn sign<S: PrivateCapability + ?Sized>(keys: KeyMaterial, signer: &S) -> CryptoResult<Self> {
        let signature = signer.sign(&keys.canonical_bytes()?)?;
        Ok(Self { signature, keys })
    }

    /// Checks the signature against the sender's public capability.
    pub fn verify<V: PublicCapability + ?Sized>(&self, verifier: &V) -> CryptoResult<bool> {
        Ok(verifier.verify(&self.keys.canonical_bytes()?, &self.signature))
    }

    pub fn to_bytes(&self) -> CryptoResult<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(serde_json::to_vec(self)?))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use e2e_crypto::{Identity, IV_SIZE, KEY_SIZE};

    #[test]
    fn sign_then_verify() {
        let sender = Identity::generate().unwrap();
        let package = KeyPackage::sign(KeyMaterial::generate().unwrap(), &sender).unwrap();
        assert!(package.verify(&sender.public_identity()).unwrap());
    }

    #[test]
    fn verify_fails_for_other_sender() {
        let sender = Identity::generate().unwrap();
        let other = Identity::generate().unwrap();
        let package = KeyPackage::sign(KeyMaterial::generate().unwrap(), &sender).unwrap();
        assert!(!package.verify(&other.public_identity()).unwrap());
    }

    #[test]
    fn verify_fails_for_swapped_keys() {
        let sender = Identity::generate().unwrap();
        let mut package = KeyPackage::sign(KeyMaterial::generate().unwrap(), &sender).unwrap();
        package.keys = KeyMaterial::generate().unwrap();
        assert!(!package.verify(&sender.public_identity()).unwrap());
    }

    #[test]
    fn wire_form_is_signature_then_keys() {
        let sender = Identity::generate().unwrap();
        let keys = KeyMaterial::from_parts([1u8; KEY_SIZE], [2u8; IV_SIZE]);
        let package = KeyPackage::sign(keys, &sender).unwrap();

        let bytes = package.to_bytes().unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        assert!(text.starts_with(r#"{"signature":""#));
        assert!(text.contains(r#""keys":{"pwd":"0101"#));

        let parsed = KeyPackage::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.signature, package.signature);
        assert!(parsed.verify(&sender.public_identity()).unwrap());
    }

    #[test]
    fn extra_fields_rejected() {
        let json = format!(
            r#"{{"signature":"","keys":{{"pwd":"{}","iv":"{}"}},"note":"x"}}"#,
            "00".repeat(32),
            "00".repeat(32)
        );
        assert!(KeyPackage::from_bytes(json.as_bytes()).is_err());
    }
}
