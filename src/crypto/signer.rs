use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use std::fmt;

use crate::crypto::encoding::decode_fixed;
use crate::crypto::errors::{CryptoError, DecodeError};
use crate::crypto::hash::Hash;
use crate::crypto::keys::{Address, EthKeypair, EthPublicKey};

/// Legacy Ethereum offset for the trailing `v` byte
const LEGACY_V_OFFSET: u8 = 27;

/// Sign a digest with RFC 6979 deterministic nonces; `s` is low-normalised
pub fn sign_hash(keypair: &EthKeypair, digest: &Hash) -> Result<EthSignature, CryptoError> {
    let (signature, recovery_id) = keypair
        .signing_key()
        .sign_prehash_recoverable(digest.as_bytes())
        .map_err(|e| CryptoError::Signing(e.to_string()))?;

    let mut bytes = [0u8; 65];
    bytes[..64].copy_from_slice(&signature.to_bytes());
    bytes[64] = recovery_id.to_byte();
    Ok(EthSignature(bytes))
}

/// Recover the signer's public key from a digest and signature
pub fn recover_public_key(
    digest: &Hash,
    signature: &EthSignature,
) -> Result<EthPublicKey, CryptoError> {
    let sig = Signature::from_slice(&signature.0[..64])
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    let recovery_id = RecoveryId::from_byte(signature.0[64])
        .ok_or_else(|| {
            CryptoError::InvalidSignature(format!("recovery id {}", signature.0[64]))
        })?;

    let verifying = VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recovery_id)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
    Ok(EthPublicKey::from_verifying_key(&verifying))
}

/// Recover the address implied by a digest and signature
pub fn recover_address(digest: &Hash, signature: &EthSignature) -> Result<Address, CryptoError> {
    recover_public_key(digest, signature).map(|pubkey| pubkey.address())
}

/// 65-byte recoverable signature `r || s || v`, with `v` in 0..=3
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EthSignature([u8; 65]);

impl EthSignature {
    /// Build from raw bytes, normalising a legacy `v` of 27..=30
    pub fn from_bytes(mut bytes: [u8; 65]) -> Result<Self, DecodeError> {
        let v = bytes[64];
        bytes[64] = match v {
            0..=3 => v,
            27..=30 => v - LEGACY_V_OFFSET,
            _ => return Err(DecodeError::InvalidRecoveryId(v)),
        };
        Ok(Self(bytes))
    }

    /// Parse 130 hex digits, with or without `0x`
    pub fn from_hex(input: &str) -> Result<Self, DecodeError> {
        Self::from_bytes(decode_fixed("signature", input)?)
    }

    /// Get the signature as bytes
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    pub fn recovery_id(&self) -> u8 {
        self.0[64]
    }
}

impl fmt::Debug for EthSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EthSignature({})", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypair_one() -> EthKeypair {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        EthKeypair::from_bytes(&secret).unwrap()
    }

    fn sign(keypair: &EthKeypair, message: &[u8]) -> EthSignature {
        sign_hash(keypair, &Hash::from_data(message)).unwrap()
    }

    #[test]
    fn test_sign_and_recover() {
        let keypair = EthKeypair::generate().unwrap();
        let message = b"This is a test message";

        let signature = sign(&keypair, message);
        let recovered = recover_address(&Hash::from_data(message), &signature).unwrap();
        assert_eq!(recovered, keypair.address());
    }

    #[test]
    fn test_recovery_with_wrong_input() {
        let keypair = EthKeypair::generate().unwrap();
        let signature = sign(&keypair, b"This is a test message");

        // A different message recovers a different key, or none at all
        let digest = Hash::from_data(b"This is a different message");
        match recover_address(&digest, &signature) {
            Ok(recovered) => assert_ne!(recovered, keypair.address()),
            Err(e) => assert!(matches!(e, CryptoError::RecoveryFailed(_))),
        }
    }

    #[test]
    fn test_signing_is_deterministic() {
        let keypair = keypair_one();
        let first = sign(&keypair, b"hello");
        let second = sign(&keypair, b"hello");
        assert_eq!(first, second);
        assert!(first.recovery_id() <= 1);
    }

    #[test]
    fn test_recover_public_key() {
        let keypair = EthKeypair::generate().unwrap();
        let digest = Hash::from_data(b"recover me");
        let signature = sign_hash(&keypair, &digest).unwrap();

        let recovered = recover_public_key(&digest, &signature).unwrap();
        assert_eq!(&recovered, keypair.public());
    }

    #[test]
    fn test_legacy_v_is_normalised() {
        let keypair = keypair_one();
        let signature = sign(&keypair, b"hello");

        let mut legacy = *signature.as_bytes();
        legacy[64] += 27;
        let parsed = EthSignature::from_bytes(legacy).unwrap();
        assert_eq!(parsed, signature);

        let recovered = recover_address(&Hash::from_data(b"hello"), &parsed).unwrap();
        assert_eq!(recovered, keypair.address());
    }

    #[test]
    fn test_bad_recovery_id_is_rejected() {
        let mut bytes = [0u8; 65];
        bytes[64] = 5;
        assert!(matches!(
            EthSignature::from_bytes(bytes),
            Err(DecodeError::InvalidRecoveryId(5))
        ));
    }

    #[test]
    fn test_zero_signature_is_not_recoverable() {
        let signature = EthSignature::from_bytes([0u8; 65]).unwrap();
        let result = recover_public_key(&Hash::from_data(b"hello"), &signature);
        assert!(matches!(result, Err(CryptoError::InvalidSignature(_))));
    }

    #[test]
    fn test_signature_hex_round_trip_with_prefix() {
        let signature = sign(&keypair_one(), b"hello");
        let encoded = hex::encode(signature.as_bytes());

        assert_eq!(EthSignature::from_hex(&encoded).unwrap(), signature);
        assert_eq!(EthSignature::from_hex(&format!("0x{}", encoded)).unwrap(), signature);
        assert!(matches!(
            EthSignature::from_hex(&encoded[..128]),
            Err(DecodeError::InvalidLength { expected: 65, actual: 64, .. })
        ));
    }
}
