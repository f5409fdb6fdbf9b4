use k256::ecdsa::{SigningKey, VerifyingKey};
use log::{debug, warn};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt;

use crate::crypto::encoding::decode_fixed;
use crate::crypto::errors::{CryptoError, DecodeError};
use crate::crypto::hash::keccak256;

/// Redraws allowed when a random draw is not a valid scalar
const MAX_KEY_DRAWS: usize = 8;

/// secp256k1 keypair for signing and address derivation
#[derive(Clone)]
pub struct EthKeypair {
    signing: SigningKey,
    public: EthPublicKey,
}

impl EthKeypair {
    /// Generate a new random keypair from the OS randomness source
    pub fn generate() -> Result<Self, CryptoError> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a keypair from the given randomness source.
    ///
    /// Entropy failures are reported instead of panicking. A draw that is
    /// not a valid scalar is redrawn up to `MAX_KEY_DRAWS` times.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, CryptoError> {
        let mut seed = [0u8; 32];
        for attempt in 1..=MAX_KEY_DRAWS {
            rng.try_fill_bytes(&mut seed)
                .map_err(|e| CryptoError::Entropy(e.to_string()))?;

            match Self::from_bytes(&seed) {
                Ok(keypair) => return Ok(keypair),
                Err(_) => warn!("random draw {} was not a valid scalar, redrawing", attempt),
            }
        }
        Err(CryptoError::Entropy(format!(
            "no valid private key after {} draws",
            MAX_KEY_DRAWS
        )))
    }

    /// Create a keypair from 32 secret key bytes
    pub fn from_bytes(secret_bytes: &[u8; 32]) -> Result<Self, DecodeError> {
        let signing = SigningKey::from_slice(secret_bytes)
            .map_err(|_| DecodeError::InvalidPrivateKey)?;
        let public = EthPublicKey::from_verifying_key(signing.verifying_key());
        Ok(Self { signing, public })
    }

    /// Parse a hex private key, with or without `0x`
    pub fn from_hex(input: &str) -> Result<Self, DecodeError> {
        let bytes: [u8; 32] = decode_fixed("private key", input)?;
        Self::from_bytes(&bytes)
    }

    /// Export the secret key as bytes (handle with care!)
    pub fn secret_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.signing.to_bytes());
        out
    }

    pub fn public(&self) -> &EthPublicKey {
        &self.public
    }

    /// Get the address derived from this keypair
    pub fn address(&self) -> Address {
        self.public.address()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing
    }
}

impl fmt::Debug for EthKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EthKeypair {{ address: {} }}", self.address())
    }
}

/// Uncompressed secp256k1 public key (`0x04 || X || Y`)
#[derive(Clone, PartialEq, Eq)]
pub struct EthPublicKey([u8; 65]);

impl EthPublicKey {
    pub(crate) fn from_verifying_key(verifying: &VerifyingKey) -> Self {
        let point = verifying.to_encoded_point(false);
        let mut bytes = [0u8; 65];
        bytes.copy_from_slice(point.as_bytes());
        Self(bytes)
    }

    /// Get the uncompressed encoding
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// Get the address derived from this public key
    pub fn address(&self) -> Address {
        address_from_pubkey(self)
    }
}

impl fmt::Debug for EthPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EthPublicKey({})", hex::encode(self.0))
    }
}

/// Derive an address: the last 20 bytes of Keccak-256 over `X || Y`
pub fn address_from_pubkey(pubkey: &EthPublicKey) -> Address {
    let hash = keccak256(&pubkey.0[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    let address = Address(address);
    debug!("derived address {}", address);
    address
}

/// 20-byte account address
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Address([u8; 20]);

impl Address {
    /// Parse 40 hex digits in any letter case, with or without `0x`.
    /// The checksum is not enforced; comparison is on the bytes.
    pub fn from_hex(input: &str) -> Result<Self, DecodeError> {
        decode_fixed("address", input).map(Self)
    }

    /// EIP-55 mixed-case checksum encoding with `0x`
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Lowercase encoding with `0x`
    pub fn to_lower_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source unavailable"))
        }
    }

    impl CryptoRng for FailingRng {}

    /// Yields an all-zero block first, then all-0x01 blocks
    struct ZeroThenOnes {
        calls: usize,
    }

    impl RngCore for ZeroThenOnes {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let byte = if self.calls == 0 { 0x00 } else { 0x01 };
            self.calls += 1;
            dest.fill(byte);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for ZeroThenOnes {}

    #[test]
    fn test_keypair_generation() {
        let keypair = EthKeypair::generate().unwrap();
        assert_eq!(keypair.public().as_bytes()[0], 0x04);

        let other = EthKeypair::generate().unwrap();
        assert_ne!(keypair.secret_bytes(), other.secret_bytes());
    }

    #[test]
    fn test_generation_surfaces_entropy_failure() {
        let result = EthKeypair::generate_with(&mut FailingRng);
        assert!(matches!(result, Err(CryptoError::Entropy(_))));
    }

    #[test]
    fn test_generation_redraws_invalid_scalar() {
        let mut rng = ZeroThenOnes { calls: 0 };
        let keypair = EthKeypair::generate_with(&mut rng).unwrap();
        assert_eq!(keypair.secret_bytes(), [0x01; 32]);
        assert_eq!(rng.calls, 2);
    }

    #[test]
    fn test_keypair_from_bytes() {
        let keypair = EthKeypair::generate().unwrap();
        let restored = EthKeypair::from_bytes(&keypair.secret_bytes()).unwrap();
        assert_eq!(keypair.public(), restored.public());
        assert_eq!(keypair.address(), restored.address());
    }

    #[test]
    fn test_known_private_key() {
        let keypair = EthKeypair::from_hex(ONE).unwrap();
        assert_eq!(
            hex::encode(keypair.public().as_bytes()),
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
        );
        assert_eq!(
            keypair.address().to_checksum(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn test_prefix_is_optional() {
        let bare = EthKeypair::from_hex(ONE).unwrap();
        let prefixed = EthKeypair::from_hex(&format!("0x{}", ONE)).unwrap();
        assert_eq!(bare.secret_bytes(), prefixed.secret_bytes());
    }

    #[test]
    fn test_invalid_private_keys() {
        assert!(matches!(
            EthKeypair::from_hex(&"00".repeat(32)),
            Err(DecodeError::InvalidPrivateKey)
        ));
        // Curve order n is not a valid scalar
        let order = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
        assert!(matches!(
            EthKeypair::from_hex(order),
            Err(DecodeError::InvalidPrivateKey)
        ));
        assert!(matches!(
            EthKeypair::from_hex("01"),
            Err(DecodeError::InvalidLength { expected: 32, actual: 1, .. })
        ));
        assert!(matches!(
            EthKeypair::from_hex("xyz"),
            Err(DecodeError::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_checksum_reference_vectors() {
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let address = Address::from_hex(expected).unwrap();
            assert_eq!(address.to_checksum(), expected);
        }
    }

    #[test]
    fn test_address_parse_is_case_insensitive() {
        let mixed = Address::from_hex("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap();
        let lower = Address::from_hex("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(mixed, lower);
        assert_eq!(lower.to_lower_hex(), "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed");
    }
}
