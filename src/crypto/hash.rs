use sha3::{Digest, Keccak256};
use std::fmt;

/// Compute the Keccak-256 hash of data (Ethereum padding, not FIPS SHA3-256)
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// A 32-byte Keccak-256 digest
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Hash([u8; 32]);

impl Hash {
    /// Create a hash by hashing the provided data
    pub fn from_data(data: &[u8]) -> Self {
        Self(keccak256(data))
    }

    /// Get the hash as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", hex::encode(self.0))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        let expected = "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";
        assert_eq!(hex::encode(keccak256(b"")), expected);
    }

    #[test]
    fn test_keccak256_hello() {
        // Differs from FIPS SHA3-256("hello"), which starts with 3338be69
        let expected = "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8";
        assert_eq!(hex::encode(keccak256(b"hello")), expected);
    }

    #[test]
    fn test_hash_struct() {
        let hash = Hash::from_data(b"test data");
        assert_eq!(hash, Hash::from_data(b"test data"));
        assert_ne!(hash, Hash::from_data(b"different data"));
        assert_eq!(hash.to_string().len(), 64);
    }
}
