use thiserror::Error;

/// Failures while decoding a hex input field
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not valid hex (odd length or a non-hex character)
    #[error("{field} is not valid hex: {source}")]
    InvalidHex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    /// Valid hex, wrong number of bytes
    #[error("{field} must be {expected} bytes, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// 32 bytes that are not a secp256k1 scalar (zero or not below the curve order)
    #[error("private key is not a valid secp256k1 scalar")]
    InvalidPrivateKey,

    /// Trailing signature byte outside 0..=3 and 27..=30
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),
}

/// Failures inside the curve primitives
#[derive(Debug, Error)]
pub enum CryptoError {
    /// r or s out of range
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// No public key is recoverable from the signature for this digest
    #[error("public key recovery failed: {0}")]
    RecoveryFailed(String),

    /// The randomness source failed or produced no valid key
    #[error("randomness source failure: {0}")]
    Entropy(String),

    /// The signing primitive itself failed
    #[error("signing failed: {0}")]
    Signing(String),
}
