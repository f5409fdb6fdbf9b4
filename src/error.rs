use thiserror::Error;

use crate::config::ConfigError;
use crate::crypto::{CryptoError, DecodeError};

/// Exit status for a successful run, usage text, or a verification result
pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_DECODE: i32 = 3;
pub const EXIT_RANDOMNESS: i32 = 4;
pub const EXIT_CRYPTO: i32 = 5;
pub const EXIT_CONFIG: i32 = 6;

/// Errors that abort a single ethtool operation
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrong parameter count for a command
    #[error("{0}")]
    Usage(String),

    /// Malformed hex input
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Entropy source failure during key generation
    #[error("key generation failed: {0}")]
    Randomness(String),

    /// Signing or public key recovery failed
    #[error(transparent)]
    Crypto(CryptoError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ToolError {
    /// Process exit status for this error class
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolError::Usage(_) => EXIT_USAGE,
            ToolError::Decode(_) => EXIT_DECODE,
            ToolError::Randomness(_) => EXIT_RANDOMNESS,
            ToolError::Crypto(_) => EXIT_CRYPTO,
            ToolError::Config(_) => EXIT_CONFIG,
        }
    }
}

impl From<CryptoError> for ToolError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::Entropy(msg) => ToolError::Randomness(msg),
            other => ToolError::Crypto(other),
        }
    }
}
