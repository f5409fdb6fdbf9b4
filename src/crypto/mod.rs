// ethtool Cryptography Module
//
// Thin wrappers over k256 and sha3 for an Ethereum-style account model:
// - Key generation and private-to-public derivation
// - Keccak-256 hashing
// - Recoverable ECDSA signatures and address verification

pub mod encoding;
pub mod errors;
pub mod hash;
pub mod keys;
pub mod signer;

// Re-export main components for easier access
pub use errors::{CryptoError, DecodeError};
pub use hash::{keccak256, Hash};
pub use keys::{address_from_pubkey, Address, EthKeypair, EthPublicKey};
pub use signer::{recover_address, recover_public_key, sign_hash, EthSignature};
