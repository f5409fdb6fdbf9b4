// ethtool - secp256k1 keys, Keccak-256 hashing, signing and address verification

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod ops;

pub use error::ToolError;

/// Initialize logging to stderr. `RUST_LOG` overrides `default_level`.
pub fn init_logger(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    // A second call (e.g. from tests) keeps the first logger
    let _ = env_logger::Builder::from_env(env).try_init();
}
