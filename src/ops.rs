//! The operations behind each console command.
//!
//! Every function here is a single request/response transformation: it
//! decodes its string inputs, delegates to [`crate::crypto`], and returns a
//! typed report. Nothing is printed; see [`crate::cli::console`].

use log::{debug, info};

use crate::crypto::{
    recover_address, recover_public_key, sign_hash, Address, EthKeypair, EthPublicKey,
    EthSignature, Hash,
};
use crate::error::ToolError;

/// Private key, public key and address of one account
#[derive(Debug, Clone)]
pub struct KeyReport {
    pub keypair: EthKeypair,
}

#[derive(Debug, Clone)]
pub struct HashReport {
    pub message: String,
    pub digest: Hash,
}

#[derive(Debug, Clone)]
pub struct SignReport {
    pub digest: Hash,
    pub signature: EthSignature,
}

/// Outcome of checking a signature against a claimed address
#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub digest: Hash,
    /// Address recovered from the signature, if any key was recoverable
    pub recovered: Option<Address>,
    pub verified: bool,
}

#[derive(Debug, Clone)]
pub struct RecoverReport {
    pub digest: Hash,
    pub public_key: EthPublicKey,
    pub address: Address,
}

/// Generate a fresh key pair from the OS randomness source
pub fn gen_key() -> Result<KeyReport, ToolError> {
    let keypair = EthKeypair::generate()?;
    info!("generated key for {}", keypair.address());
    Ok(KeyReport { keypair })
}

/// Derive the public key and address of a hex private key
pub fn prv_to_pub(private_key: &str) -> Result<KeyReport, ToolError> {
    let keypair = EthKeypair::from_hex(private_key)?;
    Ok(KeyReport { keypair })
}

/// Keccak-256 over the raw bytes of `message`
pub fn hash_message(message: &str) -> HashReport {
    HashReport {
        message: message.to_string(),
        digest: Hash::from_data(message.as_bytes()),
    }
}

/// Hash `message` and sign the digest. The key is decoded before anything
/// is hashed, so a malformed key never produces a signature.
pub fn sign(message: &str, private_key: &str) -> Result<SignReport, ToolError> {
    let keypair = EthKeypair::from_hex(private_key)?;
    let digest = Hash::from_data(message.as_bytes());
    let signature = sign_hash(&keypair, &digest)?;
    debug!("signed digest {} with recovery id {}", digest, signature.recovery_id());
    Ok(SignReport { digest, signature })
}

/// Check that `signature` over `message` recovers to `address`.
///
/// Decode failures in either hex field are errors; a signature with no
/// recoverable key is a negative result.
pub fn verify(message: &str, signature: &str, address: &str) -> Result<VerifyReport, ToolError> {
    let signature = EthSignature::from_hex(signature)?;
    let claimed = Address::from_hex(address)?;
    let digest = Hash::from_data(message.as_bytes());

    let recovered = match recover_address(&digest, &signature) {
        Ok(address) => Some(address),
        Err(e) => {
            debug!("no key recoverable: {}", e);
            None
        }
    };
    let verified = recovered == Some(claimed);

    Ok(VerifyReport { digest, recovered, verified })
}

/// Recover the signer of `message` from `signature`
pub fn recover(message: &str, signature: &str) -> Result<RecoverReport, ToolError> {
    let signature = EthSignature::from_hex(signature)?;
    let digest = Hash::from_data(message.as_bytes());
    let public_key = recover_public_key(&digest, &signature)?;
    let address = public_key.address();
    Ok(RecoverReport { digest, public_key, address })
}
