use log::debug;

use crate::crypto::errors::DecodeError;

/// Strip one optional `0x` / `0X` prefix
pub fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Decode a hex field of any length, accepting an optional `0x` prefix
pub fn decode_hex(field: &'static str, input: &str) -> Result<Vec<u8>, DecodeError> {
    let bytes = hex::decode(strip_hex_prefix(input))
        .map_err(|source| DecodeError::InvalidHex { field, source })?;
    debug!("decoded {} ({} bytes)", field, bytes.len());
    Ok(bytes)
}

/// Decode a hex field that must be exactly `N` bytes
pub fn decode_fixed<const N: usize>(
    field: &'static str,
    input: &str,
) -> Result<[u8; N], DecodeError> {
    let bytes = decode_hex(field, input)?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| DecodeError::InvalidLength {
        field,
        expected: N,
        actual,
    })
}

/// Hex-encode, optionally with a `0x` prefix
pub fn encode_hex(bytes: &[u8], with_prefix: bool) -> String {
    if with_prefix {
        format!("0x{}", hex::encode(bytes))
    } else {
        hex::encode(bytes)
    }
}
