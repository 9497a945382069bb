//! Fixed-size signature encoding.
//!
//! The chain expects the 64-byte `r || s` form, never DER. Recoverable
//! signatures (65 bytes, trailing recovery id) lose their last byte.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::EnigmaError;

/// Length of a wire signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// Normalizes raw signature bytes to exactly 64 bytes.
pub fn normalize_signature(bytes: &[u8]) -> Result<[u8; SIGNATURE_LENGTH], EnigmaError> {
    let fixed = match bytes.len() {
        SIGNATURE_LENGTH => bytes,
        65 => &bytes[..SIGNATURE_LENGTH],
        n => {
            return Err(EnigmaError::InvalidSignature(format!(
                "expected 64 or 65 bytes, got {n}"
            )))
        }
    };

    let mut out = [0u8; SIGNATURE_LENGTH];
    out.copy_from_slice(fixed);
    Ok(out)
}

/// Decodes a base64 wire signature into its 64 raw bytes.
pub fn decode_signature(base64: &str) -> Result<[u8; SIGNATURE_LENGTH], EnigmaError> {
    let bytes = STANDARD.decode(base64)?;
    normalize_signature(&bytes)
}

/// Encodes signature bytes for the wire.
pub fn encode_signature(bytes: &[u8]) -> Result<String, EnigmaError> {
    Ok(STANDARD.encode(normalize_signature(bytes)?))
}
