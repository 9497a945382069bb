//! Bech32 account addresses.
//!
//! An account address is the bech32 encoding of a 20-byte hash of the
//! account's public key under a chain-wide human-readable prefix
//! (`enigma1...`). Validator operator and consensus keys share the charset
//! but use other prefixes, so they never validate as account addresses.

use bech32::{FromBase32, ToBase32, Variant};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::error::EnigmaError;
use crate::pubkey::{compress_secp256k1, Algorithm, PubkeyBundle};

/// Human-readable prefix of account addresses on the Enigma chain.
pub const ACCOUNT_PREFIX: &str = "enigma";

/// Human-readable prefix of bech32-encoded account public keys.
pub const PUBKEY_PREFIX: &str = "enigmapub";

/// Length of a raw account address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Decodes a bech32 account address into its 20 raw bytes.
///
/// Fails if the string is not classic bech32, the checksum is wrong, the
/// prefix differs from `expected_prefix`, or the payload is not 20 bytes.
pub fn decode_address(
    address: &str,
    expected_prefix: &str,
) -> Result<[u8; ADDRESS_LENGTH], EnigmaError> {
    let (hrp, data, variant) = bech32::decode(address)
        .map_err(|e| EnigmaError::InvalidAddress(format!("bech32 decode failed: {e}")))?;

    if variant != Variant::Bech32 {
        return Err(EnigmaError::InvalidAddress(
            "expected bech32, got bech32m".into(),
        ));
    }

    if hrp != expected_prefix {
        return Err(EnigmaError::InvalidAddress(format!(
            "expected prefix {expected_prefix}, got {hrp}"
        )));
    }

    let bytes = Vec::<u8>::from_base32(&data)
        .map_err(|e| EnigmaError::InvalidAddress(format!("invalid payload: {e}")))?;

    bytes.try_into().map_err(|v: Vec<u8>| {
        EnigmaError::InvalidAddress(format!(
            "expected {ADDRESS_LENGTH} bytes, got {}",
            v.len()
        ))
    })
}

/// Returns `true` if `address` is a well-formed account address for
/// `expected_prefix`. Never fails.
pub fn is_valid_address(address: &str, expected_prefix: &str) -> bool {
    decode_address(address, expected_prefix).is_ok()
}

/// Encodes 20 raw bytes as a bech32 account address.
pub fn encode_address(bytes: &[u8; ADDRESS_LENGTH], prefix: &str) -> Result<String, EnigmaError> {
    bech32::encode(prefix, bytes.to_base32(), Variant::Bech32)
        .map_err(|e| EnigmaError::InvalidAddress(format!("bech32 encode failed: {e}")))
}

/// Derives the account address owning `pubkey`.
///
/// Secp256k1: `RIPEMD-160(SHA-256(compressed_key))`.
/// Ed25519: first 20 bytes of `SHA-256(key)`.
pub fn pubkey_to_address(pubkey: &PubkeyBundle, prefix: &str) -> Result<String, EnigmaError> {
    let raw: [u8; ADDRESS_LENGTH] = match pubkey.algo {
        Algorithm::Secp256k1 => {
            let compressed = compress_secp256k1(&pubkey.data)?;
            let sha = Sha256::digest(compressed);
            Ripemd160::digest(sha).into()
        }
        Algorithm::Ed25519 => {
            if pubkey.data.len() != 32 {
                return Err(EnigmaError::InvalidPublicKey(format!(
                    "ed25519 key must be 32 bytes, got {}",
                    pubkey.data.len()
                )));
            }
            let sha = Sha256::digest(&pubkey.data);
            let mut out = [0u8; ADDRESS_LENGTH];
            out.copy_from_slice(&sha[..ADDRESS_LENGTH]);
            out
        }
    };

    encode_address(&raw, prefix)
}
