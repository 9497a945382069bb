//! Public key normalization and wire encodings.
//!
//! Signatures on the wire carry `{type, value}` pubkeys where the type is a
//! Tendermint amino name. Account responses carry bech32 pubkeys whose
//! payload is the amino prefix of the key type followed by the raw key.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bech32::{FromBase32, ToBase32, Variant};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use serde::{Deserialize, Serialize};

use crate::error::EnigmaError;
use crate::types::PubKey;

pub const SECP256K1_PUBKEY_TYPE: &str = "tendermint/PubKeySecp256k1";
pub const ED25519_PUBKEY_TYPE: &str = "tendermint/PubKeyEd25519";
/// Known to the chain, not supported by this codec.
pub const SR25519_PUBKEY_TYPE: &str = "tendermint/PubKeySr25519";

/// Amino prefix of a Secp256k1 public key.
const SECP256K1_AMINO_PREFIX: [u8; 5] = [0xeb, 0x5a, 0xe9, 0x87, 0x21];
/// Amino prefix of an Ed25519 public key.
const ED25519_AMINO_PREFIX: [u8; 5] = [0x16, 0x24, 0xde, 0x64, 0x20];

const COMPRESSED_LEN: usize = 33;
const UNCOMPRESSED_LEN: usize = 65;
const ED25519_LEN: usize = 32;

/// Signature algorithm of a public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Secp256k1,
    Ed25519,
}

/// A public key tagged with its algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PubkeyBundle {
    pub algo: Algorithm,
    pub data: Vec<u8>,
}

/// Brings a Secp256k1 public key into its 33-byte compressed SEC1 form.
///
/// 33-byte input is returned unchanged. 65-byte uncompressed input must be
/// a point on the curve.
pub fn compress_secp256k1(data: &[u8]) -> Result<[u8; COMPRESSED_LEN], EnigmaError> {
    match data.len() {
        COMPRESSED_LEN => {
            let mut out = [0u8; COMPRESSED_LEN];
            out.copy_from_slice(data);
            Ok(out)
        }
        UNCOMPRESSED_LEN => {
            if data[0] != 0x04 {
                return Err(EnigmaError::InvalidPublicKey(
                    "uncompressed key must start with 0x04".into(),
                ));
            }
            let key = PublicKey::from_sec1_bytes(data).map_err(|_| {
                EnigmaError::InvalidPublicKey("point is not on the secp256k1 curve".into())
            })?;
            let point = key.to_encoded_point(true);
            let mut out = [0u8; COMPRESSED_LEN];
            out.copy_from_slice(point.as_bytes());
            Ok(out)
        }
        n => Err(EnigmaError::InvalidPublicKey(format!(
            "secp256k1 key must be 33 or 65 bytes, got {n}"
        ))),
    }
}

fn check_ed25519(data: &[u8]) -> Result<(), EnigmaError> {
    if data.len() != ED25519_LEN {
        return Err(EnigmaError::InvalidPublicKey(format!(
            "ed25519 key must be {ED25519_LEN} bytes, got {}",
            data.len()
        )));
    }
    Ok(())
}

/// Maps a wire pubkey to its algorithm and raw bytes.
///
/// Wire Secp256k1 keys are always compressed, so only 33 bytes are accepted.
pub fn decode_pubkey(pubkey: &PubKey) -> Result<PubkeyBundle, EnigmaError> {
    let algo = match pubkey.kind.as_str() {
        SECP256K1_PUBKEY_TYPE => Algorithm::Secp256k1,
        ED25519_PUBKEY_TYPE => Algorithm::Ed25519,
        other => return Err(EnigmaError::UnsupportedPubkeyType(other.to_string())),
    };

    let data = STANDARD.decode(&pubkey.value)?;
    match algo {
        Algorithm::Secp256k1 if data.len() != COMPRESSED_LEN => {
            return Err(EnigmaError::InvalidPublicKey(format!(
                "wire secp256k1 key must be {COMPRESSED_LEN} bytes, got {}",
                data.len()
            )));
        }
        Algorithm::Secp256k1 => {}
        Algorithm::Ed25519 => check_ed25519(&data)?,
    }

    Ok(PubkeyBundle { algo, data })
}

/// Maps a public key to its wire form, compressing Secp256k1 keys.
pub fn encode_pubkey(pubkey: &PubkeyBundle) -> Result<PubKey, EnigmaError> {
    match pubkey.algo {
        Algorithm::Secp256k1 => {
            let compressed = compress_secp256k1(&pubkey.data)?;
            Ok(PubKey {
                kind: SECP256K1_PUBKEY_TYPE.to_string(),
                value: STANDARD.encode(compressed),
            })
        }
        Algorithm::Ed25519 => {
            check_ed25519(&pubkey.data)?;
            Ok(PubKey {
                kind: ED25519_PUBKEY_TYPE.to_string(),
                value: STANDARD.encode(&pubkey.data),
            })
        }
    }
}

/// Decodes a bech32 pubkey such as `enigmapub1addwnpepq...`.
pub fn decode_bech32_pubkey(
    bech: &str,
    expected_prefix: &str,
) -> Result<PubkeyBundle, EnigmaError> {
    let (hrp, data, variant) = bech32::decode(bech)
        .map_err(|e| EnigmaError::InvalidPublicKey(format!("bech32 decode failed: {e}")))?;

    if variant != Variant::Bech32 || hrp != expected_prefix {
        return Err(EnigmaError::InvalidPublicKey(format!(
            "expected bech32 prefix {expected_prefix}, got {hrp}"
        )));
    }

    let bytes = Vec::<u8>::from_base32(&data)
        .map_err(|e| EnigmaError::InvalidPublicKey(format!("invalid payload: {e}")))?;

    let (algo, key_len) = if bytes.starts_with(&SECP256K1_AMINO_PREFIX) {
        (Algorithm::Secp256k1, COMPRESSED_LEN)
    } else if bytes.starts_with(&ED25519_AMINO_PREFIX) {
        (Algorithm::Ed25519, ED25519_LEN)
    } else {
        return Err(EnigmaError::UnsupportedPubkeyType(format!(
            "unknown amino prefix {}",
            hex::encode(&bytes[..bytes.len().min(5)])
        )));
    };

    let key = &bytes[5..];
    if key.len() != key_len {
        return Err(EnigmaError::InvalidPublicKey(format!(
            "expected {key_len} key bytes, got {}",
            key.len()
        )));
    }

    Ok(PubkeyBundle {
        algo,
        data: key.to_vec(),
    })
}

/// Encodes a public key as a bech32 pubkey with its amino prefix.
pub fn encode_bech32_pubkey(pubkey: &PubkeyBundle, prefix: &str) -> Result<String, EnigmaError> {
    let mut payload = Vec::with_capacity(5 + COMPRESSED_LEN);
    match pubkey.algo {
        Algorithm::Secp256k1 => {
            payload.extend_from_slice(&SECP256K1_AMINO_PREFIX);
            payload.extend_from_slice(&compress_secp256k1(&pubkey.data)?);
        }
        Algorithm::Ed25519 => {
            check_ed25519(&pubkey.data)?;
            payload.extend_from_slice(&ED25519_AMINO_PREFIX);
            payload.extend_from_slice(&pubkey.data);
        }
    }

    bech32::encode(prefix, payload.to_base32(), Variant::Bech32)
        .map_err(|e| EnigmaError::InvalidPublicKey(format!("bech32 encode failed: {e}")))
}
