//! CAIP-5 chain identifiers.
//!
//! A chain id is exposed as `enigma:<reference>`. Ids that fit the reference
//! charset are used as is ("direct" form); anything else is replaced by a
//! truncated SHA-256 ("hashed" form), which cannot be decoded again.

use sha2::{Digest, Sha256};

use crate::error::CodecError;

/// CAIP-5 namespace of all chain ids produced by this codec.
pub const NAMESPACE: &str = "enigma";

const HASHED_PREFIX: &str = "hashed-";
const MAX_REFERENCE_LEN: usize = 47;
/// Number of digest bytes kept in a hashed reference.
const HASH_BYTES: usize = 8;

/// Whether `reference` may be used verbatim: 1 to 47 characters out of
/// `[A-Za-z0-9-]`.
fn is_direct_reference(reference: &str) -> bool {
    !reference.is_empty()
        && reference.len() <= MAX_REFERENCE_LEN
        && reference
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Encodes an internal chain id as `enigma:<reference>`.
pub fn encode(internal_id: &str) -> Result<String, CodecError> {
    if internal_id.is_empty() {
        return Err(CodecError::Validation("input must not be empty".into()));
    }

    if is_direct_reference(internal_id) && !internal_id.starts_with(HASHED_PREFIX) {
        return Ok(format!("{NAMESPACE}:{internal_id}"));
    }

    let digest = Sha256::digest(internal_id.as_bytes());
    Ok(format!(
        "{NAMESPACE}:{HASHED_PREFIX}{}",
        hex::encode(&digest[..HASH_BYTES])
    ))
}

/// Decodes `enigma:<reference>` back into the internal chain id.
pub fn decode(chain_id: &str) -> Result<String, CodecError> {
    let not_caip5 = || CodecError::Format(format!("chain ID {chain_id:?} not compatible with CAIP-5"));

    let (namespace, reference) = chain_id.split_once(':').ok_or_else(not_caip5)?;
    if namespace != NAMESPACE {
        return Err(not_caip5());
    }

    if reference.starts_with(HASHED_PREFIX) {
        return Err(CodecError::HashedChainId(chain_id.to_string()));
    }

    if !is_direct_reference(reference) {
        return Err(not_caip5());
    }

    Ok(reference.to_string())
}
