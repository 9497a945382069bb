//! The signing seam.
//!
//! The codec only produces sign bytes; turning them into a signature is the
//! job of a [`Signer`]. [`Secp256k1Signer`] is the in-process implementation
//! used by tooling and tests. Key derivation is not handled here.

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature, SigningKey};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::EnigmaError;
use crate::pubkey::{Algorithm, PubkeyBundle};
use crate::sign_bytes::PrehashType;
use crate::signature::SIGNATURE_LENGTH;

/// Something that can sign sign bytes on behalf of one account.
pub trait Signer {
    /// The public key signatures verify against.
    fn pubkey(&self) -> PubkeyBundle;

    /// Signs `bytes`, hashing them first as `prehash` demands.
    fn sign(
        &self,
        bytes: &[u8],
        prehash: PrehashType,
    ) -> Result<[u8; SIGNATURE_LENGTH], EnigmaError>;
}

/// ECDSA over secp256k1 with low-S, fixed-size signatures.
pub struct Secp256k1Signer {
    // SigningKey zeroizes its scalar on drop.
    key: SigningKey,
}

impl Secp256k1Signer {
    /// Creates a signer from a 32-byte private key.
    pub fn from_bytes(private_key: &[u8; 32]) -> Result<Self, EnigmaError> {
        let mut key_bytes = *private_key;
        let key = SigningKey::from_bytes((&key_bytes).into())
            .map_err(|e| EnigmaError::SigningError(format!("invalid private key: {e}")));
        key_bytes.zeroize();
        Ok(Self { key: key? })
    }
}

impl Signer for Secp256k1Signer {
    fn pubkey(&self) -> PubkeyBundle {
        let point = self.key.verifying_key().to_encoded_point(true);
        PubkeyBundle {
            algo: Algorithm::Secp256k1,
            data: point.as_bytes().to_vec(),
        }
    }

    fn sign(
        &self,
        bytes: &[u8],
        prehash: PrehashType,
    ) -> Result<[u8; SIGNATURE_LENGTH], EnigmaError> {
        let digest = match prehash {
            PrehashType::Sha256 => Sha256::digest(bytes),
        };

        let signature: Signature = self
            .key
            .sign_prehash(digest.as_slice())
            .map_err(|e| EnigmaError::SigningError(e.to_string()))?;
        // Normalize to low-S, which the chain requires.
        let signature = signature.normalize_s().unwrap_or(signature);

        let mut out = [0u8; SIGNATURE_LENGTH];
        out.copy_from_slice(&signature.to_bytes());
        Ok(out)
    }
}
