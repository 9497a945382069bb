//! The codec facade used by connection code.

use chain_enigma::types::{marshal_tx, unmarshal_tx};
use chain_enigma::{make_sign_bytes, pubkey_to_address, PrehashType, SigningJob};
use tracing::{debug, warn};

use crate::caip5;
use crate::config::TokenConfiguration;
use crate::decode::parse_signed_tx;
use crate::encode::{build_signed_tx, build_unsigned_tx};
use crate::error::CodecError;
use crate::types::{Nonce, PubkeyBundle, SignedTransaction, UnsignedTransaction};

/// Encodes and decodes transactions for one address prefix and token set.
#[derive(Debug, Clone)]
pub struct EnigmaCodec {
    prefix: String,
    tokens: TokenConfiguration,
}

impl EnigmaCodec {
    /// Creates a codec after checking that the token configuration is
    /// usable with `prefix`.
    pub fn new(prefix: impl Into<String>, tokens: TokenConfiguration) -> Result<Self, CodecError> {
        let prefix = prefix.into();
        tokens.validate(&prefix)?;
        Ok(Self { prefix, tokens })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn tokens(&self) -> &TokenConfiguration {
        &self.tokens
    }

    pub fn is_valid_address(&self, address: &str) -> bool {
        chain_enigma::is_valid_address(address, &self.prefix)
    }

    /// Derives the account address of `pubkey` under this codec's prefix.
    pub fn key_to_address(&self, pubkey: &PubkeyBundle) -> Result<String, CodecError> {
        Ok(pubkey_to_address(pubkey, &self.prefix)?)
    }

    /// Produces the bytes the sender's key must sign.
    pub fn bytes_to_sign(
        &self,
        tx: &UnsignedTransaction,
        nonce: Nonce,
    ) -> Result<SigningJob, CodecError> {
        let built = build_unsigned_tx(tx, &self.tokens)?;
        let chain_id = caip5::decode(tx.chain_id())?;

        let bytes = make_sign_bytes(
            &built.value.msg,
            &built.value.fee,
            &chain_id,
            &built.value.memo,
            nonce.account_number,
            nonce.sequence,
        )?;
        debug!(
            chain_id = %chain_id,
            account_number = nonce.account_number,
            sequence = nonce.sequence,
            len = bytes.len(),
            "created sign bytes"
        );

        Ok(SigningJob {
            bytes,
            prehash_type: PrehashType::Sha256,
        })
    }

    /// Serializes a signed transaction for broadcasting.
    pub fn bytes_to_post(&self, tx: &SignedTransaction) -> Result<Vec<u8>, CodecError> {
        let built = build_signed_tx(tx, &self.tokens)?;
        let bytes = marshal_tx(&built)?;
        debug!(
            signatures = built.value.signatures.len(),
            len = bytes.len(),
            "encoded transaction for posting"
        );
        Ok(bytes)
    }

    /// Parses posted bytes back into a signed transaction.
    ///
    /// The wire format carries no account number or sequence, so the caller
    /// must supply the nonce.
    pub fn parse_bytes(
        &self,
        bytes: &[u8],
        chain_id: &str,
        nonce: Option<Nonce>,
    ) -> Result<SignedTransaction, CodecError> {
        let nonce = nonce.ok_or_else(|| CodecError::Format("nonce is required".into()))?;

        let tx = unmarshal_tx(bytes)?;
        if !tx.is_std_tx() {
            warn!(kind = %tx.kind, "refusing to parse envelope");
            return Err(CodecError::UnsupportedKind(format!(
                "unsupported envelope type {}",
                tx.kind
            )));
        }

        parse_signed_tx(&tx.value, chain_id, nonce, &self.tokens)
    }
}
