//! Enigma chain wire support.
//!
//! This crate provides:
//! - Amino JSON wire types (`StdTx`, messages, fees, signatures)
//! - Bech32 account addresses and address derivation from public keys
//! - Public key normalization (Secp256k1 compression) and bech32 pubkeys
//! - Fixed-size signature encoding
//! - Canonical sign bytes with recursively sorted JSON keys
//! - A `Signer` seam with an in-process secp256k1 implementation
//! - REST response shapes consumed by connection code

pub mod address;
pub mod error;
pub mod pubkey;
pub mod rest;
pub mod sign_bytes;
pub mod signature;
pub mod signer;
pub mod types;

pub use address::{is_valid_address, pubkey_to_address, ACCOUNT_PREFIX, PUBKEY_PREFIX};
pub use error::EnigmaError;
pub use pubkey::{decode_pubkey, encode_pubkey, Algorithm, PubkeyBundle};
pub use sign_bytes::{make_sign_bytes, PrehashType, SigningJob};
pub use signature::{decode_signature, encode_signature};
pub use signer::{Secp256k1Signer, Signer};
pub use types::{Coin, CosmosSdkTx, Msg, PubKey, StdFee, StdSignature, StdTx};
