//! Chain-agnostic transaction codec for the Enigma chain.
//!
//! This crate provides:
//! - A generic transaction model (sends, fees, nonces, signatures)
//! - CAIP-5 chain ids under the `enigma` namespace
//! - Token configuration and ticker resolution for bank and contract tokens
//! - Building wire envelopes from generic transactions and parsing them back
//! - [`EnigmaCodec`], the facade producing sign bytes and postable bytes
//!
//! All operations are pure. The token configuration is handed in once and
//! only read afterwards.

pub mod caip5;
pub mod codec;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod tokens;
pub mod types;

pub use codec::EnigmaCodec;
pub use config::{BankToken, ContractToken, TokenConfiguration};
pub use error::CodecError;
pub use types::{
    Amount, ConfirmedTransaction, Fee, FullSignature, Nonce, OtherTransaction, SendTransaction,
    SignedTransaction, UnsignedTransaction, SEND_KIND,
};

pub use chain_enigma::{Algorithm, PrehashType, PubkeyBundle, SigningJob};
