//! Chain-agnostic transaction model.

use serde::{Deserialize, Serialize};

pub use chain_enigma::pubkey::{Algorithm, PubkeyBundle};

/// Kind string of a token transfer.
pub const SEND_KIND: &str = "bcp/send";

/// A token quantity in minor units. `quantity` is never rescaled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    pub quantity: String,
    pub fractional_digits: u32,
    pub token_ticker: String,
}

/// Transaction fee. Both fields must be set before wire encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub tokens: Option<Amount>,
    pub gas_limit: Option<String>,
}

/// Account data the wire format does not carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nonce {
    pub account_number: u64,
    pub sequence: u64,
}

impl From<&chain_enigma::rest::CosmosSdkAccount> for Nonce {
    fn from(account: &chain_enigma::rest::CosmosSdkAccount) -> Self {
        Self {
            account_number: account.account_number,
            sequence: account.sequence,
        }
    }
}

/// A signature together with the key and nonce it was made with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullSignature {
    pub nonce: Nonce,
    pub pubkey: PubkeyBundle,
    pub signature: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTransaction {
    /// CAIP-5 chain id, e.g. `enigma:enigma-testnet`.
    pub chain_id: String,
    pub sender: String,
    pub recipient: String,
    pub amount: Amount,
    pub memo: String,
    pub fee: Option<Fee>,
}

/// A transaction of a kind this codec cannot encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherTransaction {
    pub kind: String,
    pub chain_id: String,
    pub fee: Option<Fee>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsignedTransaction {
    Send(SendTransaction),
    Other(OtherTransaction),
}

impl UnsignedTransaction {
    pub fn kind(&self) -> &str {
        match self {
            UnsignedTransaction::Send(_) => SEND_KIND,
            UnsignedTransaction::Other(tx) => &tx.kind,
        }
    }

    pub fn chain_id(&self) -> &str {
        match self {
            UnsignedTransaction::Send(tx) => &tx.chain_id,
            UnsignedTransaction::Other(tx) => &tx.chain_id,
        }
    }
}

impl From<SendTransaction> for UnsignedTransaction {
    fn from(tx: SendTransaction) -> Self {
        UnsignedTransaction::Send(tx)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub transaction: UnsignedTransaction,
    pub signatures: Vec<FullSignature>,
}

/// A transaction found on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedTransaction<T> {
    pub transaction: T,
    pub height: u64,
    /// 1 when the transaction is in the latest block.
    pub confirmations: u64,
    pub transaction_id: String,
    pub log: String,
}
