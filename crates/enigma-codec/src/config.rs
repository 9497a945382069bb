//! Token configuration.
//!
//! The codec knows two token families: native bank tokens, identified by
//! their denom, and contract tokens, identified by the contract that keeps
//! their balances. The configuration is supplied once and read-only from
//! then on.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// A token held by the bank module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankToken {
    pub ticker: String,
    /// Denomination of the minor unit, e.g. `uscrt`.
    pub denom: String,
    pub fractional_digits: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A token whose balances live in a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractToken {
    pub ticker: String,
    /// Bech32 address of the token contract
    pub contract_address: String,
    pub fractional_digits: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenConfiguration {
    #[serde(default)]
    pub bank_tokens: Vec<BankToken>,
    #[serde(default, alias = "erc20Tokens")]
    pub contract_tokens: Vec<ContractToken>,
}

impl TokenConfiguration {
    /// Parses a configuration from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        serde_json::from_str(json).map_err(|e| CodecError::Config(format!("json: {e}")))
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CodecError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Checks that every ticker resolves to exactly one token.
    ///
    /// Tickers must be non-empty and unique across both lists, denoms must
    /// be unique, and contract addresses must be account addresses under
    /// `prefix`.
    pub fn validate(&self, prefix: &str) -> Result<(), CodecError> {
        let mut tickers = HashSet::new();
        let tokens = self
            .bank_tokens
            .iter()
            .map(|t| t.ticker.as_str())
            .chain(self.contract_tokens.iter().map(|t| t.ticker.as_str()));
        for ticker in tokens {
            if ticker.is_empty() {
                return Err(CodecError::Config("empty ticker".into()));
            }
            if !tickers.insert(ticker) {
                return Err(CodecError::Config(format!("duplicate ticker {ticker}")));
            }
        }

        let mut denoms = HashSet::new();
        for token in &self.bank_tokens {
            if token.denom.is_empty() {
                return Err(CodecError::Config(format!(
                    "empty denom for ticker {}",
                    token.ticker
                )));
            }
            if !denoms.insert(token.denom.as_str()) {
                return Err(CodecError::Config(format!("duplicate denom {}", token.denom)));
            }
        }

        for token in &self.contract_tokens {
            if !chain_enigma::is_valid_address(&token.contract_address, prefix) {
                return Err(CodecError::Config(format!(
                    "invalid contract address {} for ticker {}",
                    token.contract_address, token.ticker
                )));
            }
        }

        Ok(())
    }

    /// Tokens of the local development chain.
    pub fn development() -> Self {
        Self {
            bank_tokens: vec![
                BankToken {
                    ticker: "SCRT".into(),
                    denom: "uscrt".into(),
                    fractional_digits: 6,
                    name: Some("Fee Token".into()),
                },
                BankToken {
                    ticker: "STAKE".into(),
                    denom: "ustake".into(),
                    fractional_digits: 6,
                    name: Some("Staking Token".into()),
                },
            ],
            contract_tokens: vec![ContractToken {
                ticker: "ISA".into(),
                contract_address: "enigma1hqrdl6wstt8qzshwc6mrumpjk9338k0lja5ur0".into(),
                fractional_digits: 0,
                name: Some("Isa Token".into()),
            }],
        }
    }
}
