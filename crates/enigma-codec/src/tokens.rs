//! Mapping between generic amounts and wire coins.
//!
//! Quantities are opaque integer strings in minor units and are never
//! rescaled. Fractional digits only serve as a cross-check against the
//! configuration.

use chain_enigma::{Coin, StdFee};

use crate::config::{BankToken, ContractToken, TokenConfiguration};
use crate::error::CodecError;
use crate::types::{Amount, Fee};

/// The configured token a ticker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedToken<'a> {
    Bank(&'a BankToken),
    Contract(&'a ContractToken),
}

/// Finds the single bank or contract token with `ticker`.
pub fn resolve_ticker<'a>(
    ticker: &str,
    config: &'a TokenConfiguration,
) -> Result<ResolvedToken<'a>, CodecError> {
    let mut matches = config
        .bank_tokens
        .iter()
        .filter(|t| t.ticker == ticker)
        .map(ResolvedToken::Bank)
        .chain(
            config
                .contract_tokens
                .iter()
                .filter(|t| t.ticker == ticker)
                .map(ResolvedToken::Contract),
        );

    match (matches.next(), matches.next()) {
        (Some(token), None) => Ok(token),
        (None, _) => Err(CodecError::ConfigMismatch(format!("unknown ticker {ticker}"))),
        (Some(_), Some(_)) => Err(CodecError::ConfigMismatch(format!(
            "ambiguous ticker {ticker}"
        ))),
    }
}

/// Checks that `quantity` is a non-negative decimal integer.
pub fn check_quantity(quantity: &str) -> Result<(), CodecError> {
    if quantity.is_empty() || !quantity.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::Validation(format!(
            "invalid quantity {quantity:?}: expected a decimal integer"
        )));
    }
    Ok(())
}

pub fn to_bank_coin(amount: &Amount, bank_tokens: &[BankToken]) -> Result<Coin, CodecError> {
    check_quantity(&amount.quantity)?;
    let token = bank_tokens
        .iter()
        .find(|t| t.ticker == amount.token_ticker)
        .ok_or_else(|| {
            CodecError::ConfigMismatch(format!("unknown ticker {}", amount.token_ticker))
        })?;

    Ok(Coin {
        denom: token.denom.clone(),
        amount: amount.quantity.clone(),
    })
}

pub fn decode_amount(bank_tokens: &[BankToken], coin: &Coin) -> Result<Amount, CodecError> {
    let token = bank_tokens
        .iter()
        .find(|t| t.denom == coin.denom)
        .ok_or_else(|| CodecError::ConfigMismatch(format!("unknown denom {}", coin.denom)))?;
    check_quantity(&coin.amount)?;

    Ok(Amount {
        quantity: coin.amount.clone(),
        fractional_digits: token.fractional_digits,
        token_ticker: token.ticker.clone(),
    })
}

/// Returns the quantity a contract token transfer carries.
pub fn to_contract_amount(amount: &Amount, token: &ContractToken) -> Result<String, CodecError> {
    if amount.token_ticker != token.ticker {
        return Err(CodecError::ConfigMismatch(format!(
            "ticker mismatch: {} vs {}",
            amount.token_ticker, token.ticker
        )));
    }
    if amount.fractional_digits != token.fractional_digits {
        return Err(CodecError::ConfigMismatch(format!(
            "fractional digits mismatch for {}: {} vs {}",
            token.ticker, amount.fractional_digits, token.fractional_digits
        )));
    }
    check_quantity(&amount.quantity)?;
    Ok(amount.quantity.clone())
}

pub fn encode_fee(fee: &Fee, bank_tokens: &[BankToken]) -> Result<StdFee, CodecError> {
    let tokens = fee
        .tokens
        .as_ref()
        .ok_or_else(|| CodecError::ConfigMismatch("cannot encode fee without tokens".into()))?;
    let gas = fee
        .gas_limit
        .as_ref()
        .ok_or_else(|| CodecError::ConfigMismatch("cannot encode fee without gas limit".into()))?;

    Ok(StdFee {
        amount: vec![to_bank_coin(tokens, bank_tokens)?],
        gas: gas.clone(),
    })
}

/// Parses a wire fee. Only single-coin fees are understood.
pub fn parse_fee(fee: &StdFee, bank_tokens: &[BankToken]) -> Result<Fee, CodecError> {
    let [coin] = fee.amount.as_slice() else {
        return Err(CodecError::Format(format!(
            "expected exactly one fee amount, got {}",
            fee.amount.len()
        )));
    };

    Ok(Fee {
        tokens: Some(decode_amount(bank_tokens, coin)?),
        gas_limit: Some(fee.gas.clone()),
    })
}
