//! Wire envelopes to generic transactions.
//!
//! Only single-message, single-signature envelopes are understood. Anything
//! else is rejected instead of picking one entry.

use chain_enigma::rest::TxsResponse;
use chain_enigma::types::{MsgExecuteContract, MsgSend};
use chain_enigma::{decode_pubkey, decode_signature, Msg, StdSignature, StdTx};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::TokenConfiguration;
use crate::error::CodecError;
use crate::tokens::{check_quantity, decode_amount, parse_fee};
use crate::types::{
    Amount, ConfirmedTransaction, FullSignature, Nonce, SendTransaction, SignedTransaction,
    UnsignedTransaction,
};

/// The only contract call understood: a token transfer.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TransferCall {
    transfer: Transfer,
}

#[derive(Deserialize)]
struct Transfer {
    recipient: String,
    amount: String,
}

pub fn decode_full_signature(
    signature: &StdSignature,
    nonce: Nonce,
) -> Result<FullSignature, CodecError> {
    Ok(FullSignature {
        nonce,
        pubkey: decode_pubkey(&signature.pub_key)?,
        signature: decode_signature(&signature.signature)?.to_vec(),
    })
}

fn parse_bank_send(
    send: &MsgSend,
    memo: &str,
    chain_id: &str,
    config: &TokenConfiguration,
) -> Result<SendTransaction, CodecError> {
    let [coin] = send.amount.as_slice() else {
        return Err(CodecError::Format(format!(
            "expected exactly one coin in bank send, got {}",
            send.amount.len()
        )));
    };

    Ok(SendTransaction {
        chain_id: chain_id.to_string(),
        sender: send.from_address.clone(),
        recipient: send.to_address.clone(),
        amount: decode_amount(&config.bank_tokens, coin)?,
        memo: memo.to_string(),
        fee: None,
    })
}

fn parse_contract_transfer(
    exec: &MsgExecuteContract,
    memo: &str,
    chain_id: &str,
    config: &TokenConfiguration,
) -> Result<SendTransaction, CodecError> {
    let token = config
        .contract_tokens
        .iter()
        .find(|t| t.contract_address == exec.contract)
        .ok_or_else(|| {
            CodecError::ConfigMismatch(format!("unknown token contract {}", exec.contract))
        })?;

    if !exec.sent_funds.is_empty() {
        return Err(CodecError::UnsupportedKind(format!(
            "contract transfer to {} carries {} sent funds",
            exec.contract,
            exec.sent_funds.len()
        )));
    }

    let call: TransferCall = serde_json::from_value(exec.msg.clone()).map_err(|_| {
        CodecError::UnsupportedKind(format!(
            "contract call to {} is not a transfer",
            exec.contract
        ))
    })?;
    check_quantity(&call.transfer.amount)?;

    Ok(SendTransaction {
        chain_id: chain_id.to_string(),
        sender: exec.sender.clone(),
        recipient: call.transfer.recipient,
        amount: Amount {
            quantity: call.transfer.amount,
            fractional_digits: token.fractional_digits,
            token_ticker: token.ticker.clone(),
        },
        memo: memo.to_string(),
        fee: None,
    })
}

/// Maps one wire message to a send transaction without fee.
pub fn parse_msg(
    msg: &Msg,
    memo: &str,
    chain_id: &str,
    config: &TokenConfiguration,
) -> Result<SendTransaction, CodecError> {
    match msg {
        Msg::Send(send) => parse_bank_send(send, memo, chain_id, config),
        Msg::ExecuteContract(exec) => parse_contract_transfer(exec, memo, chain_id, config),
        Msg::StoreCode(_) | Msg::InstantiateContract(_) | Msg::Other { .. } => {
            warn!(msg_type = msg.type_tag(), "refusing to parse message");
            Err(CodecError::UnsupportedKind(format!(
                "unsupported message type {}",
                msg.type_tag()
            )))
        }
    }
}

pub fn parse_unsigned_tx(
    tx: &StdTx,
    chain_id: &str,
    config: &TokenConfiguration,
) -> Result<UnsignedTransaction, CodecError> {
    let [msg] = tx.msg.as_slice() else {
        return Err(CodecError::Format(format!(
            "expected exactly one message, got {}",
            tx.msg.len()
        )));
    };

    let mut send = parse_msg(msg, &tx.memo, chain_id, config)?;
    send.fee = Some(parse_fee(&tx.fee, &config.bank_tokens)?);
    debug!(msg_type = msg.type_tag(), chain_id, "parsed transaction");
    Ok(UnsignedTransaction::Send(send))
}

/// Parses a signed envelope. The nonce is not part of the wire format and
/// is attached to the signature as given.
pub fn parse_signed_tx(
    tx: &StdTx,
    chain_id: &str,
    nonce: Nonce,
    config: &TokenConfiguration,
) -> Result<SignedTransaction, CodecError> {
    let [signature] = tx.signatures.as_slice() else {
        return Err(CodecError::Format(format!(
            "expected exactly one signature, got {}",
            tx.signatures.len()
        )));
    };

    Ok(SignedTransaction {
        transaction: parse_unsigned_tx(tx, chain_id, config)?,
        signatures: vec![decode_full_signature(signature, nonce)?],
    })
}

fn confirmation_info(
    current_height: u64,
    response: &TxsResponse,
) -> Result<(u64, u64), CodecError> {
    let height = response
        .height()
        .map_err(|e| CodecError::Format(e.to_string()))?;
    let confirmations = current_height
        .checked_sub(height)
        .map(|d| d + 1)
        .ok_or_else(|| {
            CodecError::Format(format!(
                "transaction height {height} is above current height {current_height}"
            ))
        })?;
    Ok((height, confirmations))
}

/// Parses a search result into an unsigned transaction with its position
/// on chain.
pub fn parse_txs_response_unsigned(
    chain_id: &str,
    current_height: u64,
    response: &TxsResponse,
    config: &TokenConfiguration,
) -> Result<ConfirmedTransaction<UnsignedTransaction>, CodecError> {
    let (height, confirmations) = confirmation_info(current_height, response)?;
    Ok(ConfirmedTransaction {
        transaction: parse_unsigned_tx(&response.tx.value, chain_id, config)?,
        height,
        confirmations,
        transaction_id: response.txhash.clone(),
        log: response.raw_log.clone(),
    })
}

pub fn parse_txs_response_signed(
    chain_id: &str,
    current_height: u64,
    nonce: Nonce,
    response: &TxsResponse,
    config: &TokenConfiguration,
) -> Result<ConfirmedTransaction<SignedTransaction>, CodecError> {
    let (height, confirmations) = confirmation_info(current_height, response)?;
    Ok(ConfirmedTransaction {
        transaction: parse_signed_tx(&response.tx.value, chain_id, nonce, config)?,
        height,
        confirmations,
        transaction_id: response.txhash.clone(),
        log: response.raw_log.clone(),
    })
}
