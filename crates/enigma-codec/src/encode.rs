//! Generic transactions to wire envelopes.

use chain_enigma::types::{MsgExecuteContract, MsgSend};
use chain_enigma::{encode_pubkey, encode_signature, CosmosSdkTx, Msg, StdSignature, StdTx};
use serde_json::json;
use tracing::{debug, warn};

use crate::config::TokenConfiguration;
use crate::error::CodecError;
use crate::tokens::{encode_fee, resolve_ticker, to_bank_coin, to_contract_amount, ResolvedToken};
use crate::types::{FullSignature, SendTransaction, SignedTransaction, UnsignedTransaction};

pub fn encode_full_signature(signature: &FullSignature) -> Result<StdSignature, CodecError> {
    Ok(StdSignature {
        pub_key: encode_pubkey(&signature.pubkey)?,
        signature: encode_signature(&signature.signature)?,
    })
}

/// Builds the single wire message that moves `tx.amount`.
///
/// Bank tokens become a bank send, contract tokens a `transfer` call on
/// the token contract.
fn build_send_msg(tx: &SendTransaction, config: &TokenConfiguration) -> Result<Msg, CodecError> {
    match resolve_ticker(&tx.amount.token_ticker, config)? {
        ResolvedToken::Bank(_) => Ok(Msg::Send(MsgSend {
            from_address: tx.sender.clone(),
            to_address: tx.recipient.clone(),
            amount: vec![to_bank_coin(&tx.amount, &config.bank_tokens)?],
        })),
        ResolvedToken::Contract(token) => {
            let amount = to_contract_amount(&tx.amount, token)?;
            Ok(Msg::ExecuteContract(MsgExecuteContract {
                sender: tx.sender.clone(),
                contract: token.contract_address.clone(),
                msg: json!({
                    "transfer": {
                        "recipient": tx.recipient,
                        "amount": amount,
                    }
                }),
                sent_funds: vec![],
            }))
        }
    }
}

/// Builds an envelope with an empty signature list.
pub fn build_unsigned_tx(
    tx: &UnsignedTransaction,
    config: &TokenConfiguration,
) -> Result<CosmosSdkTx, CodecError> {
    let send = match tx {
        UnsignedTransaction::Send(send) => send,
        UnsignedTransaction::Other(other) => {
            warn!(kind = %other.kind, "refusing to encode transaction");
            return Err(CodecError::UnsupportedKind(format!(
                "received transaction of unsupported kind: {}",
                other.kind
            )));
        }
    };

    let fee = send
        .fee
        .as_ref()
        .ok_or_else(|| CodecError::ConfigMismatch("transaction fee must be set".into()))?;

    let msg = build_send_msg(send, config)?;
    debug!(msg_type = msg.type_tag(), ticker = %send.amount.token_ticker, "built send message");

    Ok(CosmosSdkTx::new(StdTx {
        msg: vec![msg],
        fee: encode_fee(fee, &config.bank_tokens)?,
        signatures: vec![],
        memo: send.memo.clone(),
    }))
}

/// Builds an envelope carrying every attached signature, in order.
pub fn build_signed_tx(
    tx: &SignedTransaction,
    config: &TokenConfiguration,
) -> Result<CosmosSdkTx, CodecError> {
    let mut built = build_unsigned_tx(&tx.transaction, config)?;
    built.value.signatures = tx
        .signatures
        .iter()
        .map(encode_full_signature)
        .collect::<Result<_, _>>()?;
    Ok(built)
}
