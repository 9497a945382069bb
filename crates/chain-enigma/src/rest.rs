//! Response shapes of the chain's REST interface.
//!
//! Only the parts the codec consumes are modelled. Performing the HTTP
//! calls is left to the connection layer.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::EnigmaError;
use crate::pubkey::{decode_bech32_pubkey, PubkeyBundle};
use crate::types::{Coin, CosmosSdkTx};

/// An account as returned by `/auth/accounts/{address}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosmosSdkAccount {
    /// Bech32 account address
    pub address: String,
    #[serde(default)]
    pub coins: Vec<Coin>,
    /// Bech32 encoded pubkey, empty until the account signed something.
    #[serde(default)]
    pub public_key: String,
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub account_number: u64,
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub sequence: u64,
}

impl CosmosSdkAccount {
    /// Decodes the account's public key, if it is known to the chain.
    pub fn pubkey(&self, pubkey_prefix: &str) -> Result<Option<PubkeyBundle>, EnigmaError> {
        if self.public_key.is_empty() {
            return Ok(None);
        }
        decode_bech32_pubkey(&self.public_key, pubkey_prefix).map(Some)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: CosmosSdkAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthAccountsResponse {
    pub height: String,
    pub result: AccountEnvelope,
}

/// A transaction found by hash or search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxsResponse {
    pub height: String,
    pub txhash: String,
    pub raw_log: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Value>,
    pub tx: CosmosSdkTx,
    /// The gas limit as set by the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_wanted: Option<String>,
    /// The gas used by the execution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<String>,
    pub timestamp: String,
}

impl TxsResponse {
    /// Block height the transaction was included in.
    pub fn height(&self) -> Result<u64, EnigmaError> {
        self.height.parse().map_err(|_| {
            EnigmaError::EncodingError(format!("invalid block height {:?}", self.height))
        })
    }
}

/// A page of transactions returned by `/txs?...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchTxsResponse {
    pub total_count: String,
    pub count: String,
    pub page_number: String,
    pub page_total: String,
    pub limit: String,
    pub txs: Vec<TxsResponse>,
}

/// Result of broadcasting a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostTxsResponse {
    pub height: String,
    pub txhash: String,
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub raw_log: Option<String>,
    #[serde(default)]
    pub logs: Option<Value>,
    #[serde(default)]
    pub gas_wanted: Option<String>,
    #[serde(default)]
    pub gas_used: Option<String>,
}

impl PostTxsResponse {
    /// A missing or zero code means the chain accepted the transaction.
    pub fn is_success(&self) -> bool {
        self.code.unwrap_or(0) == 0
    }
}

/// Older nodes render account numbers as JSON numbers, newer ones as
/// strings.
fn u64_from_number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{pubkey_to_address, ACCOUNT_PREFIX, PUBKEY_PREFIX};
    use crate::types::Msg;

    const VALIDATOR_ACCOUNT: &str = r#"{
        "height": "12",
        "result": {
            "type": "cosmos-sdk/Account",
            "value": {
                "address": "enigma16qu479grzwanyzav6xvtzncgdjkwhqw7avnahm",
                "coins": [
                    { "denom": "uscrt", "amount": "899901235" },
                    { "denom": "validatortoken", "amount": "1000000000" }
                ],
                "public_key": "enigmapub1addwnpepqdw5huzg45t8qwnzcemyz2wmxrvc474zx6f3e84u8df8uyl28vrjjfx4jhl",
                "account_number": 3,
                "sequence": 2
            }
        }
    }"#;

    const QUERY_TX: &str = r#"{
        "height": "4",
        "txhash": "8A4613D62884EF8BB9BCCDDA3833D560701908BF17FE82A570EECCBACEF94A91",
        "raw_log": "[{\"msg_index\":0,\"log\":\"\"}]",
        "logs": [{ "msg_index": 0, "log": "", "events": [] }],
        "gas_wanted": "200000",
        "gas_used": "53254",
        "tx": {
            "type": "cosmos-sdk/StdTx",
            "value": {
                "msg": [{
                    "type": "cosmos-sdk/MsgSend",
                    "value": {
                        "from_address": "enigma16qu479grzwanyzav6xvtzncgdjkwhqw7avnahm",
                        "to_address": "enigma1ltkhnmdcqemmd2tkhnx7qx66tq7e0wyklztm35",
                        "amount": [{ "denom": "uscrt", "amount": "98765" }]
                    }
                }],
                "fee": { "amount": [], "gas": "200000" },
                "signatures": [{
                    "pub_key": {
                        "type": "tendermint/PubKeySecp256k1",
                        "value": "A11L8EitFnA6YsZ2QSnbMNmK+qI2kxyevDtSfhPqOwcp"
                    },
                    "signature": "qCeKoqZeaL0LThKrUXHLgu72jwTiF+DseSBjcKHtcONE0kIdybwYJpuYg3Jj71hmfync+daHNdqgJlPRma0pPA=="
                }],
                "memo": ""
            }
        },
        "timestamp": "2020-02-03T17:06:58Z"
    }"#;

    #[test]
    fn parse_account_response() {
        let response: AuthAccountsResponse = serde_json::from_str(VALIDATOR_ACCOUNT).unwrap();
        let account = response.result.value;
        assert_eq!(account.account_number, 3);
        assert_eq!(account.sequence, 2);
        assert_eq!(account.coins.len(), 2);

        let pubkey = account.pubkey(PUBKEY_PREFIX).unwrap().unwrap();
        assert_eq!(
            pubkey_to_address(&pubkey, ACCOUNT_PREFIX).unwrap(),
            account.address
        );
    }

    #[test]
    fn account_numbers_may_be_strings() {
        let json = r#"{"address":"enigma1ltkhnmdcqemmd2tkhnx7qx66tq7e0wyklztm35","coins":[],"public_key":"","account_number":"7","sequence":"0"}"#;
        let account: CosmosSdkAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_number, 7);
        assert_eq!(account.sequence, 0);
        assert_eq!(account.pubkey(PUBKEY_PREFIX).unwrap(), None);
    }

    #[test]
    fn account_number_rejects_garbage() {
        let json = r#"{"address":"a","account_number":"seven","sequence":0}"#;
        assert!(serde_json::from_str::<CosmosSdkAccount>(json).is_err());
    }

    #[test]
    fn parse_query_tx_response() {
        let response: TxsResponse = serde_json::from_str(QUERY_TX).unwrap();
        assert_eq!(response.height().unwrap(), 4);
        assert!(response.tx.is_std_tx());
        assert!(matches!(response.tx.value.msg[0], Msg::Send(_)));
        assert_eq!(response.gas_used.as_deref(), Some("53254"));
    }

    #[test]
    fn parse_search_txs_response() {
        let json = format!(
            r#"{{"total_count":"1","count":"1","page_number":"1","page_total":"1","limit":"30","txs":[{QUERY_TX}]}}"#
        );
        let response: SearchTxsResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(response.total_count, "1");
        assert_eq!(response.limit, "30");
        assert_eq!(response.txs.len(), 1);
        assert_eq!(
            response.txs[0].txhash,
            "8A4613D62884EF8BB9BCCDDA3833D560701908BF17FE82A570EECCBACEF94A91"
        );
        assert_eq!(response.txs[0].height().unwrap(), 4);
    }

    #[test]
    fn empty_search_has_no_txs() {
        let json = r#"{"total_count":"0","count":"0","page_number":"1","page_total":"0","limit":"30","txs":[]}"#;
        let response: SearchTxsResponse = serde_json::from_str(json).unwrap();
        assert!(response.txs.is_empty());
    }

    #[test]
    fn bad_height_is_an_error() {
        let mut response: TxsResponse = serde_json::from_str(QUERY_TX).unwrap();
        response.height = "four".into();
        assert!(response.height().is_err());
    }

    #[test]
    fn post_response_success_flag() {
        let ok: PostTxsResponse =
            serde_json::from_str(r#"{"height":"0","txhash":"AB"}"#).unwrap();
        assert!(ok.is_success());

        let failed: PostTxsResponse =
            serde_json::from_str(r#"{"height":"0","txhash":"AB","code":4,"raw_log":"unauthorized"}"#)
                .unwrap();
        assert!(!failed.is_success());
    }
}
