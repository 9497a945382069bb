//! Amino JSON wire types of the Enigma chain REST interface.
//!
//! Field names and ordering follow the JSON the chain emits and accepts.
//! Struct field order matters: `serde_json` serializes fields in declaration
//! order, which is the order used for posted transactions.

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Type tag of the top-level transaction envelope.
pub const STD_TX_TYPE: &str = "cosmos-sdk/StdTx";

/// Type tag of a bank module token transfer.
pub const MSG_SEND_TYPE: &str = "cosmos-sdk/MsgSend";

/// Type tag of a compute module contract call.
pub const MSG_EXECUTE_CONTRACT_TYPE: &str = "compute/execute";

/// Type tag of a compute module Wasm upload.
pub const MSG_STORE_CODE_TYPE: &str = "compute/store-code";

/// Type tag of a compute module contract instantiation.
pub const MSG_INSTANTIATE_CONTRACT_TYPE: &str = "compute/instantiate";

/// An amount of a single denomination, in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    pub gas: String,
}

/// A typed public key as it appears in signatures.
///
/// `value` is base64 in all cases. Secp256k1 keys are always compressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdSignature {
    pub pub_key: PubKey,
    /// Base64 of the fixed 64-byte signature.
    pub signature: String,
}

/// Bank module token transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsgSend {
    /// Bech32 account address
    pub from_address: String,
    /// Bech32 account address
    pub to_address: String,
    pub amount: Vec<Coin>,
}

/// Calls a contract that was instantiated before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsgExecuteContract {
    /// Bech32 account address
    pub sender: String,
    /// Bech32 contract address
    pub contract: String,
    /// Handle message as arbitrary JSON.
    pub msg: Value,
    pub sent_funds: Vec<Coin>,
}

/// Uploads Wasm code to the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsgStoreCode {
    pub sender: String,
    /// Base64 encoded Wasm
    pub wasm_byte_code: String,
    /// URI of the contract's source code. Can be empty.
    pub source: String,
    /// A docker tag. Can be empty.
    pub builder: String,
}

/// Creates a contract instance from previously uploaded code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsgInstantiateContract {
    pub sender: String,
    pub code_id: String,
    pub label: String,
    pub init_msg: Value,
    pub init_funds: Vec<Coin>,
}

/// A wire message, tagged by its `type` field.
///
/// Unknown tags deserialize into [`Msg::Other`] so that envelopes found on
/// chain always parse; it is up to the caller to reject them.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Send(MsgSend),
    ExecuteContract(MsgExecuteContract),
    StoreCode(MsgStoreCode),
    InstantiateContract(MsgInstantiateContract),
    Other { kind: String, value: Value },
}

impl Msg {
    /// Builds a message from its `type` tag and raw `value`.
    ///
    /// Fails only when a known tag carries a value of the wrong shape.
    pub fn from_parts(kind: String, value: Value) -> Result<Self, serde_json::Error> {
        let msg = match kind.as_str() {
            MSG_SEND_TYPE => Msg::Send(serde_json::from_value(value)?),
            MSG_EXECUTE_CONTRACT_TYPE => Msg::ExecuteContract(serde_json::from_value(value)?),
            MSG_STORE_CODE_TYPE => Msg::StoreCode(serde_json::from_value(value)?),
            MSG_INSTANTIATE_CONTRACT_TYPE => {
                Msg::InstantiateContract(serde_json::from_value(value)?)
            }
            _ => Msg::Other { kind, value },
        };
        Ok(msg)
    }

    /// The wire `type` tag of this message.
    pub fn type_tag(&self) -> &str {
        match self {
            Msg::Send(_) => MSG_SEND_TYPE,
            Msg::ExecuteContract(_) => MSG_EXECUTE_CONTRACT_TYPE,
            Msg::StoreCode(_) => MSG_STORE_CODE_TYPE,
            Msg::InstantiateContract(_) => MSG_INSTANTIATE_CONTRACT_TYPE,
            Msg::Other { kind, .. } => kind,
        }
    }
}

impl Serialize for Msg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Msg", 2)?;
        state.serialize_field("type", self.type_tag())?;
        match self {
            Msg::Send(value) => state.serialize_field("value", value)?,
            Msg::ExecuteContract(value) => state.serialize_field("value", value)?,
            Msg::StoreCode(value) => state.serialize_field("value", value)?,
            Msg::InstantiateContract(value) => state.serialize_field("value", value)?,
            Msg::Other { value, .. } => state.serialize_field("value", value)?,
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct RawMsg {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    value: Value,
}

impl<'de> Deserialize<'de> for Msg {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawMsg::deserialize(deserializer)?;
        Msg::from_parts(raw.kind, raw.value).map_err(D::Error::custom)
    }
}

/// An Amino `StdTx`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdTx {
    pub msg: Vec<Msg>,
    pub fee: StdFee,
    pub signatures: Vec<StdSignature>,
    #[serde(default)]
    pub memo: String,
}

/// The top-level `{type, value}` envelope around a [`StdTx`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmosSdkTx {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: StdTx,
}

impl CosmosSdkTx {
    /// Wraps a `StdTx` in the standard envelope.
    pub fn new(value: StdTx) -> Self {
        Self {
            kind: STD_TX_TYPE.to_string(),
            value,
        }
    }

    pub fn is_std_tx(&self) -> bool {
        self.kind == STD_TX_TYPE
    }
}

/// Serializes a transaction envelope as posted to the chain.
pub fn marshal_tx(tx: &CosmosSdkTx) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(tx)
}

/// Parses a posted transaction envelope.
pub fn unmarshal_tx(bytes: &[u8]) -> Result<CosmosSdkTx, serde_json::Error> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn send_msg() -> Msg {
        Msg::Send(MsgSend {
            from_address: "enigma1h806c7khnvmjlywdrkdgk2vrayy2mmvf5tl20p".into(),
            to_address: "enigma1z7g5w84ynmjyg0kqpahdjqpj7yq34v3sds0a2m".into(),
            amount: vec![Coin {
                denom: "uscrt".into(),
                amount: "11657995".into(),
            }],
        })
    }

    #[test]
    fn msg_send_serializes_with_type_and_value() {
        let encoded = serde_json::to_string(&send_msg()).unwrap();
        assert_eq!(
            encoded,
            r#"{"type":"cosmos-sdk/MsgSend","value":{"from_address":"enigma1h806c7khnvmjlywdrkdgk2vrayy2mmvf5tl20p","to_address":"enigma1z7g5w84ynmjyg0kqpahdjqpj7yq34v3sds0a2m","amount":[{"denom":"uscrt","amount":"11657995"}]}}"#
        );
    }

    #[test]
    fn msg_send_deserializes_from_chain_json() {
        let raw = json!({
            "type": "cosmos-sdk/MsgSend",
            "value": {
                "from_address": "enigma1h806c7khnvmjlywdrkdgk2vrayy2mmvf5tl20p",
                "to_address": "enigma1z7g5w84ynmjyg0kqpahdjqpj7yq34v3sds0a2m",
                "amount": [{ "denom": "uscrt", "amount": "11657995" }]
            }
        });
        let msg: Msg = serde_json::from_value(raw).unwrap();
        assert_eq!(msg, send_msg());
    }

    #[test]
    fn execute_contract_keeps_arbitrary_handle_msg() {
        let raw = json!({
            "type": "compute/execute",
            "value": {
                "sender": "enigma1h806c7khnvmjlywdrkdgk2vrayy2mmvf5tl20p",
                "contract": "enigma18vd8fpwxzck93qlwghaj6arh4p7c5n89d2p9uk",
                "msg": { "transfer": { "amount": "887878484", "recipient": "enigma1z7g5w84ynmjyg0kqpahdjqpj7yq34v3sds0a2m" } },
                "sent_funds": []
            }
        });
        let msg: Msg = serde_json::from_value(raw).unwrap();
        match msg {
            Msg::ExecuteContract(exec) => {
                assert_eq!(exec.msg["transfer"]["amount"], "887878484");
                assert!(exec.sent_funds.is_empty());
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let raw = json!({ "type": "staking/MsgDelegate", "value": { "delegator_address": "x" } });
        let msg: Msg = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(msg.type_tag(), "staking/MsgDelegate");
        assert_eq!(serde_json::to_value(&msg).unwrap(), raw);
    }

    #[test]
    fn known_tag_with_wrong_shape_fails() {
        let raw = json!({ "type": "cosmos-sdk/MsgSend", "value": { "from_address": 5 } });
        assert!(serde_json::from_value::<Msg>(raw).is_err());
    }

    #[test]
    fn envelope_round_trip_keeps_field_order() {
        let tx = CosmosSdkTx::new(StdTx {
            msg: vec![send_msg()],
            fee: StdFee {
                amount: vec![Coin {
                    denom: "uscrt".into(),
                    amount: "5000".into(),
                }],
                gas: "200000".into(),
            },
            signatures: vec![],
            memo: "hello".into(),
        });
        let bytes = marshal_tx(&tx).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with(r#"{"type":"cosmos-sdk/StdTx","value":{"msg":["#));
        assert!(text.ends_with(r#""signatures":[],"memo":"hello"}}"#));
        assert_eq!(unmarshal_tx(&bytes).unwrap(), tx);
    }

    #[test]
    fn missing_memo_defaults_to_empty() {
        let raw = r#"{"type":"cosmos-sdk/StdTx","value":{"msg":[],"fee":{"amount":[],"gas":"1"},"signatures":[]}}"#;
        let tx = unmarshal_tx(raw.as_bytes()).unwrap();
        assert!(tx.is_std_tx());
        assert_eq!(tx.value.memo, "");
    }
}
