//! Canonical sign bytes.
//!
//! The chain verifies signatures over the compact JSON of a `StdSignDoc`
//! whose object keys are sorted at every nesting level. Arrays keep their
//! order. Account number and sequence are decimal strings.
//!
//! Key order is enforced by [`SortedJson`] rather than left to whatever map
//! type `serde_json::Value` happens to be built with.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::error::EnigmaError;
use crate::types::{Msg, StdFee};

/// Whether and how sign bytes are hashed before the signature algorithm
/// runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrehashType {
    Sha256,
}

/// Bytes an external signer must sign, with their pre-hash mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningJob {
    pub bytes: Vec<u8>,
    pub prehash_type: PrehashType,
}

/// A JSON value tree whose objects are always key-sorted.
#[derive(Debug, Clone, PartialEq)]
pub enum SortedJson {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<SortedJson>),
    Object(BTreeMap<String, SortedJson>),
}

impl From<Value> for SortedJson {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SortedJson::Null,
            Value::Bool(b) => SortedJson::Bool(b),
            Value::Number(n) => SortedJson::Number(n),
            Value::String(s) => SortedJson::String(s),
            Value::Array(items) => SortedJson::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                SortedJson::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl Serialize for SortedJson {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SortedJson::Null => serializer.serialize_unit(),
            SortedJson::Bool(b) => serializer.serialize_bool(*b),
            SortedJson::Number(n) => n.serialize(serializer),
            SortedJson::String(s) => serializer.serialize_str(s),
            SortedJson::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            SortedJson::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Serializes any value as compact JSON with recursively sorted keys.
pub fn to_sorted_json<T: Serialize>(value: &T) -> Result<Vec<u8>, EnigmaError> {
    let tree = SortedJson::from(serde_json::to_value(value)?);
    Ok(serde_json::to_vec(&tree)?)
}

#[derive(Serialize)]
struct StdSignDoc<'a> {
    account_number: String,
    chain_id: &'a str,
    fee: &'a StdFee,
    memo: &'a str,
    msgs: &'a [Msg],
    sequence: String,
}

/// Builds the exact bytes the chain verifies signatures against.
pub fn make_sign_bytes(
    msgs: &[Msg],
    fee: &StdFee,
    chain_id: &str,
    memo: &str,
    account_number: u64,
    sequence: u64,
) -> Result<Vec<u8>, EnigmaError> {
    let doc = StdSignDoc {
        account_number: account_number.to_string(),
        chain_id,
        fee,
        memo,
        msgs,
        sequence: sequence.to_string(),
    };
    to_sorted_json(&doc)
}
