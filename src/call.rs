use serde::ser::{SerializeSeq, Serializer};
use serde_json::Value;
use serde_with::{serde_as, DeserializeAs, DisplayFromStr, PickFirst, Same};

use crate::error::Error;
use crate::Result;

/// A remote method with its positional params and the shape of its result.
pub trait Call {
    type Response: serde::de::DeserializeOwned;

    fn method(&self) -> &'static str;
    fn serialize_params<S: SerializeSeq>(&self, _serializer: &mut S) -> std::result::Result<(), S::Error> {
        Ok(())
    }
    fn to_params(&self) -> Result<Vec<Value>>
    where
        Self: Sized,
    {
        let Value::Array(params) = serde_json::to_value(Params(self)).map_err(Error::Encode)? else {
            return Err(Error::Encode(serde::ser::Error::custom(
                "params did not serialize as an array",
            )));
        };
        Ok(params)
    }
}

macro_rules! option_element {
    ($opt: expr, $serializer: expr) => {
        if let Some(ref value) = $opt {
            $serializer.serialize_element(value)?;
        }
    };
}

/// Serializes a call's params as the positional array the node expects.
struct Params<'a, T>(&'a T);

impl<T> serde::Serialize for Params<'_, T>
where
    T: Call,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(None)?;
        self.0.serialize_params(&mut seq)?;
        seq.end()
    }
}

#[derive(Debug)]
pub struct GetInfo;
impl Call for GetInfo {
    type Response = InfoReply;

    fn method(&self) -> &'static str {
        "getinfo"
    }
}

#[serde_as]
#[derive(serde::Deserialize, Debug, Clone, Default, PartialEq)]
pub struct InfoReply {
    #[serde(default)]
    pub version: Option<Value>,
    #[serde(default)]
    pub protocolversion: Option<Value>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub blocks: Option<u64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub connections: Option<u64>,
    #[serde(default)]
    pub pow_algo: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub difficulty: Option<f64>,
}

#[derive(Debug)]
pub struct GetMiningInfo;
impl Call for GetMiningInfo {
    type Response = MiningInfoReply;

    fn method(&self) -> &'static str {
        "getmininginfo"
    }
}

#[serde_as]
#[derive(serde::Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MiningInfoReply {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub blocks: Option<u64>,
    #[serde(default)]
    pub pow_algo: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub difficulty: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub hashespersec: Option<f64>,
}

impl MiningInfoReply {
    /// Network power score: difficulty times hashrate, missing values count as zero.
    pub fn power_score(&self) -> f64 {
        self.difficulty.unwrap_or(0.0) * self.hashespersec.unwrap_or(0.0)
    }
}

#[derive(Debug)]
pub struct GetBalance;
impl Call for GetBalance {
    type Response = BalanceReply;

    fn method(&self) -> &'static str {
        "getbalance"
    }
}

/// Wallet balance in coins.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BalanceReply(pub f64);

impl<'de> serde::Deserialize<'de> for BalanceReply {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        PickFirst::<(Same, DisplayFromStr)>::deserialize_as(deserializer).map(BalanceReply)
    }
}

impl std::fmt::Display for BalanceReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub struct ListTransactions {
    pub account: String,
    pub count: u32,
    pub from: u32,
}

impl Default for ListTransactions {
    fn default() -> Self {
        Self {
            account: "*".to_string(),
            count: 10,
            from: 0,
        }
    }
}

impl Call for ListTransactions {
    type Response = Vec<TransactionEntry>;

    fn method(&self) -> &'static str {
        "listtransactions"
    }

    fn serialize_params<S: SerializeSeq>(&self, serializer: &mut S) -> std::result::Result<(), S::Error> {
        serializer.serialize_element(&self.account)?;
        serializer.serialize_element(&self.count)?;
        serializer.serialize_element(&self.from)?;
        Ok(())
    }
}

#[serde_as]
#[derive(serde::Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TransactionEntry {
    #[serde(default)]
    pub category: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub txid: Option<String>,
    /// Unix seconds.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub time: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub confirmations: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ListReceivedByAddress {
    pub min_conf: u32,
    pub include_empty: bool,
}

impl Default for ListReceivedByAddress {
    fn default() -> Self {
        Self {
            min_conf: 1,
            include_empty: false,
        }
    }
}

impl Call for ListReceivedByAddress {
    type Response = Vec<ReceivedEntry>;

    fn method(&self) -> &'static str {
        "listreceivedbyaddress"
    }

    fn serialize_params<S: SerializeSeq>(&self, serializer: &mut S) -> std::result::Result<(), S::Error> {
        serializer.serialize_element(&self.min_conf)?;
        serializer.serialize_element(&self.include_empty)?;
        Ok(())
    }
}

#[serde_as]
#[derive(serde::Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReceivedEntry {
    pub address: String,
    #[serde(default)]
    pub account: Option<String>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub amount: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub confirmations: i64,
}

#[derive(Debug)]
pub struct GetNewAddress;
impl Call for GetNewAddress {
    type Response = String;

    fn method(&self) -> &'static str {
        "getnewaddress"
    }
}

#[derive(Debug, Clone)]
pub struct SendToAddress {
    pub address: String,
    pub amount: f64,
    pub comment: Option<String>,
}

impl SendToAddress {
    pub fn new<S: Into<String>>(address: S, amount: f64) -> Self {
        Self {
            address: address.into(),
            amount,
            comment: None,
        }
    }

    pub fn comment<S: Into<String>>(mut self, comment: S) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl Call for SendToAddress {
    /// Transaction id.
    type Response = String;

    fn method(&self) -> &'static str {
        "sendtoaddress"
    }

    fn serialize_params<S: SerializeSeq>(&self, serializer: &mut S) -> std::result::Result<(), S::Error> {
        serializer.serialize_element(&self.address)?;
        serializer.serialize_element(&self.amount)?;
        option_element!(self.comment, serializer);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetBlockHash {
    pub height: u64,
}

impl Call for GetBlockHash {
    type Response = String;

    fn method(&self) -> &'static str {
        "getblockhash"
    }

    fn serialize_params<S: SerializeSeq>(&self, serializer: &mut S) -> std::result::Result<(), S::Error> {
        serializer.serialize_element(&self.height)
    }
}

#[derive(Debug, Clone)]
pub struct GetBlock {
    pub hash: String,
}

impl Call for GetBlock {
    type Response = BlockReply;

    fn method(&self) -> &'static str {
        "getblock"
    }

    fn serialize_params<S: SerializeSeq>(&self, serializer: &mut S) -> std::result::Result<(), S::Error> {
        serializer.serialize_element(&self.hash)
    }
}

#[serde_as]
#[derive(serde::Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BlockReply {
    pub hash: String,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub height: Option<u64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub confirmations: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub time: Option<i64>,
    /// Transaction ids, or full transactions on nodes that inline them.
    #[serde(default)]
    pub tx: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct GetRawTransaction {
    pub txid: String,
}

impl Call for GetRawTransaction {
    /// Hex-encoded transaction.
    type Response = String;

    fn method(&self) -> &'static str {
        "getrawtransaction"
    }

    fn serialize_params<S: SerializeSeq>(&self, serializer: &mut S) -> std::result::Result<(), S::Error> {
        serializer.serialize_element(&self.txid)
    }
}

#[derive(Debug, Clone)]
pub struct DecodeRawTransaction {
    pub hex: String,
}

impl Call for DecodeRawTransaction {
    type Response = Value;

    fn method(&self) -> &'static str {
        "decoderawtransaction"
    }

    fn serialize_params<S: SerializeSeq>(&self, serializer: &mut S) -> std::result::Result<(), S::Error> {
        serializer.serialize_element(&self.hex)
    }
}
