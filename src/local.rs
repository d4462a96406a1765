//! In-process backend: the same calls, answered by a wallet and chain index
//! living in this process instead of a remote node.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::backend::Backend;
use crate::error::{Error, RpcError};
use crate::Result;

pub const RPC_INVALID_PARAMETER: i64 = -8;
pub const RPC_METHOD_NOT_FOUND: i64 = -32601;
pub const RPC_INTERNAL_ERROR: i64 = -32603;

/// Wallet and chain-index operations the front-end needs.
///
/// Implemented outside this crate by whatever owns the live wallet. Results
/// use the same JSON shapes the node returns over RPC.
pub trait Node {
    fn info(&self) -> std::result::Result<Value, RpcError>;
    fn mining_info(&self) -> std::result::Result<Value, RpcError>;
    fn balance(&self) -> std::result::Result<f64, RpcError>;
    fn transactions(&self, account: &str, count: u64, from: u64) -> std::result::Result<Value, RpcError>;
    fn received_by_address(&self, min_conf: u64, include_empty: bool) -> std::result::Result<Value, RpcError>;
    fn new_address(&mut self) -> std::result::Result<String, RpcError>;
    fn send_to_address(
        &mut self,
        address: &str,
        amount: f64,
        comment: Option<&str>,
    ) -> std::result::Result<String, RpcError>;
    fn block_hash(&self, height: u64) -> std::result::Result<String, RpcError>;
    fn block(&self, hash: &str) -> std::result::Result<Value, RpcError>;
    fn raw_transaction(&self, txid: &str) -> std::result::Result<String, RpcError>;
    fn decode_raw_transaction(&self, hex: &str) -> std::result::Result<Value, RpcError>;
}

/// Forwards calls to an injected [`Node`], holding its lock for the whole call.
pub struct LocalBackend<N> {
    node: Arc<Mutex<N>>,
}

impl<N> Clone for LocalBackend<N> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<N: Node> LocalBackend<N> {
    pub fn new(node: Arc<Mutex<N>>) -> Self {
        Self { node }
    }

    fn dispatch(&self, method: &str, params: &[Value]) -> std::result::Result<Value, RpcError> {
        let mut node = self
            .node
            .lock()
            .map_err(|_| RpcError::new("Node context lock poisoned").with_code(RPC_INTERNAL_ERROR))?;
        let p = Positional(params);
        match method {
            "getinfo" => node.info(),
            "getmininginfo" => node.mining_info(),
            "getbalance" => node.balance().map(|b| json!(b)),
            "listtransactions" => {
                let account = p.opt_str(0, "account")?.unwrap_or("*");
                let count = p.opt_u64(1, "count")?.unwrap_or(10);
                let from = p.opt_u64(2, "from")?.unwrap_or(0);
                node.transactions(account, count, from)
            }
            "listreceivedbyaddress" => {
                let min_conf = p.opt_u64(0, "minconf")?.unwrap_or(1);
                let include_empty = p.opt_bool(1, "includeempty")?.unwrap_or(false);
                node.received_by_address(min_conf, include_empty)
            }
            "getnewaddress" => node.new_address().map(Value::String),
            "sendtoaddress" => {
                let address = p.str(0, "address")?;
                let amount = p.f64(1, "amount")?;
                let comment = p.opt_str(2, "comment")?;
                node.send_to_address(address, amount, comment)
                    .map(Value::String)
            }
            "getblockhash" => node.block_hash(p.u64(0, "height")?).map(Value::String),
            "getblock" => node.block(p.str(0, "hash")?),
            "getrawtransaction" => node.raw_transaction(p.str(0, "txid")?).map(Value::String),
            "decoderawtransaction" => node.decode_raw_transaction(p.str(0, "hexstring")?),
            _ => Err(RpcError::new("Method not found").with_code(RPC_METHOD_NOT_FOUND)),
        }
    }
}

impl<N: Node> Backend for LocalBackend<N> {
    fn call(&self, method: &str, params: &[Value]) -> Result<Value> {
        tracing::debug!("local call {method}");
        self.dispatch(method, params).map_err(|e| {
            tracing::warn!("local call {method} failed: {e}");
            Error::Rpc(e)
        })
    }
}

struct Positional<'a>(&'a [Value]);

impl<'a> Positional<'a> {
    fn get(&self, index: usize) -> Option<&'a Value> {
        self.0.get(index).filter(|v| !v.is_null())
    }

    fn required(&self, index: usize, name: &str) -> std::result::Result<&'a Value, RpcError> {
        self.get(index)
            .ok_or_else(|| invalid(format!("Missing parameter: {name}")))
    }

    fn str(&self, index: usize, name: &str) -> std::result::Result<&'a str, RpcError> {
        self.required(index, name)?
            .as_str()
            .ok_or_else(|| invalid(format!("Expected string for {name}")))
    }

    fn u64(&self, index: usize, name: &str) -> std::result::Result<u64, RpcError> {
        self.required(index, name)?
            .as_u64()
            .ok_or_else(|| invalid(format!("Expected non-negative integer for {name}")))
    }

    fn f64(&self, index: usize, name: &str) -> std::result::Result<f64, RpcError> {
        self.required(index, name)?
            .as_f64()
            .ok_or_else(|| invalid(format!("Expected number for {name}")))
    }

    fn opt_str(&self, index: usize, name: &str) -> std::result::Result<Option<&'a str>, RpcError> {
        self.get(index).map(|_| self.str(index, name)).transpose()
    }

    fn opt_u64(&self, index: usize, name: &str) -> std::result::Result<Option<u64>, RpcError> {
        self.get(index).map(|_| self.u64(index, name)).transpose()
    }

    fn opt_bool(&self, index: usize, name: &str) -> std::result::Result<Option<bool>, RpcError> {
        self.get(index)
            .map(|v| {
                v.as_bool()
                    .ok_or_else(|| invalid(format!("Expected boolean for {name}")))
            })
            .transpose()
    }
}

fn invalid(message: String) -> RpcError {
    RpcError::new(message).with_code(RPC_INVALID_PARAMETER)
}
