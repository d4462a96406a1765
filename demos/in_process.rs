use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use trinity_rpc::call::{GetBalance, GetNewAddress, SendToAddress};
use trinity_rpc::local::{LocalBackend, Node};
use trinity_rpc::{Backend, Result, RpcError};

/// Toy wallet standing in for the real in-process one.
struct DemoWallet {
    balance: f64,
    next: u32,
}

impl Node for DemoWallet {
    fn info(&self) -> std::result::Result<Value, RpcError> {
        Ok(json!({"version": 1, "balance": self.balance, "blocks": 0, "connections": 0}))
    }

    fn mining_info(&self) -> std::result::Result<Value, RpcError> {
        Ok(json!({"blocks": 0, "difficulty": 1.0, "hashespersec": 0}))
    }

    fn balance(&self) -> std::result::Result<f64, RpcError> {
        Ok(self.balance)
    }

    fn transactions(&self, _account: &str, _count: u64, _from: u64) -> std::result::Result<Value, RpcError> {
        Ok(json!([]))
    }

    fn received_by_address(&self, _min_conf: u64, _include_empty: bool) -> std::result::Result<Value, RpcError> {
        Ok(json!([]))
    }

    fn new_address(&mut self) -> std::result::Result<String, RpcError> {
        self.next += 1;
        Ok(format!("TDemo{}", self.next))
    }

    fn send_to_address(
        &mut self,
        _address: &str,
        amount: f64,
        _comment: Option<&str>,
    ) -> std::result::Result<String, RpcError> {
        if amount > self.balance {
            return Err(RpcError::new("Insufficient funds").with_code(-6));
        }
        self.balance -= amount;
        Ok("00".repeat(32))
    }

    fn block_hash(&self, _height: u64) -> std::result::Result<String, RpcError> {
        Err(RpcError::new("Block height out of range").with_code(-8))
    }

    fn block(&self, _hash: &str) -> std::result::Result<Value, RpcError> {
        Err(RpcError::new("Block not found").with_code(-5))
    }

    fn raw_transaction(&self, _txid: &str) -> std::result::Result<String, RpcError> {
        Err(RpcError::new("No information available about transaction").with_code(-5))
    }

    fn decode_raw_transaction(&self, _hex: &str) -> std::result::Result<Value, RpcError> {
        Err(RpcError::new("TX decode failed").with_code(-22))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let wallet = Arc::new(Mutex::new(DemoWallet { balance: 5.0, next: 0 }));
    let backend: Box<dyn Backend> = Box::new(LocalBackend::new(wallet));

    let address = backend.request(GetNewAddress)?;
    println!("new address {address}");
    println!("sent {}", backend.request(SendToAddress::new(address.clone(), 2.0))?);
    println!("balance {}", backend.request(GetBalance)?);

    if let Err(e) = backend.request(SendToAddress::new(address, 10.0)) {
        println!("RPC error (sendtoaddress): {e}");
    }
    Ok(())
}
