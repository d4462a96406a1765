use trinity_rpc::call::{
    GetBalance, GetBlock, GetBlockHash, GetInfo, GetMiningInfo, ListReceivedByAddress,
    ListTransactions,
};
use trinity_rpc::jsonrpc::to_text;
use trinity_rpc::{Backend, Client, Credentials, Result, DEFAULT_PORT};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let client = Client::new()?;
    client.configure(Credentials::new(
        env_or("TRINITY_RPC_HOST", "127.0.0.1"),
        env_or("TRINITY_RPC_PORT", "")
            .parse()
            .unwrap_or(DEFAULT_PORT),
        env_or("TRINITY_RPC_USER", ""),
        env_or("TRINITY_RPC_PASSWORD", ""),
        env_or("TRINITY_RPC_TLS", "0") == "1",
    ));
    if !client.is_configured() {
        println!("Provide RPC username and password.");
        return Ok(());
    }

    let info = client.request(GetInfo)?;
    println!("{:?}", info);

    match client.request(GetMiningInfo) {
        Ok(mining) => println!(
            "{} H/s, power score {:.2}",
            mining.hashespersec.unwrap_or_default(),
            mining.power_score()
        ),
        Err(e) => println!("RPC error (getmininginfo): {e}"),
    }

    println!("balance {}", client.request(GetBalance)?);
    for tx in client.request(ListTransactions::default())? {
        println!("{:?}", tx);
    }
    for received in client.request(ListReceivedByAddress::default())? {
        println!("{:?}", received);
    }

    let hash = client.request(GetBlockHash { height: 0 })?;
    let block = client.request(GetBlock { hash })?;
    println!("block {} has {} transactions", block.hash, block.tx.len());

    // Raw form, as the panels render unknown fields.
    let raw = client.call("getinfo", &[])?;
    println!("{}", to_text(&raw));
    Ok(())
}
