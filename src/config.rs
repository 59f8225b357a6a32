use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::fs;
use toml;

const DEVNET_URL: &str = "https://api.devnet.solana.com";
const LOCALNET_URL: &str = "http://127.0.0.1:8899";

/// Environment variable carrying an external fee-collection owner. When set,
/// the owner-withdraw fee pair is zeroed, matching production pools.
pub const FEE_OWNER_ENV: &str = "SWAP_PROGRAM_OWNER_FEE_ADDRESS";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub rpc: Rpc,
    pub wallet: Wallet,
    pub pool: PoolSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Rpc {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Wallet {
    pub payer_path: String,
    pub owner_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PoolSettings {
    pub address: Option<String>,
    pub fee_route: Option<String>,
    #[serde(default = "default_confirm_timeout_secs")]
    pub confirm_timeout_secs: u64,
}

fn default_confirm_timeout_secs() -> u64 {
    30
}

pub fn read_config(path: &str) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;

    if let Ok(fee_owner) = env::var(FEE_OWNER_ENV) {
        if !fee_owner.is_empty() {
            config.pool.fee_route = Some(fee_owner);
        }
    }

    Ok(config)
}

/// Resolves the `--network` shorthand to an endpoint. Unknown values are
/// passed through as a literal URL.
pub fn endpoint_for(network: &str) -> String {
    match network {
        "dev" | "devnet" => DEVNET_URL.to_string(),
        "local" | "localnet" => LOCALNET_URL.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_shorthand_resolves() {
        assert_eq!(endpoint_for("dev"), DEVNET_URL);
        assert_eq!(endpoint_for("local"), LOCALNET_URL);
        assert_eq!(endpoint_for("http://example:8899"), "http://example:8899");
    }

    #[test]
    fn parses_minimal_config() {
        let raw = r#"
            [rpc]
            url = "http://127.0.0.1:8899"

            [wallet]
            payer_path = "payer.json"
            owner_path = "id.json"

            [pool]
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert!(config.pool.address.is_none());
        assert_eq!(config.pool.confirm_timeout_secs, 30);
    }
}
