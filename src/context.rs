use crate::config::Config;
use crate::io;
use anchor_client::solana_client::nonblocking::rpc_client::RpcClient;
use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_client::solana_sdk::signature::Keypair;
use anchor_client::solana_sdk::signer::Signer;
use anyhow::Result;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Explicit handle for everything a lifecycle or swap call needs: RPC
/// connection, fee payer, pool operator, and the optional external
/// fee-collection owner. Passed by reference into every remote operation so
/// independent pools can be driven by independent contexts.
pub struct ClientContext {
    pub rpc: Arc<RpcClient>,
    pub payer: Arc<Keypair>,
    pub owner: Arc<Keypair>,
    pub fee_route: Option<Pubkey>,
    pub confirm_timeout: Duration,
}

impl ClientContext {
    pub fn new(config: &Config) -> Result<Self> {
        let payer = io::load_wallet_keypair("payer", &config.wallet.payer_path)?;
        let owner = io::load_wallet_keypair("owner", &config.wallet.owner_path)?;
        let fee_route = match &config.pool.fee_route {
            Some(address) => Some(Pubkey::from_str(address)?),
            None => None,
        };

        Ok(Self {
            rpc: Arc::new(RpcClient::new(config.rpc.url.clone())),
            payer: Arc::new(payer),
            owner: Arc::new(owner),
            fee_route,
            confirm_timeout: Duration::from_secs(config.pool.confirm_timeout_secs),
        })
    }

    pub fn wallet(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub fn owner_pubkey(&self) -> Pubkey {
        self.owner.pubkey()
    }
}
