use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_client::solana_sdk::signature::Keypair;
use anchor_client::solana_sdk::signer::Signer;
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::str::FromStr;
use tracing::info;
use tracing_subscriber;

pub mod byte_reader;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod instructions;
pub mod io;
pub mod math;
pub mod onchain;
pub mod swap;
pub mod util;

pub use constants::*;

use context::ClientContext;
use swap::curve::CurveVariant;
use swap::executor::{SwapRequest, TradeDirection, execute_swap};
use swap::fees::FeeSchedule;
use swap::lifecycle::{CreatePoolParams, create_pool, load_pool};

#[derive(Parser)]
#[command(name = "token-swap")]
#[command(about = "Create and trade against token-swap AMM pools", long_about = None)]
struct Cli {
    /// Path to the client configuration
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Network shorthand (dev, local) or a literal RPC URL; overrides the
    /// configured endpoint
    #[arg(short, long)]
    network: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision accounts and initialize a new swap pool
    CreatePool {
        /// Pricing curve (constant-product, constant-price)
        #[arg(long, default_value = "constant-product")]
        curve: String,

        /// Curve parameter: the fixed token B price for constant-price
        #[arg(long)]
        param: Option<u64>,

        /// Initial reserve of token A
        #[arg(long, default_value_t = 1_000_000)]
        initial_a: u64,

        /// Initial reserve of token B
        #[arg(long, default_value_t = 1_000_000)]
        initial_b: u64,

        /// Decimals for the created mints
        #[arg(long, default_value_t = 2)]
        decimals: u8,
    },
    /// Swap against an existing pool
    Swap {
        /// Pool address; overrides the configured one
        #[arg(long)]
        pool: Option<String>,

        /// Source amount to sell
        #[arg(long, default_value_t = 100_000)]
        amount: u64,

        /// Minimum acceptable output; defaults to the slippage computation
        /// or 1 when neither is given
        #[arg(long)]
        minimum_out: Option<u64>,

        /// Slippage tolerance in basis points applied to the quote
        #[arg(long)]
        slippage_bps: Option<u64>,

        /// Sell token B for token A instead of A for B
        #[arg(long)]
        b_to_a: bool,
    },
}

fn parse_curve(curve: &str, param: Option<u64>) -> Result<CurveVariant> {
    match curve {
        "constant-product" => Ok(CurveVariant::ConstantProduct),
        "constant-price" => {
            let token_b_price = match param {
                Some(price) => price,
                None => bail!("constant-price requires --param"),
            };
            Ok(CurveVariant::ConstantPrice { token_b_price })
        }
        other => bail!("unknown curve `{}`", other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut conf = config::read_config(&cli.config)?;
    if let Some(network) = &cli.network {
        conf.rpc.url = config::endpoint_for(network);
    }

    let ctx = ClientContext::new(&conf)?;
    let version = ctx
        .rpc
        .get_version()
        .await
        .map_err(|e| error::SwapError::Transport(e.to_string()))?;
    info!("connected to {} ({})", conf.rpc.url, version);

    match cli.command {
        Commands::CreatePool {
            curve,
            param,
            initial_a,
            initial_b,
            decimals,
        } => {
            let params = CreatePoolParams {
                curve: parse_curve(&curve, param)?,
                fees: FeeSchedule::standard(ctx.fee_route.is_some()),
                initial_token_a: initial_a,
                initial_token_b: initial_b,
                mint_decimals: decimals,
            };
            let pool_keypair = Keypair::new();
            println!("pool address: {}", pool_keypair.pubkey());

            let handle = create_pool(&ctx, &pool_keypair, &params).await?;
            println!("authority: {}", handle.authority);
            println!("token A vault: {}", handle.config.token_a);
            println!("token B vault: {}", handle.config.token_b);
            println!("pool mint: {}", handle.config.pool_mint);
            println!("fee account: {}", handle.config.pool_fee_account);
        }
        Commands::Swap {
            pool,
            amount,
            minimum_out,
            slippage_bps,
            b_to_a,
        } => {
            let pool_address = match pool.or(conf.pool.address.clone()) {
                Some(address) => Pubkey::from_str(&address)?,
                None => bail!("no pool address configured; pass --pool"),
            };
            let handle = load_pool(&ctx, &pool_address).await?;

            let direction = if b_to_a {
                TradeDirection::BtoA
            } else {
                TradeDirection::AtoB
            };
            let (source_mint, destination_mint) = match direction {
                TradeDirection::AtoB => (handle.config.token_a_mint, handle.config.token_b_mint),
                TradeDirection::BtoA => (handle.config.token_b_mint, handle.config.token_a_mint),
            };
            let user_source = onchain::get_associated_token_address(&ctx.owner_pubkey(), &source_mint);
            let user_destination = onchain::ensure_ata_token(&ctx, &destination_mint).await?;

            let minimum_amount_out = match (minimum_out, slippage_bps) {
                (Some(minimum), _) => minimum,
                (None, Some(bps)) => {
                    let (swap_source, swap_destination) = match direction {
                        TradeDirection::AtoB => (handle.config.token_a, handle.config.token_b),
                        TradeDirection::BtoA => (handle.config.token_b, handle.config.token_a),
                    };
                    let (source_balance, destination_balance) =
                        onchain::get_vault_balances(&ctx, &swap_source, &swap_destination).await?;
                    let quote = swap::curve::quote(
                        &handle.config.curve,
                        &handle.config.fees,
                        amount,
                        source_balance,
                        destination_balance,
                        ctx.fee_route.is_some(),
                    )?;
                    util::amount_with_slippage(quote.destination_amount, bps, false)?
                }
                (None, None) => 1,
            };

            let request = SwapRequest {
                amount_in: amount,
                minimum_amount_out,
                direction,
            };
            let outcome = execute_swap(&ctx, &handle, &user_source, &user_destination, &request).await?;
            println!("received: {}", outcome.destination_amount);
            println!(
                "fees: trade {} owner {} host {}",
                outcome.trade_fee, outcome.owner_fee, outcome.host_fee
            );
            println!(
                "vaults after: source {} destination {}",
                outcome.source_vault_after, outcome.destination_vault_after
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_argument_parsing() {
        assert_eq!(
            parse_curve("constant-product", None).unwrap(),
            CurveVariant::ConstantProduct
        );
        assert_eq!(
            parse_curve("constant-price", Some(5)).unwrap(),
            CurveVariant::ConstantPrice { token_b_price: 5 }
        );
        assert!(parse_curve("constant-price", None).is_err());
        assert!(parse_curve("stable", None).is_err());
    }
}
