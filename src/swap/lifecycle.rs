use super::curve::CurveVariant;
use super::fees::FeeSchedule;
use super::state::{self, POOL_ACCOUNT_LEN, PoolConfig};
use super::{instruction, pda, program_id};
use crate::context::ClientContext;
use crate::error::SwapError;
use crate::onchain::{self, send};
use anchor_client::solana_sdk::{
    account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Keypair,
    signer::Signer, system_instruction,
};
use anyhow::Result;
use tracing::info;

/// A loaded pool: its address, derived authority, and validated on-chain
/// configuration.
#[derive(Debug, Clone)]
pub struct PoolHandle {
    pub address: Pubkey,
    pub authority: Pubkey,
    pub config: PoolConfig,
}

pub struct CreatePoolParams {
    pub curve: CurveVariant,
    pub fees: FeeSchedule,
    pub initial_token_a: u64,
    pub initial_token_b: u64,
    pub mint_decimals: u8,
}

fn parse_pool_account(pool: &Pubkey, account: &Account) -> Result<PoolHandle> {
    if account.owner != program_id() {
        return Err(SwapError::MalformedPoolAccount(format!(
            "account {} is owned by {}, not the swap program",
            pool, account.owner
        ))
        .into());
    }

    let config = state::unpack_pool(&account.data)?;
    let (authority, bump_seed) = pda::derive_pool_authority(pool, &program_id())?;
    if bump_seed != config.bump_seed {
        return Err(SwapError::MalformedPoolAccount(format!(
            "stored bump seed {} does not re-derive (expected {})",
            config.bump_seed, bump_seed
        ))
        .into());
    }

    Ok(PoolHandle {
        address: *pool,
        authority,
        config,
    })
}

/// Fetches a pool's on-chain record, distinguishing a missing account
/// (`Ok(None)`) from a transport failure so callers can branch on existence.
pub async fn try_load_pool(ctx: &ClientContext, pool: &Pubkey) -> Result<Option<PoolHandle>> {
    let response = ctx
        .rpc
        .get_account_with_commitment(pool, CommitmentConfig::confirmed())
        .await
        .map_err(|e| SwapError::Transport(e.to_string()))?;

    match response.value {
        Some(account) => Ok(Some(parse_pool_account(pool, &account)?)),
        None => Ok(None),
    }
}

/// Fetches and validates a pool's on-chain record. Read-only and idempotent;
/// the returned config is authoritative for the pool's lifetime.
pub async fn load_pool(ctx: &ClientContext, pool: &Pubkey) -> Result<PoolHandle> {
    match try_load_pool(ctx, pool).await? {
        Some(handle) => Ok(handle),
        None => Err(SwapError::PoolNotFound(*pool).into()),
    }
}

/// An existing pool satisfies a create call only when its immutable
/// parameters equal the requested ones.
fn check_reusable(existing: &PoolConfig, params: &CreatePoolParams) -> Result<(), SwapError> {
    if existing.fees != params.fees {
        return Err(SwapError::ConfigMismatch("fees"));
    }
    if existing.curve != params.curve {
        return Err(SwapError::ConfigMismatch("curve"));
    }
    Ok(())
}

/// Creates a pool end to end. The sequence is not atomic: supporting
/// accounts are provisioned one transaction at a time before the single
/// creation instruction, and a failure in between leaves orphans. Retrying
/// with the same pool keypair is safe: an already-initialized pool is
/// detected and reused instead of re-created.
pub async fn create_pool(
    ctx: &ClientContext,
    pool_keypair: &Keypair,
    params: &CreatePoolParams,
) -> Result<PoolHandle> {
    params.curve.validate()?;
    params.fees.validate()?;

    let pool = pool_keypair.pubkey();
    let (authority, bump_seed) = pda::derive_pool_authority(&pool, &program_id())?;
    info!("pool {} authority {} bump {}", pool, authority, bump_seed);

    // A previous attempt may already have gone through; never double-create.
    // A transport failure propagates here rather than falling into
    // provisioning against an unknown chain state.
    if let Some(existing) = try_load_pool(ctx, &pool).await? {
        check_reusable(&existing.config, params)?;
        info!("pool {} already initialized, reusing", pool);
        return Ok(existing);
    }

    let owner = ctx.owner_pubkey();

    info!("creating pool mint");
    let pool_mint = onchain::create_mint(ctx, &authority, params.mint_decimals).await?;

    info!("creating pool token account");
    let pool_token_account = onchain::create_token_account(ctx, &pool_mint, &owner).await?;

    let fee_owner = ctx.fee_route.unwrap_or(owner);
    let pool_fee_account = onchain::create_token_account(ctx, &pool_mint, &fee_owner).await?;

    info!("creating token A");
    let token_a_mint = onchain::create_mint(ctx, &owner, params.mint_decimals).await?;
    let token_a = onchain::create_token_account(ctx, &token_a_mint, &authority).await?;
    onchain::mint_to(ctx, &token_a_mint, &token_a, params.initial_token_a).await?;

    info!("creating token B");
    let token_b_mint = onchain::create_mint(ctx, &owner, params.mint_decimals).await?;
    let token_b = onchain::create_token_account(ctx, &token_b_mint, &authority).await?;
    onchain::mint_to(ctx, &token_b_mint, &token_b, params.initial_token_b).await?;

    let submitted = PoolConfig {
        bump_seed,
        token_program_id: spl_token::id(),
        token_a,
        token_b,
        pool_mint,
        token_a_mint,
        token_b_mint,
        pool_fee_account,
        fees: params.fees,
        curve: params.curve,
    };

    info!("creating token swap pool");
    let rent = ctx
        .rpc
        .get_minimum_balance_for_rent_exemption(POOL_ACCOUNT_LEN)
        .await
        .map_err(|e| SwapError::Transport(e.to_string()))?;
    let create_account_ix = system_instruction::create_account(
        &ctx.wallet(),
        &pool,
        rent,
        POOL_ACCOUNT_LEN as u64,
        &program_id(),
    );
    let initialize_ix = instruction::initialize_instruction(
        &pool,
        &authority,
        &token_a,
        &token_b,
        &pool_mint,
        &pool_fee_account,
        &pool_token_account,
        &spl_token::id(),
        &params.fees,
        &params.curve,
    );

    send::send_and_confirm(ctx, &[create_account_ix, initialize_ix], &[pool_keypair]).await?;

    // Re-load immediately: the on-chain record must equal the submitted
    // config field for field, or something encoded wrong.
    info!("loading token swap pool");
    let handle = load_pool(ctx, &pool).await?;
    submitted.assert_matches(&handle.config)?;
    info!("pool {} created and verified", pool);

    Ok(handle)
}
