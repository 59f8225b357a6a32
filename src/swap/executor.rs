use super::curve::{self, Quote};
use super::instruction;
use super::lifecycle::PoolHandle;
use crate::context::ClientContext;
use crate::error::SwapError;
use crate::instructions::token;
use crate::onchain::{self, send};
use anchor_client::solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use anyhow::Result;
use tracing::info;

/// Rounding slack per vault leg: flooring on both sides of the trade can
/// move a balance by at most one unit relative to the client-side quote.
const LEG_TOLERANCE: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDirection {
    /// Sell token A for token B
    AtoB,
    /// Sell token B for token A
    BtoA,
}

/// One swap attempt. Ephemeral; built per call.
#[derive(Debug, Clone, Copy)]
pub struct SwapRequest {
    pub amount_in: u64,
    pub minimum_amount_out: u64,
    pub direction: TradeDirection,
}

/// Realized result of a confirmed swap, reconstructed from vault deltas and
/// the client-side quote.
#[derive(Debug, Clone, Copy)]
pub struct SwapOutcome {
    pub destination_amount: u64,
    pub trade_fee: u64,
    pub owner_fee: u64,
    pub host_fee: u64,
    pub source_vault_after: u64,
    pub destination_vault_after: u64,
}

/// Client-side slippage floor, checked before anything is submitted.
pub fn check_slippage(expected: &Quote, minimum_amount_out: u64) -> Result<(), SwapError> {
    if expected.destination_amount < minimum_amount_out {
        return Err(SwapError::SlippageExceeded {
            expected: expected.destination_amount,
            minimum: minimum_amount_out,
        });
    }
    Ok(())
}

fn leg_consistent(realized: u64, expected: u64) -> bool {
    realized.abs_diff(expected) <= LEG_TOLERANCE
}

/// Executes a swap against a loaded pool:
/// quote and fail fast on slippage, grant a single-use transfer delegation
/// for exactly the source amount, submit, confirm, then verify the realized
/// vault deltas against the quote.
pub async fn execute_swap(
    ctx: &ClientContext,
    pool: &PoolHandle,
    user_source: &Pubkey,
    user_destination: &Pubkey,
    request: &SwapRequest,
) -> Result<SwapOutcome> {
    let config = &pool.config;
    let (swap_source, swap_destination) = match request.direction {
        TradeDirection::AtoB => (config.token_a, config.token_b),
        TradeDirection::BtoA => (config.token_b, config.token_a),
    };

    let (source_before, destination_before) =
        onchain::get_vault_balances(ctx, &swap_source, &swap_destination).await?;

    let expected = curve::quote(
        &config.curve,
        &config.fees,
        request.amount_in,
        source_before,
        destination_before,
        ctx.fee_route.is_some(),
    )?;
    check_slippage(&expected, request.minimum_amount_out)?;
    info!(
        "swapping {} for an expected {} (minimum {})",
        request.amount_in, expected.destination_amount, request.minimum_amount_out
    );

    // Host fees accrue as pool tokens, so the routed account is the fee
    // owner's pool-mint ATA, created when it does not exist yet.
    let host_fee_account = match ctx.fee_route {
        Some(fee_owner) => {
            Some(onchain::ensure_token_account_for(ctx, &fee_owner, &config.pool_mint).await?)
        }
        None => None,
    };

    // Single-use delegate: a throwaway keypair approved for exactly the
    // source amount, discarded after this transaction.
    let user_transfer_authority = Keypair::new();
    let approve_ix = token::approve_instruction(
        user_source,
        &user_transfer_authority.pubkey(),
        &ctx.owner_pubkey(),
        request.amount_in,
    )?;
    let swap_ix = instruction::swap_instruction(
        &pool.address,
        &pool.authority,
        &user_transfer_authority.pubkey(),
        user_source,
        &swap_source,
        &swap_destination,
        user_destination,
        &config.pool_mint,
        &config.pool_fee_account,
        &config.token_program_id,
        host_fee_account.as_ref(),
        request.amount_in,
        request.minimum_amount_out,
    );

    let signature = send::send_and_confirm(
        ctx,
        &[approve_ix, swap_ix],
        &[&ctx.owner, &user_transfer_authority],
    )
    .await?;
    info!("swap transaction {}", signature);

    let (source_after, destination_after) =
        onchain::get_vault_balances(ctx, &swap_source, &swap_destination).await?;

    let source_delta = source_after.saturating_sub(source_before);
    let destination_delta = destination_before.saturating_sub(destination_after);
    if !leg_consistent(source_delta, request.amount_in)
        || !leg_consistent(destination_delta, expected.destination_amount)
    {
        return Err(SwapError::VaultStateChanged(format!(
            "source +{} (expected +{}), destination -{} (expected -{})",
            source_delta, request.amount_in, destination_delta, expected.destination_amount
        ))
        .into());
    }

    Ok(SwapOutcome {
        destination_amount: destination_delta,
        trade_fee: expected.trade_fee,
        owner_fee: expected.owner_fee,
        host_fee: expected.host_fee,
        source_vault_after: source_after,
        destination_vault_after: destination_after,
    })
}
