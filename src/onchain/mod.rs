use crate::context::ClientContext;
use crate::error::SwapError;
use crate::instructions;
use crate::util::parse_token_amount;
use anchor_client::solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use anyhow::{Result, anyhow};
use spl_token::solana_program::program_pack::Pack;
use tracing::info;

pub mod send;

pub async fn get_token_amount(ctx: &ClientContext, token_account: &Pubkey) -> Result<u64> {
    let account = ctx
        .rpc
        .get_account(token_account)
        .await
        .map_err(|e| SwapError::Transport(e.to_string()))?;
    parse_token_amount(&account.data)
}

/// Fetches both vault balances in one round trip.
pub async fn get_vault_balances(
    ctx: &ClientContext,
    vault_a: &Pubkey,
    vault_b: &Pubkey,
) -> Result<(u64, u64)> {
    let accounts = ctx
        .rpc
        .get_multiple_accounts(&[*vault_a, *vault_b])
        .await
        .map_err(|e| SwapError::Transport(e.to_string()))?;

    let mut iter = accounts.into_iter();
    let account_a = iter
        .next()
        .flatten()
        .ok_or_else(|| anyhow!("vault {} not found", vault_a))?;
    let account_b = iter
        .next()
        .flatten()
        .ok_or_else(|| anyhow!("vault {} not found", vault_b))?;

    Ok((
        parse_token_amount(&account_a.data)?,
        parse_token_amount(&account_b.data)?,
    ))
}

/// Creates a fresh mint controlled by `mint_authority`.
pub async fn create_mint(
    ctx: &ClientContext,
    mint_authority: &Pubkey,
    decimals: u8,
) -> Result<Pubkey> {
    let mint = Keypair::new();
    let rent = ctx
        .rpc
        .get_minimum_balance_for_rent_exemption(spl_token::state::Mint::LEN)
        .await
        .map_err(|e| SwapError::Transport(e.to_string()))?;
    let ixs = instructions::token::create_mint_instructions(
        &ctx.wallet(),
        &mint.pubkey(),
        mint_authority,
        decimals,
        rent,
    )?;

    send::send_and_confirm(ctx, &ixs, &[&mint]).await?;
    info!("created mint {}", mint.pubkey());
    Ok(mint.pubkey())
}

pub async fn create_token_account(
    ctx: &ClientContext,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<Pubkey> {
    let account = Keypair::new();
    let rent = ctx
        .rpc
        .get_minimum_balance_for_rent_exemption(spl_token::state::Account::LEN)
        .await
        .map_err(|e| SwapError::Transport(e.to_string()))?;
    let ixs = instructions::token::create_token_account_instructions(
        &ctx.wallet(),
        &account.pubkey(),
        mint,
        owner,
        rent,
    )?;

    send::send_and_confirm(ctx, &ixs, &[&account]).await?;
    info!("created token account {} for mint {}", account.pubkey(), mint);
    Ok(account.pubkey())
}

/// Mints with the context owner as mint authority.
pub async fn mint_to(
    ctx: &ClientContext,
    mint: &Pubkey,
    account: &Pubkey,
    amount: u64,
) -> Result<()> {
    let ix = instructions::token::mint_to_instruction(
        mint,
        account,
        &ctx.owner_pubkey(),
        amount,
    )?;
    send::send_and_confirm(ctx, &[ix], &[&ctx.owner]).await?;
    Ok(())
}

/// Returns `owner`'s associated token account for `mint`, creating it when
/// missing. The context payer funds the creation.
pub async fn ensure_token_account_for(
    ctx: &ClientContext,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<Pubkey> {
    let ata = get_associated_token_address(owner, mint);

    match ctx.rpc.get_account(&ata).await {
        std::result::Result::Ok(_) => {}
        Err(_) => {
            info!("ATA not exists. Creating {} - mint {}", ata, mint);
            let ix = instructions::token::create_ata_token_instruction(&ctx.wallet(), owner, mint)?;
            send::send_and_confirm(ctx, &[ix], &[]).await?;
        }
    }

    Ok(ata)
}

/// Convenience wrapper for the context owner's own ATA.
pub async fn ensure_ata_token(ctx: &ClientContext, mint: &Pubkey) -> Result<Pubkey> {
    ensure_token_account_for(ctx, &ctx.owner_pubkey(), mint).await
}

pub fn get_associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(wallet, mint)
}
