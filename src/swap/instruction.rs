use super::curve::CurveVariant;
use super::fees::FeeSchedule;
use anchor_client::solana_sdk::instruction::{AccountMeta, Instruction};
use anchor_client::solana_sdk::pubkey::Pubkey;

const INITIALIZE_TAG: u8 = 0;
const SWAP_TAG: u8 = 1;

fn pack_fees(buffer: &mut Vec<u8>, fees: &FeeSchedule) {
    for value in [
        fees.trade_fee_numerator,
        fees.trade_fee_denominator,
        fees.owner_trade_fee_numerator,
        fees.owner_trade_fee_denominator,
        fees.owner_withdraw_fee_numerator,
        fees.owner_withdraw_fee_denominator,
        fees.host_fee_numerator,
        fees.host_fee_denominator,
    ] {
        buffer.extend_from_slice(&value.to_le_bytes());
    }
}

fn initialize_data(fees: &FeeSchedule, curve: &CurveVariant) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(98);
    buffer.push(INITIALIZE_TAG);
    pack_fees(&mut buffer, fees);
    buffer.push(curve.curve_type());
    buffer.extend_from_slice(&curve.parameters());
    buffer
}

fn swap_data(amount_in: u64, minimum_amount_out: u64) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(17);
    buffer.push(SWAP_TAG);
    buffer.extend_from_slice(&amount_in.to_le_bytes());
    buffer.extend_from_slice(&minimum_amount_out.to_le_bytes());
    buffer
}

/// The pool-creation instruction. The pool account signs its own
/// initialization; the vaults must already hold the initial reserves.
#[allow(clippy::too_many_arguments)]
pub fn initialize_instruction(
    pool: &Pubkey,
    authority: &Pubkey,
    vault_a: &Pubkey,
    vault_b: &Pubkey,
    pool_mint: &Pubkey,
    fee_account: &Pubkey,
    destination: &Pubkey,
    token_program: &Pubkey,
    fees: &FeeSchedule,
    curve: &CurveVariant,
) -> Instruction {
    Instruction {
        program_id: super::program_id(),
        accounts: vec![
            AccountMeta::new(*pool, true),
            AccountMeta::new_readonly(*authority, false),
            AccountMeta::new_readonly(*vault_a, false),
            AccountMeta::new_readonly(*vault_b, false),
            AccountMeta::new(*pool_mint, false),
            AccountMeta::new_readonly(*fee_account, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*token_program, false),
        ],
        data: initialize_data(fees, curve),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn swap_instruction(
    pool: &Pubkey,
    authority: &Pubkey,
    user_transfer_authority: &Pubkey,
    user_source: &Pubkey,
    swap_source: &Pubkey,
    swap_destination: &Pubkey,
    user_destination: &Pubkey,
    pool_mint: &Pubkey,
    fee_account: &Pubkey,
    token_program: &Pubkey,
    host_fee_account: Option<&Pubkey>,
    amount_in: u64,
    minimum_amount_out: u64,
) -> Instruction {
    let mut accounts = vec![
        AccountMeta::new_readonly(*pool, false),
        AccountMeta::new_readonly(*authority, false),
        AccountMeta::new_readonly(*user_transfer_authority, true),
        AccountMeta::new(*user_source, false),
        AccountMeta::new(*swap_source, false),
        AccountMeta::new(*swap_destination, false),
        AccountMeta::new(*user_destination, false),
        AccountMeta::new(*pool_mint, false),
        AccountMeta::new(*fee_account, false),
        AccountMeta::new_readonly(*token_program, false),
    ];
    if let Some(host) = host_fee_account {
        accounts.push(AccountMeta::new(*host, false));
    }

    Instruction {
        program_id: super::program_id(),
        accounts,
        data: swap_data(amount_in, minimum_amount_out),
    }
}
