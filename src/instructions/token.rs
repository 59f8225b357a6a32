use anchor_client::solana_sdk::{
    instruction::Instruction, pubkey::Pubkey, system_instruction,
};
use anyhow::Result;
use spl_token::instruction as token_instruction;
use spl_token::solana_program::program_pack::Pack;

/// Account creation plus mint initialization, submitted in one transaction
/// signed by the new mint keypair.
pub fn create_mint_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    mint_authority: &Pubkey,
    decimals: u8,
    rent_lamports: u64,
) -> Result<Vec<Instruction>> {
    let token_program_id = spl_token::id();
    let create = system_instruction::create_account(
        payer,
        mint,
        rent_lamports,
        spl_token::state::Mint::LEN as u64,
        &token_program_id,
    );
    let initialize =
        token_instruction::initialize_mint(&token_program_id, mint, mint_authority, None, decimals)?;

    Ok(vec![create, initialize])
}

pub fn create_token_account_instructions(
    payer: &Pubkey,
    account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
    rent_lamports: u64,
) -> Result<Vec<Instruction>> {
    let token_program_id = spl_token::id();
    let create = system_instruction::create_account(
        payer,
        account,
        rent_lamports,
        spl_token::state::Account::LEN as u64,
        &token_program_id,
    );
    let initialize = token_instruction::initialize_account(&token_program_id, account, mint, owner)?;

    Ok(vec![create, initialize])
}

pub fn mint_to_instruction(
    mint: &Pubkey,
    account: &Pubkey,
    mint_authority: &Pubkey,
    amount: u64,
) -> Result<Instruction> {
    let instruction = token_instruction::mint_to(
        &spl_token::id(),
        mint,
        account,
        mint_authority,
        &[],
        amount,
    )?;

    Ok(instruction)
}

/// Scoped spending authorization: the delegate may move exactly `amount` out
/// of `source` and nothing more.
pub fn approve_instruction(
    source: &Pubkey,
    delegate: &Pubkey,
    owner: &Pubkey,
    amount: u64,
) -> Result<Instruction> {
    let instruction =
        token_instruction::approve(&spl_token::id(), source, delegate, owner, &[], amount)?;

    Ok(instruction)
}

pub fn create_ata_token_instruction(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<Instruction> {
    let token_program_id = spl_token::id();
    let instruction = spl_associated_token_account::instruction::create_associated_token_account(
        payer,
        owner,
        mint,
        &token_program_id,
    );

    Ok(instruction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_creation_pairs_create_and_init() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let ixs = create_mint_instructions(&payer, &mint, &authority, 2, 1_000_000).unwrap();
        assert_eq!(ixs.len(), 2);
        assert_eq!(ixs[1].program_id, spl_token::id());
    }

    #[test]
    fn approve_carries_exact_amount() {
        let ix = approve_instruction(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            100_000,
        )
        .unwrap();
        // Approve tag (4) followed by the little-endian amount.
        assert_eq!(ix.data[0], 4);
        assert_eq!(&ix.data[1..9], &100_000u64.to_le_bytes());
    }

    #[test]
    fn token_account_space_matches_layout() {
        assert_eq!(spl_token::state::Account::LEN, 165);
    }
}
