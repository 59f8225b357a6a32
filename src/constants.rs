use anchor_client::solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

const TOKEN_SWAP_PROGRAM: &str = "SwaPpA9LAaLfeLi3a68M4DjnLqgtticKg6CnyNwgAC8";
const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

pub fn token_swap_program() -> Pubkey {
    Pubkey::from_str(TOKEN_SWAP_PROGRAM).unwrap()
}

pub fn token_program() -> Pubkey {
    Pubkey::from_str(TOKEN_PROGRAM).unwrap()
}
