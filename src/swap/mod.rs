use anchor_client::solana_sdk::pubkey::Pubkey;

pub fn program_id() -> Pubkey {
    crate::constants::token_swap_program()
}

pub mod curve;
pub use curve::*;
pub mod fees;
pub use fees::*;
pub mod pda;
pub use pda::*;
pub mod state;
pub use state::*;
pub mod instruction;
pub mod lifecycle;
pub use lifecycle::*;
pub mod executor;
pub use executor::*;
