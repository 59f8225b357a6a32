use anchor_client::solana_sdk::instruction::InstructionError;
use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_client::solana_sdk::signature::Signature;
use anchor_client::solana_sdk::transaction::TransactionError;
use thiserror::Error;

/// Custom error index the swap program reports when the on-chain
/// minimum-output check fails.
const EXCEEDED_SLIPPAGE_CODE: u32 = 16;

#[derive(Debug, Error)]
pub enum SwapError {
    #[error("no valid authority bump seed found for pool {0}")]
    AddressDerivationExhausted(Pubkey),

    #[error("invalid curve parameters: {0}")]
    InvalidCurveParameters(&'static str),

    #[error("insufficient liquidity: quote needs {needed}, vault holds {available}")]
    InsufficientLiquidity { needed: u64, available: u64 },

    #[error("arithmetic overflow in curve computation")]
    CalculationFailure,

    #[error("loaded pool field `{0}` does not match the submitted configuration")]
    ConfigMismatch(&'static str),

    #[error("pool account {0} does not exist")]
    PoolNotFound(Pubkey),

    #[error("unsupported pool account version {0}")]
    UnsupportedPoolVersion(u8),

    #[error("malformed pool account: {0}")]
    MalformedPoolAccount(String),

    #[error("expected output {expected} is below the requested minimum {minimum}")]
    SlippageExceeded { expected: u64, minimum: u64 },

    #[error("swap rejected on-chain: minimum output constraint violated")]
    SwapRejected,

    #[error("vault balances inconsistent with the expected outcome: {0}")]
    VaultStateChanged(String),

    #[error("transaction {0} unconfirmed before timeout; outcome unknown")]
    Unknown(Signature),

    #[error("rpc transport error: {0}")]
    Transport(String),
}

impl SwapError {
    /// Maps an on-chain transaction failure to the client taxonomy. The
    /// program enforces the same output floor the client checks before
    /// submission, so its slippage error gets its own variant.
    pub fn from_transaction_error(err: &TransactionError) -> SwapError {
        match err {
            TransactionError::InstructionError(
                _,
                InstructionError::Custom(EXCEEDED_SLIPPAGE_CODE),
            ) => SwapError::SwapRejected,
            other => SwapError::Transport(format!("transaction failed: {other}")),
        }
    }
}
