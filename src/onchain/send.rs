use crate::context::ClientContext;
use crate::error::SwapError;
use anchor_client::{
    solana_client::rpc_config::RpcSendTransactionConfig,
    solana_sdk::{
        commitment_config::{CommitmentConfig, CommitmentLevel},
        instruction::Instruction,
        signature::{Keypair, Signature},
        transaction::Transaction,
    },
};
use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL_START: Duration = Duration::from_millis(200);
const POLL_INTERVAL_CAP: Duration = Duration::from_millis(2_000);

/// Signs with the context payer plus any extra signers, submits, and waits
/// for confirmation within the context's timeout.
pub async fn send_and_confirm(
    ctx: &ClientContext,
    instructions: &[Instruction],
    extra_signers: &[&Keypair],
) -> Result<Signature> {
    let (recent, _) = ctx
        .rpc
        .get_latest_blockhash_with_commitment(CommitmentConfig::processed())
        .await
        .map_err(|e| SwapError::Transport(e.to_string()))?;

    let mut signers: Vec<&Keypair> = vec![&ctx.payer];
    signers.extend_from_slice(extra_signers);

    let tx =
        Transaction::new_signed_with_payer(instructions, Some(&ctx.wallet()), &signers, recent);
    let signature = ctx
        .rpc
        .send_transaction_with_config(
            &tx,
            RpcSendTransactionConfig {
                skip_preflight: false,
                preflight_commitment: Some(CommitmentLevel::Processed),
                max_retries: Some(3),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| SwapError::Transport(e.to_string()))?;

    confirm_transaction(ctx, &signature).await?;
    Ok(signature)
}

/// Polls signature status with exponential backoff until the confirmation
/// commitment is reached or the timeout expires. A timeout means the outcome
/// is unknown: the caller must re-query on-chain state before retrying,
/// never resubmit blindly.
pub async fn confirm_transaction(
    ctx: &ClientContext,
    signature: &Signature,
) -> Result<(), SwapError> {
    let deadline = Instant::now() + ctx.confirm_timeout;
    let mut interval = POLL_INTERVAL_START;

    loop {
        let response = ctx
            .rpc
            .get_signature_statuses(&[*signature])
            .await
            .map_err(|e| SwapError::Transport(e.to_string()))?;

        if let Some(Some(status)) = response.value.into_iter().next() {
            if let Some(err) = &status.err {
                return Err(SwapError::from_transaction_error(err));
            }
            if status.satisfies_commitment(CommitmentConfig::confirmed()) {
                return Ok(());
            }
        }

        if Instant::now() + interval > deadline {
            return Err(SwapError::Unknown(*signature));
        }

        debug!("signature {} pending, polling again in {:?}", signature, interval);
        tokio::time::sleep(interval).await;
        interval = (interval * 2).min(POLL_INTERVAL_CAP);
    }
}
