//! The deposit-then-withdraw run.

use crate::basic::vault::Vault;
use crate::core::connection::SolConnection;
use crate::core::signer::VaultSigner;
use crate::error::Result;
use crate::submitter::{SubmitterConfig, TransactionSubmitter};
use crate::types::WorkflowReport;
use solana_sdk::pubkey::Pubkey;
use tracing::info;

/// Deposits `amount` into the owner's vault, then withdraws the whole
/// balance. Each step is its own transaction with its own blockhash; the
/// withdraw is only built once the deposit is confirmed, and any deposit
/// failure ends the run.
pub async fn run_deposit_withdraw<C: SolConnection>(
    connection: &C,
    owner: &dyn VaultSigner,
    program_id: Pubkey,
    config: SubmitterConfig,
    amount: u64,
) -> Result<WorkflowReport> {
    let owner_key = owner.pubkey();
    let vault = Vault::derive(program_id, owner_key)?;
    let submitter = TransactionSubmitter::new(connection, config);
    info!(owner = %owner_key, vault = %vault.address, amount, "starting deposit/withdraw");

    let deposit_ix = vault.deposit().with_amount(amount).instruction()?;
    let deposit = submitter
        .submit_and_confirm(&[deposit_ix], &owner_key, &[owner])
        .await?;

    let vault_balance = vault.balance(connection).await?;
    info!(signature = %deposit.signature, vault_balance, "deposit confirmed");

    let withdraw_ix = vault.withdraw().instruction()?;
    let withdraw = submitter
        .submit_and_confirm(&[withdraw_ix], &owner_key, &[owner])
        .await?;

    let withdrawn = vault_balance.saturating_sub(vault.balance(connection).await?);
    info!(signature = %withdraw.signature, withdrawn, "withdraw confirmed");

    Ok(WorkflowReport {
        vault: vault.address,
        deposited: amount,
        deposit,
        withdrawn,
        withdraw,
    })
}
