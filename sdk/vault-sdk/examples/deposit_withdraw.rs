// Example: Deposit and withdraw against a running cluster
//
// This example demonstrates how to:
// 1. Load the owner keypair and endpoint from the environment
// 2. Deposit 0.5 SOL and read the vault back
// 3. Withdraw everything with a second, freshly built transaction
//
// Start `solana-test-validator` with the program deployed, then:
//   VAULT_RPC_URL=http://127.0.0.1:8899 cargo run --example deposit_withdraw

use solana_sdk::signature::{read_keypair_file, Signer};
use vault_sdk::core::constants::DEFAULT_DEPOSIT_LAMPORTS;
use vault_sdk::{
    run_deposit_withdraw, RpcConnection, SolConnection, SubmitterConfig, Vault, VaultConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. Configuration: defaults, then environment overrides
    let config = VaultConfig::default().apply_env()?;
    let connection = RpcConnection::new(config.rpc_url.clone(), config.commitment);
    let owner = read_keypair_file(&config.keypair_path)?;

    let vault = Vault::derive(config.program_id, owner.pubkey())?;
    println!("Owner: {}", owner.pubkey());
    println!("Vault: {} (bump {})", vault.address, vault.bump);

    // 2 + 3. Deposit, confirm, then withdraw
    let report = run_deposit_withdraw(
        &connection,
        &owner,
        config.program_id,
        SubmitterConfig::from(&config),
        DEFAULT_DEPOSIT_LAMPORTS,
    )
    .await?;

    println!("Deposited {} lamports ({})", report.deposited, report.deposit.signature);
    println!("Withdrew {} lamports ({})", report.withdrawn, report.withdraw.signature);
    println!("Vault balance now: {}", vault.balance(&connection).await?);
    let remaining = connection
        .get_balance(&owner.pubkey())
        .await
        .map_err(|e| e.to_string())?;
    println!("Owner balance now: {}", remaining);

    Ok(())
}
