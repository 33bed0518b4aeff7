//! Vault command-line harness: load key, derive, build, sign, send.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use solana_sdk::native_token::lamports_to_sol;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vault_sdk::core::constants::DEFAULT_DEPOSIT_LAMPORTS;
use vault_sdk::{
    run_deposit_withdraw, RpcConnection, SubmitterConfig, TransactionSubmitter, Vault,
    VaultConfig,
};

#[derive(Parser, Debug)]
#[command(name = "vault", version, about = "Program-derived vault client")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// RPC endpoint
    #[arg(long, short = 'u', global = true)]
    url: Option<String>,

    /// Owner keypair file
    #[arg(long, short = 'k', global = true)]
    keypair: Option<PathBuf>,

    /// Vault program id
    #[arg(long, global = true)]
    program_id: Option<Pubkey>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the vault address of an owner
    Address {
        /// Defaults to the keypair's public key
        #[arg(long)]
        owner: Option<Pubkey>,
    },
    /// Deposit lamports into the owner's vault
    Deposit {
        #[arg(long)]
        amount: u64,
    },
    /// Withdraw the whole vault balance
    Withdraw,
    /// Show the recorded vault balance
    Balance {
        #[arg(long)]
        owner: Option<Pubkey>,
    },
    /// Deposit, then withdraw everything
    Run {
        #[arg(long, default_value_t = DEFAULT_DEPOSIT_LAMPORTS)]
        amount: u64,
    },
}

fn load_config(cli: &Cli) -> Result<VaultConfig> {
    let mut config = match &cli.config {
        Some(path) => VaultConfig::from_file(path)?,
        None => VaultConfig::default(),
    }
    .apply_env()?;

    if let Some(url) = &cli.url {
        config = config.with_rpc_url(url.clone());
    }
    if let Some(path) = &cli.keypair {
        config = config.with_keypair_path(path.clone());
    }
    if let Some(program_id) = cli.program_id {
        config = config.with_program_id(program_id);
    }
    Ok(config)
}

fn load_keypair(config: &VaultConfig) -> Result<Keypair> {
    read_keypair_file(&config.keypair_path).map_err(|e| {
        anyhow!(
            "failed to read keypair {}: {}",
            config.keypair_path.display(),
            e
        )
    })
}

fn owner_or_keypair(owner: Option<Pubkey>, config: &VaultConfig) -> Result<Pubkey> {
    match owner {
        Some(owner) => Ok(owner),
        None => Ok(load_keypair(config)?.pubkey()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let connection = RpcConnection::new(config.rpc_url.clone(), config.commitment);
    let submitter_config = SubmitterConfig::from(&config);
    info!(rpc = %connection.url(), program_id = %config.program_id, "using");

    match cli.command {
        Command::Address { owner } => {
            let owner = owner_or_keypair(owner, &config)?;
            let vault = Vault::derive(config.program_id, owner)?;
            println!("owner: {}", owner);
            println!("vault: {}", vault.address);
            println!("bump:  {}", vault.bump);
        },
        Command::Deposit { amount } => {
            let owner = load_keypair(&config)?;
            let vault = Vault::derive(config.program_id, owner.pubkey())?;
            let ix = vault.deposit().with_amount(amount).instruction()?;

            let submitter = TransactionSubmitter::new(&connection, submitter_config);
            let confirmed = submitter
                .submit_and_confirm(&[ix], &owner.pubkey(), &[&owner])
                .await?;
            println!("deposited {} lamports: {}", amount, confirmed.signature);
        },
        Command::Withdraw => {
            let owner = load_keypair(&config)?;
            let vault = Vault::derive(config.program_id, owner.pubkey())?;
            let balance = vault.balance(&connection).await?;
            let ix = vault.withdraw().instruction()?;

            let submitter = TransactionSubmitter::new(&connection, submitter_config);
            let confirmed = submitter
                .submit_and_confirm(&[ix], &owner.pubkey(), &[&owner])
                .await?;
            println!("withdrew {} lamports: {}", balance, confirmed.signature);
        },
        Command::Balance { owner } => {
            let owner = owner_or_keypair(owner, &config)?;
            let vault = Vault::derive(config.program_id, owner)?;
            match vault.fetch_info(&connection).await? {
                Some(info) => println!(
                    "vault {}: {} lamports ({} SOL), reserve {}",
                    info.address,
                    info.balance,
                    lamports_to_sol(info.balance),
                    info.rent_reserve()
                ),
                None => println!("vault {} has not been funded", vault.address),
            }
        },
        Command::Run { amount } => {
            let owner = load_keypair(&config)?;
            let report = run_deposit_withdraw(
                &connection,
                &owner,
                config.program_id,
                submitter_config,
                amount,
            )
            .await?;
            println!("vault:    {}", report.vault);
            println!(
                "deposit:  {} lamports ({})",
                report.deposited, report.deposit.signature
            );
            println!(
                "withdraw: {} lamports ({})",
                report.withdrawn, report.withdraw.signature
            );
        },
    }

    Ok(())
}
