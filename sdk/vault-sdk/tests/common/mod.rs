#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use litesvm::LiteSVM;
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::{Transaction, TransactionError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use vault_sdk::core::connection::ConnectionError;
use vault_sdk::core::constants::DEFAULT_PROGRAM_ID;
use vault_sdk::program::VaultState;
use vault_sdk::{SolConnection, SubmitterConfig, Vault};

pub const INITIAL_FUNDS: u64 = 10_000_000_000;
pub const FEE: u64 = 5_000;

/// The compiled program. Build it first with `cargo build-sbf`.
fn program_path() -> PathBuf {
    match std::env::var("SBF_OUT_DIR") {
        Ok(dir) => PathBuf::from(dir).join("vault_program.so"),
        Err(_) => PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/deploy/vault_program.so"),
    }
}

/// Runs the deployed program in an in-process SVM.
pub struct TestContext {
    pub svm: Mutex<LiteSVM>,
    pub owner: Keypair,
    pub program_id: Pubkey,
    /// When false, failed transactions are accepted at submission and only
    /// show up through their signature status.
    preflight: bool,
    executed: AtomicUsize,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_preflight(true).await
    }

    pub async fn deferred() -> Self {
        Self::with_preflight(false).await
    }

    async fn with_preflight(preflight: bool) -> Self {
        let program_id = DEFAULT_PROGRAM_ID;
        let mut svm = LiteSVM::new();
        svm.add_program_from_file(program_id, program_path())
            .expect("vault_program.so not found; run `cargo build-sbf` first");

        let context = Self {
            svm: Mutex::new(svm),
            owner: Keypair::new(),
            program_id,
            preflight,
            executed: AtomicUsize::new(0),
        };
        context
            .airdrop(&context.owner.pubkey(), INITIAL_FUNDS)
            .await
            .expect("airdrop");
        context
    }

    pub async fn airdrop(&self, pubkey: &Pubkey, lamports: u64) -> Result<()> {
        let mut svm = self.svm.lock().await;
        svm.airdrop(pubkey, lamports)
            .map_err(|failed| anyhow!("airdrop failed: {}", failed.err))?;
        svm.expire_blockhash();
        Ok(())
    }

    /// Funded keypair that is not the context owner.
    pub async fn funded_keypair(&self) -> Keypair {
        let keypair = Keypair::new();
        self.airdrop(&keypair.pubkey(), INITIAL_FUNDS)
            .await
            .expect("airdrop");
        keypair
    }

    pub async fn set_account(&self, pubkey: &Pubkey, account: Account) -> Result<()> {
        self.svm
            .lock()
            .await
            .set_account(*pubkey, account)
            .map_err(|e| anyhow!("set_account failed: {:?}", e))
    }

    /// Moves past the current blockhash without landing anything.
    pub async fn expire_blockhash(&self) {
        self.svm.lock().await.expire_blockhash();
    }

    /// Transactions sent through the connection that were executed,
    /// successfully or not.
    pub fn executed(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }

    pub async fn vault_rent_reserve(&self) -> u64 {
        self.svm
            .lock()
            .await
            .minimum_balance_for_rent_exemption(VaultState::LEN)
    }

    pub fn vault(&self) -> Vault {
        self.vault_of(&self.owner.pubkey())
    }

    pub fn vault_of(&self, owner: &Pubkey) -> Vault {
        Vault::derive(self.program_id, *owner).expect("derivation")
    }

    pub fn submitter_config(&self) -> SubmitterConfig {
        SubmitterConfig {
            poll_interval: Duration::from_millis(10),
            confirm_timeout: Duration::from_secs(5),
        }
    }

    pub async fn balance(&self, pubkey: &Pubkey) -> Result<u64> {
        self.get_balance(pubkey).await.map_err(|e| anyhow!(e))
    }

    pub async fn vault_balance(&self, vault: &Vault) -> Result<u64> {
        Ok(vault.balance(self).await?)
    }

    pub async fn account(&self, pubkey: &Pubkey) -> Option<Account> {
        self.svm.lock().await.get_account(pubkey)
    }
}

#[async_trait]
impl SolConnection for TestContext {
    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, ConnectionError> {
        let signature = *tx.signatures.first().ok_or("transaction is unsigned")?;
        let mut svm = self.svm.lock().await;
        let result = svm.send_transaction(tx.clone());

        if svm.get_transaction(&signature).is_some() {
            self.executed.fetch_add(1, Ordering::SeqCst);
            // Each landed transaction closes its slot.
            svm.expire_blockhash();
        }

        match result {
            Ok(_) => Ok(signature),
            Err(_) if !self.preflight => Ok(signature),
            Err(failed) => Err(Box::new(failed.err) as ConnectionError),
        }
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ConnectionError> {
        Ok(self.svm.lock().await.latest_blockhash())
    }

    async fn is_blockhash_valid(&self, blockhash: &Hash) -> Result<bool, ConnectionError> {
        Ok(self.svm.lock().await.latest_blockhash() == *blockhash)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<Result<(), TransactionError>>, ConnectionError> {
        let svm = self.svm.lock().await;
        Ok(svm.get_transaction(signature).map(|result| match result {
            Ok(_) => Ok(()),
            Err(failed) => Err(failed.err.clone()),
        }))
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, ConnectionError> {
        let svm = self.svm.lock().await;
        Ok(svm.get_account(pubkey).filter(|account| account.lamports > 0))
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ConnectionError> {
        Ok(self.svm.lock().await.get_balance(pubkey).unwrap_or(0))
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ConnectionError> {
        Ok(self
            .svm
            .lock()
            .await
            .minimum_balance_for_rent_exemption(data_len))
    }
}

pub async fn setup_test_context() -> TestContext {
    TestContext::new().await
}
