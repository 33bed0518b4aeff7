use async_trait::async_trait;
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::{Transaction, TransactionError};
use std::error::Error;

/// Boxed transport error. Implementations box a bare [`TransactionError`]
/// when the environment rejected the transaction itself, so callers can
/// tell a rejection from a network failure by downcasting.
pub type ConnectionError = Box<dyn Error + Send + Sync>;

/// The execution environment as seen by the client.
#[async_trait]
pub trait SolConnection: Send + Sync {
    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, ConnectionError>;

    async fn get_latest_blockhash(&self) -> Result<Hash, ConnectionError>;

    async fn is_blockhash_valid(&self, blockhash: &Hash) -> Result<bool, ConnectionError>;

    /// `None` while the transaction is not yet processed.
    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<Result<(), TransactionError>>, ConnectionError>;

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, ConnectionError>;

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ConnectionError>;

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ConnectionError>;
}

/// Extracts the environment's rejection reason from a connection error.
pub fn transaction_error(err: &ConnectionError) -> Option<TransactionError> {
    err.downcast_ref::<TransactionError>().cloned()
}
