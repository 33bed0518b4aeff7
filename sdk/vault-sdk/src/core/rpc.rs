use crate::core::connection::{ConnectionError, SolConnection};
use async_trait::async_trait;
use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::{Transaction, TransactionError};

/// [`SolConnection`] over a JSON-RPC endpoint.
pub struct RpcConnection {
    client: RpcClient,
}

impl RpcConnection {
    pub fn new(url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(url.into(), commitment),
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.client.commitment()
    }
}

/// Preflight and status failures keep their [`TransactionError`] so the
/// submitter can report them verbatim.
fn map_client_error(err: ClientError) -> ConnectionError {
    match err.get_transaction_error() {
        Some(tx_err) => Box::new(tx_err),
        None => Box::new(err),
    }
}

#[async_trait]
impl SolConnection for RpcConnection {
    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, ConnectionError> {
        self.client
            .send_transaction(tx)
            .await
            .map_err(map_client_error)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ConnectionError> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(map_client_error)
    }

    async fn is_blockhash_valid(&self, blockhash: &Hash) -> Result<bool, ConnectionError> {
        self.client
            .is_blockhash_valid(blockhash, self.client.commitment())
            .await
            .map_err(map_client_error)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<Result<(), TransactionError>>, ConnectionError> {
        self.client
            .get_signature_status_with_commitment(signature, self.client.commitment())
            .await
            .map_err(map_client_error)
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, ConnectionError> {
        self.client
            .get_account_with_commitment(pubkey, self.client.commitment())
            .await
            .map(|response| response.value)
            .map_err(map_client_error)
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ConnectionError> {
        self.client
            .get_balance(pubkey)
            .await
            .map_err(map_client_error)
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ConnectionError> {
        self.client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(map_client_error)
    }
}
