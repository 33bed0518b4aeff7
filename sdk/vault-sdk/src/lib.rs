pub mod advanced;
pub mod basic;
pub mod core;
pub mod error;
pub mod submitter;
pub mod types;
pub mod utils;

pub use crate::basic::vault::Vault;
pub use crate::basic::workflow::run_deposit_withdraw;
pub use crate::core::config::VaultConfig;
pub use crate::core::connection::SolConnection;
pub use crate::core::rpc::RpcConnection;
pub use crate::core::signer::VaultSigner;
pub use crate::error::{ErrorKind, Result, VaultSdkError};
pub use crate::submitter::{
    BuiltTransaction, ConfirmedTransaction, SignedTransaction, SubmittedTransaction,
    SubmitterConfig, TransactionStatus, TransactionSubmitter,
};
pub use crate::types::{VaultInfo, WorkflowReport};
pub use crate::utils::{derive_vault_pda, fetch_vault_info, verify_vault_address};

pub mod program {
    pub use vault_program::error::VaultError;
    pub use vault_program::instruction::VaultInstruction;
    pub use vault_program::state::VaultState;
    pub use vault_program::VAULT_SEED;
}
