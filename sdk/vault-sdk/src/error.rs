use solana_sdk::hash::Hash;
use solana_sdk::instruction::InstructionError;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::TransactionError;
use thiserror::Error;
use vault_program::error::VaultError;

/// SDK-specific error types for vault operations
#[derive(Debug, Error)]
pub enum VaultSdkError {
    /// Supplied vault does not match `derive(program_id, owner)`
    #[error("Invalid vault address {supplied}: expected {expected}")]
    InvalidVaultAddress { supplied: Pubkey, expected: Pubkey },

    /// Deposit of zero lamports
    #[error("Deposit amount must be greater than zero")]
    ZeroAmount,

    /// No bump produced an off-curve address
    #[error("Vault derivation exhausted every bump for owner {0}")]
    DerivationExhausted(Pubkey),

    /// A required signer was not supplied
    #[error("Missing signature for required signer {0}")]
    MissingSigner(Pubkey),

    /// A supplied signer is not a signer of the message
    #[error("Signer {0} is not required by this transaction")]
    UnexpectedSigner(Pubkey),

    /// Key provider failed to produce a signature
    #[error("Signer error: {0}")]
    Signer(String),

    /// Environment rejected the transaction; reason passed through verbatim
    #[error("Transaction {signature} rejected: {reason}")]
    Rejected {
        signature: Signature,
        reason: TransactionError,
    },

    /// Blockhash validity window elapsed before inclusion
    #[error("Transaction {signature} expired: blockhash {blockhash} is no longer valid")]
    Expired { signature: Signature, blockhash: Hash },

    /// Connection or RPC error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Account not found on-chain
    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    /// Invalid account data or deserialization error
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Borsh serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] std::io::Error),
}

/// Coarse failure classes the caller uses to decide whether to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad address, amount or signer set; caught locally, never sent
    Validation,
    /// Signer mismatch detected by the environment
    Authorization,
    /// Vault or account state does not satisfy the instruction
    State,
    /// Network or RPC failure
    Transport,
    /// Stale blockhash; rebuild with a fresh one
    Expiry,
}

impl VaultSdkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultSdkError::InvalidVaultAddress { .. }
            | VaultSdkError::ZeroAmount
            | VaultSdkError::DerivationExhausted(_)
            | VaultSdkError::MissingSigner(_)
            | VaultSdkError::UnexpectedSigner(_)
            | VaultSdkError::Signer(_)
            | VaultSdkError::Config(_)
            | VaultSdkError::SerializationError(_) => ErrorKind::Validation,
            VaultSdkError::Rejected { reason, .. } => classify_rejection(reason),
            VaultSdkError::Expired { .. } => ErrorKind::Expiry,
            VaultSdkError::Connection(_) => ErrorKind::Transport,
            VaultSdkError::AccountNotFound(_) | VaultSdkError::InvalidAccountData(_) => {
                ErrorKind::State
            },
        }
    }

    /// Decodes the vault program error carried by a rejection, if any.
    pub fn program_error(&self) -> Option<VaultError> {
        match self {
            VaultSdkError::Rejected { reason, .. } => decode_program_error(reason),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Expiry | ErrorKind::Transport)
    }
}

pub fn decode_program_error(reason: &TransactionError) -> Option<VaultError> {
    match reason {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
            VaultError::try_from(*code).ok()
        },
        _ => None,
    }
}

fn classify_rejection(reason: &TransactionError) -> ErrorKind {
    if let Some(program_error) = decode_program_error(reason) {
        return match program_error {
            VaultError::UnauthorizedOwner => ErrorKind::Authorization,
            VaultError::InvalidInstruction
            | VaultError::InvalidVaultAddress
            | VaultError::ZeroAmount
            | VaultError::AccountNotWritable
            | VaultError::InvalidSystemProgram
            | VaultError::NotEnoughAccountKeys => ErrorKind::Validation,
            VaultError::InsufficientFunds
            | VaultError::VaultNotFound
            | VaultError::EmptyVault
            | VaultError::BalanceOverflow => ErrorKind::State,
        };
    }

    match reason {
        TransactionError::BlockhashNotFound => ErrorKind::Expiry,
        TransactionError::SignatureFailure
        | TransactionError::InstructionError(_, InstructionError::MissingRequiredSignature) => {
            ErrorKind::Authorization
        },
        _ => ErrorKind::State,
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, VaultSdkError>;
