use crate::submitter::ConfirmedTransaction;
use solana_sdk::pubkey::Pubkey;

/// Parsed vault account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultInfo {
    /// Vault PDA
    pub address: Pubkey,

    /// Owner recorded by the first deposit
    pub owner: Pubkey,

    /// Deposited lamports, excluding the rent reserve
    pub balance: u64,

    /// Canonical bump of the vault PDA
    pub bump: u8,

    /// Total lamports held by the account (rent reserve + balance)
    pub lamports: u64,
}

impl VaultInfo {
    pub fn is_empty(&self) -> bool {
        self.balance == 0
    }

    /// Lamports held beyond the deposited balance: the rent reserve plus
    /// anything sent to the address before the vault was opened
    pub fn rent_reserve(&self) -> u64 {
        self.lamports.saturating_sub(self.balance)
    }
}

/// Outcome of a deposit-then-withdraw run.
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub vault: Pubkey,
    pub deposited: u64,
    pub deposit: ConfirmedTransaction,
    pub withdrawn: u64,
    pub withdraw: ConfirmedTransaction,
}
