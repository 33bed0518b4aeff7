use crate::advanced::instructions;
use crate::basic::vault::Vault;
use crate::core::connection::SolConnection;
use crate::error::{Result, VaultSdkError};
use crate::submitter::BuiltTransaction;
use crate::utils;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;

/// Deposit into the owner's vault. Address and amount are checked locally, so
/// a bad request never reaches the network.
pub struct DepositBuilder<'a> {
    vault: &'a Vault,
    vault_address: Option<Pubkey>,
    amount: u64,
}

impl<'a> DepositBuilder<'a> {
    pub fn new(vault: &'a Vault) -> Self {
        Self {
            vault,
            vault_address: None,
            amount: 0,
        }
    }

    pub fn with_amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    /// Target a vault address obtained elsewhere. It must still be the
    /// owner's derived vault.
    pub fn with_vault_address(mut self, address: Pubkey) -> Self {
        self.vault_address = Some(address);
        self
    }

    pub fn instruction(&self) -> Result<Instruction> {
        let address = self.vault_address.unwrap_or(self.vault.address);
        utils::verify_vault_address(&self.vault.program_id, &self.vault.owner, &address)?;

        if self.amount == 0 {
            return Err(VaultSdkError::ZeroAmount);
        }

        instructions::deposit(
            &self.vault.program_id,
            &self.vault.owner,
            &address,
            self.amount,
        )
    }

    pub async fn build_transaction(
        &self,
        connection: &impl SolConnection,
    ) -> Result<BuiltTransaction> {
        let ix = self.instruction()?;
        BuiltTransaction::build(connection, &[ix], &self.vault.owner).await
    }
}

/// Withdraw the vault's whole balance back to its owner.
pub struct WithdrawBuilder<'a> {
    vault: &'a Vault,
    vault_address: Option<Pubkey>,
}

impl<'a> WithdrawBuilder<'a> {
    pub fn new(vault: &'a Vault) -> Self {
        Self {
            vault,
            vault_address: None,
        }
    }

    pub fn with_vault_address(mut self, address: Pubkey) -> Self {
        self.vault_address = Some(address);
        self
    }

    pub fn instruction(&self) -> Result<Instruction> {
        let address = self.vault_address.unwrap_or(self.vault.address);
        utils::verify_vault_address(&self.vault.program_id, &self.vault.owner, &address)?;

        instructions::withdraw(&self.vault.program_id, &self.vault.owner, &address)
    }

    pub async fn build_transaction(
        &self,
        connection: &impl SolConnection,
    ) -> Result<BuiltTransaction> {
        let ix = self.instruction()?;
        BuiltTransaction::build(connection, &[ix], &self.vault.owner).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::DEFAULT_PROGRAM_ID;
    use vault_program::instruction::VaultInstruction;

    fn vault() -> Vault {
        Vault::derive(DEFAULT_PROGRAM_ID, Pubkey::new_unique()).unwrap()
    }

    #[test]
    fn test_deposit_instruction_layout() {
        let vault = vault();
        let ix = vault.deposit().with_amount(500_000_000).instruction().unwrap();

        assert_eq!(ix.program_id, DEFAULT_PROGRAM_ID);
        assert_eq!(ix.accounts.len(), 3);
        assert_eq!(ix.accounts[0].pubkey, vault.owner);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, vault.address);
        assert!(!ix.accounts[1].is_signer && ix.accounts[1].is_writable);
        assert!(!ix.accounts[2].is_writable);
        assert_eq!(
            ix.data,
            VaultInstruction::Deposit {
                amount: 500_000_000
            }
            .pack()
        );
    }

    #[test]
    fn test_withdraw_instruction_layout() {
        let vault = vault();
        let ix = vault.withdraw().instruction().unwrap();

        assert_eq!(ix.accounts.len(), 2);
        assert_eq!(ix.accounts[1].pubkey, vault.address);
        assert_eq!(ix.data, vec![1]);
    }

    #[test]
    fn test_zero_amount_rejected_locally() {
        let vault = vault();
        assert!(matches!(
            vault.deposit().instruction(),
            Err(VaultSdkError::ZeroAmount)
        ));
    }

    #[test]
    fn test_foreign_vault_rejected_locally() {
        let vault = vault();
        let other = Vault::derive(DEFAULT_PROGRAM_ID, Pubkey::new_unique()).unwrap();

        let err = vault
            .deposit()
            .with_amount(1)
            .with_vault_address(other.address)
            .instruction()
            .unwrap_err();
        assert!(matches!(err, VaultSdkError::InvalidVaultAddress { .. }));

        let err = vault
            .withdraw()
            .with_vault_address(other.address)
            .instruction()
            .unwrap_err();
        assert!(matches!(err, VaultSdkError::InvalidVaultAddress { .. }));
    }
}
