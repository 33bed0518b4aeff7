pub mod deposit;
pub mod withdraw;

pub use deposit::*;
pub use withdraw::*;

use crate::error::VaultError;
use crate::state::VaultState;
use crate::VAULT_SEED;
use pinocchio::{
    account_info::AccountInfo,
    msg,
    program_error::ProgramError,
    pubkey::{find_program_address, Pubkey},
};

/// Owner and vault accounts shared by both instructions, validated against
/// the canonical vault address.
pub struct VaultAccounts<'a> {
    pub owner: &'a AccountInfo,
    pub vault: &'a AccountInfo,
    pub bump: u8,
}

impl<'a> VaultAccounts<'a> {
    pub fn load(
        program_id: &Pubkey,
        owner: &'a AccountInfo,
        vault: &'a AccountInfo,
    ) -> Result<Self, ProgramError> {
        // Capability check: only the owner's own signature authorizes its vault.
        if !owner.is_signer() {
            msg!("Owner did not sign the transaction");
            return Err(VaultError::UnauthorizedOwner.into());
        }

        if !owner.is_writable() || !vault.is_writable() {
            return Err(VaultError::AccountNotWritable.into());
        }

        let (expected_vault, bump) =
            find_program_address(&[VAULT_SEED, owner.key().as_ref()], program_id);
        if vault.key() != &expected_vault {
            msg!("Vault address does not match [\"vault\", owner] derivation");
            return Err(VaultError::InvalidVaultAddress.into());
        }

        Ok(Self { owner, vault, bump })
    }

    /// Reads the vault record, or `None` when the vault has not been opened
    /// yet. Lamports sent to the address beforehand leave it system-owned
    /// with no data, which still counts as unopened.
    pub fn load_state(&self, program_id: &Pubkey) -> Result<Option<VaultState>, ProgramError> {
        if self.vault.owner() != program_id {
            if self.is_unopened() {
                return Ok(None);
            }
            msg!("Vault address is held by another program");
            return Err(VaultError::VaultNotFound.into());
        }

        let data = self.vault.try_borrow_data()?;
        let state = VaultState::unpack(&data)?;
        if &state.owner != self.owner.key() {
            msg!("Signer is not the recorded vault owner");
            return Err(VaultError::UnauthorizedOwner.into());
        }

        Ok(Some(state))
    }

    pub fn is_unopened(&self) -> bool {
        self.vault.owner() == &pinocchio_system::ID && self.vault.data_is_empty()
    }
}
