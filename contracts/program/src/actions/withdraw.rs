//! Withdraw instruction handler

use crate::actions::VaultAccounts;
use crate::error::VaultError;
use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey, ProgramResult};

pub fn process_withdraw(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let [owner, vault, ..] = accounts else {
        return Err(VaultError::NotEnoughAccountKeys.into());
    };

    let accounts = VaultAccounts::load(program_id, owner, vault)?;

    let mut state = accounts
        .load_state(program_id)?
        .ok_or(VaultError::VaultNotFound)?;

    if state.balance == 0 {
        msg!("Vault is already empty");
        return Err(VaultError::EmptyVault.into());
    }

    // The vault is program-owned, so lamports move without a system CPI.
    {
        let mut vault_lamports = vault.try_borrow_mut_lamports()?;
        *vault_lamports = vault_lamports
            .checked_sub(state.balance)
            .ok_or(VaultError::InsufficientFunds)?;
    }
    {
        let mut owner_lamports = owner.try_borrow_mut_lamports()?;
        *owner_lamports = owner_lamports
            .checked_add(state.balance)
            .ok_or(VaultError::BalanceOverflow)?;
    }

    state.balance = 0;
    let mut data = vault.try_borrow_mut_data()?;
    state.pack_into(&mut data)?;

    Ok(())
}
