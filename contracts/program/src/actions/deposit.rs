//! Deposit instruction handler

use crate::actions::VaultAccounts;
use crate::error::VaultError;
use crate::state::VaultState;
use crate::VAULT_SEED;
use pinocchio::{
    account_info::AccountInfo,
    instruction::{Seed, Signer},
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvars::{rent::Rent, Sysvar},
    ProgramResult,
};
use pinocchio_system::instructions::{Allocate, Assign, CreateAccount, Transfer};

pub fn process_deposit(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    amount: u64,
) -> ProgramResult {
    let [owner, vault, system_program, ..] = accounts else {
        return Err(VaultError::NotEnoughAccountKeys.into());
    };

    let accounts = VaultAccounts::load(program_id, owner, vault)?;

    if system_program.key() != &pinocchio_system::ID {
        return Err(VaultError::InvalidSystemProgram.into());
    }

    if amount == 0 {
        return Err(VaultError::ZeroAmount.into());
    }

    let existing = accounts.load_state(program_id)?;

    // An unopened address may already hold lamports; only the shortfall to
    // the rent reserve is charged.
    let top_up = match existing {
        Some(_) => 0,
        None => Rent::get()?
            .minimum_balance(VaultState::LEN)
            .saturating_sub(vault.lamports()),
    };
    let required = amount
        .checked_add(top_up)
        .ok_or(VaultError::BalanceOverflow)?;
    if owner.lamports() < required {
        msg!("Owner cannot cover deposit of {} lamports", amount);
        return Err(VaultError::InsufficientFunds.into());
    }

    let mut state = match existing {
        Some(state) => state,
        None => {
            open_vault(program_id, &accounts, top_up)?;
            VaultState::new(*owner.key(), accounts.bump)
        },
    };

    state.balance = state
        .balance
        .checked_add(amount)
        .ok_or(VaultError::BalanceOverflow)?;

    Transfer {
        from: owner,
        to: vault,
        lamports: amount,
    }
    .invoke()?;

    let mut data = vault.try_borrow_mut_data()?;
    state.pack_into(&mut data)?;

    Ok(())
}

/// First deposit: turns the vault address into the program-owned vault
/// record, signed by the vault's own seeds. `CreateAccount` refuses an
/// address that already holds lamports, so a pre-funded one is topped up,
/// allocated and assigned instead.
fn open_vault(program_id: &Pubkey, accounts: &VaultAccounts, top_up: u64) -> ProgramResult {
    let bump = [accounts.bump];
    let seeds = [
        Seed::from(VAULT_SEED),
        Seed::from(accounts.owner.key().as_ref()),
        Seed::from(&bump),
    ];

    if accounts.vault.lamports() == 0 {
        CreateAccount {
            from: accounts.owner,
            to: accounts.vault,
            lamports: top_up,
            space: VaultState::LEN as u64,
            owner: program_id,
        }
        .invoke_signed(&[Signer::from(&seeds)])?;

        msg!("Vault created");
        return Ok(());
    }

    if top_up > 0 {
        Transfer {
            from: accounts.owner,
            to: accounts.vault,
            lamports: top_up,
        }
        .invoke()?;
    }

    Allocate {
        account: accounts.vault,
        space: VaultState::LEN as u64,
    }
    .invoke_signed(&[Signer::from(&seeds)])?;

    Assign {
        account: accounts.vault,
        owner: program_id,
    }
    .invoke_signed(&[Signer::from(&seeds)])?;

    msg!("Vault opened over {} pre-existing lamports", accounts.vault.lamports());
    Ok(())
}
