//! Vault Error Types
//!
//! The discriminant of each variant is the custom program error code the
//! runtime reports, so the order is part of the ABI.

use pinocchio::program_error::ProgramError;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum VaultError {
    #[error("Invalid instruction")]
    InvalidInstruction = 0,

    #[error("Vault address does not match the derived address")]
    InvalidVaultAddress = 1,

    #[error("Insufficient funds")]
    InsufficientFunds = 2,

    #[error("Deposit amount must be greater than zero")]
    ZeroAmount = 3,

    #[error("Vault not found")]
    VaultNotFound = 4,

    #[error("Signer is not the vault owner")]
    UnauthorizedOwner = 5,

    #[error("Vault is empty")]
    EmptyVault = 6,

    #[error("Account must be writable")]
    AccountNotWritable = 7,

    #[error("Invalid system program account")]
    InvalidSystemProgram = 8,

    #[error("Vault balance overflow")]
    BalanceOverflow = 9,

    #[error("Not enough account keys")]
    NotEnoughAccountKeys = 10,
}

impl VaultError {
    pub const fn code(self) -> u32 {
        self as u32
    }
}

impl From<VaultError> for ProgramError {
    fn from(e: VaultError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl TryFrom<u32> for VaultError {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(VaultError::InvalidInstruction),
            1 => Ok(VaultError::InvalidVaultAddress),
            2 => Ok(VaultError::InsufficientFunds),
            3 => Ok(VaultError::ZeroAmount),
            4 => Ok(VaultError::VaultNotFound),
            5 => Ok(VaultError::UnauthorizedOwner),
            6 => Ok(VaultError::EmptyVault),
            7 => Ok(VaultError::AccountNotWritable),
            8 => Ok(VaultError::InvalidSystemProgram),
            9 => Ok(VaultError::BalanceOverflow),
            10 => Ok(VaultError::NotEnoughAccountKeys),
            other => Err(other),
        }
    }
}
