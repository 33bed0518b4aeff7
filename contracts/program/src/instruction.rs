//! Vault Instruction Definitions
//!
//! Borsh encodes the enum tag as a single byte followed by the variant
//! fields, which gives exactly the wire layout the deployed program expects:
//!
//! ```text
//! Deposit  = [0u8, amount: u64 LE]
//! Withdraw = [1u8]
//! ```

use alloc::vec::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use pinocchio::program_error::ProgramError;

use crate::error::VaultError;

/// Instruction discriminators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InstructionDiscriminator {
    Deposit = 0,
    Withdraw = 1,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultInstruction {
    /// Move lamports from the owner into the owner's vault, creating the
    /// vault on first use.
    ///
    /// Accounts:
    /// 0. `[writable, signer]` Owner
    /// 1. `[writable]` Vault (PDA: ["vault", owner])
    /// 2. `[]` System program
    Deposit {
        /// Lamports to move, must be non-zero
        amount: u64,
    },

    /// Return the vault's entire balance to the owner.
    ///
    /// Accounts:
    /// 0. `[writable, signer]` Owner
    /// 1. `[writable]` Vault (PDA: ["vault", owner])
    Withdraw,
}

impl VaultInstruction {
    /// Length of an encoded `Deposit`.
    pub const DEPOSIT_LEN: usize = 1 + 8;
    /// Length of an encoded `Withdraw`.
    pub const WITHDRAW_LEN: usize = 1;

    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| VaultError::InvalidInstruction.into())
    }

    pub fn pack(&self) -> Vec<u8> {
        match self {
            VaultInstruction::Deposit { amount } => {
                let mut data = Vec::with_capacity(Self::DEPOSIT_LEN);
                data.push(InstructionDiscriminator::Deposit as u8);
                data.extend_from_slice(&amount.to_le_bytes());
                data
            },
            VaultInstruction::Withdraw => alloc::vec![InstructionDiscriminator::Withdraw as u8],
        }
    }

    pub fn discriminator(&self) -> InstructionDiscriminator {
        match self {
            VaultInstruction::Deposit { .. } => InstructionDiscriminator::Deposit,
            VaultInstruction::Withdraw => InstructionDiscriminator::Withdraw,
        }
    }
}
