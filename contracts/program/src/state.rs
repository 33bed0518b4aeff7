//! Vault account layout.
//!
//! ```text
//! [0..32]  owner: Pubkey
//! [32..40] balance: u64 LE
//! [40]     bump: u8
//! ```

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultState {
    /// Owner recorded by the deposit that created the vault
    pub owner: Pubkey,
    /// Deposited lamports, excluding the rent reserve
    pub balance: u64,
    /// Canonical bump of the vault address
    pub bump: u8,
}

impl VaultState {
    pub const LEN: usize = 32 + 8 + 1;

    pub fn new(owner: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            balance: 0,
            bump,
        }
    }

    pub fn unpack(data: &[u8]) -> Result<Self, ProgramError> {
        if data.len() != Self::LEN {
            return Err(ProgramError::InvalidAccountData);
        }

        let mut owner = [0u8; 32];
        owner.copy_from_slice(&data[..32]);

        let mut balance = [0u8; 8];
        balance.copy_from_slice(&data[32..40]);

        Ok(Self {
            owner,
            balance: u64::from_le_bytes(balance),
            bump: data[40],
        })
    }

    pub fn pack_into(&self, dst: &mut [u8]) -> Result<(), ProgramError> {
        if dst.len() != Self::LEN {
            return Err(ProgramError::AccountDataTooSmall);
        }

        dst[..32].copy_from_slice(&self.owner);
        dst[32..40].copy_from_slice(&self.balance.to_le_bytes());
        dst[40] = self.bump;
        Ok(())
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut bytes = [0u8; Self::LEN];
        bytes[..32].copy_from_slice(&self.owner);
        bytes[32..40].copy_from_slice(&self.balance.to_le_bytes());
        bytes[40] = self.bump;
        bytes
    }
}
