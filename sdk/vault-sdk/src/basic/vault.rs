use crate::basic::actions::{DepositBuilder, WithdrawBuilder};
use crate::core::connection::SolConnection;
use crate::error::{Result, VaultSdkError};
use crate::types::VaultInfo;
use crate::utils;
use solana_sdk::pubkey::Pubkey;

/// An owner's vault on one deployed program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vault {
    /// Vault PDA
    pub address: Pubkey,

    /// Canonical bump of the vault PDA
    pub bump: u8,

    /// Account allowed to deposit into and withdraw from the vault
    pub owner: Pubkey,

    /// Program ID of the vault contract
    pub program_id: Pubkey,
}

impl Vault {
    /// Derive the vault of `owner`. Pure; nothing is fetched.
    pub fn derive(program_id: Pubkey, owner: Pubkey) -> Result<Self> {
        let (address, bump) = utils::derive_vault_pda(&program_id, &owner)?;
        Ok(Self {
            address,
            bump,
            owner,
            program_id,
        })
    }

    pub fn deposit(&self) -> DepositBuilder<'_> {
        DepositBuilder::new(self)
    }

    pub fn withdraw(&self) -> WithdrawBuilder<'_> {
        WithdrawBuilder::new(self)
    }

    /// `None` until the first deposit lands.
    pub async fn fetch_info(&self, connection: &impl SolConnection) -> Result<Option<VaultInfo>> {
        let info = utils::fetch_vault_info(connection, &self.program_id, &self.address).await?;
        if let Some(info) = &info {
            if info.owner != self.owner {
                return Err(VaultSdkError::InvalidAccountData(format!(
                    "vault {} records owner {}, expected {}",
                    self.address, info.owner, self.owner
                )));
            }
        }
        Ok(info)
    }

    /// Deposited lamports; zero for a vault that was never funded.
    pub async fn balance(&self, connection: &impl SolConnection) -> Result<u64> {
        Ok(self
            .fetch_info(connection)
            .await?
            .map_or(0, |info| info.balance))
    }
}
