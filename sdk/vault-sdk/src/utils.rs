use crate::core::connection::SolConnection;
use crate::error::{Result, VaultSdkError};
use crate::types::VaultInfo;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;
use vault_program::state::VaultState;
use vault_program::VAULT_SEED;

//=============================================================================
// PDA Derivation Helpers
//=============================================================================

/// Derive the Vault PDA from program ID and owner.
///
/// Seeds are `["vault", owner]`; the canonical bump is the highest value in
/// `255..=0` whose address falls off the ed25519 curve, so no keypair can
/// ever sign for the vault.
pub fn derive_vault_pda(program_id: &Pubkey, owner: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(&[VAULT_SEED, owner.as_ref()], program_id)
        .ok_or(VaultSdkError::DerivationExhausted(*owner))
}

/// Checks that `candidate` is the canonical vault of `owner` and returns its
/// bump.
pub fn verify_vault_address(
    program_id: &Pubkey,
    owner: &Pubkey,
    candidate: &Pubkey,
) -> Result<u8> {
    let (expected, bump) = derive_vault_pda(program_id, owner)?;
    if candidate != &expected {
        return Err(VaultSdkError::InvalidVaultAddress {
            supplied: *candidate,
            expected,
        });
    }
    Ok(bump)
}

/// Signer seeds of a vault, for callers that need to re-create the address
/// from a known bump.
pub fn vault_seeds_with_bump<'a>(owner: &'a Pubkey, bump: &'a [u8; 1]) -> [&'a [u8]; 3] {
    [VAULT_SEED, owner.as_ref(), bump]
}

//=============================================================================
// Account Fetching & Parsing
//=============================================================================

/// Parse the vault record from account data
pub fn parse_vault_state(data: &[u8]) -> Result<VaultState> {
    VaultState::unpack(data).map_err(|e| {
        VaultSdkError::InvalidAccountData(format!("Failed to parse vault state: {:?}", e))
    })
}

/// Fetch and parse the vault account. `None` until the first deposit opens
/// the vault, even if lamports were already sent to the address.
pub async fn fetch_vault_info(
    connection: &impl SolConnection,
    program_id: &Pubkey,
    vault: &Pubkey,
) -> Result<Option<VaultInfo>> {
    let account = connection
        .get_account(vault)
        .await
        .map_err(|e| VaultSdkError::Connection(e.to_string()))?;

    let Some(account) = account else {
        return Ok(None);
    };
    if account.owner == system_program::id() && account.data.is_empty() {
        return Ok(None);
    }

    if &account.owner != program_id {
        return Err(VaultSdkError::InvalidAccountData(format!(
            "Vault {} is owned by {}, not the vault program",
            vault, account.owner
        )));
    }

    let state = parse_vault_state(&account.data)?;
    Ok(Some(VaultInfo {
        address: *vault,
        owner: Pubkey::new_from_array(state.owner),
        balance: state.balance,
        bump: state.bump,
        lamports: account.lamports,
    }))
}
