use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;

/// Key provider for vault owners and fee payers. Local keypairs sign
/// in-process; remote or hardware keys only need to expose a signing call.
#[async_trait]
pub trait VaultSigner: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Signs the serialized message bytes of a transaction. An error means
    /// the provider refused or could not reach its key.
    async fn sign_message(&self, message: &[u8]) -> Result<Signature, String>;
}

#[async_trait]
impl VaultSigner for Keypair {
    fn pubkey(&self) -> Pubkey {
        Signer::pubkey(self)
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature, String> {
        Signer::try_sign_message(self, message).map_err(|e| e.to_string())
    }
}
