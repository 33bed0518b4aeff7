use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

// Default Program ID of the deployed vault program
pub const DEFAULT_PROGRAM_ID: Pubkey = pubkey!("A11gcDm7e8Pit4RiunfhtrK1BKU4oYAa3nx54R4YnFgS");

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";

/// Amount moved by the default deposit/withdraw workflow (0.5 SOL).
pub const DEFAULT_DEPOSIT_LAMPORTS: u64 = 500_000_000;
