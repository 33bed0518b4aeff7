//! Vault Program - Main Entry Point
//!
//! One program-derived vault per owner, funded by `Deposit` and drained in
//! full by `Withdraw`.

extern crate alloc;

pub mod actions;
pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;

use pinocchio_pubkey::declare_id;

pub use processor::process_instruction;

declare_id!("A11gcDm7e8Pit4RiunfhtrK1BKU4oYAa3nx54R4YnFgS");

/// Domain tag mixed into every vault address.
pub const VAULT_SEED: &[u8] = b"vault";

#[cfg(not(feature = "no-entrypoint"))]
pinocchio::entrypoint!(process_instruction);
