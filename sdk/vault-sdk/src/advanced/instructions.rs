//! Raw instruction constructors.
//!
//! These encode exactly what they are given and perform no local validation,
//! which makes them the tool for probing the program's own checks. Use the
//! builders in [`crate::basic::actions`] for normal operation.

use crate::error::Result;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;
use vault_program::instruction::VaultInstruction;

pub fn deposit(
    program_id: &Pubkey,
    owner: &Pubkey,
    vault: &Pubkey,
    amount: u64,
) -> Result<Instruction> {
    let instruction = VaultInstruction::Deposit { amount };

    let accounts = vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new(*vault, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: borsh::to_vec(&instruction)?,
    })
}

pub fn withdraw(program_id: &Pubkey, owner: &Pubkey, vault: &Pubkey) -> Result<Instruction> {
    let instruction = VaultInstruction::Withdraw;

    let accounts = vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new(*vault, false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: borsh::to_vec(&instruction)?,
    })
}
