//! Instruction Processor
//!
//! Thin dispatcher that routes instructions to individual handlers.

use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey, ProgramResult};

use crate::actions;
use crate::instruction::VaultInstruction;

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = VaultInstruction::unpack(instruction_data).map_err(|e| {
        msg!("Failed to unpack vault instruction");
        e
    })?;

    match instruction {
        VaultInstruction::Deposit { amount } => {
            actions::process_deposit(program_id, accounts, amount)
        },
        VaultInstruction::Withdraw => actions::process_withdraw(program_id, accounts),
    }
}
