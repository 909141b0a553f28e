//! Instruction builders for the voting program.
//!
//! Each instruction pairs an accounts struct (ordered as the program's
//! `#[derive(Accounts)]` declares them) with an args struct carrying the
//! 8-byte instruction discriminator followed by Borsh-encoded arguments.

use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{InstructionData, ToAccountMetas};

use crate::errors::{ClientError, ClientResult};
use crate::states::{MAX_CANDIDATE_NAME_LEN, MAX_DESCRIPTION_LEN};

pub mod initialize_poll;
pub mod initialize_candidate;
pub mod vote;

pub use initialize_candidate::*;
pub use initialize_poll::*;
pub use vote::*;

fn build(accounts: impl ToAccountMetas, args: impl InstructionData) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: accounts.to_account_metas(None),
        data: args.data(),
    }
}

fn check_description(description: &str) -> ClientResult<()> {
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(ClientError::DescriptionTooLong(description.len()));
    }
    Ok(())
}

fn check_candidate_name(name: &str) -> ClientResult<()> {
    if name.is_empty() {
        return Err(ClientError::CandidateNameEmpty);
    }
    if name.len() > MAX_CANDIDATE_NAME_LEN {
        return Err(ClientError::CandidateNameTooLong(name.len()));
    }
    Ok(())
}
