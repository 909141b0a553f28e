use anchor_lang::prelude::*;
use anchor_lang::InstructionData;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::system_program;

use crate::errors::{ClientError, ClientResult};
use crate::pda::poll_address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializePoll {
    pub signer: Pubkey,
    pub poll: Pubkey,
    pub system_program: Pubkey,
}

impl ToAccountMetas for InitializePoll {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.signer, true),
            AccountMeta::new(self.poll, false),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct InitializePollArgs {
    pub poll_id: u64,
    pub description: String,
    pub poll_start: u64,
    pub poll_end: u64,
}

impl Discriminator for InitializePollArgs {
    const DISCRIMINATOR: &'static [u8] = &[193, 22, 99, 197, 18, 33, 115, 117];
}

impl InstructionData for InitializePollArgs {}

/// Creates the poll account at its derived address, paid for by `signer`.
pub fn initialize_poll(signer: &Pubkey, args: InitializePollArgs) -> ClientResult<Instruction> {
    let (poll, _) = poll_address(args.poll_id);
    initialize_poll_with_accounts(
        InitializePoll {
            signer: *signer,
            poll,
            system_program: system_program::ID,
        },
        args,
    )
}

pub fn initialize_poll_with_accounts(
    accounts: InitializePoll,
    args: InitializePollArgs,
) -> ClientResult<Instruction> {
    super::check_description(&args.description)?;
    if args.poll_end <= args.poll_start {
        return Err(ClientError::InvalidTimeWindow);
    }
    Ok(super::build(accounts, args))
}
