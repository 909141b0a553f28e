use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::system_program;
use anchor_lang::InstructionData;

use crate::errors::ClientResult;
use crate::pda::{candidate_address, poll_address};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vote {
    pub signer: Pubkey,
    pub poll: Pubkey,
    pub candidate: Pubkey,
    pub system_program: Pubkey,
}

impl ToAccountMetas for Vote {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.signer, true),
            AccountMeta::new_readonly(self.poll, false),
            AccountMeta::new(self.candidate, false),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct VoteArgs {
    pub candidate_name: String,
    pub poll_id: u64,
}

impl Discriminator for VoteArgs {
    const DISCRIMINATOR: &'static [u8] = &[227, 110, 155, 23, 136, 126, 172, 25];
}

impl InstructionData for VoteArgs {}

pub fn vote(signer: &Pubkey, args: VoteArgs) -> ClientResult<Instruction> {
    let (poll, _) = poll_address(args.poll_id);
    let (candidate, _) = candidate_address(&args.candidate_name, args.poll_id);
    vote_with_accounts(
        Vote {
            signer: *signer,
            poll,
            candidate,
            system_program: system_program::ID,
        },
        args,
    )
}

pub fn vote_with_accounts(accounts: Vote, args: VoteArgs) -> ClientResult<Instruction> {
    super::check_candidate_name(&args.candidate_name)?;
    Ok(super::build(accounts, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_for_hyd_on_poll_one() {
        let voter = Pubkey::new_unique();
        let ix = vote(
            &voter,
            VoteArgs {
                candidate_name: "hyd".to_string(),
                poll_id: 1,
            },
        )
        .unwrap();

        let metas: Vec<(Pubkey, bool, bool)> = ix
            .accounts
            .iter()
            .map(|m| (m.pubkey, m.is_signer, m.is_writable))
            .collect();
        assert_eq!(
            metas,
            vec![
                (voter, true, true),
                (poll_address(1).0, false, false),
                (candidate_address("hyd", 1).0, false, true),
                (system_program::ID, false, false),
            ]
        );

        let mut expected = VoteArgs::DISCRIMINATOR.to_vec();
        expected.extend_from_slice(&3u32.to_le_bytes());
        expected.extend_from_slice(b"hyd");
        expected.extend_from_slice(&1u64.to_le_bytes());
        assert_eq!(ix.data, expected);
    }
}
