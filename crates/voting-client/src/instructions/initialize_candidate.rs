use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::system_program;
use anchor_lang::InstructionData;

use crate::errors::ClientResult;
use crate::pda::{candidate_address, poll_address};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeCandidate {
    pub signer: Pubkey,
    pub poll: Pubkey,
    pub candidate: Pubkey,
    pub system_program: Pubkey,
}

impl ToAccountMetas for InitializeCandidate {
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
pub struct InitializeCandidateArgs {
    pub candidate_name: String,
    pub poll_id: u64,
}

impl Discriminator for InitializeCandidateArgs {
    const DISCRIMINATOR: &'static [u8] = &[210, 107, 118, 204, 255, 97, 112, 26];
}

impl InstructionData for InitializeCandidateArgs {}

/// Registers a candidate on an existing poll.
///
/// The poll is passed read-only, so the poll's `candidate_amount` stays as it
/// was: the program increments it in memory but never writes it back.
pub fn initialize_candidate(
    signer: &Pubkey,
    args: InitializeCandidateArgs,
) -> ClientResult<Instruction> {
    let (poll, _) = poll_address(args.poll_id);
    let (candidate, _) = candidate_address(&args.candidate_name, args.poll_id);
    initialize_candidate_with_accounts(
        InitializeCandidate {
            signer: *signer,
            poll,
            candidate,
            system_program: system_program::ID,
        },
        args,
    )
}

pub fn initialize_candidate_with_accounts(
    accounts: InitializeCandidate,
    args: InitializeCandidateArgs,
) -> ClientResult<Instruction> {
    super::check_candidate_name(&args.candidate_name)?;
    Ok(super::build(accounts, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClientError;

    #[test]
    fn derives_poll_and_hashed_candidate_accounts() {
        let signer = Pubkey::new_unique();
        let args = InitializeCandidateArgs {
            candidate_name: "Test candidate".to_string(),
            poll_id: 1,
        };
        let ix = initialize_candidate(&signer, args.clone()).unwrap();

        assert_eq!(ix.accounts[0], AccountMeta::new(signer, true));
        assert_eq!(ix.accounts[1], AccountMeta::new_readonly(poll_address(1).0, false));
        assert_eq!(
            ix.accounts[2],
            AccountMeta::new(candidate_address("Test candidate", 1).0, false)
        );
        assert_eq!(ix.accounts[3].pubkey, system_program::ID);

        assert_eq!(&ix.data[..8], InitializeCandidateArgs::DISCRIMINATOR);
        assert_eq!(InitializeCandidateArgs::try_from_slice(&ix.data[8..]).unwrap(), args);
    }

    #[test]
    fn explicit_accounts_are_passed_through() {
        let accounts = InitializeCandidate {
            signer: Pubkey::new_unique(),
            poll: Pubkey::new_unique(),
            candidate: Pubkey::new_unique(),
            system_program: system_program::ID,
        };
        let ix = initialize_candidate_with_accounts(
            accounts,
            InitializeCandidateArgs {
                candidate_name: "luck".to_string(),
                poll_id: 9,
            },
        )
        .unwrap();

        assert_eq!(ix.accounts[1].pubkey, accounts.poll);
        assert_eq!(ix.accounts[2].pubkey, accounts.candidate);
    }

    #[test]
    fn rejects_names_that_do_not_fit_the_account() {
        let signer = Pubkey::new_unique();
        let too_long = InitializeCandidateArgs {
            candidate_name: "n".repeat(33),
            poll_id: 1,
        };
        assert!(matches!(
            initialize_candidate(&signer, too_long),
            Err(ClientError::CandidateNameTooLong(33))
        ));

        let empty = InitializeCandidateArgs {
            candidate_name: String::new(),
            poll_id: 1,
        };
        assert!(matches!(
            initialize_candidate(&signer, empty),
            Err(ClientError::CandidateNameEmpty)
        ));
    }
}
