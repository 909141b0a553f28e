use anchor_lang::prelude::*;

use crate::errors::{ClientError, ClientResult};

pub const MAX_DESCRIPTION_LEN: usize = 280;
pub const MAX_CANDIDATE_NAME_LEN: usize = 32;

#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct Poll {
    pub poll_id: u64,
    #[max_len(280)]
    pub description: String,
    pub poll_start: u64,
    pub poll_end: u64,
    pub candidate_amount: u64,
}
impl Poll {
    pub const SPACE: usize = 8 + Poll::INIT_SPACE;
}

#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct Candidate {
    #[max_len(32)]
    pub candidate_name: String,
    pub candidate_votes: u64,
}
impl Candidate {
    pub const SPACE: usize = 8 + Candidate::INIT_SPACE;
}

/// Decodes raw account data, checking the 8-byte discriminator first.
pub fn decode<T: AccountDeserialize>(address: &Pubkey, data: &[u8]) -> ClientResult<T> {
    let mut bytes = data;
    T::try_deserialize(&mut bytes).map_err(|err| ClientError::Decode {
        address: *address,
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<T: AccountSerialize>(account: &T) -> Vec<u8> {
        let mut data = Vec::new();
        account.try_serialize(&mut data).unwrap();
        data
    }

    #[test]
    fn discriminators_follow_anchor_naming() {
        assert_eq!(Poll::DISCRIMINATOR, &[110, 234, 167, 188, 231, 136, 153, 111]);
        assert_eq!(Candidate::DISCRIMINATOR, &[86, 69, 250, 96, 193, 10, 222, 123]);
    }

    #[test]
    fn account_space_matches_program_allocation() {
        assert_eq!(Poll::INIT_SPACE, 8 + (4 + MAX_DESCRIPTION_LEN) + 8 + 8 + 8);
        assert_eq!(Poll::SPACE, 324);
        assert_eq!(Candidate::INIT_SPACE, (4 + MAX_CANDIDATE_NAME_LEN) + 8);
        assert_eq!(Candidate::SPACE, 52);
    }

    #[test]
    fn decodes_zero_padded_account_data() {
        let poll = Poll {
            poll_id: 1,
            description: "Vote for the best Biryani".to_string(),
            poll_start: 1_700_000_000_000,
            poll_end: 1_700_086_400_000,
            candidate_amount: 2,
        };
        // On-chain accounts are allocated at full size; the tail stays zeroed.
        let mut data = encode(&poll);
        data.resize(Poll::SPACE, 0);

        let decoded: Poll = decode(&Pubkey::default(), &data).unwrap();
        assert_eq!(decoded, poll);
    }

    #[test]
    fn rejects_account_of_another_type() {
        let candidate = Candidate {
            candidate_name: "hyd".to_string(),
            candidate_votes: 7,
        };
        let data = encode(&candidate);
        let address = Pubkey::new_unique();

        let err = decode::<Poll>(&address, &data).unwrap_err();
        match err {
            ClientError::Decode { address: at, .. } => assert_eq!(at, address),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_truncated_data() {
        let candidate = Candidate {
            candidate_name: "luck".to_string(),
            candidate_votes: 3,
        };
        let data = encode(&candidate);

        assert!(decode::<Candidate>(&Pubkey::default(), &data[..data.len() - 4]).is_err());
        assert!(decode::<Candidate>(&Pubkey::default(), &[]).is_err());
    }
}
