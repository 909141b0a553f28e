//! Program-derived addresses used by the voting program.
//!
//! The poll lives at `[poll_id_le]`. Candidates are keyed by the SHA-256 of
//! their name rather than the raw bytes, so names of any length fit in a
//! single 32-byte seed.

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::hash::hash;

/// Seed form of a candidate name.
pub fn hashed_name(name: &str) -> [u8; 32] {
    hash(name.as_bytes()).to_bytes()
}

pub fn poll_address(poll_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[poll_id.to_le_bytes().as_ref()], &crate::ID)
}

pub fn candidate_address(candidate_name: &str, poll_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            hashed_name(candidate_name).as_ref(),
            poll_id.to_le_bytes().as_ref(),
        ],
        &crate::ID,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    #[test]
    fn hashed_name_is_sha256_of_utf8() {
        for name in ["hyd", "luck", "Test candidate", "ß"] {
            let expected: [u8; 32] = Sha256::digest(name.as_bytes()).into();
            assert_eq!(hashed_name(name), expected);
        }
        assert_eq!(hashed_name("hyd")[..4], [64, 16, 193, 102]);
    }

    #[test]
    fn poll_address_is_deterministic_per_id() {
        let (first, bump) = poll_address(1);
        assert_eq!(poll_address(1), (first, bump));
        assert_ne!(poll_address(2).0, first);

        let rederived =
            Pubkey::create_program_address(&[1u64.to_le_bytes().as_ref(), &[bump]], &crate::ID)
                .unwrap();
        assert_eq!(rederived, first);
    }

    #[test]
    fn candidate_address_depends_on_name_and_poll() {
        let (hyd, bump) = candidate_address("hyd", 1);
        assert_ne!(candidate_address("luck", 1).0, hyd);
        assert_ne!(candidate_address("hyd", 2).0, hyd);
        assert_ne!(poll_address(1).0, hyd);

        let rederived = Pubkey::create_program_address(
            &[
                hashed_name("hyd").as_ref(),
                1u64.to_le_bytes().as_ref(),
                &[bump],
            ],
            &crate::ID,
        )
        .unwrap();
        assert_eq!(rederived, hyd);
    }
}
