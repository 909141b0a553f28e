use anchor_lang::prelude::Pubkey;
use thiserror::Error;

use crate::states::{MAX_CANDIDATE_NAME_LEN, MAX_DESCRIPTION_LEN};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Description too long ({0} bytes, max {MAX_DESCRIPTION_LEN})")]
    DescriptionTooLong(usize),
    #[error("Candidate name too long ({0} bytes, max {MAX_CANDIDATE_NAME_LEN})")]
    CandidateNameTooLong(usize),
    #[error("Candidate name is empty")]
    CandidateNameEmpty,
    #[error("Invalid voting time window")]
    InvalidTimeWindow,

    #[error("Account {0} not found")]
    AccountNotFound(Pubkey),
    #[error("Account {address} could not be decoded: {reason}")]
    Decode { address: Pubkey, reason: String },

    #[error("Could not compile transaction message: {0}")]
    Compile(#[from] solana_sdk::message::CompileError),
    #[error("Could not encode transaction: {0}")]
    Encode(#[from] bincode::Error),
    #[error("Transaction is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Rpc(#[from] solana_client::client_error::ClientError),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
