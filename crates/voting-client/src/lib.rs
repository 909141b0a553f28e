use anchor_lang::prelude::*;

pub mod errors;
pub mod states;
pub mod pda;
pub mod instructions;
pub mod transaction;
pub mod rpc;

pub use errors::ClientError;
pub use states::{Candidate, Poll};
pub use rpc::{BlockhashSource, VotingRpc};

declare_id!("4aW7bxu9uKuVasuBoRkCnHHzn7SK53n814VZQd9q1Xqx");
