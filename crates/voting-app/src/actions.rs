//! Blink action protocol: a GET descriptor listing the ballot and a POST that
//! answers with an unsigned vote transaction for the caller's wallet.

use std::str::FromStr;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;
use voting_client::instructions::{vote, VoteArgs};
use voting_client::transaction::{compile_unsigned, encode_base64};
use voting_client::{BlockhashSource, ClientError};

use crate::ballot::Ballot;

pub const VOTE_PATH: &str = "/api/vote";
pub const RULES_PATH: &str = "/actions.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGetResponse {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub label: String,
    pub links: ActionLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLinks {
    pub actions: Vec<LinkedAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAction {
    pub label: String,
    pub href: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActionPostRequest {
    pub account: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPostResponse {
    pub transaction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRules {
    pub rules: Vec<ActionRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRule {
    pub path_pattern: String,
    pub api_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Candidate is required")]
    MissingCandidate,
    #[error("Invalid candidate")]
    InvalidCandidate,
    #[error("Invalid request body")]
    InvalidBody,
    #[error("Invalid account")]
    InvalidAccount,
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ActionError {
    /// Caller mistakes are 400s; anything from the cluster side is a 500.
    pub fn status(&self) -> u16 {
        match self {
            ActionError::Client(_) => 500,
            _ => 400,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

pub fn describe(ballot: &Ballot) -> ActionGetResponse {
    ActionGetResponse {
        icon: ballot.icon.to_string(),
        title: ballot.title.to_string(),
        description: ballot.description.to_string(),
        label: ballot.label.to_string(),
        links: ActionLinks {
            actions: ballot
                .choices
                .iter()
                .map(|choice| LinkedAction {
                    label: choice.label.to_string(),
                    href: format!("{VOTE_PATH}?candidate={}", choice.id),
                    kind: "post".to_string(),
                })
                .collect(),
        },
    }
}

pub fn rules() -> ActionRules {
    ActionRules {
        rules: vec![ActionRule {
            path_pattern: VOTE_PATH.to_string(),
            api_path: VOTE_PATH.to_string(),
        }],
    }
}

/// Builds the unsigned vote transaction for a POST.
///
/// The candidate is checked before the body is parsed, so a request with both
/// problems reports the candidate.
pub fn vote_transaction(
    source: &dyn BlockhashSource,
    ballot: &Ballot,
    poll_id: u64,
    candidate: Option<&str>,
    body: &[u8],
) -> Result<ActionPostResponse, ActionError> {
    let candidate = match candidate {
        Some(candidate) if !candidate.is_empty() => candidate,
        _ => return Err(ActionError::MissingCandidate),
    };
    let choice = ballot.choice(candidate).ok_or_else(|| {
        warn!("rejected unknown candidate {candidate:?}");
        ActionError::InvalidCandidate
    })?;

    let request: ActionPostRequest =
        serde_json::from_slice(body).map_err(|_| ActionError::InvalidBody)?;
    let voter = Pubkey::from_str(&request.account).map_err(|_| {
        warn!("rejected account {:?}", request.account);
        ActionError::InvalidAccount
    })?;

    let ix = vote(
        &voter,
        VoteArgs {
            candidate_name: choice.id.to_string(),
            poll_id,
        },
    )?;
    let blockhash = source.latest_blockhash()?;
    let transaction = compile_unsigned(&voter, &[ix], blockhash)?;

    info!("built vote for {} on poll {poll_id} from {voter}", choice.id);
    Ok(ActionPostResponse {
        transaction: encode_base64(&transaction)?,
    })
}
