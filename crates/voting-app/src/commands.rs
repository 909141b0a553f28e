use std::path::Path;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context};
use log::info;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};
use voting_client::instructions::{
    initialize_candidate, initialize_poll, vote, InitializeCandidateArgs, InitializePollArgs,
    VoteArgs,
};
use voting_client::pda::{candidate_address, poll_address};
use voting_client::{Candidate, Poll, VotingRpc};

use crate::ballot::{Ballot, BIRYANI};
use crate::config::{Cli, Command};
use crate::server::ActionServer;

const DAY_MS: u64 = 86_400_000;
const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let rpc = VotingRpc::new(cli.url.clone());
    info!("using rpc {}", rpc.url());

    match &cli.command {
        Command::Serve { bind, poll_id } => {
            let server = ActionServer::bind(bind, rpc, BIRYANI, *poll_id)?;
            server.serve();
        }
        Command::InitPoll {
            poll_id,
            description,
            start,
            end,
        } => {
            let payer = load_keypair(&cli.keypair_path())?;
            let (poll_start, poll_end) = poll_window(*start, *end, now_ms()?);
            let ix = initialize_poll(
                &payer.pubkey(),
                InitializePollArgs {
                    poll_id: *poll_id,
                    description: description.clone(),
                    poll_start,
                    poll_end,
                },
            )?;
            let signature = rpc.send_and_confirm(&[ix], &payer)?;
            println!("poll {poll_id} created at {} ({signature})", poll_address(*poll_id).0);
        }
        Command::AddCandidate { poll_id, name } => {
            let payer = load_keypair(&cli.keypair_path())?;
            add_candidate(&rpc, &payer, *poll_id, name)?;
        }
        Command::Vote { poll_id, name } => {
            let payer = load_keypair(&cli.keypair_path())?;
            let ix = vote(
                &payer.pubkey(),
                VoteArgs {
                    candidate_name: name.clone(),
                    poll_id: *poll_id,
                },
            )?;
            let signature = rpc.send_and_confirm(&[ix], &payer)?;
            let candidate = rpc.fetch_candidate(&candidate_address(name, *poll_id).0)?;
            println!(
                "voted for {name} ({} votes) ({signature})",
                candidate.candidate_votes
            );
        }
        Command::ShowPoll { poll_id } => {
            let address = poll_address(*poll_id).0;
            let poll = rpc.fetch_poll(&address)?;
            println!("{}", describe_poll(&address, &poll));
        }
        Command::List => {
            let polls = rpc.polls()?;
            println!("{} poll(s)", polls.len());
            for (address, poll) in &polls {
                println!("  {}", describe_poll(address, poll));
            }
            let candidates = rpc.candidates()?;
            println!("{} candidate(s)", candidates.len());
            for (address, candidate) in &candidates {
                println!("  {}", describe_candidate(address, candidate));
            }
        }
        Command::Seed { poll_id } => {
            let payer = load_keypair(&cli.keypair_path())?;
            seed(&rpc, &payer, &BIRYANI, *poll_id)?;
        }
        Command::Balance { address } => {
            let address = match address {
                Some(address) => Pubkey::from_str(address)
                    .map_err(|err| anyhow!("invalid address {address}: {err}"))?,
                None => load_keypair(&cli.keypair_path())?.pubkey(),
            };
            let lamports = rpc.balance(&address)?;
            println!("{address}: {} SOL", format_sol(lamports));
        }
    }
    Ok(())
}

/// Missing bounds default to a one-day window starting now.
fn poll_window(start: Option<u64>, end: Option<u64>, now: u64) -> (u64, u64) {
    let start = start.unwrap_or(now);
    let end = end.unwrap_or(start + DAY_MS);
    (start, end)
}

fn add_candidate(rpc: &VotingRpc, payer: &Keypair, poll_id: u64, name: &str) -> anyhow::Result<()> {
    let ix = initialize_candidate(
        &payer.pubkey(),
        InitializeCandidateArgs {
            candidate_name: name.to_string(),
            poll_id,
        },
    )?;
    let signature = rpc.send_and_confirm(&[ix], payer)?;
    println!(
        "candidate {name} added to poll {poll_id} at {} ({signature})",
        candidate_address(name, poll_id).0
    );
    Ok(())
}

/// Creates whatever part of the ballot is missing on-chain. Safe to rerun.
fn seed(rpc: &VotingRpc, payer: &Keypair, ballot: &Ballot, poll_id: u64) -> anyhow::Result<()> {
    if rpc.poll_by_id(poll_id)?.is_some() {
        println!("poll {poll_id} already exists");
    } else {
        let (poll_start, poll_end) = poll_window(None, None, now_ms()?);
        let ix = initialize_poll(
            &payer.pubkey(),
            InitializePollArgs {
                poll_id,
                description: ballot.title.to_string(),
                poll_start,
                poll_end,
            },
        )?;
        rpc.send_and_confirm(&[ix], payer)?;
        println!("poll {poll_id} created");
    }

    for choice in ballot.choices {
        if rpc.candidate_by_name(choice.id, poll_id)?.is_some() {
            println!("candidate {} already exists", choice.id);
        } else {
            add_candidate(rpc, payer, poll_id, choice.id)?;
        }
    }
    Ok(())
}

fn load_keypair(path: &Path) -> anyhow::Result<Keypair> {
    read_keypair_file(path).map_err(|err| anyhow!("cannot read keypair {}: {err}", path.display()))
}

fn now_ms() -> anyhow::Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?;
    Ok(elapsed.as_millis() as u64)
}

fn format_sol(lamports: u64) -> String {
    format!(
        "{}.{:09}",
        lamports / LAMPORTS_PER_SOL,
        lamports % LAMPORTS_PER_SOL
    )
}

fn describe_poll(address: &Pubkey, poll: &Poll) -> String {
    format!(
        "poll {} @ {address}: {:?} [{} - {}] {} candidate(s)",
        poll.poll_id, poll.description, poll.poll_start, poll.poll_end, poll.candidate_amount
    )
}

fn describe_candidate(address: &Pubkey, candidate: &Candidate) -> String {
    format!(
        "{} @ {address}: {} vote(s)",
        candidate.candidate_name, candidate.candidate_votes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults_to_one_day_from_now() {
        assert_eq!(poll_window(None, None, 5_000), (5_000, 5_000 + DAY_MS));
        assert_eq!(poll_window(Some(10), None, 5_000), (10, 10 + DAY_MS));
        assert_eq!(poll_window(None, Some(9_000), 5_000), (5_000, 9_000));
        assert_eq!(poll_window(Some(1), Some(2), 5_000), (1, 2));
    }

    #[test]
    fn balance_is_shown_in_sol_without_rounding() {
        assert_eq!(format_sol(0), "0.000000000");
        assert_eq!(format_sol(1), "0.000000001");
        assert_eq!(format_sol(1_500_000_000), "1.500000000");
        assert_eq!(format_sol(u64::MAX), "18446744073.709551615");
    }

    #[test]
    fn candidate_summary() {
        let candidate = Candidate {
            candidate_name: "hyd".to_string(),
            candidate_votes: 3,
        };
        let address = Pubkey::new_unique();
        assert_eq!(
            describe_candidate(&address, &candidate),
            format!("hyd @ {address}: 3 vote(s)")
        );
    }

    #[test]
    fn missing_keypair_file_is_reported() {
        let err = load_keypair(Path::new("/nonexistent/id.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/id.json"));
    }
}
