use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_RPC_URL: &str = "http://localhost:8899";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Parser, Debug)]
#[command(author, version, about = "Voting program client and blink action server")]
pub struct Cli {
    /// JSON-RPC endpoint of the cluster.
    #[arg(long, short = 'u', env = "VOTING_RPC_URL", default_value = DEFAULT_RPC_URL, global = true)]
    pub url: String,

    /// Keypair that signs and pays. Defaults to the Solana CLI keypair.
    #[arg(long, short = 'k', env = "ANCHOR_WALLET", global = true)]
    pub keypair: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Serve the vote action endpoint.
    Serve {
        #[arg(long, env = "VOTING_ACTION_BIND", default_value = DEFAULT_BIND)]
        bind: String,
        #[arg(long, default_value_t = 1)]
        poll_id: u64,
    },
    /// Create a poll. Times are unix milliseconds.
    InitPoll {
        poll_id: u64,
        description: String,
        #[arg(long)]
        start: Option<u64>,
        #[arg(long)]
        end: Option<u64>,
    },
    AddCandidate {
        poll_id: u64,
        name: String,
    },
    Vote {
        poll_id: u64,
        name: String,
    },
    ShowPoll {
        poll_id: u64,
    },
    /// List every poll and candidate owned by the program.
    List,
    /// Create the action ballot's poll and candidates if they are missing.
    Seed {
        #[arg(long, default_value_t = 1)]
        poll_id: u64,
    },
    Balance {
        /// Defaults to the keypair's address.
        address: Option<String>,
    },
}

impl Cli {
    pub fn keypair_path(&self) -> PathBuf {
        self.keypair.clone().unwrap_or_else(|| {
            let home = std::env::var_os("HOME").unwrap_or_default();
            PathBuf::from(home).join(".config/solana/id.json")
        })
    }
}
