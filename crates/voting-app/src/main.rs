use clap::Parser;
use voting_app::config::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    voting_app::commands::run(cli)
}
