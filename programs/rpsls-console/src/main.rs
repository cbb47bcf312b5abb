//! Rock, Paper, Scissors, Spock, Lizard in the terminal

mod cli;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rpsls_logic::{SeededRng, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::terminal::Terminal;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with prompts
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();
    config.validate().context("invalid match configuration")?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, variant = %config.variant, wins_limit = config.wins_limit, "starting session");
    let mut rng = SeededRng::seed_from_u64(seed);

    let session = Session::run(config, &mut Terminal, &mut rng).context("session aborted")?;

    if cli.json {
        let json = serde_json::to_string_pretty(session.archive())
            .context("failed to serialize match archive")?;
        println!("{}", json);
    }

    Ok(())
}
