mod commands;

use crate::commands::{info, tally};
use clap::{Parser, Subcommand};
use ranked_tally::ElectionType;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate an election file and dump its consolidated ballots.
    Info {
        /// Election file (JSON)
        election_file: PathBuf,
        /// Number of seats, overriding the file
        #[clap(long)]
        seats: Option<i64>,
        /// InstantRunoff, MultiSeat or DemocraticPrimary, overriding the file
        #[clap(long)]
        election_type: Option<ElectionType>,
    },
    /// Tally an election round by round
    Tally {
        /// Election file (JSON)
        election_file: PathBuf,
        /// Number of seats, overriding the file
        #[clap(long)]
        seats: Option<i64>,
        /// InstantRunoff, MultiSeat or DemocraticPrimary, overriding the file
        #[clap(long)]
        election_type: Option<ElectionType>,
        /// Write the round reports as JSON to this path
        #[clap(long)]
        output: Option<PathBuf>,
        /// Print the round reports as JSON instead of a summary
        #[clap(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    let result = match opts.command {
        Command::Info {
            election_file,
            seats,
            election_type,
        } => info(&election_file, seats, election_type),
        Command::Tally {
            election_file,
            seats,
            election_type,
            output,
            json,
        } => tally(
            &election_file,
            seats,
            election_type,
            output.as_deref(),
            json,
        ),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
