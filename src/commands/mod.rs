mod info;
mod tally;

pub use info::info;
pub use tally::tally;

use ranked_tally::formats::{self, FormatError};
use ranked_tally::{ElectionConfig, ElectionType, TallyError, Tallier};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Tally(#[from] TallyError),
    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CommandError>;

/// Loads an election file and builds a tallier ready for round one.
fn load_tallier(
    election_file: &Path,
    seats: Option<i64>,
    election_type: Option<ElectionType>,
) -> Result<(Tallier, ElectionConfig, u64)> {
    let file = formats::read_election(election_file)?;
    let config = file.config(seats, election_type)?;
    let votes = file.vote_counts()?;
    let total = votes.total()?;
    let tallier = Tallier::new(votes, config)?;
    Ok((tallier, config, total))
}
