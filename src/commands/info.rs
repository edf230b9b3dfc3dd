use super::{load_tallier, Result};
use colored::*;
use itertools::Itertools;
use ranked_tally::ElectionType;
use std::path::Path;

/// Validates an election file and prints the ballots the tally would start from.
pub fn info(
    election_file: &Path,
    seats: Option<i64>,
    election_type: Option<ElectionType>,
) -> Result<()> {
    let (tallier, config, total) = load_tallier(election_file, seats, election_type)?;

    println!("🗳️  Election: {}", election_file.display().to_string().cyan());
    println!("  Type:     {}", config.election_type.to_string().bright_yellow());
    println!("  Seats:    {}", config.seats.to_string().bright_yellow());
    println!("  Votes:    {}", total.to_string().bright_yellow());
    println!("  Quota:    {}", tallier.quota().to_string().bright_green());
    println!(
        "  Rankings: {} distinct",
        tallier.ballots().len().to_string().bright_yellow()
    );

    let candidates = tallier
        .ballots()
        .iter()
        .flat_map(|ballot| ballot.candidates())
        .unique()
        .join(", ");
    println!("  Candidates: {}", candidates);
    println!();

    for ballot in tallier.ballots() {
        println!(
            "  {:>8}  {}",
            ballot.current_weight(),
            ballot.candidates().iter().join(" > ")
        );
    }

    Ok(())
}
