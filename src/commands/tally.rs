use super::{load_tallier, Result};
use colored::*;
use instant::Instant;
use ranked_tally::tabulator::winners;
use ranked_tally::util::write_serialized;
use ranked_tally::{CandidateAction, ElectionType, RoundReport};
use std::path::Path;

/// Runs the tally for an election file and prints or writes the round reports.
pub fn tally(
    election_file: &Path,
    seats: Option<i64>,
    election_type: Option<ElectionType>,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let (mut tallier, config, total) = load_tallier(election_file, seats, election_type)?;

    let start = Instant::now();
    tallier.tally();
    let elapsed = start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(tallier.reports())?);
    } else {
        println!(
            "🚀 Tallying {} votes for {} seat(s) ({}), quota {}",
            total.to_string().bright_cyan(),
            config.seats.to_string().bright_cyan(),
            config.election_type,
            tallier.quota().to_string().bright_cyan()
        );
        println!();
        for report in tallier.reports() {
            print_round(report);
        }

        println!("🏆 Results:");
        for (candidate, seats) in winners(tallier.reports()) {
            println!(
                "  {} ({} seat{})",
                candidate.to_string().bright_green().bold(),
                seats,
                if seats == 1 { "" } else { "s" }
            );
        }
        if tallier.seats_remaining() > 0 {
            println!(
                "⚠️  {} seat(s) left unfilled: every ballot was exhausted",
                tallier.seats_remaining().to_string().bright_red()
            );
        }
        println!(
            "✅ Completed {} rounds in {:.2} ms",
            tallier.reports().len(),
            elapsed.as_secs_f64() * 1000.0
        );
    }

    if let Some(output) = output {
        write_serialized(output, &tallier.reports())?;
        eprintln!(
            "📄 Report written to {}",
            output.display().to_string().bright_green()
        );
    }

    Ok(())
}

fn print_round(report: &RoundReport) {
    println!("{}", format!("Round {}", report.round).bold());

    let singled_out = report.outcome.as_ref().map(|o| &o.candidate);
    for (candidate, votes) in report.results.iter() {
        let line = format!("  {:<24} {:>12.4}", candidate.as_str(), votes);
        if Some(candidate) == singled_out {
            println!("{}", line.bold());
        } else {
            println!("{}", line);
        }
    }
    let total = format!("  {:<24} {:>12.4}", "total", report.results.total());
    println!("{}", total.dimmed());

    match &report.outcome {
        Some(outcome) => {
            let action = match outcome.action {
                CandidateAction::Elected => "elected".bright_green(),
                CandidateAction::Assigned => "assigned".green(),
                CandidateAction::Eliminated => "eliminated".bright_red(),
            };
            println!(
                "  ➡️  {} {} ({} seat(s), {:.4} votes transferred)",
                outcome.candidate.as_str().bold(),
                action,
                outcome.seats,
                outcome.votes_transferred
            );
        }
        None => println!("  🏁 {}", "final round".dimmed()),
    }
    println!();
}
