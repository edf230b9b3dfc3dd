//! Round-by-round tallying of consolidated ranked ballots.
//!
//! A [`Tallier`] owns every ballot of one election. Each round it scans the
//! live ballots into a [`RoundTally`], lets [`decide`] pick an action, applies
//! that action to the ballots and appends a [`RoundReport`]. The last report
//! carries no outcome.

pub mod report;

use crate::model::{Ballot, Candidate, ElectionConfig, ElectionType, RankedBallot, VoteCounts};
use serde::Serialize;
use tracing::{debug, info};

pub use report::{winners, CandidateAction, Outcome, RoundReport, RoundTally};

#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    #[error("No votes were supplied")]
    NoVotes,
    #[error("Seat count must be at least 1, got {0}")]
    InvalidSeats(i64),
    #[error("Unrecognized election type: {0}")]
    UnknownElectionType(String),
    #[error("Ranking {0} has a vote count of zero")]
    ZeroCount(RankedBallot),
    #[error("Vote counts add up to more than {}", u64::MAX)]
    TooManyVotes,
    #[error("Malformed ballot key {key}: {source}")]
    MalformedBallot {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, TallyError>;

/// The action a round resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Seats are exhausted or no ballot names a candidate.
    Finish,
    /// As many candidates remain as seats; the leader takes one seat.
    AssignByDefault { candidate: Candidate, votes: f64 },
    /// The leader met the quota.
    Elect {
        candidate: Candidate,
        votes: f64,
        seats: u32,
    },
    /// Nobody met the quota; the trailing candidate drops out.
    Eliminate { candidate: Candidate, votes: f64 },
}

/// Droop quota: `floor(total / (seats + 1)) + 1`.
pub fn droop_quota(total_votes: u64, seats: u32) -> u64 {
    total_votes / (u64::from(seats) + 1) + 1
}

/// Chooses the action for one round. Pure: looks only at its arguments.
pub fn decide(
    tally: &RoundTally,
    seats_remaining: i64,
    quota: u64,
    election_type: ElectionType,
) -> Decision {
    let quota = quota as f64;

    if seats_remaining <= 0 {
        return Decision::Finish;
    }
    let (leader, leader_votes) = match tally.leader() {
        Some(leader) => leader,
        None => return Decision::Finish,
    };

    if tally.len() as i64 == seats_remaining {
        return Decision::AssignByDefault {
            candidate: leader.clone(),
            votes: leader_votes,
        };
    }

    if leader_votes >= quota {
        let seats = match election_type {
            ElectionType::DemocraticPrimary => (leader_votes / quota).floor() as u32,
            ElectionType::InstantRunoff | ElectionType::MultiSeat => 1,
        };
        return Decision::Elect {
            candidate: leader.clone(),
            votes: leader_votes,
            seats,
        };
    }

    match tally.trailer() {
        Some((trailer, votes)) => Decision::Eliminate {
            candidate: trailer.clone(),
            votes,
        },
        None => Decision::Finish,
    }
}

/// Runs one election from consolidated votes to the final round.
#[derive(Debug, Clone)]
pub struct Tallier {
    ballots: Vec<Ballot>,
    election_type: ElectionType,
    seats_remaining: i64,
    quota: u64,
    round: u32,
    reports: Vec<RoundReport>,
    finished: bool,
}

/// Read-only view of a tallier between rounds.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TallySnapshot<'a> {
    pub ballots: &'a [Ballot],
    pub election_type: ElectionType,
    pub seats: i64,
    pub quota: u64,
    pub round: u32,
    pub reports: &'a [RoundReport],
}

impl Tallier {
    pub fn new(votes: VoteCounts, config: ElectionConfig) -> Result<Self> {
        if votes.is_empty() {
            return Err(TallyError::NoVotes);
        }
        if config.seats == 0 {
            return Err(TallyError::InvalidSeats(0));
        }
        if let Some((ranking, _)) = votes.iter().find(|(_, count)| *count == 0) {
            return Err(TallyError::ZeroCount(ranking.clone()));
        }

        let quota = droop_quota(votes.total()?, config.seats);
        let ballots = votes
            .into_iter()
            .map(|(ranking, count)| Ballot::new(ranking, count as f64))
            .collect();

        Ok(Self {
            ballots,
            election_type: config.election_type,
            seats_remaining: i64::from(config.seats),
            quota,
            round: 1,
            reports: Vec::new(),
            finished: false,
        })
    }

    pub fn quota(&self) -> u64 {
        self.quota
    }

    /// Seats not yet filled. Zero or below once the election is full.
    pub fn seats_remaining(&self) -> i64 {
        self.seats_remaining
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn election_type(&self) -> ElectionType {
        self.election_type
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    pub fn reports(&self) -> &[RoundReport] {
        &self.reports
    }

    pub fn into_reports(self) -> Vec<RoundReport> {
        self.reports
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn snapshot(&self) -> TallySnapshot<'_> {
        TallySnapshot {
            ballots: &self.ballots,
            election_type: self.election_type,
            seats: self.seats_remaining,
            quota: self.quota,
            round: self.round,
            reports: &self.reports,
        }
    }

    /// First-preference totals of the live ballots in construction order.
    pub fn round_tally(&self) -> RoundTally {
        let mut tally = RoundTally::default();
        for ballot in &self.ballots {
            if let Some(candidate) = ballot.first_preference() {
                tally.credit(candidate, ballot.current_weight());
            }
        }
        tally
    }

    /// Resolves one round and returns its report, or `None` once finished.
    pub fn step(&mut self) -> Option<&RoundReport> {
        if self.finished {
            return None;
        }

        self.ballots.retain(|ballot| !ballot.is_exhausted());
        let results = self.round_tally();
        let decision = decide(&results, self.seats_remaining, self.quota, self.election_type);

        let outcome = match decision {
            Decision::Finish => None,
            Decision::AssignByDefault { candidate, votes } => {
                debug!(round = self.round, %candidate, votes, "assigning seat by default");
                self.assign_elected(&candidate, 0.0);
                self.seats_remaining -= 1;
                Some(Outcome {
                    candidate,
                    action: CandidateAction::Assigned,
                    round: self.round,
                    seats: 1,
                    votes_transferred: 0.0,
                })
            }
            Decision::Elect {
                candidate,
                votes,
                seats,
            } => {
                let votes_transferred = votes - f64::from(seats) * self.quota as f64;
                debug!(
                    round = self.round,
                    %candidate,
                    votes,
                    seats,
                    surplus = votes_transferred,
                    "candidate met quota"
                );
                self.assign_elected(&candidate, votes_transferred / votes);
                self.seats_remaining -= i64::from(seats);
                Some(Outcome {
                    candidate,
                    action: CandidateAction::Elected,
                    round: self.round,
                    seats,
                    votes_transferred,
                })
            }
            Decision::Eliminate { candidate, votes } => {
                debug!(round = self.round, %candidate, votes, "eliminating candidate");
                for ballot in &mut self.ballots {
                    ballot.eliminate_candidate(&candidate);
                }
                Some(Outcome {
                    candidate,
                    action: CandidateAction::Eliminated,
                    round: self.round,
                    seats: 0,
                    votes_transferred: votes,
                })
            }
        };

        let finished = outcome.is_none();
        self.reports.push(RoundReport {
            round: self.round,
            results,
            outcome,
        });

        if finished {
            self.finished = true;
            info!(
                rounds = self.round,
                seats_remaining = self.seats_remaining,
                "tally complete"
            );
        } else {
            self.round += 1;
        }
        self.reports.last()
    }

    /// Runs rounds until the election is decided and returns every report.
    pub fn tally(&mut self) -> &[RoundReport] {
        while self.step().is_some() {}
        &self.reports
    }

    fn assign_elected(&mut self, winner: &Candidate, surplus_fraction: f64) {
        for ballot in &mut self.ballots {
            ballot.assign_elected(winner, surplus_fraction);
        }
    }
}
