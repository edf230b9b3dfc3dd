use crate::model::election::Candidate;
use crate::tabulator::TallyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One exact preference order, highest preference first.
///
/// Used as the aggregation key when consolidating votes, so two voters who
/// ranked the same candidates in the same order share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedBallot(Vec<Candidate>);

impl RankedBallot {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        RankedBallot(candidates)
    }

    /// Parses the canonical serialization used as a vote-record key,
    /// a JSON array of candidate names such as `["ALPHA","BETA"]`.
    pub fn parse_key(key: &str) -> Result<Self, TallyError> {
        serde_json::from_str(key).map_err(|source| TallyError::MalformedBallot {
            key: key.to_string(),
            source,
        })
    }

    /// Canonical serialization, the inverse of [`RankedBallot::parse_key`].
    pub fn to_key(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RankedBallot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", itertools::join(&self.0, ", "))
    }
}

impl<C: Into<Candidate>> FromIterator<C> for RankedBallot {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        RankedBallot(iter.into_iter().map(Into::into).collect())
    }
}

/// Every voter who submitted one exact ranking, carried as a single weighted
/// ballot through the rounds of a tally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ballot {
    candidates: Vec<Candidate>,
    weight: f64,
}

impl Ballot {
    pub fn new(ranking: RankedBallot, weight: f64) -> Self {
        Self {
            candidates: ranking.0,
            weight,
        }
    }

    pub fn current_weight(&self) -> f64 {
        self.weight
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// The candidate this ballot counts towards in the current round.
    pub fn first_preference(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    pub fn is_exhausted(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Strikes every occurrence of `candidate`; the weight is untouched.
    pub fn eliminate_candidate(&mut self, candidate: &Candidate) {
        self.candidates.retain(|c| c != candidate);
    }

    /// Scales the weight by `surplus_fraction` only when `winner` is this
    /// ballot's current first preference, then strikes `winner` regardless.
    pub fn assign_elected(&mut self, winner: &Candidate, surplus_fraction: f64) {
        if self.first_preference() == Some(winner) {
            self.weight *= surplus_fraction;
        }
        self.eliminate_candidate(winner);
    }
}
