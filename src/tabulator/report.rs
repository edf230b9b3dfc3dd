use crate::model::Candidate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// What happened to the candidate singled out in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateAction {
    #[serde(rename = "ELECTED - MET QUOTA")]
    Elected,
    /// Seat filled because remaining candidates equalled remaining seats.
    #[serde(rename = "ELECTED - OTHER CANDIDATES ELIMINATED")]
    Assigned,
    #[serde(rename = "ELIMINATED - FEWEST VOTES")]
    Eliminated,
}

impl CandidateAction {
    pub fn fills_seats(self) -> bool {
        matches!(self, CandidateAction::Elected | CandidateAction::Assigned)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub candidate: Candidate,
    pub action: CandidateAction,
    pub round: u32,
    pub seats: u32,
    pub votes_transferred: f64,
}

/// First-preference totals for one round, in the order candidates were
/// first seen while scanning ballots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundTally {
    entries: Vec<(Candidate, f64)>,
}

impl RoundTally {
    pub fn credit(&mut self, candidate: &Candidate, weight: f64) {
        match self.entries.iter_mut().find(|(c, _)| c == candidate) {
            Some((_, votes)) => *votes += weight,
            None => self.entries.push((candidate.clone(), weight)),
        }
    }

    pub fn get(&self, candidate: &Candidate) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| c == candidate)
            .map(|(_, votes)| *votes)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Candidate, f64)> + '_ {
        self.entries.iter().map(|(c, votes)| (c, *votes))
    }

    /// Number of distinct candidates holding a first preference.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, votes)| votes).sum()
    }

    /// Candidate with the most votes; ties go to the one seen first.
    pub fn leader(&self) -> Option<(&Candidate, f64)> {
        self.fold_strict(|votes, best| votes > best)
    }

    /// Candidate with the fewest votes; ties go to the one seen first.
    pub fn trailer(&self) -> Option<(&Candidate, f64)> {
        self.fold_strict(|votes, best| votes < best)
    }

    fn fold_strict<F>(&self, replaces: F) -> Option<(&Candidate, f64)>
    where
        F: Fn(f64, f64) -> bool,
    {
        let mut entries = self.iter();
        let first = entries.next()?;
        Some(entries.fold(first, |best, current| {
            if replaces(current.1, best.1) {
                current
            } else {
                best
            }
        }))
    }
}

impl Serialize for RoundTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (candidate, votes) in &self.entries {
            map.serialize_entry(candidate, votes)?;
        }
        map.end()
    }
}

impl FromIterator<(Candidate, f64)> for RoundTally {
    fn from_iter<I: IntoIterator<Item = (Candidate, f64)>>(iter: I) -> Self {
        let mut tally = RoundTally::default();
        for (candidate, votes) in iter {
            tally.credit(&candidate, votes);
        }
        tally
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub results: RoundTally,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

/// Every candidate that took seats, with the seats taken, in round order.
pub fn winners(reports: &[RoundReport]) -> Vec<(&Candidate, u32)> {
    reports
        .iter()
        .filter_map(|report| report.outcome.as_ref())
        .filter(|outcome| outcome.action.fills_seats())
        .map(|outcome| (&outcome.candidate, outcome.seats))
        .collect()
}
