use crate::model::ballot::RankedBallot;
use crate::tabulator::TallyError;
use std::collections::HashMap;

/// Consolidated vote record: each distinct ranking mapped to the number of
/// voters who submitted it.
///
/// Rankings keep the order in which they were first added. The tallier
/// builds its ballots in this order, and tie-breaks depend on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoteCounts {
    entries: Vec<(RankedBallot, u64)>,
    index: HashMap<RankedBallot, usize>,
}

impl VoteCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` votes for `ranking`, merging with an identical ranking
    /// already present.
    pub fn add(&mut self, ranking: RankedBallot, count: u64) -> Result<(), TallyError> {
        match self.index.get(&ranking) {
            Some(&position) => {
                let entry = &mut self.entries[position].1;
                *entry = entry.checked_add(count).ok_or(TallyError::TooManyVotes)?;
            }
            None => {
                self.index.insert(ranking.clone(), self.entries.len());
                self.entries.push((ranking, count));
            }
        }
        Ok(())
    }

    /// Consolidates raw per-voter rankings, one vote each.
    pub fn from_rankings<I>(rankings: I) -> Result<Self, TallyError>
    where
        I: IntoIterator<Item = RankedBallot>,
    {
        Self::from_counts(rankings.into_iter().map(|ranking| (ranking, 1)))
    }

    /// Consolidates `(ranking, count)` pairs.
    pub fn from_counts<I>(record: I) -> Result<Self, TallyError>
    where
        I: IntoIterator<Item = (RankedBallot, u64)>,
    {
        let mut counts = Self::new();
        for (ranking, count) in record {
            counts.add(ranking, count)?;
        }
        Ok(counts)
    }

    /// Consolidates a vote record keyed by the canonical JSON serialization
    /// of each ranking.
    pub fn from_serialized<I, K>(record: I) -> Result<Self, TallyError>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut counts = Self::new();
        for (key, count) in record {
            counts.add(RankedBallot::parse_key(key.as_ref())?, count)?;
        }
        Ok(counts)
    }

    /// Number of votes across all rankings.
    pub fn total(&self) -> Result<u64, TallyError> {
        self.entries
            .iter()
            .try_fold(0u64, |total, (_, count)| total.checked_add(*count))
            .ok_or(TallyError::TooManyVotes)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, ranking: &RankedBallot) -> Option<u64> {
        self.index.get(ranking).map(|&position| self.entries[position].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RankedBallot, u64)> + '_ {
        self.entries.iter().map(|(ranking, count)| (ranking, *count))
    }
}

impl IntoIterator for VoteCounts {
    type Item = (RankedBallot, u64);
    type IntoIter = std::vec::IntoIter<(RankedBallot, u64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
