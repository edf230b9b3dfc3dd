//! Election file reader.
//!
//! An election file is JSON:
//!
//! ```json
//! {
//!   "electionType": "MultiSeat",
//!   "seats": 2,
//!   "votes": { "[\"ALPHA\",\"BETA\"]": 40, "[\"BETA\",\"ALPHA\"]": 44 },
//!   "ballots": [["GAMMA", "ALPHA"]]
//! }
//! ```
//!
//! `votes` is the consolidated vote record, keyed by the canonical JSON form of
//! each ranking. `ballots` lists individual rankings worth one vote each. Both
//! are optional but at least one vote must be present. Entry order is kept.

use crate::model::{ElectionConfig, ElectionType, RankedBallot, VoteCounts};
use crate::tabulator::TallyError;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Failed to read election file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid election file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Tally(#[from] TallyError),
}

pub type Result<T> = std::result::Result<T, FormatError>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionFile {
    #[serde(default)]
    pub election_type: Option<String>,
    #[serde(default)]
    pub seats: Option<i64>,
    #[serde(default, deserialize_with = "ordered_vote_record")]
    pub votes: Vec<(String, u64)>,
    #[serde(default)]
    pub ballots: Vec<RankedBallot>,
}

impl ElectionFile {
    /// Validated configuration, with `seats` and `election_type` overriding
    /// whatever the file says.
    pub fn config(
        &self,
        seats: Option<i64>,
        election_type: Option<ElectionType>,
    ) -> Result<ElectionConfig> {
        let election_type = match election_type {
            Some(election_type) => election_type,
            None => match &self.election_type {
                Some(name) => name.parse()?,
                None => ElectionType::default(),
            },
        };
        let seats = seats.or(self.seats).unwrap_or(1);
        Ok(ElectionConfig::with_seat_count(seats, election_type)?)
    }

    /// Consolidates the vote record and the individual ballots.
    pub fn vote_counts(&self) -> Result<VoteCounts> {
        let mut counts = VoteCounts::from_serialized(self.votes.iter().map(|(k, c)| (k, *c)))?;
        for ranking in &self.ballots {
            counts.add(ranking.clone(), 1)?;
        }
        Ok(counts)
    }
}

pub fn parse_election(json: &str) -> Result<ElectionFile> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_election(path: &Path) -> Result<ElectionFile> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Reads a JSON object into its entries in document order.
fn ordered_vote_record<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, u64)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RecordVisitor;

    impl<'de> Visitor<'de> for RecordVisitor {
        type Value = Vec<(String, u64)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            write!(formatter, "an object mapping serialized rankings to vote counts")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, count)) = map.next_entry::<String, u64>()? {
                entries.push((key, count));
            }
            Ok(entries)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(RecordVisitor)
}
