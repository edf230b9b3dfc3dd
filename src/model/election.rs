use crate::tabulator::TallyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque candidate identifier as it appears on a ranked ballot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(name: impl Into<String>) -> Candidate {
        Candidate(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Candidate {
    fn from(name: &str) -> Self {
        Candidate::new(name)
    }
}

impl From<String> for Candidate {
    fn from(name: String) -> Self {
        Candidate(name)
    }
}

/// Electoral variant driving how many seats a single winner may absorb.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionType {
    /// Single seat, instant runoff.
    #[default]
    InstantRunoff,
    /// Single transferable vote, at most one seat per round.
    MultiSeat,
    /// Delegate apportionment: a winner takes one seat per full quota.
    DemocraticPrimary,
}

impl fmt::Display for ElectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElectionType::InstantRunoff => write!(f, "InstantRunoff"),
            ElectionType::MultiSeat => write!(f, "MultiSeat"),
            ElectionType::DemocraticPrimary => write!(f, "DemocraticPrimary"),
        }
    }
}

impl FromStr for ElectionType {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "InstantRunoff" | "instant-runoff" | "irv" => Ok(ElectionType::InstantRunoff),
            "MultiSeat" | "multi-seat" | "stv" => Ok(ElectionType::MultiSeat),
            "DemocraticPrimary" | "democratic-primary" | "primary" => {
                Ok(ElectionType::DemocraticPrimary)
            }
            other => Err(TallyError::UnknownElectionType(other.to_string())),
        }
    }
}

/// Parameters of a single tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElectionConfig {
    pub seats: u32,
    pub election_type: ElectionType,
}

impl ElectionConfig {
    pub fn new(seats: u32, election_type: ElectionType) -> Self {
        Self {
            seats,
            election_type,
        }
    }

    /// Validates a seat count that may have come from untyped input.
    pub fn with_seat_count(seats: i64, election_type: ElectionType) -> Result<Self, TallyError> {
        match u32::try_from(seats) {
            Ok(seats) if seats > 0 => Ok(Self::new(seats, election_type)),
            _ => Err(TallyError::InvalidSeats(seats)),
        }
    }
}

impl Default for ElectionConfig {
    fn default() -> Self {
        Self {
            seats: 1,
            election_type: ElectionType::default(),
        }
    }
}
