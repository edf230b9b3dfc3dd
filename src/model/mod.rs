pub mod ballot;
pub mod election;
pub mod votes;

pub use ballot::{Ballot, RankedBallot};
pub use election::{Candidate, ElectionConfig, ElectionType};
pub use votes::VoteCounts;
