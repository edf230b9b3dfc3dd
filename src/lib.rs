pub mod formats;
pub mod model;
pub mod tabulator;
pub mod util;

pub use model::{Ballot, Candidate, ElectionConfig, ElectionType, RankedBallot, VoteCounts};
pub use tabulator::{
    CandidateAction, Outcome, RoundReport, RoundTally, TallyError, TallySnapshot, Tallier,
};
