pub mod fixture;
pub mod penalties;
pub mod phase;
pub mod probability;
pub mod team;

pub use fixture::{GoalModel, Match, MatchState, Score};
pub use phase::Phase;
pub use team::{Team, TeamId, TeamRegistry};
