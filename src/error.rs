use crate::sim::TeamId;

/// Errors raised by the simulation core, the statistics helpers and the
/// tournament driver.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("match has not been played yet")]
    MatchNotPlayed,
    #[error("match has already been played")]
    MatchAlreadyPlayed,
    #[error("match ended in a draw without a penalty shootout")]
    UnresolvedDraw,
    #[error("a match needs two different teams")]
    SameTeam,
    #[error("team #{} is not in this registry", .0.index())]
    UnknownTeam(TeamId),
    #[error("team '{0}' is already registered")]
    DuplicateTeam(String),
    #[error("team list must not be empty")]
    NoTeams,
    #[error("cannot build knockout bracket: {0}")]
    InvalidBracket(String),
}

pub type Result<T> = std::result::Result<T, Error>;
