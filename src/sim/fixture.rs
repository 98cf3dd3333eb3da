use std::fmt;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

use super::penalties::shootout;
use super::phase::Phase;
use super::probability::{draw_uniform_score, draw_weighted_score};
use super::team::{TeamId, TeamRegistry};

/// Goals for (first side, second side).
pub type Score = (u32, u32);

pub const GROUP_WIN_POINTS: u32 = 3;
pub const GROUP_DRAW_POINTS: u32 = 1;

/// How a simulated match produces its scoreline and goal tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalModel {
    /// Two draws per match: a rank-weighted provisional scoreline whose goals
    /// are credited to the teams and then discarded, followed by a uniform
    /// 0–5 scoreline that becomes the official result and is credited too.
    #[default]
    Legacy,
    /// One rank-weighted draw is both the official result and the only
    /// goals credited.
    Single,
}

/// Lifecycle of a match. `Played` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MatchState {
    Unplayed,
    Played {
        score: Score,
        /// Present only for drawn knockout matches.
        penalties: Option<Score>,
    },
}

/// A fixture between two registered teams in a given phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    team1: TeamId,
    team2: TeamId,
    phase: Phase,
    state: MatchState,
}

impl Match {
    pub fn new(team1: TeamId, team2: TeamId, phase: Phase) -> Result<Self> {
        if team1 == team2 {
            return Err(Error::SameTeam);
        }
        Ok(Match {
            team1,
            team2,
            phase,
            state: MatchState::Unplayed,
        })
    }

    pub fn team1(&self) -> TeamId {
        self.team1
    }

    pub fn team2(&self) -> TeamId {
        self.team2
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn is_played(&self) -> bool {
        matches!(self.state, MatchState::Played { .. })
    }

    /// Official scoreline, `(0, 0)` until the match is played.
    pub fn score(&self) -> Score {
        match self.state {
            MatchState::Played { score, .. } => score,
            MatchState::Unplayed => (0, 0),
        }
    }

    pub fn penalty_result(&self) -> Option<Score> {
        match self.state {
            MatchState::Played { penalties, .. } => penalties,
            MatchState::Unplayed => None,
        }
    }

    /// Play the match: draw a result according to `model`, credit goals and
    /// points to both teams and settle knockout draws on penalties.
    pub fn simulate<R: Rng + ?Sized>(
        &mut self,
        teams: &mut TeamRegistry,
        rng: &mut R,
        model: GoalModel,
    ) -> Result<()> {
        self.check_playable(teams)?;

        let provisional = draw_weighted_score(rng, teams[self.team1].rank, teams[self.team2].rank);
        let score = match model {
            GoalModel::Legacy => {
                debug!(
                    "[{}] provisional {}:{} credited, drawing official score",
                    self.phase, provisional.0, provisional.1
                );
                self.credit_goals(teams, provisional)?;
                draw_uniform_score(rng)
            }
            GoalModel::Single => provisional,
        };

        self.apply_result(teams, score, rng)
    }

    /// Record `score` as the official result of an unplayed match: credit
    /// the goals, award group points and, for a drawn knockout match, run
    /// the penalty shootout.
    pub fn apply_result<R: Rng + ?Sized>(
        &mut self,
        teams: &mut TeamRegistry,
        score: Score,
        rng: &mut R,
    ) -> Result<()> {
        self.check_playable(teams)?;

        self.credit_goals(teams, score)?;

        let (g1, g2) = score;
        let penalties = match &self.phase {
            Phase::GroupStage(_) => {
                let (t1, t2) = teams.pair_mut(self.team1, self.team2)?;
                if g1 > g2 {
                    t1.points += GROUP_WIN_POINTS;
                } else if g1 < g2 {
                    t2.points += GROUP_WIN_POINTS;
                } else {
                    t1.points += GROUP_DRAW_POINTS;
                    t2.points += GROUP_DRAW_POINTS;
                }
                None
            }
            Phase::Knockout(_) if g1 == g2 => {
                debug!(
                    "{}",
                    penalty_announcement(&teams[self.team1].name, &teams[self.team2].name)
                );
                Some(shootout(rng))
            }
            Phase::Knockout(_) => None,
        };

        self.state = MatchState::Played { score, penalties };
        debug!("{}", self.summary(teams));
        Ok(())
    }

    /// Both teams must live in `teams` and the match must still be unplayed.
    fn check_playable(&self, teams: &TeamRegistry) -> Result<()> {
        if self.is_played() {
            return Err(Error::MatchAlreadyPlayed);
        }
        teams.check(self.team1)?;
        teams.check(self.team2)
    }

    fn credit_goals(&self, teams: &mut TeamRegistry, (g1, g2): Score) -> Result<()> {
        let (t1, t2) = teams.pair_mut(self.team1, self.team2)?;
        t1.goals += g1;
        t2.goals += g2;
        Ok(())
    }

    /// The side that won in regular time, or on penalties after a draw.
    pub fn winner(&self) -> Result<TeamId> {
        let (score, penalties) = match self.state {
            MatchState::Unplayed => return Err(Error::MatchNotPlayed),
            MatchState::Played { score, penalties } => (score, penalties),
        };
        let (a, b) = if score.0 != score.1 {
            score
        } else {
            penalties.ok_or(Error::UnresolvedDraw)?
        };
        Ok(if a > b { self.team1 } else { self.team2 })
    }

    pub fn loser(&self) -> Result<TeamId> {
        let winner = self.winner()?;
        Ok(if winner == self.team1 {
            self.team2
        } else {
            self.team1
        })
    }

    /// One-line report, e.g. `[Finał] Brazylia 1 : 1 Francja (karne: Brazylia 4 - 3 Francja)`.
    pub fn summary(&self, teams: &TeamRegistry) -> String {
        MatchSummary { fixture: self, teams }.to_string()
    }
}

fn penalty_announcement(name1: &str, name2: &str) -> String {
    format!("🔄 Remis! Rzuty karne między {} i {}", name1, name2)
}

struct MatchSummary<'a> {
    fixture: &'a Match,
    teams: &'a TeamRegistry,
}

impl fmt::Display for MatchSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.fixture;
        let name1 = &self.teams[m.team1].name;
        let name2 = &self.teams[m.team2].name;
        let (s1, s2) = m.score();
        write!(f, "[{}] {} {} : {} {}", m.phase, name1, s1, s2, name2)?;
        if let Some((p1, p2)) = m.penalty_result() {
            write!(f, " (karne: {} {} - {} {})", name1, p1, p2, name2)?;
        }
        Ok(())
    }
}
