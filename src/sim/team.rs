use std::fmt;
use std::ops::{Index, IndexMut};

use serde::Serialize;

use crate::error::{Error, Result};

/// Handle to a team stored in a [`TeamRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TeamId(usize);

impl TeamId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A national team and its cumulative tournament standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub name: String,
    /// Tournament points (3 per group win, 1 per group draw)
    pub points: u32,
    /// Goals scored across every match played
    pub goals: u32,
    /// Ranking position, lower is stronger. `None` when unknown.
    pub rank: Option<u32>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Team {
            name: name.into(),
            points: 0,
            goals: 0,
            rank: None,
        }
    }

    pub fn with_rank(name: impl Into<String>, rank: Option<u32>) -> Self {
        Team {
            rank,
            ..Team::new(name)
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {} pkt, {} goli", self.name, self.points, self.goals)
    }
}

/// Owns every team taking part in a tournament run. Matches refer to teams
/// by [`TeamId`] and mutate them through the registry.
#[derive(Debug, Clone, Default)]
pub struct TeamRegistry {
    teams: Vec<Team>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a team. Names are unique, compared case-insensitively.
    pub fn add(&mut self, team: Team) -> Result<TeamId> {
        if self.find(&team.name).is_some() {
            return Err(Error::DuplicateTeam(team.name));
        }
        self.teams.push(team);
        Ok(TeamId(self.teams.len() - 1))
    }

    pub fn find(&self, name: &str) -> Option<TeamId> {
        let needle = name.trim().to_lowercase();
        self.teams
            .iter()
            .position(|t| t.name.trim().to_lowercase() == needle)
            .map(TeamId)
    }

    pub fn get(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = TeamId> + '_ {
        (0..self.teams.len()).map(TeamId)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Fails with `UnknownTeam` when `id` was not issued by this registry.
    pub fn check(&self, id: TeamId) -> Result<()> {
        self.get(id).map(|_| ()).ok_or(Error::UnknownTeam(id))
    }

    /// Mutable access to both sides of a match at once.
    pub(crate) fn pair_mut(&mut self, a: TeamId, b: TeamId) -> Result<(&mut Team, &mut Team)> {
        if a == b {
            return Err(Error::SameTeam);
        }
        self.check(a)?;
        self.check(b)?;
        if a.0 < b.0 {
            let (left, right) = self.teams.split_at_mut(b.0);
            Ok((&mut left[a.0], &mut right[0]))
        } else {
            let (left, right) = self.teams.split_at_mut(a.0);
            Ok((&mut right[0], &mut left[b.0]))
        }
    }
}

impl Index<TeamId> for TeamRegistry {
    type Output = Team;

    fn index(&self, id: TeamId) -> &Team {
        &self.teams[id.0]
    }
}

impl IndexMut<TeamId> for TeamRegistry {
    fn index_mut(&mut self, id: TeamId) -> &mut Team {
        &mut self.teams[id.0]
    }
}
