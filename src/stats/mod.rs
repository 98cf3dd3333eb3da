//! Tournament statistics: goal totals, goal leaderboard and the share of
//! points each team collected, plus plain-text chart renderings.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::sim::Team;

const BAR_WIDTH: usize = 40;

/// Read-only per-team record handed to reporting consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSnapshot {
    pub name: String,
    pub goals: u32,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsShare {
    pub name: String,
    pub points: u32,
    /// Percentage of all points awarded, 0.0–100.0
    pub share: f64,
}

pub fn snapshot(teams: &[Team]) -> Vec<TeamSnapshot> {
    teams
        .iter()
        .map(|t| TeamSnapshot {
            name: t.name.clone(),
            goals: t.goals,
            points: t.points,
        })
        .collect()
}

/// Sum of goals over all teams.
pub fn total_goals(teams: &[Team]) -> u64 {
    teams.iter().fold(0, |acc, t| acc + u64::from(t.goals))
}

/// `(name, goals)` ordered by goals, best first. Ties keep input order.
pub fn goals_table(teams: &[Team]) -> Result<Vec<(String, u32)>> {
    if teams.is_empty() {
        return Err(Error::NoTeams);
    }
    let mut table: Vec<(String, u32)> = teams.iter().map(|t| (t.name.clone(), t.goals)).collect();
    table.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(table)
}

/// Share of all points for every team that has any. Empty when no team has
/// scored a point yet.
pub fn points_distribution(teams: &[Team]) -> Result<Vec<PointsShare>> {
    if teams.is_empty() {
        return Err(Error::NoTeams);
    }
    let total: u32 = teams.iter().map(|t| t.points).sum();
    Ok(teams
        .iter()
        .filter(|t| t.points > 0)
        .map(|t| PointsShare {
            name: t.name.clone(),
            points: t.points,
            share: f64::from(t.points) * 100.0 / f64::from(total),
        })
        .collect())
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len)
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0)
}

/// Horizontal bar chart of goals per team.
pub fn render_goals_chart(table: &[(String, u32)]) -> String {
    let width = name_width(table.iter().map(|(n, _)| n.as_str()));
    let max = table.iter().map(|(_, g)| *g).max().unwrap_or(0);
    let mut out = String::from("Zdobyte gole\n");
    for (name, goals) in table {
        out.push_str(&format!(
            "{:<width$} │{} {}\n",
            name,
            bar(f64::from(*goals), f64::from(max)),
            goals,
            width = width
        ));
    }
    out
}

/// Points distribution as percentage bars.
pub fn render_points_distribution(shares: &[PointsShare]) -> String {
    if shares.is_empty() {
        return String::from("Żadna drużyna nie zdobyła jeszcze punktów.\n");
    }
    let width = name_width(shares.iter().map(|s| s.name.as_str()));
    let mut out = String::from("Rozkład punktów\n");
    for s in shares {
        out.push_str(&format!(
            "{:<width$} │{} {:.1}% ({} pkt)\n",
            s.name,
            bar(s.share, 100.0),
            s.share,
            s.points,
            width = width
        ));
    }
    out
}
