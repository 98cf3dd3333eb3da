//! Tournament driver: group draw, round-robin group stage and a
//! single-elimination bracket with a third-place match.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::sim::{GoalModel, Match, Phase, TeamId, TeamRegistry};

pub const THIRD_PLACE_LABEL: &str = "Mecz o 3. miejsce";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSettings {
    pub group_size: usize,
    /// Teams qualifying for the knockout stage from each group
    pub advance: usize,
    pub goal_model: GoalModel,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        TournamentSettings {
            group_size: 4,
            advance: 2,
            goal_model: GoalModel::default(),
        }
    }
}

/// Final order of a group after all its matches were played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTable {
    pub label: String,
    pub standings: Vec<TeamId>,
}

#[derive(Debug, Clone)]
pub struct TournamentReport {
    /// Every match in the order it was played
    pub matches: Vec<Match>,
    pub groups: Vec<GroupTable>,
    pub champion: TeamId,
    pub runner_up: TeamId,
    pub third_place: Option<TeamId>,
}

/// Check that `team_count` teams can be split into groups of `group_size`
/// and that the qualifiers fill a knockout bracket exactly.
pub fn validate_layout(team_count: usize, group_size: usize, advance: usize) -> Result<()> {
    if team_count == 0 {
        return Err(Error::NoTeams);
    }
    if group_size < 2 {
        return Err(Error::InvalidBracket("groups need at least two teams".into()));
    }
    if team_count % group_size != 0 {
        return Err(Error::InvalidBracket(format!(
            "{} teams cannot be split into groups of {}",
            team_count, group_size
        )));
    }
    if advance == 0 || advance > group_size {
        return Err(Error::InvalidBracket(format!(
            "cannot advance {} teams from groups of {}",
            advance, group_size
        )));
    }
    let qualifiers = team_count / group_size * advance;
    if qualifiers < 2 || !qualifiers.is_power_of_two() {
        return Err(Error::InvalidBracket(format!(
            "{} qualifiers do not fill a knockout bracket",
            qualifiers
        )));
    }
    Ok(())
}

fn group_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => format!("Grupa {}", (b'A' + i) as char),
        _ => format!("Grupa {}", index + 1),
    }
}

/// Label of a knockout round contested by `remaining` teams.
pub fn round_label(remaining: usize) -> String {
    match remaining {
        2 => "Finał".to_string(),
        4 => "Półfinał".to_string(),
        8 => "Ćwierćfinał".to_string(),
        n => format!("1/{} finału", n / 2),
    }
}

/// Shuffle the registered teams into groups of `group_size`.
pub fn draw_groups<R: Rng + ?Sized>(
    teams: &TeamRegistry,
    group_size: usize,
    rng: &mut R,
) -> Vec<(String, Vec<TeamId>)> {
    let mut ids: Vec<TeamId> = teams.ids().collect();
    ids.shuffle(rng);
    ids.chunks(group_size)
        .enumerate()
        .map(|(i, chunk)| (group_label(i), chunk.to_vec()))
        .collect()
}

/// Order a group by points, then goals, then name.
pub fn group_standings(teams: &TeamRegistry, members: &[TeamId]) -> Vec<TeamId> {
    let mut order = members.to_vec();
    order.sort_by(|&a, &b| {
        let (ta, tb) = (&teams[a], &teams[b]);
        tb.points
            .cmp(&ta.points)
            .then(tb.goals.cmp(&ta.goals))
            .then_with(|| ta.name.cmp(&tb.name))
    });
    order
}

/// Arrange qualifiers (best seed first) so that the first knockout round
/// pairs seed 1 with the last seed, seed 2 with the second-to-last and so
/// on. Later rounds pair neighbouring winners.
fn bracket_order(seeds: &[TeamId]) -> Vec<TeamId> {
    let n = seeds.len();
    (0..n / 2)
        .flat_map(|i| [seeds[i], seeds[n - 1 - i]])
        .collect()
}

fn play<R: Rng + ?Sized>(
    teams: &mut TeamRegistry,
    rng: &mut R,
    model: GoalModel,
    team1: TeamId,
    team2: TeamId,
    phase: Phase,
) -> Result<Match> {
    let mut fixture = Match::new(team1, team2, phase)?;
    fixture.simulate(teams, rng, model)?;
    info!("{}", fixture.summary(teams));
    Ok(fixture)
}

/// Play a complete tournament over every team in `teams`.
pub fn run<R: Rng + ?Sized>(
    teams: &mut TeamRegistry,
    settings: &TournamentSettings,
    rng: &mut R,
) -> Result<TournamentReport> {
    validate_layout(teams.len(), settings.group_size, settings.advance)?;
    let model = settings.goal_model;
    let mut matches = Vec::new();
    let mut groups = Vec::new();

    // ── Group stage ──────────────────────────────────────────────────────────
    for (label, members) in draw_groups(teams, settings.group_size, rng) {
        info!("⚽ {} ({} teams)", label, members.len());
        for (i, &home) in members.iter().enumerate() {
            for &away in &members[i + 1..] {
                matches.push(play(teams, rng, model, home, away, Phase::group(label.clone()))?);
            }
        }
        let standings = group_standings(teams, &members);
        debug!(
            "{} final order: {:?}",
            label,
            standings.iter().map(|&id| teams[id].name.as_str()).collect::<Vec<_>>()
        );
        groups.push(GroupTable { label, standings });
    }

    // Seeds: all group winners, then all runners-up, and so on.
    let seeds: Vec<TeamId> = (0..settings.advance)
        .flat_map(|place| groups.iter().map(move |g| g.standings[place]))
        .collect();

    // ── Knockout stage ───────────────────────────────────────────────────────
    let mut contenders = bracket_order(&seeds);
    let mut semi_final_losers = Vec::new();
    let mut third_place = None;

    while contenders.len() > 2 {
        let label = round_label(contenders.len());
        info!("⚽ {} ({} teams)", label, contenders.len());
        let mut next = Vec::with_capacity(contenders.len() / 2);
        for pair in contenders.chunks(2) {
            let fixture = play(teams, rng, model, pair[0], pair[1], Phase::knockout(label.clone()))?;
            next.push(fixture.winner()?);
            if contenders.len() == 4 {
                semi_final_losers.push(fixture.loser()?);
            }
            matches.push(fixture);
        }
        contenders = next;
    }

    if let &[a, b] = semi_final_losers.as_slice() {
        let fixture = play(teams, rng, model, a, b, Phase::knockout(THIRD_PLACE_LABEL))?;
        third_place = Some(fixture.winner()?);
        matches.push(fixture);
    }

    let final_match = play(
        teams,
        rng,
        model,
        contenders[0],
        contenders[1],
        Phase::knockout(round_label(2)),
    )?;
    let champion = final_match.winner()?;
    let runner_up = final_match.loser()?;
    matches.push(final_match);
    info!("🏆 Champion: {}", teams[champion].name);

    Ok(TournamentReport {
        matches,
        groups,
        champion,
        runner_up,
        third_place,
    })
}
