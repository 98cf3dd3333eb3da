use clap::{Parser, ValueEnum};

use crate::ranking::football_data::DEFAULT_BASE_URL;
use crate::ranking::DEFAULT_FALLBACK_RANK;
use crate::sim::GoalModel;
use crate::tournament::{validate_layout, TournamentSettings};

pub const DEFAULT_TEAMS: [&str; 16] = [
    "Brazylia", "Francja", "Argentyna", "Anglia", "Hiszpania", "Niemcy", "Portugalia", "Holandia",
    "Belgia", "Chorwacja", "Włochy", "Urugwaj", "Polska", "Maroko", "Japonia", "Meksyk",
];

/// Command-line spelling of [`GoalModel`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalModelArg {
    /// Rank-weighted provisional score plus uniform official score, both counted
    Legacy,
    /// A single rank-weighted score, counted once
    Single,
}

impl From<GoalModelArg> for GoalModel {
    fn from(arg: GoalModelArg) -> Self {
        match arg {
            GoalModelArg::Legacy => GoalModel::Legacy,
            GoalModelArg::Single => GoalModel::Single,
        }
    }
}

/// Football tournament simulator
#[derive(Parser, Debug, Clone)]
#[command(name = "tournament-sim", version, about)]
pub struct Config {
    /// Comma-separated list of participating teams
    #[arg(long, env = "TEAMS", value_delimiter = ',', default_values = DEFAULT_TEAMS)]
    pub teams: Vec<String>,

    /// Number of teams per group
    #[arg(long, env = "GROUP_SIZE", default_value = "4")]
    pub group_size: usize,

    /// Number of teams advancing from each group
    #[arg(long, env = "ADVANCE", default_value = "2")]
    pub advance: usize,

    /// Seed for the random generator (random when omitted)
    #[arg(long, env = "SEED")]
    pub seed: Option<u64>,

    /// How match scores and goal tallies are produced
    #[arg(long, env = "GOAL_MODEL", value_enum, default_value = "legacy")]
    pub goal_model: GoalModelArg,

    /// Ranking cache file ("<rank>. <name>" per line)
    #[arg(long, env = "RANKING_FILE", default_value = "ranking.txt")]
    pub ranking_file: String,

    /// Rank given to teams missing from the ranking
    #[arg(long, env = "FALLBACK_RANK", default_value_t = DEFAULT_FALLBACK_RANK)]
    pub fallback_rank: u32,

    /// Ignore rankings; every match starts as a coin flip
    #[arg(long, env = "NO_RANKING", default_value = "false")]
    pub no_ranking: bool,

    /// Refresh the ranking cache from football-data.org before the run
    #[arg(long, env = "FETCH_RANKING", default_value = "false")]
    pub fetch_ranking: bool,

    /// football-data.org API base URL
    #[arg(long, env = "FOOTBALL_DATA_URL", default_value = DEFAULT_BASE_URL)]
    pub football_data_url: String,

    /// football-data.org API key
    #[arg(long, env = "FOOTBALL_DATA_API_KEY")]
    pub football_data_api_key: Option<String>,

    /// Print goal and points charts after the tournament
    #[arg(long, env = "CHARTS", default_value = "false")]
    pub charts: bool,

    /// Print final team statistics as JSON
    #[arg(long, env = "JSON", default_value = "false")]
    pub json: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.teams.len() < 2 {
            anyhow::bail!("at least two teams are required");
        }
        if self.teams.iter().any(|t| t.trim().is_empty()) {
            anyhow::bail!("team names must not be empty");
        }
        if self.fallback_rank == 0 {
            anyhow::bail!("fallback_rank must be at least 1");
        }
        validate_layout(self.teams.len(), self.group_size, self.advance)?;
        Ok(())
    }

    pub fn tournament_settings(&self) -> TournamentSettings {
        TournamentSettings {
            group_size: self.group_size,
            advance: self.advance,
            goal_model: self.goal_model.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    /// Serialises env access between parallel tests.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 13] = [
        "TEAMS",
        "GROUP_SIZE",
        "ADVANCE",
        "SEED",
        "GOAL_MODEL",
        "RANKING_FILE",
        "FALLBACK_RANK",
        "NO_RANKING",
        "FETCH_RANKING",
        "FOOTBALL_DATA_URL",
        "FOOTBALL_DATA_API_KEY",
        "CHARTS",
        "JSON",
    ];

    /// Parse `args` with every config env fallback cleared, so only the
    /// command line and built-in defaults apply.
    fn parse(args: &[&str]) -> Config {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        parse_with_env(args, &[])
    }

    /// Caller must hold `ENV_LOCK`.
    fn parse_with_env(args: &[&str], env: &[(&str, &str)]) -> Config {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
        for (key, value) in env {
            std::env::set_var(key, value);
        }
        let config =
            Config::try_parse_from(std::iter::once("tournament-sim").chain(args.iter().copied()))
                .unwrap();
        for (key, _) in env {
            std::env::remove_var(key);
        }
        config
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = parse(&[]);
        assert_eq!(config.teams.len(), 16);
        assert_eq!(config.teams[10], "Włochy");
        assert_eq!(config.fallback_rank, 50);
        assert_eq!(config.goal_model, GoalModelArg::Legacy);
        assert!(config.validate().is_ok());
        assert_eq!(config.tournament_settings(), TournamentSettings::default());
    }

    #[test]
    fn test_single_goal_model() {
        let config = parse(&["--goal-model", "single"]);
        assert_eq!(config.tournament_settings().goal_model, GoalModel::Single);
    }

    #[test]
    fn test_custom_teams_and_groups() {
        let config = parse(&["--teams", "A,B,C,D,E,F", "--group-size", "3", "--advance", "1"]);
        assert_eq!(config.teams, vec!["A", "B", "C", "D", "E", "F"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_unbalanced_bracket() {
        let config = parse(&["--teams", "A,B,C,D,E,F", "--group-size", "2", "--advance", "1"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_uneven_groups() {
        let config = parse(&["--teams", "A,B,C,D,E", "--group-size", "2"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_fallbacks() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let config = parse_with_env(
            &[],
            &[("GROUP_SIZE", "8"), ("CHARTS", "true"), ("JSON", "true")],
        );
        assert_eq!(config.group_size, 8);
        assert!(config.charts);
        assert!(config.json);

        // Leftover variables never leak into the next parse.
        let config = parse_with_env(&[], &[]);
        assert_eq!(config.group_size, 4);
        assert!(!config.charts);
        assert!(!config.json);
    }

    #[test]
    fn test_rejects_zero_fallback_rank() {
        let config = parse(&["--fallback-rank", "0"]);
        assert!(config.validate().is_err());
    }
}
