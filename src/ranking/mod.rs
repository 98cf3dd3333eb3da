pub mod file;
pub mod football_data;
pub mod provider;

pub use file::RankingFile;
pub use football_data::FootballDataClient;
pub use provider::RankingProvider;

use anyhow::Result;
use tracing::{info, warn};

use crate::sim::Team;

/// Rank given to teams missing from an otherwise available ranking.
pub const DEFAULT_FALLBACK_RANK: u32 = 50;

/// One line of a ranking table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub rank: u32,
    pub name: String,
}

/// Ranking table as published by a source. Name lookups ignore case and
/// surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    entries: Vec<RankEntry>,
}

impl Ranking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rank: u32, name: impl Into<String>) {
        self.entries.push(RankEntry {
            rank,
            name: name.into(),
        });
    }

    pub fn entries(&self) -> &[RankEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank of the first entry whose name matches `name`.
    pub fn rank_of(&self, name: &str) -> Option<u32> {
        let needle = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|e| e.name.trim().to_lowercase() == needle)
            .map(|e| e.rank)
    }

    /// Parse the `"<rank>. <name>"` line format. Lines that do not match are
    /// skipped.
    pub fn parse(text: &str) -> Self {
        let mut ranking = Ranking::new();
        for line in text.lines() {
            let Some((rank, name)) = line.trim().split_once(". ") else {
                continue;
            };
            let name = name.trim();
            match rank.trim().parse::<u32>() {
                Ok(rank) if !name.is_empty() => ranking.push(rank, name),
                _ => continue,
            }
        }
        ranking
    }

    /// Render in the same line format [`Ranking::parse`] reads.
    pub fn to_lines(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}. {}\n", e.rank, e.name))
            .collect()
    }

    /// Minimal ranking written to the cache when no source is reachable.
    pub fn fallback() -> Self {
        let mut ranking = Ranking::new();
        ranking.push(1, "Brazylia");
        ranking.push(2, "Francja");
        ranking.push(3, "Argentyna");
        ranking
    }
}

/// Build teams for `names`, taking ranks from `ranking`.
///
/// Without a ranking every team is unranked. With one, teams that are not
/// listed get `fallback_rank`.
pub fn ranked_teams<S: AsRef<str>>(
    names: &[S],
    ranking: Option<&Ranking>,
    fallback_rank: u32,
) -> Vec<Team> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let rank = ranking.map(|r| r.rank_of(name).unwrap_or(fallback_rank));
            Team::with_rank(name, rank)
        })
        .collect()
}

/// Pull a fresh ranking from `provider` and store it in `cache`.
///
/// When the provider fails the fallback ranking is written instead, so the
/// cache always exists afterwards.
pub async fn refresh_cache(provider: &dyn RankingProvider, cache: &RankingFile) -> Result<Ranking> {
    let ranking = match provider.fetch_ranking().await {
        Ok(ranking) => {
            info!(
                "Fetched {} ranking entries from {}",
                ranking.len(),
                provider.name()
            );
            ranking
        }
        Err(e) => {
            warn!("Ranking download from {} failed: {:#}", provider.name(), e);
            Ranking::fallback()
        }
    };
    cache.write(&ranking).await?;
    info!("Ranking cache updated: {}", cache.path().display());
    Ok(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[test]
    fn test_parse_skips_malformed_lines() {
        let text = "1. Brazylia\n\nfoo\nx. Francja\n 3. Argentyna \n4. \n";
        let ranking = Ranking::parse(text);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking.rank_of("Brazylia"), Some(1));
        assert_eq!(ranking.rank_of("Argentyna"), Some(3));
        assert_eq!(ranking.rank_of("Francja"), None);
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let ranking = Ranking::parse("7. Korea Południowa\n");
        assert_eq!(ranking.rank_of("  korea POŁUDNIOWA "), Some(7));
    }

    #[test]
    fn test_lines_round_trip_through_parse() {
        let ranking = Ranking::fallback();
        assert_eq!(Ranking::parse(&ranking.to_lines()), ranking);
    }

    #[test]
    fn test_ranked_teams_uses_fallback_rank() {
        let ranking = Ranking::fallback();
        let teams = ranked_teams(&["francja", "Polska"], Some(&ranking), DEFAULT_FALLBACK_RANK);
        assert_eq!(teams[0].name, "francja");
        assert_eq!(teams[0].rank, Some(2));
        assert_eq!(teams[1].rank, Some(50));
    }

    #[test]
    fn test_ranked_teams_without_ranking() {
        let teams = ranked_teams(&["Brazylia"], None, DEFAULT_FALLBACK_RANK);
        assert_eq!(teams[0].rank, None);
    }

    struct Unreachable;

    #[async_trait]
    impl RankingProvider for Unreachable {
        async fn fetch_ranking(&self) -> Result<Ranking> {
            anyhow::bail!("connection refused")
        }

        fn name(&self) -> &str {
            "unreachable"
        }
    }

    struct Fixed(Ranking);

    #[async_trait]
    impl RankingProvider for Fixed {
        async fn fetch_ranking(&self) -> Result<Ranking> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn temp_cache(tag: &str) -> RankingFile {
        let path = std::env::temp_dir().join(format!(
            "tournament-sim-refresh-{}-{}.txt",
            tag,
            std::process::id()
        ));
        RankingFile::new(path)
    }

    #[tokio::test]
    async fn test_refresh_writes_fallback_on_failure() {
        let cache = temp_cache("fail");
        let ranking = refresh_cache(&Unreachable, &cache).await.unwrap();
        assert_eq!(ranking, Ranking::fallback());
        assert_eq!(cache.load().await.unwrap(), Some(Ranking::fallback()));
        let _ = std::fs::remove_file(cache.path());
    }

    #[tokio::test]
    async fn test_refresh_writes_fetched_ranking() {
        let mut fetched = Ranking::new();
        fetched.push(1, "Hiszpania");
        fetched.push(2, "Anglia");
        let cache = temp_cache("ok");
        refresh_cache(&Fixed(fetched.clone()), &cache).await.unwrap();
        assert_eq!(cache.load().await.unwrap(), Some(fetched));
        let _ = std::fs::remove_file(cache.path());
    }
}
