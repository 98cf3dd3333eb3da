use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::provider::RankingProvider;
use super::Ranking;

pub const DEFAULT_BASE_URL: &str = "https://api.football-data.org";

/// Ranking source backed by the football-data.org v4 API.
/// Docs: <https://www.football-data.org/documentation/api>
///
/// Uses the World Cup standings table: every team's position within its
/// group becomes its rank.
pub struct FootballDataClient {
    http: Client,
    api_key: Option<String>,
    /// Base URL for overriding in tests
    base_url: String,
}

impl FootballDataClient {
    pub fn new(api_key: Option<&str>, base_url: Option<&str>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(FootballDataClient {
            http,
            api_key: api_key.map(str::to_string),
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

#[async_trait]
impl RankingProvider for FootballDataClient {
    fn name(&self) -> &str {
        "football-data.org"
    }

    async fn fetch_ranking(&self) -> Result<Ranking> {
        let url = format!("{}/v4/competitions/WC/standings", self.base_url);
        debug!("Fetching standings from {}", url);

        let mut req = self.http.get(&url);
        if let Some(key) = &self.api_key {
            req = req.header("X-Auth-Token", key);
        }
        let resp = req.send().await.context("football-data.org request failed")?;

        if !resp.status().is_success() {
            anyhow::bail!("football-data.org error: {}", resp.status());
        }

        let raw: serde_json::Value = resp
            .json()
            .await
            .context("Failed to parse football-data.org response")?;

        parse_standings_response(&raw)
    }
}

fn parse_standings_response(raw: &serde_json::Value) -> Result<Ranking> {
    let groups = raw["standings"]
        .as_array()
        .context("football-data.org response has no standings")?;

    let mut ranking = Ranking::new();
    for row in groups
        .iter()
        .filter_map(|group| group["table"].as_array())
        .flatten()
    {
        let position = row["position"].as_u64().and_then(|p| u32::try_from(p).ok());
        let name = row["team"]["name"].as_str();
        if let (Some(position), Some(name)) = (position, name) {
            ranking.push(position, name);
        }
    }
    Ok(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_standings() {
        let raw = json!({
            "standings": [
                { "group": "GROUP_A", "table": [
                    { "position": 1, "team": { "name": "Netherlands" } },
                    { "position": 2, "team": { "name": "Senegal" } }
                ]},
                { "group": "GROUP_B", "table": [
                    { "position": 1, "team": { "name": "England" } },
                    { "position": "?", "team": { "name": "Broken" } }
                ]}
            ]
        });
        let ranking = parse_standings_response(&raw).unwrap();
        assert_eq!(ranking.len(), 3);
        assert_eq!(ranking.rank_of("senegal"), Some(2));
        assert_eq!(ranking.rank_of("England"), Some(1));
        assert_eq!(ranking.rank_of("Broken"), None);
    }

    #[test]
    fn test_parse_rejects_missing_standings() {
        let raw = json!({ "message": "The resource you are looking for is restricted." });
        assert!(parse_standings_response(&raw).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        let client = FootballDataClient::new(None, Some("http://127.0.0.1:1")).unwrap();
        assert!(client.fetch_ranking().await.is_err());
    }
}
