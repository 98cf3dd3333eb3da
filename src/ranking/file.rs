use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::provider::RankingProvider;
use super::Ranking;

/// On-disk ranking cache, one `"<rank>. <name>"` entry per line.
#[derive(Debug, Clone)]
pub struct RankingFile {
    path: PathBuf,
}

impl RankingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RankingFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cache. `Ok(None)` when the file does not exist.
    pub async fn load(&self) -> Result<Option<Ranking>> {
        debug!("Reading ranking cache {}", self.path.display());
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(Ranking::parse(&text))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read ranking file {}", self.path.display())),
        }
    }

    pub async fn write(&self, ranking: &Ranking) -> Result<()> {
        tokio::fs::write(&self.path, ranking.to_lines())
            .await
            .with_context(|| format!("Failed to write ranking file {}", self.path.display()))
    }
}

#[async_trait]
impl RankingProvider for RankingFile {
    fn name(&self) -> &str {
        "ranking file"
    }

    async fn fetch_ranking(&self) -> Result<Ranking> {
        self.load()
            .await?
            .with_context(|| format!("Ranking file {} not found", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "tournament-sim-file-{}-{}.txt",
            tag,
            std::process::id()
        ))
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let file = RankingFile::new(temp_path("missing"));
        assert_eq!(file.load().await.unwrap(), None);
        assert!(file.fetch_ranking().await.is_err());
    }

    #[tokio::test]
    async fn test_reads_ranking_lines() {
        let path = temp_path("read");
        std::fs::write(&path, "1. Brazylia\n2. Francja\nnot a rank\n").unwrap();
        let file = RankingFile::new(&path);
        let ranking = file.fetch_ranking().await.unwrap();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking.rank_of("francja"), Some(2));
        let _ = std::fs::remove_file(&path);
    }
}
