use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// On-disk cache of raw API payloads, one JSON file per season per endpoint
/// (`season_2024_fixtures.json`). Payloads are stored untouched, so a cached
/// season replays identically to a freshly fetched one and costs zero
/// requests from the API budget.
pub struct SeasonCache {
    dir: PathBuf,
}

impl SeasonCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, season: u16, endpoint: &str) -> PathBuf {
        self.dir.join(format!("season_{}_{}.json", season, endpoint))
    }

    /// Load a cached payload. `Ok(None)` means "not cached yet", not an error.
    pub fn load(&self, season: u16, endpoint: &str) -> Result<Option<Value>> {
        let path = self.path(season, endpoint);
        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading cache file {}", path.display()))?;
        let payload = serde_json::from_str(&text)
            .with_context(|| format!("parsing cache file {}", path.display()))?;

        tracing::info!("cache hit: {}", path.display());
        Ok(Some(payload))
    }

    pub fn store(&self, season: u16, endpoint: &str, payload: &Value) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating cache dir {}", self.dir.display()))?;

        let path = self.path(season, endpoint);
        let text = serde_json::to_string_pretty(payload)?;
        fs::write(&path, text).with_context(|| format!("writing cache file {}", path.display()))?;

        tracing::info!("cached {}", path.display());
        Ok(())
    }
}
