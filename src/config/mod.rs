use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";
const DEFAULT_LEAGUE_ID: &str = "71"; // Brazilian Série A
const DEFAULT_SEASONS: &str = "2022,2023,2024";

/// Runtime settings, read once from the environment (after `.env` loading).
#[derive(Debug, Clone)]
pub struct Settings {
    /// api-sports key. May be empty — cache-only commands never need it.
    pub api_key: String,
    pub base_url: String,
    pub league_id: u32,
    pub seasons: Vec<u16>,
    pub cache_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let league_raw = env::var("LEAGUE_ID").unwrap_or_else(|_| DEFAULT_LEAGUE_ID.to_string());
        let league_id = league_raw
            .trim()
            .parse()
            .with_context(|| format!("LEAGUE_ID is not a number: '{}'", league_raw))?;

        let seasons_raw = env::var("SEASONS").unwrap_or_else(|_| DEFAULT_SEASONS.to_string());
        let seasons = parse_seasons(&seasons_raw)?;

        Ok(Self {
            api_key: env::var("API_KEY").unwrap_or_default(),
            base_url: env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            league_id,
            seasons,
            cache_dir: env::var("CACHE_DIR").unwrap_or_else(|_| "cache".to_string()).into(),
            output_dir: env::var("OUTPUT_DIR").unwrap_or_else(|_| "output".to_string()).into(),
        })
    }
}

/// Parse a comma-separated season list, e.g. "2022,2023,2024".
fn parse_seasons(raw: &str) -> Result<Vec<u16>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .with_context(|| format!("SEASONS contains a non-year entry: '{}'", s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_season_list_with_whitespace() {
        assert_eq!(parse_seasons("2022, 2023 ,2024").unwrap(), vec![2022, 2023, 2024]);
    }

    #[test]
    fn skips_empty_entries() {
        assert_eq!(parse_seasons("2024,").unwrap(), vec![2024]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_seasons("2022,next year").is_err());
    }
}
