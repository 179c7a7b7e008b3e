use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;

use crate::config::Settings;
use crate::models::{
    self, FinalStandingsRow, FixtureRecord, ResultRow, StandingsRecord, TeamEntry, TeamId,
};
use crate::services::{standings, ApiClient, CsvExporter, SeasonCache};

const ENDPOINTS: [&str; 3] = ["teams", "fixtures", "standings"];

/// Everything one season contributes to the exports.
struct SeasonData {
    season: u16,
    teams: Vec<TeamEntry>,
    fixtures: Vec<FixtureRecord>,
    standings: Vec<StandingsRecord>,
}

/// Collect every configured season (cache-first) and write all three CSVs.
/// A season whose data cannot be completed is skipped, not fatal.
pub async fn collect(settings: &Settings) -> Result<()> {
    let client = ApiClient::new(settings)?;
    let cache = SeasonCache::new(&settings.cache_dir);

    println!(
        "📦 Collecting {} season(s) of league {}...",
        settings.seasons.len(),
        settings.league_id
    );

    let mut seasons = Vec::new();
    for &season in &settings.seasons {
        match collect_season(&client, &cache, settings, season).await {
            Ok(data) => {
                println!(
                    "✅ {}: {} teams, {} fixtures",
                    season,
                    data.teams.len(),
                    data.fixtures.len()
                );
                seasons.push(data);
            }
            Err(err) => {
                tracing::warn!("season {} failed: {:#}", season, err);
                println!("⚠️  Skipping season {}: {:#}", season, err);
            }
        }
    }

    if seasons.is_empty() {
        bail!("no season produced usable data");
    }

    export_all(settings, &seasons)
}

/// Rebuild the round-by-round table from cached data only — zero requests.
pub fn rounds(settings: &Settings) -> Result<()> {
    let cache = SeasonCache::new(&settings.cache_dir);
    let exporter = CsvExporter::new(&settings.output_dir);

    println!("🔁 Rebuilding round-by-round standings from cache...");

    let mut rows = Vec::new();
    let mut covered = 0usize;
    for &season in &settings.seasons {
        let teams_payload = cache.load(season, "teams")?;
        let fixtures_payload = cache.load(season, "fixtures")?;
        let (Some(teams_payload), Some(fixtures_payload)) = (teams_payload, fixtures_payload)
        else {
            tracing::warn!(
                "season {} not cached — run `roundtable fetch --season {}` first",
                season,
                season
            );
            continue;
        };

        let teams: Vec<TeamEntry> =
            models::response_items(&teams_payload).context("teams payload")?;
        let fixtures: Vec<FixtureRecord> =
            models::response_items(&fixtures_payload).context("fixtures payload")?;

        let season_rows = standings::reconstruct(season, &fixtures, &team_directory(&teams));
        let round_count = season_rows.iter().map(|r| r.round.as_str()).collect::<HashSet<_>>().len();
        println!("✅ {}: {} rows across {} rounds", season, season_rows.len(), round_count);

        rows.extend(season_rows);
        covered += 1;
    }

    if covered == 0 {
        bail!("no cached season data under {}", settings.cache_dir.display());
    }

    exporter.write_round_standings(&rows)?;
    println!("📄 Wrote standings to {}", settings.output_dir.display());
    Ok(())
}

/// Populate the cache for a single season, no exports.
pub async fn fetch_season(settings: &Settings, season: u16) -> Result<()> {
    let client = ApiClient::new(settings)?;
    let cache = SeasonCache::new(&settings.cache_dir);

    println!("📥 Fetching season {} of league {}...", season, settings.league_id);

    for endpoint in ENDPOINTS {
        let payload = load_or_fetch(&client, &cache, settings.league_id, season, endpoint).await?;
        let results = payload.get("results").and_then(Value::as_u64).unwrap_or(0);
        println!("   /{} → {} record(s)", endpoint, results);
    }

    println!("✅ Season {} cached under {}", season, settings.cache_dir.display());
    Ok(())
}

async fn collect_season(
    client: &ApiClient,
    cache: &SeasonCache,
    settings: &Settings,
    season: u16,
) -> Result<SeasonData> {
    let mut payloads = Vec::with_capacity(ENDPOINTS.len());
    for endpoint in ENDPOINTS {
        payloads.push(load_or_fetch(client, cache, settings.league_id, season, endpoint).await?);
    }

    let teams: Vec<TeamEntry> = models::response_items(&payloads[0]).context("teams payload")?;
    let fixtures: Vec<FixtureRecord> =
        models::response_items(&payloads[1]).context("fixtures payload")?;
    let standings: Vec<StandingsRecord> =
        models::response_items(&payloads[2]).context("standings payload")?;

    if teams.is_empty() || fixtures.is_empty() {
        bail!("incomplete data ({} teams, {} fixtures)", teams.len(), fixtures.len());
    }

    Ok(SeasonData { season, teams, fixtures, standings })
}

async fn load_or_fetch(
    client: &ApiClient,
    cache: &SeasonCache,
    league: u32,
    season: u16,
    endpoint: &str,
) -> Result<Value> {
    if let Some(payload) = cache.load(season, endpoint)? {
        return Ok(payload);
    }

    let payload = client.fetch(endpoint, league, season).await?;
    cache.store(season, endpoint, &payload)?;

    // Pause after every live request; the free tier allows ~10 per minute.
    tokio::time::sleep(Duration::from_secs(1)).await;
    Ok(payload)
}

fn export_all(settings: &Settings, seasons: &[SeasonData]) -> Result<()> {
    let exporter = CsvExporter::new(&settings.output_dir);

    let mut results = Vec::new();
    let mut rounds = Vec::new();
    let mut finals = Vec::new();

    for data in seasons {
        results.extend(result_rows(data));
        rounds.extend(standings::reconstruct(
            data.season,
            &data.fixtures,
            &team_directory(&data.teams),
        ));
        finals.extend(final_rows(data.season, &data.standings));
    }

    exporter.write_results(&results)?;
    exporter.write_round_standings(&rounds)?;
    exporter.write_final_standings(&finals)?;

    println!("📄 Exports written to {}", settings.output_dir.display());
    Ok(())
}

fn team_directory(teams: &[TeamEntry]) -> Vec<(TeamId, String)> {
    teams.iter().map(|entry| (entry.team.id, entry.team.name.clone())).collect()
}

fn result_rows(data: &SeasonData) -> Vec<ResultRow> {
    data.fixtures
        .iter()
        .map(|record| ResultRow {
            season: data.season,
            fixture_id: record.fixture.id,
            round: record.league.round.clone(),
            date: record.fixture.date.clone(),
            status: record
                .fixture
                .status
                .as_ref()
                .map(|s| s.code().to_string())
                .unwrap_or_default(),
            home_team: record
                .teams
                .home
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_default(),
            home_goals: record.goals.home,
            away_goals: record.goals.away,
            away_team: record
                .teams
                .away
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_default(),
        })
        .collect()
}

/// Flatten the `/standings` payload (league → groups → entries) into rows.
/// Positions restart at 1 per group; a round-robin league has one group.
fn final_rows(season: u16, records: &[StandingsRecord]) -> Vec<FinalStandingsRow> {
    let mut rows = Vec::new();
    for record in records {
        for group in &record.league.standings {
            for (rank, entry) in group.iter().enumerate() {
                rows.push(FinalStandingsRow {
                    season,
                    position: rank as u32 + 1,
                    team_id: entry.team.id,
                    team_name: entry.team.name.clone(),
                    points: entry.points,
                    played: entry.all.played,
                    wins: entry.all.win,
                    draws: entry.all.draw,
                    losses: entry.all.lose,
                    gf: entry.all.goals.scored,
                    ga: entry.all.goals.against,
                    gd: entry.goals_diff,
                });
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn final_rows_flatten_groups_with_fresh_positions() {
        let records: Vec<StandingsRecord> = serde_json::from_value(json!([{
            "league": {
                "standings": [
                    [
                        {"team": {"id": 120, "name": "Botafogo"}, "points": 79, "goalsDiff": 29,
                         "all": {"played": 38, "win": 23, "draw": 10, "lose": 5,
                                 "goals": {"for": 58, "against": 29}}},
                        {"team": {"id": 119, "name": "Palmeiras"}, "points": 73, "goalsDiff": 31,
                         "all": {"played": 38, "win": 22, "draw": 7, "lose": 9,
                                 "goals": {"for": 61, "against": 30}}}
                    ],
                    [
                        {"team": {"id": 140, "name": "Goiás"}, "points": 40, "goalsDiff": -4,
                         "all": {"played": 38, "win": 10, "draw": 10, "lose": 18,
                                 "goals": {"for": 30, "against": 34}}}
                    ]
                ]
            }
        }]))
        .unwrap();

        let rows = final_rows(2024, &records);
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].position, rows[0].team_id, rows[0].points), (1, 120, 79));
        assert_eq!((rows[1].position, rows[1].team_id), (2, 119));
        // Second group restarts from position 1.
        assert_eq!((rows[2].position, rows[2].team_id, rows[2].gd), (1, 140, -4));
    }

    #[test]
    fn result_rows_keep_undecided_fixtures() {
        let fixtures: Vec<FixtureRecord> = serde_json::from_value(json!([
            {"fixture": {"id": 1, "date": "2024-04-13T19:00:00+00:00", "status": {"short": "FT"}},
             "league": {"round": "Regular Season - 1"},
             "teams": {"home": {"id": 120, "name": "Botafogo"}, "away": {"id": 131, "name": "Corinthians"}},
             "goals": {"home": 2, "away": 1}},
            {"fixture": {"id": 2, "date": "2024-12-08T19:00:00+00:00", "status": {"short": "NS"}},
             "league": {"round": "Regular Season - 38"},
             "teams": {"home": {"id": 131, "name": "Corinthians"}, "away": {"id": 120, "name": "Botafogo"}},
             "goals": {"home": null, "away": null}}
        ]))
        .unwrap();

        let data = SeasonData { season: 2024, teams: Vec::new(), fixtures, standings: Vec::new() };
        let rows = result_rows(&data);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, "FT");
        assert_eq!(rows[0].home_goals, Some(2));
        assert_eq!(rows[1].status, "NS");
        assert_eq!(rows[1].home_goals, None);
    }

    #[test]
    fn team_directory_preserves_response_order() {
        let teams: Vec<TeamEntry> = serde_json::from_value(json!([
            {"team": {"id": 131, "name": "Corinthians"}},
            {"team": {"id": 120, "name": "Botafogo"}}
        ]))
        .unwrap();

        assert_eq!(
            team_directory(&teams),
            vec![(131, "Corinthians".to_string()), (120, "Botafogo".to_string())]
        );
    }
}
