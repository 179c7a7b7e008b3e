use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable club identifier within one season of a league. Values are only
/// meaningful inside the competition they came from.
pub type TeamId = u32;

// ── api-sports v3 payloads ──────────────────────────────────────────────────

/// One entry of the `/fixtures` response array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureRecord {
    #[serde(default)]
    pub fixture: FixtureInfo,
    #[serde(default)]
    pub league: LeagueInfo,
    #[serde(default)]
    pub teams: FixtureSides,
    #[serde(default)]
    pub goals: FixtureGoals,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureInfo {
    pub id: Option<u64>,
    /// ISO-8601-like timestamp string. Kept verbatim — replay order relies on
    /// lexical comparison of this field, never on a parsed date.
    #[serde(default)]
    pub date: String,
    pub status: Option<RawStatus>,
}

/// The API usually sends `{"long": ..., "short": "FT", "elapsed": 90}`, but
/// older cached payloads carry a bare code string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawStatus {
    Detailed {
        #[serde(default)]
        short: String,
    },
    Code(String),
}

impl RawStatus {
    pub fn code(&self) -> &str {
        match self {
            RawStatus::Detailed { short } => short,
            RawStatus::Code(code) => code,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeagueInfo {
    #[serde(default)]
    pub round: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureSides {
    pub home: Option<TeamRef>,
    pub away: Option<TeamRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamRef {
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureGoals {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

/// One entry of the `/teams` response array.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamEntry {
    pub team: TeamRef,
}

/// One entry of the `/standings` response array: the league's own table,
/// grouped (a single group for a round-robin league).
#[derive(Debug, Clone, Deserialize)]
pub struct StandingsRecord {
    #[serde(default)]
    pub league: StandingsLeague,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsLeague {
    #[serde(default)]
    pub standings: Vec<Vec<StandingEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandingEntry {
    pub team: TeamRef,
    #[serde(default)]
    pub points: u32,
    #[serde(default, rename = "goalsDiff")]
    pub goals_diff: i32,
    #[serde(default)]
    pub all: StandingTotals,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingTotals {
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub win: u32,
    #[serde(default)]
    pub draw: u32,
    #[serde(default)]
    pub lose: u32,
    #[serde(default)]
    pub goals: StandingGoals,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingGoals {
    #[serde(default, rename = "for")]
    pub scored: u32,
    #[serde(default)]
    pub against: u32,
}

/// Pull the typed `response` array out of a raw API payload. Payloads are
/// cached verbatim, so this is the one place the envelope is unwrapped.
pub fn response_items<T: serde::de::DeserializeOwned>(
    payload: &Value,
) -> Result<Vec<T>, serde_json::Error> {
    match payload.get("response") {
        Some(items) => serde_json::from_value(items.clone()),
        None => Ok(Vec::new()),
    }
}

// ── normalized results and cumulative statistics ────────────────────────────

/// A decided match: both sides and both goal counts known, status final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub date: String,
    pub round: String,
    pub home: TeamId,
    pub away: TeamId,
    pub home_goals: u32,
    pub away_goals: u32,
}

/// Cumulative per-team counters for one season. `played` always equals
/// `wins + draws + losses`; `points` follows the three-point win rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamStats {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl TeamStats {
    pub fn goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }
}

// ── CSV rows ────────────────────────────────────────────────────────────────

/// One raw fixture, as exported to `results.csv`.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    pub season: u16,
    pub fixture_id: Option<u64>,
    pub round: String,
    pub date: String,
    pub status: String,
    pub home_team: String,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub away_team: String,
}

/// One team's line in one round's reconstructed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingsRow {
    pub season: u16,
    pub round: String,
    pub position: u32,
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i32,
    pub points: u32,
}

/// One team's line in the API's end-of-season table (`final_standings.csv`).
#[derive(Debug, Clone, Serialize)]
pub struct FinalStandingsRow {
    pub season: u16,
    pub position: u32,
    pub team_id: TeamId,
    pub team_name: String,
    pub points: u32,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub gf: u32,
    pub ga: u32,
    pub gd: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_code_from_object_and_string() {
        let detailed: RawStatus =
            serde_json::from_value(json!({"long": "Match Finished", "short": "FT", "elapsed": 90}))
                .unwrap();
        assert_eq!(detailed.code(), "FT");

        let bare: RawStatus = serde_json::from_value(json!("NS")).unwrap();
        assert_eq!(bare.code(), "NS");
    }

    #[test]
    fn fixture_record_parses_partial_payload() {
        let record: FixtureRecord = serde_json::from_value(json!({
            "fixture": {"id": 9001, "date": "2024-05-04T19:00:00+00:00", "status": {"short": "FT"}},
            "league": {"round": "Regular Season - 3"},
            "teams": {"home": {"id": 120, "name": "Botafogo"}, "away": {"id": 131, "name": "Corinthians"}},
            "goals": {"home": 0, "away": null}
        }))
        .unwrap();

        assert_eq!(record.league.round, "Regular Season - 3");
        assert_eq!(record.goals.home, Some(0));
        assert_eq!(record.goals.away, None);
        assert_eq!(record.teams.home.as_ref().unwrap().id, 120);
    }

    #[test]
    fn response_items_tolerates_missing_array() {
        let payload = json!({"get": "fixtures", "errors": []});
        let items: Vec<FixtureRecord> = response_items(&payload).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn standing_entry_reads_renamed_fields() {
        let entry: StandingEntry = serde_json::from_value(json!({
            "team": {"id": 120, "name": "Botafogo"},
            "points": 79,
            "goalsDiff": 29,
            "all": {"played": 38, "win": 23, "draw": 10, "lose": 5,
                    "goals": {"for": 58, "against": 29}}
        }))
        .unwrap();

        assert_eq!(entry.goals_diff, 29);
        assert_eq!(entry.all.goals.scored, 58);
        assert_eq!(entry.all.goals.against, 29);
    }
}
