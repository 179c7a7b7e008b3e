use crate::models::{FixtureRecord, MatchResult, RawStatus};

/// Status codes that mark a fixture as decided. FT = full time, AET = after
/// extra time. Everything else — NS, PST, live codes — is not a result yet.
const COMPLETED: [&str; 2] = ["FT", "AET"];

/// Validate one raw fixture into a replayable result.
///
/// Returns `None` for anything that cannot enter the table: a non-final
/// status, a missing side, or a missing goal count. A goal count of zero is a
/// valid score, only `null`/absent counts as missing. Rejection is the normal
/// case for scheduled-but-unplayed fixtures, so it is not an error.
pub fn normalize(record: &FixtureRecord) -> Option<MatchResult> {
    let code = record
        .fixture
        .status
        .as_ref()
        .map(RawStatus::code)
        .unwrap_or("");
    if !COMPLETED.contains(&code) {
        return None;
    }

    let home = record.teams.home.as_ref()?;
    let away = record.teams.away.as_ref()?;
    let home_goals = record.goals.home?;
    let away_goals = record.goals.away?;

    Some(MatchResult {
        date: record.fixture.date.clone(),
        round: record.league.round.clone(),
        home: home.id,
        away: away.id,
        home_goals,
        away_goals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixtureGoals, FixtureInfo, FixtureSides, LeagueInfo, TeamRef};

    fn record(status: Option<RawStatus>, home_goals: Option<u32>, away_goals: Option<u32>) -> FixtureRecord {
        FixtureRecord {
            fixture: FixtureInfo {
                id: Some(1),
                date: "2024-04-13T19:00:00+00:00".to_string(),
                status,
            },
            league: LeagueInfo {
                round: "Regular Season - 1".to_string(),
            },
            teams: FixtureSides {
                home: Some(TeamRef { id: 120, name: "Botafogo".to_string() }),
                away: Some(TeamRef { id: 131, name: "Corinthians".to_string() }),
            },
            goals: FixtureGoals {
                home: home_goals,
                away: away_goals,
            },
        }
    }

    fn detailed(code: &str) -> Option<RawStatus> {
        Some(RawStatus::Detailed { short: code.to_string() })
    }

    #[test]
    fn accepts_full_time_result() {
        let result = normalize(&record(detailed("FT"), Some(2), Some(1))).unwrap();
        assert_eq!(result.home, 120);
        assert_eq!(result.away, 131);
        assert_eq!((result.home_goals, result.away_goals), (2, 1));
        assert_eq!(result.round, "Regular Season - 1");
    }

    #[test]
    fn accepts_after_extra_time() {
        assert!(normalize(&record(detailed("AET"), Some(1), Some(1))).is_some());
    }

    #[test]
    fn accepts_bare_string_status() {
        let raw = record(Some(RawStatus::Code("FT".to_string())), Some(0), Some(3));
        assert!(normalize(&raw).is_some());
    }

    #[test]
    fn rejects_not_started() {
        assert!(normalize(&record(detailed("NS"), None, None)).is_none());
    }

    #[test]
    fn rejects_missing_status() {
        assert!(normalize(&record(None, Some(1), Some(0))).is_none());
    }

    #[test]
    fn zero_goals_is_a_valid_score() {
        let result = normalize(&record(detailed("FT"), Some(0), Some(0))).unwrap();
        assert_eq!((result.home_goals, result.away_goals), (0, 0));
    }

    #[test]
    fn rejects_missing_goal_count() {
        assert!(normalize(&record(detailed("FT"), Some(2), None)).is_none());
        assert!(normalize(&record(detailed("FT"), None, Some(2))).is_none());
    }

    #[test]
    fn rejects_missing_side() {
        let mut raw = record(detailed("FT"), Some(1), Some(1));
        raw.teams.away = None;
        assert!(normalize(&raw).is_none());
    }
}
