use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::models::{FixtureRecord, MatchResult, StandingsRow, TeamId, TeamStats};
use crate::services::normalizer::normalize;

/// One team's line in the live table or a snapshot of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    pub team_id: TeamId,
    pub name: String,
    pub stats: TeamStats,
}

/// Ranking comparator used when positions are assigned.
pub type Comparator = fn(&TableEntry, &TableEntry) -> Ordering;

/// Default ranking: points descending, then goal difference descending.
///
/// There is intentionally no third key. Ranking is a stable sort over an
/// insertion-ordered ledger, so full ties keep team-directory order followed
/// by first-appearance order for teams the directory did not list.
pub fn points_then_goal_diff(a: &TableEntry, b: &TableEntry) -> Ordering {
    (b.stats.points, b.stats.goal_difference()).cmp(&(a.stats.points, a.stats.goal_difference()))
}

/// Numeric suffix after the last hyphen of a round label, e.g.
/// "Regular Season - 7" -> 7. Labels without a hyphen or with a non-numeric
/// suffix yield `None`; the sort site falls back to round 0 for those.
///
/// This convention is fragile on purpose — it is the only round-ordering
/// signal the fixture feed provides, and a league with a different naming
/// scheme will order its rounds arbitrarily rather than fail.
pub fn round_number(label: &str) -> Option<u32> {
    let (_, suffix) = label.rsplit_once('-')?;
    suffix.trim().parse().ok()
}

/// Insertion-ordered store of cumulative team counters.
///
/// The order is observable (ranking ties fall back to it), so entries live in
/// a `Vec` with a side index instead of relying on any map's iteration order.
/// Seeded from the team directory; a fixture naming a team the directory
/// lacks creates a zeroed entry with an empty name at the tail.
#[derive(Debug, Default)]
struct TeamLedger {
    entries: Vec<TableEntry>,
    index: HashMap<TeamId, usize>,
}

impl TeamLedger {
    fn seed(directory: &[(TeamId, String)]) -> Self {
        let mut ledger = Self::default();
        for (team_id, name) in directory {
            let slot = ledger.entry(*team_id);
            slot.name = name.clone();
        }
        ledger
    }

    /// Get-or-create: the one place new teams enter the table.
    fn entry(&mut self, team_id: TeamId) -> &mut TableEntry {
        let slot = match self.index.get(&team_id) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push(TableEntry {
                    team_id,
                    name: String::new(),
                    stats: TeamStats::default(),
                });
                self.index.insert(team_id, slot);
                slot
            }
        };
        &mut self.entries[slot]
    }

    fn apply(&mut self, result: &MatchResult) {
        {
            let home = &mut self.entry(result.home).stats;
            home.played += 1;
            home.goals_for += result.home_goals;
            home.goals_against += result.away_goals;
        }
        {
            let away = &mut self.entry(result.away).stats;
            away.played += 1;
            away.goals_for += result.away_goals;
            away.goals_against += result.home_goals;
        }

        match result.home_goals.cmp(&result.away_goals) {
            Ordering::Greater => {
                let home = &mut self.entry(result.home).stats;
                home.wins += 1;
                home.points += 3;
                self.entry(result.away).stats.losses += 1;
            }
            Ordering::Less => {
                let away = &mut self.entry(result.away).stats;
                away.wins += 1;
                away.points += 3;
                self.entry(result.home).stats.losses += 1;
            }
            Ordering::Equal => {
                let home = &mut self.entry(result.home).stats;
                home.draws += 1;
                home.points += 1;
                let away = &mut self.entry(result.away).stats;
                away.draws += 1;
                away.points += 1;
            }
        }
    }

    fn snapshot(&self) -> Vec<TableEntry> {
        self.entries.clone()
    }
}

/// Replay a season's fixtures and emit one ranked table per round.
///
/// Fixtures that are not decided results are skipped. Accepted results are
/// replayed in ascending order of their raw date string (lexical comparison,
/// stable — the feed's ISO-like timestamps make that chronological). A round's
/// snapshot is taken right after the first replayed match carrying its label
/// and never refreshed: matches of the same round arriving later in the
/// replay still update the live counters but are invisible to that round's
/// table. Output rows are ordered by round number, then position.
pub fn reconstruct(
    season: u16,
    fixtures: &[FixtureRecord],
    directory: &[(TeamId, String)],
) -> Vec<StandingsRow> {
    reconstruct_with(season, fixtures, directory, points_then_goal_diff)
}

/// Same as [`reconstruct`], with a caller-chosen ranking comparator.
pub fn reconstruct_with(
    season: u16,
    fixtures: &[FixtureRecord],
    directory: &[(TeamId, String)],
    comparator: Comparator,
) -> Vec<StandingsRow> {
    let mut ledger = TeamLedger::seed(directory);

    let mut results: Vec<MatchResult> = fixtures.iter().filter_map(normalize).collect();
    results.sort_by(|a, b| a.date.cmp(&b.date));

    let mut snapshots: Vec<(String, Vec<TableEntry>)> = Vec::new();
    let mut snapshotted: HashSet<String> = HashSet::new();

    for result in &results {
        ledger.apply(result);
        if snapshotted.insert(result.round.clone()) {
            snapshots.push((result.round.clone(), ledger.snapshot()));
        }
    }

    // Stable sort: labels with the same (or no) round number keep
    // first-occurrence order.
    snapshots.sort_by_key(|(label, _)| round_number(label).unwrap_or(0));

    let mut rows = Vec::new();
    for (label, mut entries) in snapshots {
        entries.sort_by(comparator);
        for (rank, entry) in entries.iter().enumerate() {
            rows.push(StandingsRow {
                season,
                round: label.clone(),
                position: rank as u32 + 1,
                team_id: entry.team_id,
                team_name: entry.name.clone(),
                played: entry.stats.played,
                wins: entry.stats.wins,
                draws: entry.stats.draws,
                losses: entry.stats.losses,
                goals_for: entry.stats.goals_for,
                goals_against: entry.stats.goals_against,
                goal_diff: entry.stats.goal_difference(),
                points: entry.stats.points,
            });
        }
    }
    rows
}
