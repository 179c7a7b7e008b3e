use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::models::{FinalStandingsRow, ResultRow, StandingsRow};

pub const RESULTS_FILE: &str = "results.csv";
pub const ROUND_STANDINGS_FILE: &str = "standings_by_round.csv";
pub const FINAL_STANDINGS_FILE: &str = "final_standings.csv";

/// Writes the run's artifacts as CSV files under the output directory,
/// ready for a spreadsheet or BI tool.
pub struct CsvExporter {
    dir: PathBuf,
}

impl CsvExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// One row per raw fixture, decided or not.
    pub fn write_results(&self, rows: &[ResultRow]) -> Result<()> {
        self.write(RESULTS_FILE, rows)
    }

    /// The reconstructed table, one row per team per round.
    pub fn write_round_standings(&self, rows: &[StandingsRow]) -> Result<()> {
        self.write(ROUND_STANDINGS_FILE, rows)
    }

    /// The API's own end-of-season table.
    pub fn write_final_standings(&self, rows: &[FinalStandingsRow]) -> Result<()> {
        self.write(FINAL_STANDINGS_FILE, rows)
    }

    fn write<T: Serialize>(&self, filename: &str, rows: &[T]) -> Result<()> {
        if rows.is_empty() {
            tracing::warn!("nothing to export for {} — skipping", filename);
            return Ok(());
        }

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating output dir {}", self.dir.display()))?;

        let path = self.dir.join(filename);
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;

        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        tracing::info!("exported {} row(s) to {}", rows.len(), path.display());
        Ok(())
    }
}
