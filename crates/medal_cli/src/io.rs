//! CSV ingestion and export.
//!
//! Input rows use the `Name, Event, Team, Year, Medal` headers of the
//! historical results table; extra columns are ignored. Output tables
//! mirror the prediction and medal-table layouts consumed downstream.

use anyhow::{Context, Result};
use medal_core::{AwardAssignment, CollectiveSummary, HistoricalRecord};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
}

/// Read historical records, skipping rows that fail to deserialize.
pub fn load_records(csv_path: &Path) -> Result<(Vec<HistoricalRecord>, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Fields)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut records = Vec::new();
    let mut stats = ParseStats::default();

    for (row, result) in reader.deserialize::<HistoricalRecord>().enumerate() {
        stats.total_rows += 1;
        match result {
            Ok(record) => {
                records.push(record);
                stats.parsed += 1;
            }
            Err(err) => {
                stats.failed += 1;
                // +2: header line and 1-based numbering
                warn!(line = row + 2, error = %err, "skipping malformed record");
            }
        }
    }

    Ok((records, stats))
}

/// One exported prediction line.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRow<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
    #[serde(rename = "Event")]
    pub event: &'a str,
    #[serde(rename = "Team")]
    pub team: &'a str,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Predicted_Medal")]
    pub predicted_medal: &'static str,
    #[serde(rename = "Prediction_Score")]
    pub prediction_score: f64,
    #[serde(rename = "History_Data")]
    pub history_data: String,
    #[serde(rename = "Participation_Count")]
    pub participation_count: usize,
    #[serde(rename = "Rank_In_Event")]
    pub rank_in_event: usize,
    #[serde(rename = "Total_Athletes")]
    pub total_athletes: usize,
    #[serde(rename = "Is_Team_Event")]
    pub is_team_event: bool,
}

impl<'a> From<&'a AwardAssignment> for PredictionRow<'a> {
    fn from(a: &'a AwardAssignment) -> Self {
        let history: Vec<String> = a.history.iter().map(|v| v.to_string()).collect();
        Self {
            name: &a.key.name,
            event: &a.key.event,
            team: &a.collective,
            year: a.target_period,
            predicted_medal: a.category.label(),
            prediction_score: a.score,
            history_data: format!("[{}]", history.join(", ")),
            participation_count: a.participation_count,
            rank_in_event: a.rank,
            total_athletes: a.group_size,
            is_team_event: a.kind.is_team(),
        }
    }
}

/// One exported medal-table line.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow<'a> {
    #[serde(rename = "NOC")]
    pub noc: &'a str,
    #[serde(rename = "Gold")]
    pub gold: u32,
    #[serde(rename = "Silver")]
    pub silver: u32,
    #[serde(rename = "Bronze")]
    pub bronze: u32,
    #[serde(rename = "Total")]
    pub total: u32,
}

impl<'a> From<&'a CollectiveSummary> for SummaryRow<'a> {
    fn from(s: &'a CollectiveSummary) -> Self {
        Self { noc: &s.collective, gold: s.gold, silver: s.silver, bronze: s.bronze, total: s.total }
    }
}

fn write_rows<T: Serialize>(path: &Path, rows: impl IntoIterator<Item = T>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    for row in rows {
        writer.serialize(row).with_context(|| format!("Failed to write row to {}", path.display()))?;
    }
    writer.flush().with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

pub fn write_predictions(path: &Path, assignments: &[AwardAssignment]) -> Result<()> {
    write_rows(path, assignments.iter().map(PredictionRow::from))
}

pub fn write_summary(path: &Path, summaries: &[CollectiveSummary]) -> Result<()> {
    write_rows(path, summaries.iter().map(SummaryRow::from))
}

/// Sibling path used when the primary output cannot be written:
/// `out/predictions.csv` → `out/predictions_backup.csv`.
pub fn backup_path(path: &Path) -> PathBuf {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_backup.{}", stem, ext.to_string_lossy()),
        None => format!("{}_backup", stem),
    };
    path.with_file_name(name)
}

/// Run `write` against `primary`, retrying once at [`backup_path`].
/// Returns the path that was actually written.
pub fn write_with_backup<F>(primary: &Path, write: F) -> Result<PathBuf>
where
    F: Fn(&Path) -> Result<()>,
{
    match write(primary) {
        Ok(()) => Ok(primary.to_path_buf()),
        Err(primary_err) => {
            let backup = backup_path(primary);
            warn!(
                path = %primary.display(),
                backup = %backup.display(),
                error = %primary_err,
                "primary output failed, writing backup"
            );
            write(&backup).with_context(|| {
                format!(
                    "Failed to write {} ({primary_err:#}) and backup {}",
                    primary.display(),
                    backup.display()
                )
            })?;
            Ok(backup)
        }
    }
}
