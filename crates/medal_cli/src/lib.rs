//! Medal CLI Library
//!
//! CSV results table → medal_core predictor → prediction / medal-table CSVs
//! plus a JSON run metadata file with SHA256 checksums.

pub mod io;

use anyhow::{Context, Result};
use medal_core::{PredictionReport, PredictorConfig};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub use io::{
    backup_path, load_records, write_predictions, write_summary, write_with_backup, ParseStats,
};

/// One file produced by a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    /// SHA256 checksum (hex)
    pub checksum: String,
    pub bytes: u64,
}

/// Run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub version: String,
    /// Creation time (RFC3339)
    pub created_at: String,
    pub target_period: i32,
    pub records: usize,
    pub skipped_rows: u32,
    pub entities: usize,
    pub events: usize,
    pub failed_forecasts: usize,
    pub medals: usize,
    pub outputs: Vec<OutputFile>,
}

impl RunMetadata {
    pub fn new(config: &PredictorConfig, report: &PredictionReport, parse: &ParseStats) -> Self {
        Self {
            version: medal_core::VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            target_period: config.schedule.target,
            records: report.stats.records,
            skipped_rows: parse.failed,
            entities: report.stats.entities,
            events: report.stats.events,
            failed_forecasts: report.stats.forecasts.failed,
            medals: report.stats.medals,
            outputs: Vec::new(),
        }
    }

    pub fn record_output(&mut self, path: &Path) -> Result<()> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read output file: {}", path.display()))?;
        self.outputs.push(OutputFile {
            path: path.to_path_buf(),
            checksum: checksum(&bytes),
            bytes: bytes.len() as u64,
        });
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize metadata")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write metadata: {}", path.display()))?;
        Ok(())
    }
}

pub fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Check a written file against its recorded checksum.
pub fn verify_output(output: &OutputFile) -> Result<bool> {
    let bytes = fs::read(&output.path)
        .with_context(|| format!("Failed to read output file: {}", output.path.display()))?;
    Ok(checksum(&bytes) == output.checksum)
}

/// Log filter for the CLI. A `RUST_LOG` value that parses replaces the
/// `--verbose` level entirely; otherwise the level applies to every target.
pub fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level.as_str()))
}

/// Load a config file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<PredictorConfig> {
    match path {
        Some(path) => PredictorConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(PredictorConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medal_core::{HistoricalRecord, Predictor};

    #[test]
    fn test_checksum_known_value() {
        assert_eq!(
            checksum(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_metadata_tracks_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            HistoricalRecord::new("Ann", "100m", "USA", 2020, Some("Gold")),
            HistoricalRecord::new("Ann", "100m", "USA", 2024, Some("Gold")),
        ];
        let config = PredictorConfig::default();
        let report = Predictor::new(config.clone()).unwrap().run(&records);

        let out = dir.path().join("predictions.csv");
        write_predictions(&out, &report.assignments).unwrap();

        let mut meta = RunMetadata::new(&config, &report, &ParseStats::default());
        meta.record_output(&out).unwrap();
        assert_eq!(meta.records, 2);
        assert_eq!(meta.entities, 1);
        assert_eq!(meta.target_period, 2028);
        assert_eq!(meta.outputs.len(), 1);
        assert!(verify_output(&meta.outputs[0]).unwrap());

        std::fs::write(&out, "tampered").unwrap();
        assert!(!verify_output(&meta.outputs[0]).unwrap());

        let meta_path = dir.path().join("meta.json");
        meta.save(&meta_path).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(meta_path).unwrap()).unwrap();
        assert_eq!(parsed["entities"], 1);
    }

    #[test]
    fn test_log_filter_prefers_rust_log() {
        assert_eq!(log_filter(false, None).to_string(), "info");
        assert_eq!(log_filter(true, None).to_string(), "debug");
        assert_eq!(log_filter(true, Some("medal_core=warn")).to_string(), "medal_core=warn");
        assert_eq!(log_filter(false, Some("warn")).to_string(), "warn");
    }

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, PredictorConfig::default());
        assert!(load_config(Some(Path::new("/nonexistent/config.yaml"))).is_err());
    }
}
