//! Writes reports to disk.

use std::path::Path;

use thiserror::Error;

use crate::harness::{BenchmarkReport, SCHEMA_VERSION};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported schema version {found} (expected {SCHEMA_VERSION})")]
    UnsupportedSchema { found: u32 },
}

/// Write the report as pretty-printed JSON, creating parent directories.
pub fn write_json(report: &BenchmarkReport, path: &Path) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a report written by [`write_json`]. Unknown schema versions are rejected.
pub fn load_json(path: &Path) -> Result<BenchmarkReport, ExportError> {
    let content = std::fs::read_to_string(path)?;
    let report: BenchmarkReport = serde_json::from_str(&content)?;
    if report.schema_version != SCHEMA_VERSION {
        return Err(ExportError::UnsupportedSchema {
            found: report.schema_version,
        });
    }
    Ok(report)
}

pub fn write_markdown(markdown: &str, path: &Path) -> Result<(), ExportError> {
    ensure_parent(path)?;
    std::fs::write(path, markdown)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), std::io::Error> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_report() -> BenchmarkReport {
        BenchmarkReport {
            schema_version: SCHEMA_VERSION,
            dataset_hash: "00".into(),
            tick_count: 0,
            sizes: Vec::new(),
            skipped_sizes: Vec::new(),
            repetitions: 1,
            series: Vec::new(),
        }
    }

    #[test]
    fn json_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/benchmark.json");
        write_json(&empty_report(), &path).unwrap();
        let back = load_json(&path).unwrap();
        assert_eq!(back.dataset_hash, "00");
    }

    #[test]
    fn rejects_unknown_schema_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchmark.json");
        let mut report = empty_report();
        report.schema_version = 99;
        write_json(&report, &path).unwrap();
        assert!(matches!(
            load_json(&path),
            Err(ExportError::UnsupportedSchema { found: 99 })
        ));
    }
}
