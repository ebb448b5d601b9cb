//! Tick ingestion from delimited files.
//!
//! Reads a headered CSV with columns `timestamp`, `symbol`, `price` into
//! ticks, preserving arrival order. Any malformed row fails the whole load:
//! the signal engine only ever receives well-formed ticks.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use signalbench_core::Tick;
use thiserror::Error;

/// Timestamp format used when writing ticks.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Local date-time layouts accepted on input, tried in order after RFC 3339.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Errors from the ingestion layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("line {line}: {source}")]
    Malformed {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp { line: u64, value: String },

    #[error("line {line}: invalid price '{value}'")]
    InvalidPrice { line: u64, value: String },

    #[error("write failed: {0}")]
    Write(#[from] csv::Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Ticks loaded from a file, with provenance.
#[derive(Debug, Clone)]
pub struct LoadedTicks {
    pub ticks: Vec<Tick>,
    /// BLAKE3 digest over the ticks in arrival order.
    pub dataset_hash: String,
}

#[derive(Debug, Deserialize)]
struct TickRow {
    timestamp: String,
    symbol: String,
    price: String,
}

#[derive(Debug, Serialize)]
struct TickRecord<'a> {
    timestamp: String,
    symbol: &'a str,
    price: f64,
}

/// Load every tick from a CSV file.
pub fn load_ticks(path: &Path) -> Result<LoadedTicks, LoadError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let ticks = read_ticks(reader)?;
    let dataset_hash = dataset_hash(&ticks);
    tracing::debug!(
        path = %path.display(),
        ticks = ticks.len(),
        hash = %dataset_hash,
        "loaded ticks"
    );
    Ok(LoadedTicks {
        ticks,
        dataset_hash,
    })
}

/// Parse ticks from any CSV source (used for in-memory data in tests).
pub fn parse_ticks<R: std::io::Read>(source: R) -> Result<Vec<Tick>, LoadError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);
    read_ticks(reader)
}

fn read_ticks<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Tick>, LoadError> {
    let headers = reader
        .headers()
        .map_err(|source| LoadError::Malformed { line: 1, source })?
        .clone();

    let mut ticks = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Malformed {
            line: source.position().map(|p| p.line()).unwrap_or(0),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: TickRow = record
            .deserialize(Some(&headers))
            .map_err(|source| LoadError::Malformed { line, source })?;

        let timestamp =
            parse_timestamp(&row.timestamp).ok_or_else(|| LoadError::InvalidTimestamp {
                line,
                value: row.timestamp.clone(),
            })?;
        let price = row
            .price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| LoadError::InvalidPrice {
                line,
                value: row.price.clone(),
            })?;

        ticks.push(Tick::new(timestamp, row.symbol, price));
    }
    Ok(ticks)
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with an offset (converted to UTC), local date-times with
/// a `T` or space separator and optional fractional seconds, and bare dates
/// (midnight).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in LOCAL_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Write ticks in the ingestion format.
pub fn write_ticks(path: &Path, ticks: &[Tick]) -> Result<(), LoadError> {
    let mut writer = csv::Writer::from_path(path)?;
    for tick in ticks {
        writer.serialize(TickRecord {
            timestamp: tick.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            symbol: tick.symbol(),
            price: tick.price(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Deterministic BLAKE3 digest over ticks in arrival order.
pub fn dataset_hash(ticks: &[Tick]) -> String {
    let mut hasher = blake3::Hasher::new();
    for tick in ticks {
        hasher.update(&tick.timestamp().and_utc().timestamp_micros().to_le_bytes());
        hasher.update(tick.symbol().as_bytes());
        hasher.update(&[0]);
        hasher.update(&tick.price().to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
