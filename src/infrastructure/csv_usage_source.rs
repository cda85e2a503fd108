// CSV file source for usage records
use crate::application::usage_source::UsageSource;
use crate::domain::error::AdviceError;
use crate::domain::usage::UsageRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Usage data file with header columns (by name, any order):
/// - timestamp (ISO 8601 datetime, naive or with offset, or a bare date)
/// - faucet_id
/// - usage_liters
#[derive(Debug, Clone)]
pub struct CsvUsageSource {
    path: PathBuf,
}

impl CsvUsageSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl UsageSource for CsvUsageSource {
    fn load(&self) -> Result<Vec<UsageRecord>, AdviceError> {
        let file = File::open(&self.path).map_err(|e| {
            AdviceError::DataSource(format!("failed to open {}: {e}", self.path.display()))
        })?;
        read_usage_records(file)
    }
}

/// Parse usage records from any CSV reader.
pub fn read_usage_records<R: Read>(reader: R) -> Result<Vec<UsageRecord>, AdviceError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| csv_error(e, "failed to read CSV headers".to_string()))?
        .clone();
    let columns = Columns::locate(&headers)?;

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        // Header is line 1
        let line = idx + 2;
        let row = result.map_err(|e| csv_error(e, format!("line {line}")))?;
        records.push(columns.parse(&row, line)?);
    }
    Ok(records)
}

/// Read failures belong to the data source. Anything else is malformed content.
fn csv_error(e: csv::Error, context: String) -> AdviceError {
    match e.kind() {
        csv::ErrorKind::Io(_) => AdviceError::DataSource(format!("{context}: {e}")),
        _ => AdviceError::Schema(format!("{context}: {e}")),
    }
}

struct Columns {
    timestamp: usize,
    faucet_id: usize,
    usage_liters: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, AdviceError> {
        let find = |name: &str| -> Result<usize, AdviceError> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| AdviceError::Schema(format!("missing column '{name}'")))
        };

        Ok(Self {
            timestamp: find("timestamp")?,
            faucet_id: find("faucet_id")?,
            usage_liters: find("usage_liters")?,
        })
    }

    fn parse(&self, row: &StringRecord, line: usize) -> Result<UsageRecord, AdviceError> {
        let get = |idx: usize| row.get(idx).unwrap_or("").trim();

        let ts_str = get(self.timestamp);
        let timestamp = parse_timestamp(ts_str).ok_or_else(|| {
            AdviceError::Schema(format!("line {line}: invalid timestamp '{ts_str}'"))
        })?;

        let faucet_id = get(self.faucet_id);
        if faucet_id.is_empty() {
            return Err(AdviceError::Schema(format!("line {line}: empty faucet_id")));
        }

        let usage_str = get(self.usage_liters);
        let usage_liters: f64 = usage_str.parse().map_err(|e| {
            AdviceError::Schema(format!("line {line}: invalid usage_liters '{usage_str}': {e}"))
        })?;
        if !usage_liters.is_finite() || usage_liters < 0.0 {
            return Err(AdviceError::Schema(format!(
                "line {line}: usage_liters must be non-negative, got {usage_str}"
            )));
        }

        Ok(UsageRecord::new(faucet_id.to_string(), timestamp, usage_liters))
    }
}

/// Wall-clock time of the reading. Offsets are dropped, never converted.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            // Date-only readings count as midnight
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
