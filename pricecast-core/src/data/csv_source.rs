//! CSV price import/export.
//!
//! Expected header: `timestamp,price[,volume]`, timestamps in epoch
//! milliseconds. Rows that fail `PricePoint::is_sane` are dropped with a
//! warning; the rest are sorted ascending by timestamp.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::provider::{trailing_window, DataError, DataSource, FetchResult, PriceProvider};
use crate::domain::PricePoint;

/// Parse points from any CSV reader.
pub fn read_prices<R: Read>(reader: R, label: &str) -> Result<Vec<PricePoint>, DataError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut points = Vec::new();
    let mut dropped = 0usize;
    for record in rdr.deserialize::<PricePoint>() {
        let point = record?;
        if point.is_sane() {
            points.push(point);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        warn!(source = label, dropped, "dropped rows with invalid price or volume");
    }
    if points.is_empty() {
        return Err(DataError::Empty(label.to_string()));
    }

    points.sort_by_key(|p| p.timestamp);
    debug!(source = label, rows = points.len(), "loaded price series");
    Ok(points)
}

/// Render points as `timestamp,price,volume` CSV.
pub fn write_prices(points: &[PricePoint]) -> Result<String, DataError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for point in points {
        wtr.serialize(point)?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| DataError::Other(format!("flush CSV writer: {e}")))?;
    String::from_utf8(data).map_err(|e| DataError::Other(format!("CSV output is not UTF-8: {e}")))
}

/// Provider backed by a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    path: PathBuf,
}

impl CsvPriceProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every sane row of the file, ascending.
    pub fn load_all(&self) -> Result<Vec<PricePoint>, DataError> {
        let label = self.path.display().to_string();
        let file = File::open(&self.path).map_err(|source| DataError::Io {
            path: label.clone(),
            source,
        })?;
        read_prices(BufReader::new(file), &label)
    }
}

impl PriceProvider for CsvPriceProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self, window_seconds: u64) -> Result<FetchResult, DataError> {
        let all = self.load_all()?;
        Ok(FetchResult {
            points: trailing_window(&all, window_seconds),
            source: DataSource::CsvImport,
        })
    }
}
