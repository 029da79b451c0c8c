//! CSV reader for recorded raw traces.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::error::TraceError;
use crate::recorder::RawTrace;

/// Reads one raw trace from a CSV file.
///
/// Expected CSV format:
/// - Header row required
/// - Samples are taken from the column named `y` when present, otherwise
///   from the first column (so `x,y` pointer logs and bare `y` lists both work)
/// - One sample per row; rows with an empty sample cell are skipped
///
/// An empty file body yields an empty [`RawTrace`]; emptiness is reported
/// later by preprocessing.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`TraceError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`TraceError::CsvParse`] | Malformed CSV record |
/// | [`TraceError::MissingColumn`] | Header has no columns |
/// | [`TraceError::InvalidSample`] | Cell is NaN, Inf, or not a number |
pub struct TraceReader {
    path: PathBuf,
}

impl TraceReader {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<RawTrace, TraceError> {
        let file = std::fs::File::open(&self.path).map_err(|e| TraceError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.parse_error(e))?;
        if header.is_empty() {
            return Err(TraceError::MissingColumn {
                path: self.path.clone(),
            });
        }
        let column = header.iter().position(|h| h == "y").unwrap_or(0);
        debug!(column, "selected sample column");

        let mut trace = RawTrace::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.parse_error(e))?;
            let raw = record.get(column).unwrap_or("");
            if raw.is_empty() {
                continue;
            }
            let sample = raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| TraceError::InvalidSample {
                    path: self.path.clone(),
                    row_index,
                    raw: raw.to_string(),
                })?;
            trace.push(sample);
        }

        info!(samples = trace.len(), "trace loaded");
        Ok(trace)
    }

    fn parse_error(&self, e: csv::Error) -> TraceError {
        TraceError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }
}
