// File: crates/trainview-core/src/source.rs
// Summary: Source Loader: fetch raw delimited text for one descriptor and
//          normalize it into a Series.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::config::{is_url, ColumnMap, SourceDescriptor};
use crate::series::Series;
use crate::types::Sample;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Transport failed or reported a non-success status. Logged and
    /// non-fatal: the affected series just stays absent.
    #[error("fetch failed for '{locator}': {reason}")]
    Fetch { locator: String, reason: String },
    #[error("reading '{locator}': {source}")]
    Io {
        locator: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing '{locator}': {source}")]
    Csv {
        locator: String,
        #[source]
        source: csv::Error,
    },
    /// An aggregator names a header the file does not have.
    #[error("column '{column}' not found in '{locator}'")]
    MissingColumn { locator: String, column: String },
}

/// Fetch and parse one source. Rows where any required field fails finite
/// numeric coercion are dropped; surviving rows keep file order and the
/// Series constructor then drops any non-increasing x. Idempotent for an
/// unchanged source.
pub fn load(descriptor: &SourceDescriptor, base_path: &str) -> Result<Series, LoadError> {
    let locator = descriptor.resolved_locator(base_path);
    let text = fetch(&locator)?;
    let samples = parse_rows(&text, &descriptor.columns, &locator)?;
    let series = Series::from_rows(&descriptor.key, samples);
    debug!(key = %descriptor.key, rows = series.len(), "source loaded");
    Ok(series)
}

/// Raw text for a locator: http(s) via ureq, anything else via the
/// filesystem.
fn fetch(locator: &str) -> Result<String, LoadError> {
    if is_url(locator) {
        let response = ureq::get(locator).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => LoadError::Fetch {
                locator: locator.to_string(),
                reason: format!("HTTP {code}"),
            },
            ureq::Error::Transport(t) => LoadError::Fetch {
                locator: locator.to_string(),
                reason: t.to_string(),
            },
        })?;
        response.into_string().map_err(|e| LoadError::Io {
            locator: locator.to_string(),
            source: e,
        })
    } else {
        std::fs::read_to_string(Path::new(locator)).map_err(|e| LoadError::Io {
            locator: locator.to_string(),
            source: e,
        })
    }
}

/// Parse header-keyed delimited text into samples per the column mapping.
fn parse_rows(text: &str, columns: &ColumnMap, locator: &str) -> Result<Vec<Sample>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| LoadError::Csv { locator: locator.to_string(), source: e })?
        .clone();

    // Resolve named columns up front for the aggregator shape.
    let plan = match columns {
        ColumnMap::FirstTwo => Plan::FirstTwo,
        ColumnMap::Mean { time, values } => {
            let time_idx = find_column(&headers, time, locator)?;
            let value_idx = values
                .iter()
                .map(|name| find_column(&headers, name, locator))
                .collect::<Result<Vec<_>, _>>()?;
            Plan::Mean { time_idx, value_idx }
        }
    };

    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| LoadError::Csv {
            locator: locator.to_string(),
            source: e,
        })?;
        if let Some(sample) = coerce_row(&record, &plan) {
            out.push(sample);
        }
    }
    Ok(out)
}

enum Plan {
    FirstTwo,
    Mean { time_idx: usize, value_idx: Vec<usize> },
}

/// Best-effort numeric coercion for one row. Returns None (silent drop)
/// unless every required field is a finite number.
fn coerce_row(record: &csv::StringRecord, plan: &Plan) -> Option<Sample> {
    match plan {
        Plan::FirstTwo => {
            let x = field(record, 0)?;
            let y = field(record, 1)?;
            Some(Sample::new(x, y))
        }
        Plan::Mean { time_idx, value_idx } => {
            if value_idx.is_empty() {
                return None;
            }
            let x = field(record, *time_idx)?;
            let mut sum = 0.0;
            for &i in value_idx {
                sum += field(record, i)?;
            }
            Some(Sample::new(x, sum / value_idx.len() as f64))
        }
    }
}

fn field(record: &csv::StringRecord, idx: usize) -> Option<f64> {
    let v: f64 = record.get(idx)?.trim().parse().ok()?;
    v.is_finite().then_some(v)
}

fn find_column(headers: &csv::StringRecord, name: &str, locator: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LoadError::MissingColumn {
            locator: locator.to_string(),
            column: name.to_string(),
        })
}
