//! Loading previously exported scores

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use baremo_core::extractor::parse_decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, StatsError};
use crate::export::ScoreRow;

/// JSON input: a bare array or any document with a `scores` field
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonScores {
    Plain(Vec<f64>),
    Report { scores: Vec<f64> },
}

/// Load scores from a `.csv`, `.json` or plain listing file
pub fn load_scores<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let io_err = |source: std::io::Error| StatsError::Io {
        path: path.to_path_buf(),
        source,
    };

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let scores = match ext.as_deref() {
        Some("csv") => read_csv(File::open(path).map_err(io_err)?)?,
        Some("json") => parse_json(&fs::read_to_string(path).map_err(io_err)?)?,
        _ => parse_listing(&fs::read_to_string(path).map_err(io_err)?)?,
    };
    debug!(path = %path.display(), count = scores.len(), "loaded scores");
    Ok(scores)
}

/// Read rows written by [`crate::export::write_csv`]; `position` is optional
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<f64>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows: Vec<ScoreRow> = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    if rows.iter().all(|r| r.position.is_some()) {
        rows.sort_by_key(|r| r.position);
    }
    Ok(rows.into_iter().map(|r| r.score).collect())
}

pub fn parse_json(text: &str) -> Result<Vec<f64>> {
    Ok(match serde_json::from_str(text)? {
        JsonScores::Plain(scores) => scores,
        JsonScores::Report { scores } => scores,
    })
}

/// One score per line; blank lines and `#` comments are skipped
pub fn parse_listing(text: &str) -> Result<Vec<f64>> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, value)| {
            parse_decimal(value, ",.").ok_or_else(|| StatsError::Parse {
                line,
                value: value.to_string(),
            })
        })
        .collect()
}
