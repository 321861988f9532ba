//! TSV keyword-export ingestion.
//!
//! Parses the tab-separated exports produced by keyword research tools
//! into [`KeywordRecord`]s. Expected columns:
//! `keyword<TAB>volume<TAB>difficulty<TAB>cpc<TAB>intents`, where
//! `intents` is a comma-separated tag list. A header row is detected and
//! skipped when the volume column is not numeric.
//!
//! Parsing is deliberately permissive: malformed numeric fields fall back
//! to zero (the engine normalizes them defensively), and rows with an
//! empty keyword are skipped. Only an input whose every row is unusable
//! is an error.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::debug;

use keyword_compass_core::models::KeywordRecord;

/// Read and parse a TSV export file.
pub fn load_tsv(path: &Path) -> Result<Vec<KeywordRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read keyword export: {}", path.display()))?;
    parse_tsv(&content)
}

/// Parse TSV content into keyword records.
pub fn parse_tsv(content: &str) -> Result<Vec<KeywordRecord>> {
    let mut records = Vec::new();
    let mut data_rows = 0usize;

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if index == 0 && looks_like_header(&columns) {
            continue;
        }
        data_rows += 1;

        let keyword = columns[0].trim();
        if keyword.is_empty() {
            continue;
        }

        records.push(KeywordRecord {
            keyword: keyword.to_string(),
            volume: parse_volume(columns.get(1)),
            difficulty: parse_number(columns.get(2)),
            cpc: parse_number(columns.get(3)),
            intents: parse_intents(columns.get(4)),
        });
    }

    if records.is_empty() && data_rows > 0 {
        bail!("no usable keyword rows in input ({data_rows} rows, all without keyword text)");
    }
    debug!(records = records.len(), "parsed keyword export");
    Ok(records)
}

/// A first line is a header when its keyword column names the field or
/// its volume column is not numeric.
fn looks_like_header(columns: &[&str]) -> bool {
    if columns[0].trim().eq_ignore_ascii_case("keyword") {
        return true;
    }
    match columns.get(1) {
        Some(volume) => parse_volume_opt(volume).is_none(),
        None => false,
    }
}

fn parse_volume(column: Option<&&str>) -> u64 {
    column.and_then(|v| parse_volume_opt(v)).unwrap_or(0)
}

/// Volume may arrive as `4400`, `4,400`, or `4400.0`.
fn parse_volume_opt(value: &str) -> Option<u64> {
    let cleaned = value.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<u64>()
        .ok()
        .or_else(|| cleaned.parse::<f64>().ok().filter(|v| *v >= 0.0).map(|v| v as u64))
}

fn parse_number(column: Option<&&str>) -> f64 {
    column
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn parse_intents(column: Option<&&str>) -> Vec<String> {
    column
        .map(|tags| {
            tags.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
