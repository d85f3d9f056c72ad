//! Turns raw uploaded bytes into a [`RawTable`].
//!
//! The delimiter is sniffed from a bounded sample by scoring field-count
//! uniformity per candidate, the same idea the csv dialect sniffers use.
//! Rows whose field count differs from the first row are discarded and
//! counted rather than failing the whole upload.

use std::collections::HashMap;

use super::types::RawTable;
use super::EngineError;

const SNIFF_LINES: usize = 64;
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

pub fn parse_table(raw: &[u8]) -> Result<RawTable, EngineError> {
    let text = std::str::from_utf8(strip_bom(raw))
        .map_err(|_| EngineError::Parse("input is not valid UTF-8 text".to_string()))?;
    if text.trim().is_empty() {
        return Err(EngineError::Parse("input contains no rows".to_string()));
    }

    let delimiter = sniff_delimiter(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut parsed: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| EngineError::Parse(e.to_string()))?;
        parsed.push(record.iter().map(str::to_owned).collect());
    }

    let width = match parsed.first() {
        Some(first) => first.len(),
        None => return Err(EngineError::Parse("input contains no rows".to_string())),
    };

    let before = parsed.len();
    let rows: Vec<Vec<String>> = parsed.into_iter().filter(|row| row.len() == width).collect();
    let discarded_rows = before - rows.len();

    Ok(RawTable {
        rows,
        width,
        discarded_rows,
    })
}

fn strip_bom(raw: &[u8]) -> &[u8] {
    raw.strip_prefix(b"\xef\xbb\xbf").unwrap_or(raw)
}

/// Pick the candidate delimiter whose field counts are most uniform across
/// the first [`SNIFF_LINES`] non-empty lines. A candidate only scores on
/// lines with more than one field, so undelimited text falls back to a
/// comma (a single-column table).
fn sniff_delimiter(text: &str) -> u8 {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();

    let mut best = (b',', 0usize);
    for &delimiter in &CANDIDATE_DELIMITERS {
        let mut width_counts: HashMap<usize, usize> = HashMap::new();
        for line in &lines {
            let fields = line.bytes().filter(|&b| b == delimiter).count() + 1;
            if fields > 1 {
                *width_counts.entry(fields).or_default() += 1;
            }
        }
        let score = width_counts.values().copied().max().unwrap_or(0);
        if score > best.1 {
            best = (delimiter, score);
        }
    }
    best.0
}
