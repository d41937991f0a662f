//! Dialect sniffing for delimited text files.
//!
//! Given a bounded prefix of a file, this module infers the field delimiter,
//! the quoting convention, and whether the first row is a header. The dialect
//! is derived once per file and reused for the rest of that file's parsing;
//! it is never re-derived mid-load.
//!
//! Delimiter selection scores each candidate by field-count uniformity over
//! the sample's records: the winning delimiter must split at least one record
//! into two or more fields and must split the sample consistently. When no
//! candidate qualifies the sniff fails, and callers degrade to
//! [`FALLBACK_DIALECT`] with a logged warning instead of aborting.

use crate::decode::decode_field;
use crate::error::{Result, TablessError};
use std::collections::BTreeMap;

/// Number of bytes from the start of the file inspected by the sniffer.
pub const SAMPLE_LEN: usize = 32 * 1024;

/// Candidate delimiters, in preference order for tie-breaking.
const CANDIDATE_DELIMITERS: &[u8] = b",\t;|:";

/// Upper bound on sample records scored per candidate delimiter.
const MAX_SAMPLE_RECORDS: usize = 100;

/// Fraction of sample records that must agree on the modal field count.
const MIN_UNIFORMITY: f64 = 0.9;

/// Treat the first row of any non-empty file as a header.
///
/// The type-discontinuity heuristic only detects headers when some column
/// has a numeric body; files where every column is text-typed defeat it.
/// Forcing the header on is a deliberate policy, not an inference.
pub const FORCE_FIRST_ROW_HEADER: bool = true;

/// Dialect used when sniffing fails: plain comma-separated fields.
pub const FALLBACK_DIALECT: Dialect = Dialect {
    delimiter: b',',
    quote: Quote::None,
};

/// Quoting convention for a delimited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// Fields may be wrapped in the given quote character
    Some(u8),
    /// No quote handling at all
    None,
}

/// Inferred delimiter and quoting convention for a delimited text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: Quote,
}

impl Default for Dialect {
    fn default() -> Self {
        FALLBACK_DIALECT
    }
}

/// Result of sniffing a sample: the dialect plus the header decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sniff {
    pub dialect: Dialect,
    pub has_header: bool,
}

/// Classify a field as numeric-looking for alignment and header detection.
///
/// A field is numeric-like when it is empty, consists solely of ASCII digits
/// and punctuation (`-42.5`, `1,234`, `50%`), or equals one of the literals
/// `NA`, `NAN`, `TRUE`, `FALSE` case-insensitively.
pub fn is_numeric_like(field: &str) -> bool {
    const NUMERIC_LITERALS: &[&str] = &["NA", "NAN", "TRUE", "FALSE"];

    if field.is_empty() {
        return true;
    }
    if field
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_punctuation())
    {
        return true;
    }
    NUMERIC_LITERALS
        .iter()
        .any(|lit| field.eq_ignore_ascii_case(lit))
}

/// Sniff the dialect and header presence from a sample of file content.
///
/// Fails when the sample is empty or no candidate delimiter splits the
/// sample into a consistent table. Sniffing failure is non-fatal: use
/// [`sniff_or_default`] to degrade to the fallback dialect.
pub fn sniff(sample: &[u8]) -> Result<Sniff> {
    if sample.is_empty() {
        return Err(TablessError::sniff("sample is empty"));
    }

    let mut best: Option<Score> = None;
    for &delimiter in CANDIDATE_DELIMITERS {
        let score = match score_delimiter(sample, delimiter) {
            Some(score) => score,
            None => continue,
        };
        let better = match &best {
            None => true,
            // Strict comparison keeps the earlier candidate on ties
            Some(current) => {
                score.uniformity > current.uniformity
                    || (score.uniformity == current.uniformity && score.fields > current.fields)
            }
        };
        if better {
            best = Some(score);
        }
    }

    let best = best.ok_or_else(|| {
        TablessError::sniff("no candidate delimiter splits the sample into multiple fields")
    })?;
    if best.uniformity < MIN_UNIFORMITY {
        return Err(TablessError::sniff(format!(
            "field counts too irregular for delimiter {:?} ({:.0}% agreement)",
            best.delimiter as char,
            best.uniformity * 100.0
        )));
    }

    let dialect = Dialect {
        delimiter: best.delimiter,
        quote: detect_quote(sample, best.delimiter),
    };
    let has_header = if FORCE_FIRST_ROW_HEADER {
        true
    } else {
        header_heuristic(&sample_records(sample, &dialect))
    };

    Ok(Sniff { dialect, has_header })
}

/// Sniff with graceful degradation: on failure, log a warning and fall back
/// to [`FALLBACK_DIALECT`]. The header policy still applies to non-empty
/// files on the fallback path.
pub fn sniff_or_default(sample: &[u8]) -> Sniff {
    match sniff(sample) {
        Ok(sniffed) => sniffed,
        Err(err) => {
            log::warn!("{err}; falling back to plain comma-separated fields");
            Sniff {
                dialect: FALLBACK_DIALECT,
                has_header: FORCE_FIRST_ROW_HEADER && !sample.is_empty(),
            }
        }
    }
}

/// Field-count uniformity score for one candidate delimiter.
struct Score {
    delimiter: u8,
    /// Modal field count across the sample's records
    fields: usize,
    /// Fraction of records matching the modal count
    uniformity: f64,
}

fn score_delimiter(sample: &[u8], delimiter: u8) -> Option<Score> {
    let counts = field_counts(sample, delimiter);
    if counts.is_empty() {
        return None;
    }

    let mut tally: BTreeMap<usize, usize> = BTreeMap::new();
    for &count in &counts {
        *tally.entry(count).or_insert(0) += 1;
    }
    let (fields, votes) = tally.into_iter().max_by_key(|&(fields, votes)| (votes, fields))?;
    if fields < 2 {
        return None;
    }

    Some(Score {
        delimiter,
        fields,
        uniformity: votes as f64 / counts.len() as f64,
    })
}

/// Per-record field counts over the sample for one candidate delimiter.
fn field_counts(sample: &[u8], delimiter: u8) -> Vec<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(sample);

    let mut counts = Vec::new();
    let mut record = csv::ByteRecord::new();
    loop {
        match reader.read_byte_record(&mut record) {
            Ok(true) => counts.push(record.len()),
            // Stop at EOF or at quoting confusion; score what parsed cleanly
            Ok(false) | Err(_) => break,
        }
        if counts.len() == MAX_SAMPLE_RECORDS {
            break;
        }
    }

    // The sample boundary usually cuts the final record short
    if !sample.ends_with(b"\n") && counts.len() > 1 {
        counts.pop();
    }
    counts
}

/// A dialect quotes with `"` when the sample shows a quote character at a
/// field boundary: right after the delimiter or a record start, or right
/// before the delimiter or a record end.
fn detect_quote(sample: &[u8], delimiter: u8) -> Quote {
    const QUOTE: u8 = b'"';

    let mut prev = b'\n';
    for &byte in sample {
        let prev_is_boundary = prev == delimiter || prev == b'\n' || prev == b'\r';
        let byte_is_boundary = byte == delimiter || byte == b'\n' || byte == b'\r';
        if (byte == QUOTE && prev_is_boundary) || (prev == QUOTE && byte_is_boundary) {
            return Quote::Some(QUOTE);
        }
        prev = byte;
    }
    Quote::None
}

/// Parse up to [`MAX_SAMPLE_RECORDS`] sample records with the given dialect,
/// decoding fields for the header heuristic.
fn sample_records(sample: &[u8], dialect: &Dialect) -> Vec<Vec<String>> {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(dialect.delimiter)
        .has_headers(false)
        .flexible(true);
    match dialect.quote {
        Quote::Some(quote) => {
            builder.quote(quote);
        }
        Quote::None => {
            builder.quoting(false);
        }
    }

    let mut reader = builder.from_reader(sample);
    let mut records = Vec::new();
    let mut record = csv::ByteRecord::new();
    while let Ok(true) = reader.read_byte_record(&mut record) {
        records.push(record.iter().map(|f| decode_field(f).into_owned()).collect());
        if records.len() == MAX_SAMPLE_RECORDS {
            break;
        }
    }
    records
}

/// Type-discontinuity header check: true when at least one column pairs a
/// non-numeric first-row cell with an all-numeric body.
///
/// Known limitation: a file where every column holds text produces no
/// discontinuity, so the heuristic reports "no header" even when one is
/// plainly present. [`FORCE_FIRST_ROW_HEADER`] papers over this.
pub fn header_heuristic(records: &[Vec<String>]) -> bool {
    let (first, body) = match records.split_first() {
        Some(split) => split,
        None => return false,
    };
    if body.is_empty() {
        return false;
    }

    for (column, title) in first.iter().enumerate() {
        if is_numeric_like(title) {
            continue;
        }
        let mut cells = body.iter().filter_map(|row| row.get(column)).peekable();
        if cells.peek().is_none() {
            continue;
        }
        if cells.all(|cell| is_numeric_like(cell)) {
            return true;
        }
    }
    false
}
