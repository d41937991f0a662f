//! Incremental row feeder: a resumable step function at idle priority.
//!
//! The feeder owns the configured reader (and with it the open file handle)
//! and hands parsed rows to a [`GridSurface`] in file order. Each call to
//! [`RowFeeder::step`] performs one burst of work and returns at the next
//! yield boundary, so the event loop can interleave input and redraw with
//! loading. The cadence is front-loaded: a yield after each of the first ten
//! rows while the window first populates, then every tenth row for
//! throughput on large files.
//!
//! The suspension state is explicit (reader position, rows-emitted counter,
//! per-column demotion memory) rather than a language-level generator, which
//! keeps it testable independent of any event loop.

use crate::decode::decode_field;
use crate::dialect::is_numeric_like;
use crate::error::Result;
use crate::grid::{ColumnAlign, GridSurface};
use std::io::Read;

/// Rows that each get their own yield at the start of a load.
pub const FRONT_LOADED_YIELDS: u64 = 10;

/// Yield interval once the front-loaded phase is over.
pub const YIELD_CADENCE: u64 = 10;

/// Title of the synthetic row-index column.
pub const INDEX_COLUMN_TITLE: &str = "#";

/// Outcome of one feeder step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeederStatus {
    /// More rows pending; schedule another step when the loop is idle.
    Again,
    /// End of file or row limit reached; stop scheduling.
    Done,
}

/// Resumable row feeder. Dropping it mid-load releases the file handle.
pub struct RowFeeder<R: Read> {
    reader: csv::Reader<R>,
    record: csv::ByteRecord,
    /// Maximum number of data rows to append
    limit: u64,
    /// First parsed record becomes column titles instead of data
    header_pending: bool,
    /// Data rows handed to the surface so far
    rows_appended: u64,
    /// Surface emissions (titles included) driving the yield cadence
    emitted: u64,
    /// Columns already demoted to left alignment (data columns, 0-based)
    demoted: Vec<bool>,
    done: bool,
}

impl<R: Read> RowFeeder<R> {
    /// Create a feeder over a dialect-configured reader.
    ///
    /// The dialect and header decision are fixed here, before any data row
    /// is displayed, and never revisited during the load.
    pub fn new(reader: csv::Reader<R>, has_header: bool, limit: u64) -> Self {
        Self {
            reader,
            record: csv::ByteRecord::new(),
            limit,
            header_pending: has_header,
            rows_appended: 0,
            emitted: 0,
            demoted: Vec::new(),
            done: false,
        }
    }

    /// Data rows appended so far.
    pub fn rows_appended(&self) -> u64 {
        self.rows_appended
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Perform one burst of work: parse and append rows until the next
    /// yield boundary, end of file, or the row limit.
    pub fn step(&mut self, surface: &mut dyn GridSurface) -> Result<FeederStatus> {
        if self.done {
            return Ok(FeederStatus::Done);
        }

        loop {
            if !self.reader.read_byte_record(&mut self.record)? {
                self.done = true;
                return Ok(FeederStatus::Done);
            }

            if self.header_pending {
                self.header_pending = false;
                let mut titles = Vec::with_capacity(self.record.len() + 1);
                titles.push(INDEX_COLUMN_TITLE.to_string());
                for field in self.record.iter() {
                    titles.push(decode_field(field).into_owned());
                }
                surface.set_column_titles(titles);
            } else {
                if self.rows_appended >= self.limit {
                    // The record that would cross the limit is read but
                    // never appended
                    self.done = true;
                    return Ok(FeederStatus::Done);
                }

                let mut cells = Vec::with_capacity(self.record.len() + 1);
                cells.push(group_thousands(self.rows_appended + 1));
                for (column, field) in self.record.iter().enumerate() {
                    let text = decode_field(field);
                    if !is_numeric_like(&text) {
                        if self.demoted.len() <= column {
                            self.demoted.resize(column + 1, false);
                        }
                        if !self.demoted[column] {
                            self.demoted[column] = true;
                            // Column 0 is the synthetic index column
                            surface.set_column_alignment(column + 1, ColumnAlign::Left);
                        }
                    }
                    cells.push(text.into_owned());
                }
                surface.append_row(cells);
                self.rows_appended += 1;
            }

            self.emitted += 1;
            if self.emitted <= FRONT_LOADED_YIELDS || self.emitted % YIELD_CADENCE == 0 {
                return Ok(FeederStatus::Again);
            }
        }
    }
}

/// Format a 1-based row index with comma thousands grouping.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
