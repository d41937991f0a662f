//! File validation, sampling, and reader construction.
//!
//! This module owns everything between a command-line path and a configured
//! delimited-text reader: startup validation (the only fatal error class),
//! reading the bounded sniffing sample, and building a `csv` reader from a
//! sniffed [`Dialect`]. Readers run in byte-record mode so non-UTF-8 content
//! flows through to the decoder, and they are flexible about per-row field
//! counts: a malformed row renders misaligned but never stops the load.

use crate::dialect::{Dialect, Quote, SAMPLE_LEN};
use crate::error::{Result, TablessError};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Validate that a file path is accessible and suitable for viewing.
///
/// A missing or unreadable file is the one fatal startup error; everything
/// later in the pipeline degrades gracefully instead. An empty file is
/// valid here: the viewer shows an empty grid for it.
pub fn validate_file_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(TablessError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| TablessError::file_error("Failed to read file metadata", e))?;
    if !metadata.is_file() {
        return Err(TablessError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    // Verify read permission up front rather than failing mid-load
    File::open(path).map_err(|e| TablessError::file_error("Cannot open file for reading", e))?;

    Ok(())
}

/// Read the sniffing sample: the first [`SAMPLE_LEN`] bytes of the file.
pub fn read_sample(path: &Path) -> Result<Vec<u8>> {
    let file =
        File::open(path).map_err(|e| TablessError::file_error("Cannot open file for reading", e))?;
    let mut sample = Vec::with_capacity(SAMPLE_LEN);
    file.take(SAMPLE_LEN as u64)
        .read_to_end(&mut sample)
        .map_err(|e| TablessError::file_error("Failed to read sniffing sample", e))?;
    Ok(sample)
}

/// Build a dialect-configured reader over any byte source.
///
/// Header handling is disabled here on purpose: the feeder decides what the
/// first record means, per the sniffed header flag.
pub fn reader_from<R: Read>(source: R, dialect: &Dialect) -> csv::Reader<R> {
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
    builder.from_reader(source)
}

/// Open the file for the full sequential read-through.
pub fn open_reader(path: &Path, dialect: &Dialect) -> Result<csv::Reader<File>> {
    let file =
        File::open(path).map_err(|e| TablessError::file_error("Cannot open file for reading", e))?;
    Ok(reader_from(file, dialect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content)
            .expect("Failed to write test content");
        file.flush().expect("Failed to flush test file");
        file
    }

    #[test]
    fn test_validate_valid_file() {
        let test_file = create_test_file(b"a,b\n1,2\n");
        assert!(validate_file_path(test_file.path()).is_ok());
    }

    #[test]
    fn test_validate_empty_file_is_ok() {
        let empty_file = create_test_file(&[]);
        assert!(validate_file_path(empty_file.path()).is_ok());
    }

    #[test]
    fn test_validate_nonexistent_file() {
        let non_existent = Path::new("/this/file/does/not/exist.csv");
        let result = validate_file_path(non_existent);

        assert!(matches!(result, Err(TablessError::FileNotFound { .. })));
    }

    #[test]
    fn test_validate_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let result = validate_file_path(temp_dir.path());

        assert!(matches!(result, Err(TablessError::NotAFile { .. })));
    }

    #[test]
    fn test_read_sample_small_file() {
        let test_file = create_test_file(b"a,b\n1,2\n");
        let sample = read_sample(test_file.path()).unwrap();
        assert_eq!(sample, b"a,b\n1,2\n");
    }

    #[test]
    fn test_read_sample_bounded() {
        let row = b"0123456789,0123456789\n".repeat(4000);
        let test_file = create_test_file(&row);
        let sample = read_sample(test_file.path()).unwrap();
        assert_eq!(sample.len(), SAMPLE_LEN);
    }

    #[test]
    fn test_reader_respects_quoting_off() {
        let dialect = Dialect {
            delimiter: b',',
            quote: Quote::None,
        };
        let mut reader = reader_from(&b"\"a,b\",c\n"[..], &dialect);
        let mut record = csv::ByteRecord::new();
        assert!(reader.read_byte_record(&mut record).unwrap());
        // With quoting off the quote characters are plain data
        assert_eq!(record.len(), 3);
        assert_eq!(&record[0], b"\"a");
    }

    #[test]
    fn test_reader_respects_quoting_on() {
        let dialect = Dialect {
            delimiter: b',',
            quote: Quote::Some(b'"'),
        };
        let mut reader = reader_from(&b"\"a,b\",c\n"[..], &dialect);
        let mut record = csv::ByteRecord::new();
        assert!(reader.read_byte_record(&mut record).unwrap());
        assert_eq!(record.len(), 2);
        assert_eq!(&record[0], b"a,b");
    }
}
