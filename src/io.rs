//! JSONL file I/O.
//!
//! The core deduplicates raw lines and re-emits survivors untouched, so
//! the I/O layer only moves lines: read them all (skipping blanks), write
//! them back. Parsing and field extraction happen in the worker, where a
//! bad line is a skip rather than an error.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors from the JSONL I/O layer.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, IoError>;

/// Read all non-blank lines from a JSONL file.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        lines.push(line);
    }

    Ok(lines)
}

/// Write lines to a JSONL file, one record per line.
pub fn write_lines<P: AsRef<Path>>(path: P, lines: &[String]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for line in lines {
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}
