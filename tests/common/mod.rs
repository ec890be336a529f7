#![allow(dead_code)]

use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub const HEADER: &str = "op, id, name, amount";

/// Writes a request file with the standard header followed by `rows`.
pub fn request_file(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{HEADER}")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    file.flush()?;
    Ok(file)
}

/// Writes a request file creating one account and depositing 1.0 into it
/// `deposits` times.
pub fn deposit_file(deposits: usize) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{HEADER}")?;
    writeln!(file, "create, , bulk, ")?;
    for _ in 0..deposits {
        writeln!(file, "deposit, 0, , 1.0")?;
    }
    writeln!(file, "balance, 0, , ")?;
    file.flush()?;
    Ok(file)
}

/// Parses the binary's JSON-lines output.
pub fn responses(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("Response is not valid JSON"))
        .collect()
}
