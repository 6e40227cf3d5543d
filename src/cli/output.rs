//! Output formatting for session results.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::Result;
use crate::store::StoreStats;

/// Token written for a SEARCH with no matches in plain format.
pub const NO_RESULTS: &str = "NONE";

/// Token written when the session sees END.
pub const END_MARKER: &str = "END";

/// Summary of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Commands executed, END included.
    pub commands: usize,
    pub adds: usize,
    pub searches: usize,
    /// Whether the input ended with an explicit END.
    pub ended: bool,
    /// Store state when the session finished.
    pub stats: StoreStats,
}

/// Write one SEARCH result line.
pub fn write_search_result<W: Write>(
    writer: &mut W,
    keys: &[i64],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Plain => write_plain(writer, keys),
        OutputFormat::Json => write_json(writer, keys),
    }
}

fn write_plain<W: Write>(writer: &mut W, keys: &[i64]) -> Result<()> {
    if keys.is_empty() {
        writeln!(writer, "{NO_RESULTS}")?;
        return Ok(());
    }

    let line = keys
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(writer, "{line}")?;
    Ok(())
}

fn write_json<W: Write>(writer: &mut W, keys: &[i64]) -> Result<()> {
    serde_json::to_writer(&mut *writer, keys)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the END acknowledgement.
pub fn write_end<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "{END_MARKER}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(keys: &[i64], format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_search_result(&mut buf, keys, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_output() {
        assert_eq!(render(&[3, 1, 2], OutputFormat::Plain), "3 1 2\n");
        assert_eq!(render(&[-7], OutputFormat::Plain), "-7\n");
        assert_eq!(render(&[], OutputFormat::Plain), "NONE\n");
    }

    #[test]
    fn test_json_output() {
        assert_eq!(render(&[3, 1], OutputFormat::Json), "[3,1]\n");
        assert_eq!(render(&[], OutputFormat::Json), "[]\n");
    }

    #[test]
    fn test_end_marker() {
        let mut buf = Vec::new();
        write_end(&mut buf).unwrap();
        assert_eq!(buf, b"END\n");
    }
}
