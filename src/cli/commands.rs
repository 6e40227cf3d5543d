//! Command parsing and session execution for the logstore CLI.
//!
//! A session is a line-oriented script:
//!
//! ```text
//! 2
//! ADD 1 hello world
//! ADD 2 hello there
//! SEARCH hello 2
//! END
//! ```
//!
//! The first line holds the store capacity unless one was configured up
//! front. Each SEARCH writes one result line; END writes `END` and stops.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use log::{debug, info, warn};

use crate::cli::args::{LogStoreArgs, OutputFormat};
use crate::cli::output::{SessionSummary, write_end, write_search_result};
use crate::error::{LogStoreError, Result};
use crate::store::{RecordStore, StoreConfig};

/// A single parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `ADD key value...`: the value is the rest of the line after the key,
    /// kept verbatim apart from the separating whitespace.
    Add { key: i64, value: String },
    /// `SEARCH word limit`
    Search { word: String, limit: i64 },
    /// `END`
    End,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// `line_no` is the 1-based input line, used in error messages.
    pub fn parse(line: &str, line_no: usize) -> Result<Option<Command>> {
        let Some((verb, rest)) = split_field(line) else {
            return Ok(None);
        };

        let command = match verb {
            "ADD" => {
                let (key, value) = split_field(rest)
                    .ok_or_else(|| LogStoreError::command(line_no, "ADD requires a key"))?;
                let key = parse_int(key, "key", line_no)?;
                Command::Add {
                    key,
                    value: value.to_string(),
                }
            }
            "SEARCH" => {
                let mut fields = rest.split_whitespace();
                let word = fields
                    .next()
                    .ok_or_else(|| LogStoreError::command(line_no, "SEARCH requires a word"))?;
                let limit = fields
                    .next()
                    .ok_or_else(|| LogStoreError::command(line_no, "SEARCH requires a limit"))?;
                let limit = parse_int(limit, "limit", line_no)?;
                if fields.next().is_some() {
                    warn!("line {line_no}: ignoring fields after SEARCH limit");
                }
                Command::Search {
                    word: word.to_string(),
                    limit,
                }
            }
            "END" => Command::End,
            other => {
                return Err(LogStoreError::command(
                    line_no,
                    format!("unknown command {other:?}"),
                ));
            }
        };

        Ok(Some(command))
    }
}

/// Split off the first whitespace-delimited field of `text`.
///
/// Returns the field and the remainder with its leading whitespace removed.
fn split_field(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.find(char::is_whitespace) {
        Some(end) => Some((&text[..end], text[end..].trim_start())),
        None => Some((text, "")),
    }
}

fn parse_int(field: &str, what: &str, line_no: usize) -> Result<i64> {
    field
        .parse()
        .map_err(|_| LogStoreError::command(line_no, format!("invalid {what} {field:?}")))
}

/// Replays a command script against a fresh store.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: Option<StoreConfig>,
    format: OutputFormat,
}

impl Session {
    /// Create a session that reads the capacity from the input header.
    pub fn new(format: OutputFormat) -> Self {
        Session {
            config: None,
            format,
        }
    }

    /// Use `config` for the store instead of a header line.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Run the script from `reader`, writing results to `writer`.
    ///
    /// Stops at END or end of input. A malformed line aborts the session with
    /// a [`LogStoreError::Command`] error; output already written is kept.
    pub fn run<R: BufRead, W: Write>(&self, reader: R, writer: &mut W) -> Result<SessionSummary> {
        let mut lines = reader.lines().enumerate().map(|(i, line)| (i + 1, line));

        let mut store = match &self.config {
            Some(config) => RecordStore::with_config(config)?,
            None => RecordStore::new(read_capacity_header(&mut lines)?)?,
        };
        info!("session started with capacity {}", store.capacity());

        let mut summary = SessionSummary {
            commands: 0,
            adds: 0,
            searches: 0,
            ended: false,
            stats: store.stats(),
        };

        for (line_no, line) in lines {
            let line = line?;
            let Some(command) = Command::parse(&line, line_no)? else {
                continue;
            };
            summary.commands += 1;

            match command {
                Command::Add { key, value } => {
                    store.add(key, value);
                    summary.adds += 1;
                }
                Command::Search { word, limit } => {
                    let limit = usize::try_from(limit).unwrap_or_else(|_| {
                        warn!("line {line_no}: negative SEARCH limit {limit} treated as 0");
                        0
                    });
                    let keys = store.search(&word, limit);
                    debug!("SEARCH {word:?} {limit} -> {} keys", keys.len());
                    write_search_result(writer, &keys, self.format)?;
                    summary.searches += 1;
                }
                Command::End => {
                    write_end(writer)?;
                    summary.ended = true;
                    break;
                }
            }
        }

        writer.flush()?;
        summary.stats = store.stats();
        info!(
            "session finished: {} commands, {} live records",
            summary.commands, summary.stats.live_records
        );
        Ok(summary)
    }
}

/// Read the first non-blank line and take its first field as the capacity.
///
/// The field must be an integer; a value below 1 is an invalid capacity
/// rather than a malformed line.
fn read_capacity_header<I>(lines: &mut I) -> Result<usize>
where
    I: Iterator<Item = (usize, io::Result<String>)>,
{
    for (line_no, line) in lines.by_ref() {
        let line = line?;
        let Some(field) = line.split_whitespace().next() else {
            continue;
        };
        let capacity = parse_int(field, "capacity header", line_no)?;
        if capacity < 1 {
            return Err(LogStoreError::InvalidCapacity(capacity));
        }
        return usize::try_from(capacity).map_err(|_| {
            LogStoreError::command(line_no, format!("capacity {capacity} is too large"))
        });
    }

    Err(LogStoreError::command(0, "missing capacity header"))
}

/// Execute the CLI: open the input, run the session, write to stdout.
pub fn execute_command(args: &LogStoreArgs) -> Result<SessionSummary> {
    let mut session = Session::new(args.output_format);
    if let Some(config) = args.store_config()? {
        session = session.with_config(config);
    }

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    match &args.input {
        Some(path) => {
            debug!("reading commands from {}", path.display());
            session.run(BufReader::new(File::open(path)?), &mut writer)
        }
        None => session.run(io::stdin().lock(), &mut writer),
    }
}
