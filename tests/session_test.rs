use std::fs::File;
use std::io::{BufReader, Cursor, Write};

use tempfile::NamedTempFile;

use logstore::cli::{OutputFormat, Session, SessionSummary};
use logstore::error::LogStoreError;
use logstore::store::StoreConfig;

fn run_script(session: &Session, script: &str) -> (Result<SessionSummary, LogStoreError>, String) {
    let mut out = Vec::new();
    let result = session.run(Cursor::new(script), &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn plain_session_with_header() {
    let script = "\
2
ADD 1 hello world
ADD 2 hello there
SEARCH hello 2
ADD 3 foo bar
SEARCH hello 2
SEARCH world 1
ADD 2 goodbye
SEARCH hello 2
SEARCH goodbye 1
END
";
    let (result, output) = run_script(&Session::new(OutputFormat::Plain), script);
    let summary = result.unwrap();

    assert_eq!(output, "2 1\n2\nNONE\nNONE\n2\nEND\n");
    assert_eq!(summary.commands, 10);
    assert_eq!(summary.adds, 4);
    assert_eq!(summary.searches, 5);
    assert!(summary.ended);
    assert_eq!(summary.stats.live_records, 2);
    assert_eq!(summary.stats.evictions, 1);
    assert_eq!(summary.stats.updates, 1);
}

#[test]
fn commands_after_end_are_ignored() {
    let script = "1\nADD 1 a\nEND\nSEARCH a 1\nBOGUS\n";
    let (result, output) = run_script(&Session::new(OutputFormat::Plain), script);

    assert!(result.unwrap().ended);
    assert_eq!(output, "END\n");
}

#[test]
fn eof_without_end_finishes_cleanly() {
    let script = "3\n\nADD 5 x y\n\nSEARCH y 3\n";
    let (result, output) = run_script(&Session::new(OutputFormat::Plain), script);
    let summary = result.unwrap();

    assert!(!summary.ended);
    assert_eq!(summary.commands, 2);
    assert_eq!(output, "5\n");
}

#[test]
fn negative_and_zero_limits_yield_none() {
    let script = "2\nADD 1 a\nSEARCH a -4\nSEARCH a 0\nEND\n";
    let (result, output) = run_script(&Session::new(OutputFormat::Plain), script);

    result.unwrap();
    assert_eq!(output, "NONE\nNONE\nEND\n");
}

#[test]
fn json_format() {
    let script = "3\nADD 1 a\nADD 2 a\nSEARCH a 5\nSEARCH b 5\nEND\n";
    let (result, output) = run_script(&Session::new(OutputFormat::Json), script);

    result.unwrap();
    assert_eq!(output, "[2,1]\n[]\nEND\n");
}

#[test]
fn configured_capacity_skips_header() {
    let session = Session::new(OutputFormat::Plain).with_config(StoreConfig::with_capacity(1));
    let script = "ADD 1 a\nADD 2 a\nSEARCH a 5\nEND\n";
    let (result, output) = run_script(&session, script);

    assert_eq!(result.unwrap().stats.capacity, 1);
    assert_eq!(output, "2\nEND\n");
}

#[test]
fn unknown_verb_aborts_with_line_number() {
    let script = "2\nADD 1 a\nSEARCH a 1\nDELETE 1\nSEARCH a 1\n";
    let (result, output) = run_script(&Session::new(OutputFormat::Plain), script);

    match result {
        Err(LogStoreError::Command { line, .. }) => assert_eq!(line, 4),
        other => panic!("expected command error, got {other:?}"),
    }
    // Output produced before the bad line is kept.
    assert_eq!(output, "1\n");
}

#[test]
fn bad_headers() {
    let session = Session::new(OutputFormat::Plain);

    let (result, _) = run_script(&session, "");
    assert!(matches!(result, Err(LogStoreError::Command { .. })));

    let (result, _) = run_script(&session, "two\nEND\n");
    assert!(matches!(result, Err(LogStoreError::Command { line: 1, .. })));

    let (result, _) = run_script(&session, "0\nEND\n");
    assert!(matches!(result, Err(LogStoreError::InvalidCapacity(0))));

    let (result, output) = run_script(&session, "-2\nEND\n");
    assert!(matches!(result, Err(LogStoreError::InvalidCapacity(-2))));
    assert!(output.is_empty());
}

#[test]
fn search_with_trailing_fields_still_answers() {
    let script = "2\nADD 1 a\nSEARCH a 1 x\nEND\n";
    let (result, output) = run_script(&Session::new(OutputFormat::Plain), script);

    assert_eq!(result.unwrap().searches, 1);
    assert_eq!(output, "1\nEND\n");
}

#[test]
fn script_from_file() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "2").unwrap();
    writeln!(input, "ADD 10 log line one").unwrap();
    writeln!(input, "ADD 11 log line two").unwrap();
    writeln!(input, "SEARCH line 5").unwrap();
    writeln!(input, "END").unwrap();
    input.flush().unwrap();

    let reader = BufReader::new(File::open(input.path()).unwrap());
    let mut out = Vec::new();
    let summary = Session::new(OutputFormat::Plain)
        .run(reader, &mut out)
        .unwrap();

    assert!(summary.ended);
    assert_eq!(String::from_utf8(out).unwrap(), "11 10\nEND\n");
}

#[test]
fn config_file_drives_capacity() {
    let mut config_file = NamedTempFile::new().unwrap();
    write!(config_file, r#"{{ "capacity": 1 }}"#).unwrap();
    config_file.flush().unwrap();

    let config = StoreConfig::from_json_file(config_file.path()).unwrap();
    let session = Session::new(OutputFormat::Plain).with_config(config);
    let (result, output) = run_script(&session, "ADD 1 a\nADD 2 b\nSEARCH a 1\nEND\n");

    assert_eq!(result.unwrap().stats.evictions, 1);
    assert_eq!(output, "NONE\nEND\n");
}
