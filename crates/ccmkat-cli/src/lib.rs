//! Command-line runner for AES-128 CCM known-answer vectors.
//!
//! Loads vectors from TOML fixtures and/or the built-in set, runs them
//! through the conformance harness and writes one report line per vector
//! followed by a summary line.
//!
//! # Usage
//!
//! ```bash
//! # Built-in RFC 3610 packets and profile scenarios
//! ccmkat
//!
//! # Custom fixtures plus the built-in set, four workers, computed output
//! ccmkat --builtin --jobs 4 --dump vectors/*.toml
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::{io::Write, path::PathBuf};

use ccmkat_harness::{
    FixtureError, Harness, RunConfig, Summary, TestVector, builtin_vectors, ensure_unique_ids,
    load_fixture,
};
use clap::Parser;
use thiserror::Error;

/// AES-128 CCM known-answer test runner
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "ccmkat")]
#[command(about = "Run AES-128 CCM known-answer vectors and report PASS/FAIL")]
#[command(version)]
pub struct Args {
    /// Fixture files to run (TOML, version 1)
    pub fixtures: Vec<PathBuf>,

    /// Include the built-in vector set (implied when no fixtures are given)
    #[arg(long)]
    pub builtin: bool,

    /// Worker threads
    #[arg(short, long, default_value = "1")]
    pub jobs: usize,

    /// Print the computed ciphertext and tag in hex after each report line
    #[arg(long)]
    pub dump: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Errors that abort a run before any vector is judged.
#[derive(Debug, Error)]
pub enum CliError {
    /// A fixture could not be loaded
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Nothing to run
    #[error("no vectors to run")]
    NoVectors,

    /// Writing the report failed
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Collect vectors from the built-in set and the given fixtures.
///
/// Ids must be unique across all sources.
pub fn load_vectors(args: &Args) -> Result<Vec<TestVector>, CliError> {
    let mut vectors = Vec::new();
    if args.builtin || args.fixtures.is_empty() {
        vectors.extend(builtin_vectors()?);
    }
    for path in &args.fixtures {
        vectors.extend(load_fixture(path)?);
    }

    ensure_unique_ids(&vectors)?;
    if vectors.is_empty() {
        return Err(CliError::NoVectors);
    }
    Ok(vectors)
}

/// Run all selected vectors and write the report to `out`.
pub fn run(args: &Args, out: &mut impl Write) -> Result<Summary, CliError> {
    let vectors = load_vectors(args)?;
    tracing::info!(count = vectors.len(), jobs = args.jobs, "running vectors");

    let config = RunConfig { jobs: args.jobs, capture_output: args.dump };
    let summary = Harness::aes128().with_config(config).run_all_parallel(&vectors);

    for report in summary.reports() {
        writeln!(out, "{report}")?;
        if let Some(output) = &report.output {
            writeln!(out, "  {} bytes: {}", output.len(), hex::encode(output))?;
        }
    }
    writeln!(out, "{summary}")?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    fn run_to_string(args: &Args) -> (Summary, String) {
        let mut out = Vec::new();
        let summary = run(args, &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn defaults() {
        let args = parse(&["ccmkat"]);
        assert!(args.fixtures.is_empty());
        assert!(!args.builtin);
        assert_eq!(args.jobs, 1);
        assert!(!args.dump);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn parses_flags_and_paths() {
        let args = parse(&["ccmkat", "--builtin", "-j", "4", "--dump", "a.toml", "b.toml"]);
        assert!(args.builtin);
        assert_eq!(args.jobs, 4);
        assert!(args.dump);
        assert_eq!(args.fixtures, vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]);
    }

    #[test]
    fn rejects_non_numeric_jobs() {
        assert!(Args::try_parse_from(["ccmkat", "--jobs", "many"]).is_err());
    }

    #[test]
    fn builtin_run_reports_every_vector() {
        let (summary, text) = run_to_string(&parse(&["ccmkat"]));

        assert!(summary.is_success());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 18);
        assert_eq!(lines[0], "rfc3610-packet-1: PASS");
        assert_eq!(lines[17], "PASS (17/17 vectors)");
    }

    #[test]
    fn dump_prints_length_and_hex() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.toml");
        fs::write(
            &path,
            r#"
version = 1

[[vector]]
id = "empty"
key = "000102030405060708090a0b0c0d0e0f"
nonce = "000102030405060708090a0b0c"
mlen = 4
expected = "67793b6c"
"#,
        )
        .unwrap();

        let args = parse(&["ccmkat", "--dump", path.to_str().unwrap()]);
        let (_, text) = run_to_string(&args);

        assert_eq!(text, "empty: PASS\n  4 bytes: 67793b6c\nPASS (1/1 vectors)\n");
    }

    #[test]
    fn failing_fixture_fails_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(
            &path,
            r#"
version = 1

[[vector]]
id = "no-mlen"
key = "000102030405060708090a0b0c0d0e0f"
nonce = "000102030405060708090a0b0c"
expected = ""
"#,
        )
        .unwrap();

        let args = parse(&["ccmkat", path.to_str().unwrap()]);
        let (summary, text) = run_to_string(&args);

        assert!(!summary.is_success());
        assert!(text.starts_with("no-mlen: FAIL (missing-input: mlen is missing)\n"));
        assert!(text.ends_with("FAIL (1 of 1 vectors failed: no-mlen)\n"));
    }

    #[test]
    fn empty_fixture_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        fs::write(&path, "version = 1\n").unwrap();

        let args = parse(&["ccmkat", path.to_str().unwrap()]);
        assert!(matches!(run(&args, &mut Vec::new()), Err(CliError::NoVectors)));
    }

    #[test]
    fn duplicate_ids_across_sources_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.toml");
        fs::write(&path, "version = 1\n\n[[vector]]\nid = \"scenario-1c\"\nexpected = \"\"\n")
            .unwrap();

        let args = parse(&["ccmkat", "--builtin", path.to_str().unwrap()]);
        assert!(matches!(
            load_vectors(&args),
            Err(CliError::Fixture(FixtureError::DuplicateId { .. }))
        ));
    }
}
