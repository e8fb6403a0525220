//! ccmkat binary.
//!
//! Exits 0 when every vector passes, 1 when any vector fails and 2 when the
//! run could not start.

use std::{io, process::ExitCode};

use ccmkat_cli::{Args, run};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    match run(&args, &mut io::stdout().lock()) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            tracing::error!(%err, "conformance run aborted");
            ExitCode::from(2)
        },
    }
}
