//! `pr-inbox` entrypoint: summarise unresolved pull request review threads.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use pr_inbox::config::CliArgs;
use tracing_subscriber::EnvFilter;

mod cli;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PR_INBOX_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match cli::run(CliArgs::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "Error: {error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays clean for JSON output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
