//! Kairos recurrence engine - integration test support.
//!
//! Re-exports the workspace crates so integration tests can use
//! `kairos_test::` paths, plus the CLI driver shared by the test files.

pub use kairos_app as app;
pub use kairos_rfc as rfc;

use clap::Parser;
use kairos_app::cli::Cli;
use kairos_core::config::Settings;

/// Runs the CLI entry point on `args` (without the program name) with
/// default settings. See [`run_cli_with`].
#[must_use]
pub fn run_cli(args: &[&str]) -> String {
    run_cli_with(args, &Settings::default())
}

/// ## Summary
/// Runs the CLI entry point on `args` and returns what it printed, or the
/// `Error: ...` line the binary prints when the run fails. Argument errors
/// come back as clap's message.
#[must_use]
pub fn run_cli_with(args: &[&str], settings: &Settings) -> String {
    let cli = match Cli::try_parse_from(std::iter::once("kairos").chain(args.iter().copied())) {
        Ok(cli) => cli,
        Err(e) => return e.to_string(),
    };

    let mut out = Vec::new();
    match kairos_app::run_with(&cli, settings, &mut out) {
        Ok(_) => String::from_utf8_lossy(&out).into_owned(),
        Err(e) => format!("Error: {e}\n"),
    }
}
