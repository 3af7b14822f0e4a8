use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use kairos_app::cli::Cli;
use kairos_app::logging::init_logging;
use kairos_app::run_with;
use kairos_core::config::load_config;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let logging = init_logging()?;
    let config = load_config(cli.config.as_deref())?;
    logging.apply(cli.log_level(), &config.logging.level);

    tracing::debug!(?cli, "Starting kairos");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run_with(&cli, &config, &mut out) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::debug!(error = ?e, "Expansion failed");
            writeln!(out, "Error: {e}")?;
            Ok(ExitCode::FAILURE)
        }
    }
}
