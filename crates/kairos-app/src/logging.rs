//! stderr logging with a filter that can be tightened after config loads.

use kairos_core::constants::{DEFAULT_LOG_LEVEL, LOG_ENV_VAR};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, reload};

/// Handle to the installed log filter.
pub struct Logging {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

/// ## Summary
/// Installs the global subscriber: a reloadable `EnvFilter` and a fmt layer
/// writing to stderr, plus the `log` bridge.
///
/// The initial filter comes from `KAIROS_LOG`, then `RUST_LOG`, then `warn`.
///
/// ## Errors
/// Returns an error if a global subscriber or logger is already installed.
pub fn init_logging() -> anyhow::Result<Logging> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_e| EnvFilter::try_from_default_env())
        .ok();
    let from_env = env_filter.is_some();

    let (filter_layer, handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL)));

    let subscriber = tracing_subscriber::registry().with(filter_layer).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true),
    );

    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    Ok(Logging { handle, from_env })
}

impl Logging {
    /// ## Summary
    /// Replaces the filter with the level the CLI flags or config ask for.
    ///
    /// Verbosity flags always win. The config level only applies when no
    /// log environment variable was set.
    ///
    /// ## Side Effects
    /// Reloads the global filter. An unparsable level is logged and ignored.
    pub fn apply(&self, cli_level: Option<&str>, config_level: &str) {
        let Some(level) = select_level(cli_level, self.from_env, config_level) else {
            return;
        };

        match EnvFilter::try_new(level) {
            Ok(filter) => {
                if let Err(e) = self.handle.modify(|current| *current = filter) {
                    tracing::warn!(error = %e, "Failed to update log filter");
                }
            }
            Err(e) => {
                tracing::warn!(level, error = %e, "Invalid log level, keeping current filter");
            }
        }
    }
}

fn select_level<'a>(
    cli_level: Option<&'a str>,
    from_env: bool,
    config_level: &'a str,
) -> Option<&'a str> {
    match cli_level {
        Some(level) => Some(level),
        None if from_env => None,
        None => Some(config_level),
    }
}
