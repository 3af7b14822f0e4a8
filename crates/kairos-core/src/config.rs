use std::path::Path;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE_STEM, DEFAULT_COUNT, DEFAULT_LOG_LEVEL, DEFAULT_MAX_COUNT,
    DEFAULT_MAX_EMPTY_PERIODS, ENV_PREFIX,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub expansion: ExpansionConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionConfig {
    /// Occurrences printed when the caller gives no count.
    pub default_count: u32,
    /// Upper bound on any requested count.
    pub max_count: u32,
    /// Consecutive empty periods before an iterator gives up on a rule.
    pub max_empty_periods: u32,
}

/// How occurrences are rendered by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// iCalendar text as produced for the value (`20260101T090000`, `...Z`, `20260101`).
    #[default]
    Ical,
    /// iCalendar text converted to UTC (`20260101T140000Z`).
    Utc,
    /// RFC 3339 instants (`2026-01-01T14:00:00+00:00`).
    Rfc3339,
    /// A JSON array of occurrence objects.
    Json,
}

impl OutputFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ical => "ical",
            Self::Utc => "utc",
            Self::Rfc3339 => "rfc3339",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            expansion: ExpansionConfig {
                default_count: DEFAULT_COUNT,
                max_count: DEFAULT_MAX_COUNT,
                max_empty_periods: DEFAULT_MAX_EMPTY_PERIODS,
            },
            output: OutputConfig {
                format: OutputFormat::Ical,
            },
            logging: LoggingConfig {
                level: DEFAULT_LOG_LEVEL.to_string(),
            },
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration into a `Settings`.
    ///
    /// Sources, lowest precedence first: built-in defaults, the config file
    /// (`kairos.toml` in the working directory if present, or `path` when
    /// given), then `KAIROS_*` environment variables using `__` as the
    /// section separator (e.g. `KAIROS_EXPANSION__DEFAULT_COUNT=5`).
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating it fails. An explicit `path` that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    /// Loads like [`Settings::load`] with `env` as the environment layer.
    fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(CONFIG_FILE_STEM).required(false),
        };

        let settings = Config::builder()
            .set_default("expansion.default_count", i64::from(DEFAULT_COUNT))?
            .set_default("expansion.max_count", i64::from(DEFAULT_MAX_COUNT))?
            .set_default(
                "expansion.max_empty_periods",
                i64::from(DEFAULT_MAX_EMPTY_PERIODS),
            )?
            .set_default("output.format", OutputFormat::default().as_str())?
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?
            // TOML file
            .add_source(file)
            // Env
            .add_source(env)
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks the cross-field constraints deserialization cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` naming the offending key.
    pub fn validate(&self) -> CoreResult<()> {
        let expansion = &self.expansion;
        if expansion.default_count == 0 {
            return Err(CoreError::InvalidConfiguration(
                "expansion.default_count must be at least 1".to_string(),
            ));
        }
        if expansion.max_count < expansion.default_count {
            return Err(CoreError::InvalidConfiguration(format!(
                "expansion.max_count ({}) is below expansion.default_count ({})",
                expansion.max_count, expansion.default_count
            )));
        }
        if expansion.max_empty_periods == 0 {
            return Err(CoreError::InvalidConfiguration(
                "expansion.max_empty_periods must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// `KAIROS_*` variables, `__` between section and key.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}

/// ## Summary
/// Loads configuration from `.env`, the config file and environment variables.
///
/// ## Errors
/// Returns an error if loading, deserializing or validating the configuration fails.
pub fn load_config(path: Option<&Path>) -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load(path)?;
    tracing::debug!(?settings, "Configuration loaded");
    Ok(settings)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
