/// Name used for the binary, the config file stem and the env prefix.
pub const APP_NAME: &str = "kairos";

pub const ENV_PREFIX: &str = "KAIROS";
/// Env var read for the initial log filter, before config is loaded.
pub const LOG_ENV_VAR: &str = const_str::concat!(ENV_PREFIX, "_LOG");

pub const CONFIG_FILE_STEM: &str = APP_NAME;
pub const CONFIG_FILE_NAME: &str = const_str::concat!(CONFIG_FILE_STEM, ".toml");

/// Occurrences printed when no count is given.
pub const DEFAULT_COUNT: u32 = 10;
/// Hard cap on occurrences printed by a single invocation.
pub const DEFAULT_MAX_COUNT: u32 = 10_000;
/// Consecutive empty recurrence periods tolerated before giving up.
pub const DEFAULT_MAX_EMPTY_PERIODS: u32 = 10_000;

/// Last year an iCalendar DATE can express.
pub const MAX_YEAR: i32 = 9999;

pub const DEFAULT_LOG_LEVEL: &str = "warn";
