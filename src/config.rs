use std::env;
use std::path::PathBuf;

/// File the CLI keeps its session in when nothing else is configured.
pub const DEFAULT_STATE_FILE: &str = "skor-arkadasi-storage.json";
/// Environment variable overriding the state file location.
pub const STATE_ENV: &str = "OKEYSCORE_STATE";
/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const VERBOSE_LOG_FILTER: &str = "okeyscore=debug";

/// Runtime settings shared by the binaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub state_path: PathBuf,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from(DEFAULT_STATE_FILE),
            log_filter: String::from(DEFAULT_LOG_FILTER),
        }
    }
}

impl Config {
    /// Resolves settings from CLI flags, then the process environment, then defaults.
    pub fn resolve(state_flag: Option<PathBuf>, verbose: bool) -> Self {
        Self::from_sources(state_flag, verbose, |key| env::var(key).ok())
    }

    /// Same as [`Config::resolve`] with an injectable environment lookup.
    pub fn from_sources<F>(state_flag: Option<PathBuf>, verbose: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let state_path = state_flag
            .or_else(|| {
                lookup(STATE_ENV)
                    .filter(|v| !v.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or(defaults.state_path);
        let log_filter = if verbose {
            String::from(VERBOSE_LOG_FILTER)
        } else {
            lookup(LOG_ENV)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_filter)
        };
        Self {
            state_path,
            log_filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_flags_or_env() {
        assert_eq!(Config::from_sources(None, false, no_env), Config::default());
    }

    #[test]
    fn flag_beats_environment() {
        let env = |key: &str| (key == STATE_ENV).then(|| String::from("/tmp/env.json"));
        let config = Config::from_sources(Some(PathBuf::from("flag.json")), false, env);
        assert_eq!(config.state_path, PathBuf::from("flag.json"));

        let config = Config::from_sources(None, false, env);
        assert_eq!(config.state_path, PathBuf::from("/tmp/env.json"));
    }

    #[test]
    fn verbose_overrides_log_env() {
        let env = |key: &str| (key == LOG_ENV).then(|| String::from("info"));
        assert_eq!(Config::from_sources(None, false, env).log_filter, "info");
        assert_eq!(
            Config::from_sources(None, true, env).log_filter,
            VERBOSE_LOG_FILTER
        );
    }
}
