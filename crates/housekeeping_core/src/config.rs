//! Environment-driven configuration.
//!
//! | variable                  | default                       |
//! |---------------------------|-------------------------------|
//! | `HOUSEKEEPING_DB_PATH`    | `housekeeping.sqlite3`        |
//! | `HOUSEKEEPING_LOG_LEVEL`  | `debug` (debug) / `info`      |
//! | `HOUSEKEEPING_LOG_DIR`    | unset: no file logging        |

use crate::logging::{default_log_level, normalize_level, normalize_log_dir, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "HOUSEKEEPING_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "HOUSEKEEPING_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "HOUSEKEEPING_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "housekeeping.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Invalid { variable: &'static str, source: LoggingError },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { variable, source } => write!(f, "invalid `{variable}`: {source}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid { source, .. } => Some(source),
        }
    }
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = normalize_level(&level).map_err(|source| ConfigError::Invalid {
                variable: LOG_LEVEL_ENV,
                source,
            })?;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            let dir = normalize_log_dir(Path::new(&dir)).map_err(|source| ConfigError::Invalid {
                variable: LOG_DIR_ENV,
                source,
            })?;
            config.log_dir = Some(dir);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DashboardConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = DashboardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn variables_override_defaults() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, "/var/lib/housekeeping/store.sqlite3"),
            (LOG_LEVEL_ENV, "Warning"),
            (LOG_DIR_ENV, "/var/log/housekeeping"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/var/lib/housekeeping/store.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/housekeeping")));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = DashboardConfig::from_lookup(lookup(&[(DB_PATH_ENV, "   ")])).unwrap();
        assert_eq!(config.db_path, DashboardConfig::default().db_path);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = DashboardConfig::from_lookup(lookup(&[(LOG_DIR_ENV, "relative/logs")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { variable, .. } if variable == LOG_DIR_ENV));

        let err = DashboardConfig::from_lookup(lookup(&[(LOG_LEVEL_ENV, "loud")])).unwrap_err();
        assert!(err.to_string().contains(LOG_LEVEL_ENV));
    }
}
