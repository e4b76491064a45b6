//! `~/.greenfield/config.toml` loading.
//!
//! Every section is optional. A missing file means defaults everywhere.

use std::env;
use std::path::{Path, PathBuf};

use greenfield_types::{PhasePolicy, SNAPSHOT_KEY};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = ".greenfield";

#[derive(Debug, Default, Deserialize)]
pub struct GreenfieldConfig {
    pub storage: Option<StorageConfig>,
    pub journey: Option<JourneyConfig>,
    pub logging: Option<LoggingConfig>,
    pub analytics: Option<AnalyticsConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    /// Directory holding snapshot files. `${VAR}` references are expanded.
    pub data_dir: Option<String>,
    /// File stem of the journey snapshot.
    pub snapshot_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JourneyConfig {
    #[serde(default)]
    pub phase_policy: PhasePolicy,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsConfig {
    /// Print banded summaries after calculations. Nothing is ever sent anywhere.
    #[serde(default)]
    pub enabled: bool,
}

pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

impl GreenfieldConfig {
    /// Load from the default location. `Ok(None)` when there is no config file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Configured data directory, else `~/.greenfield`, else `./.greenfield`.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .as_ref()
            .and_then(|s| s.data_dir.as_deref())
            .map(expand_env_vars)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .or_else(app_dir)
            .unwrap_or_else(|| PathBuf::from(APP_DIR))
    }

    #[must_use]
    pub fn snapshot_key(&self) -> &str {
        self.storage
            .as_ref()
            .and_then(|s| s.snapshot_key.as_deref())
            .filter(|key| !key.trim().is_empty())
            .unwrap_or(SNAPSHOT_KEY)
    }

    #[must_use]
    pub fn phase_policy(&self) -> PhasePolicy {
        self.journey
            .as_ref()
            .map(|j| j.phase_policy)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn log_filter(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.filter.as_deref())
    }

    #[must_use]
    pub fn analytics_enabled(&self) -> bool {
        self.analytics.as_ref().is_some_and(|a| a.enabled)
    }
}

fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR))
}

pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use greenfield_types::PhasePolicy;

    use super::{ConfigError, GreenfieldConfig, expand_env_vars};

    #[test]
    fn expand_env_vars_no_vars() {
        assert_eq!(expand_env_vars("hello world"), "hello world");
    }

    #[test]
    fn expand_env_vars_single_var() {
        unsafe {
            std::env::set_var("GREENFIELD_TEST_DIR", "/srv/journey");
        }
        let result = expand_env_vars("${GREENFIELD_TEST_DIR}/data");
        assert_eq!(result, "/srv/journey/data");
        unsafe {
            std::env::remove_var("GREENFIELD_TEST_DIR");
        }
    }

    #[test]
    fn expand_env_vars_missing_var_becomes_empty() {
        unsafe {
            std::env::remove_var("GREENFIELD_MISSING_VAR");
        }
        assert_eq!(expand_env_vars("a ${GREENFIELD_MISSING_VAR} b"), "a  b");
    }

    #[test]
    fn expand_env_vars_unclosed_brace_preserved() {
        assert_eq!(expand_env_vars("test ${UNCLOSED"), "test ${UNCLOSED");
    }

    #[test]
    fn expand_env_vars_empty_name_dropped() {
        assert_eq!(expand_env_vars("x${}y"), "xy");
    }

    #[test]
    fn parse_empty_config_uses_defaults() {
        let config: GreenfieldConfig = toml::from_str("").unwrap();
        assert!(config.storage.is_none());
        assert_eq!(config.snapshot_key(), "liberation-journey-state");
        assert_eq!(config.phase_policy(), PhasePolicy::ScoreIsTruth);
        assert!(config.log_filter().is_none());
        assert!(!config.analytics_enabled());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[storage]
data_dir = "/var/lib/greenfield"
snapshot_key = "journey-test"

[journey]
phase_policy = "monotonic"

[logging]
filter = "greenfield_core=debug"

[analytics]
enabled = true
"#;
        let config: GreenfieldConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/var/lib/greenfield"));
        assert_eq!(config.snapshot_key(), "journey-test");
        assert_eq!(config.phase_policy(), PhasePolicy::Monotonic);
        assert_eq!(config.log_filter(), Some("greenfield_core=debug"));
        assert!(config.analytics_enabled());
    }

    #[test]
    fn parse_rejects_unknown_phase_policy() {
        let result = toml::from_str::<GreenfieldConfig>("[journey]\nphase_policy = \"sideways\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn blank_snapshot_key_falls_back() {
        let config: GreenfieldConfig =
            toml::from_str("[storage]\nsnapshot_key = \"  \"\n").unwrap();
        assert_eq!(config.snapshot_key(), "liberation-journey-state");
    }

    #[test]
    fn load_from_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = GreenfieldConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_from_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage\n").unwrap();

        let err = GreenfieldConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), &path);
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[journey]\nphase_policy = \"score\"\n").unwrap();

        let config = GreenfieldConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(config.phase_policy(), PhasePolicy::ScoreIsTruth);
    }
}
