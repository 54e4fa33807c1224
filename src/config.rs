//! Configuration for the reasoner and its logger.
//!
//! Settings are read from YAML. Every field has a default, so an empty
//! document is a valid configuration:
//!
//! ```yaml
//! logger:
//!   enable: true
//!   level: debug
//!   format: compact
//! entailment:
//!   detect_cycles: true
//!   initial_capacity: 256
//!   ignored_domains:
//!     - http://www.w3.org/2002/07/owl#Thing
//! ```

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::vocabulary::{namespaces::owl, Iri};

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logger: Logger,
    pub entailment: EntailmentSettings,
}

impl Config {
    /// Parses a configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Reads and parses a YAML configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }
}

/// Logger configuration, mirrored from the host application's settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logger {
    /// Install a subscriber at all.
    pub enable: bool,
    pub level: LogLevel,
    pub format: LogFormat,
    /// Full `EnvFilter` directive replacing the crate-scoped default.
    pub override_filter: Option<String>,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            enable: true,
            level: LogLevel::default(),
            format: LogFormat::default(),
            override_filter: None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            Self::Off => "off",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(level)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Tuning of the entailment core.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EntailmentSettings {
    /// Fail with [`crate::Error::CyclicHierarchy`] when a hierarchy loops back
    /// on itself. When disabled, the looping edge is skipped and closures of
    /// terms on the cycle may be incomplete.
    pub detect_cycles: bool,
    /// Number of closures the cache pre-allocates room for.
    pub initial_capacity: Option<usize>,
    /// Domain terms that never constrain a resource.
    pub ignored_domains: Vec<Iri>,
}

impl Default for EntailmentSettings {
    fn default() -> Self {
        Self {
            detect_cycles: true,
            initial_capacity: None,
            ignored_domains: vec![Iri::from(owl::THING)],
        }
    }
}

impl EntailmentSettings {
    pub(crate) fn ignores_domain(&self, domain: &Iri) -> bool {
        self.ignored_domains.contains(domain)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid log filter `{filter}`: {reason}")]
    Filter { filter: String, reason: String },
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{Config, ConfigError, LogFormat, LogLevel};
    use crate::vocabulary::{namespaces::owl, Iri};

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_yaml("").expect("defaults");
        assert!(config.logger.enable);
        assert_eq!(config.logger.level, LogLevel::Info);
        assert_eq!(config.logger.format, LogFormat::Compact);
        assert!(config.entailment.detect_cycles);
        assert_eq!(config.entailment.initial_capacity, None);
        assert_eq!(config.entailment.ignored_domains, vec![Iri::from(owl::THING)]);
    }

    #[test]
    fn reads_partial_documents() {
        let config = Config::from_yaml(
            r"
logger:
  level: trace
  format: json
entailment:
  detect_cycles: false
  initial_capacity: 64
  ignored_domains:
    - http://www.w3.org/2000/01/rdf-schema#Resource
",
        )
        .expect("config");
        assert!(config.logger.enable);
        assert_eq!(config.logger.level, LogLevel::Trace);
        assert_eq!(config.logger.format, LogFormat::Json);
        assert!(!config.entailment.detect_cycles);
        assert_eq!(config.entailment.initial_capacity, Some(64));
        assert_eq!(
            config.entailment.ignored_domains,
            vec![Iri::new("http://www.w3.org/2000/01/rdf-schema#Resource").expect("iri")]
        );
    }

    #[test]
    fn rejects_invalid_ignored_domains() {
        let err = Config::from_yaml(
            r"
entailment:
  ignored_domains:
    - not an iri
",
        )
        .expect_err("invalid iri");
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn reports_missing_files() {
        let err = Config::from_file(Path::new("/nonexistent/reasoner.yaml"))
            .expect_err("missing file");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn log_levels_render_as_filter_directives() {
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        assert_eq!(LogLevel::Off.to_string(), "off");
    }
}
