//! Configuration types and parsing for queryshape.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Engine configuration from queryshape.yml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SQL dialect used to parse input text
    #[serde(default)]
    pub dialect: Dialect,

    /// What to do when the canonicalizer meets a node it has no rule for
    #[serde(default)]
    pub unhandled: UnhandledPolicy,

    /// Visitor state pool settings
    #[serde(default)]
    pub pool: PoolConfig,
}

/// SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// MySQL dialect (backtick identifiers, `LIMIT a, b`, `INTERVAL n UNIT`)
    #[default]
    MySql,
    /// PostgreSQL dialect
    Postgres,
    /// Permissive generic dialect
    Generic,
}

impl Dialect {
    /// Name understood by the parser factory
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Postgres => "postgres",
            Dialect::Generic => "generic",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySql),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "generic" => Ok(Dialect::Generic),
            other => Err(CoreError::ConfigInvalid {
                message: format!("unknown dialect '{other}' (expected mysql, postgres or generic)"),
            }),
        }
    }
}

/// Handling of syntax the canonicalizer has no explicit rule for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnhandledPolicy {
    /// Render the node through its own SQL text with literals placeholded,
    /// and record a diagnostic
    #[default]
    Degrade,
    /// Fail the statement
    Reject,
}

/// Visitor state pool settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolConfig {
    /// Maximum number of idle states kept for reuse; 0 disables pooling
    #[serde(default = "default_max_idle")]
    pub max_idle: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle: default_max_idle(),
        }
    }
}

const DEFAULT_MAX_IDLE: usize = 64;

fn default_max_idle() -> usize {
    DEFAULT_MAX_IDLE
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        log::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for queryshape.yml or queryshape.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("queryshape.yml");
        let yaml_path = dir.join("queryshape.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
