//! Runner configuration file parsing
//!
//! The config file names the enabled rules with their options in the wire
//! shape (`interface-keys: ["asc", { caseSensitive: false }]`) plus include
//! and exclude globs for file discovery.

use crate::logging;
use crate::registry::RuleRegistry;
use serde::Deserialize;
use sortkeys_engine::{PolicyParams, SortOrder, SortPolicy};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Unknown rule '{0}' in config")]
    UnknownRule(String),
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
}

/// Rule options: a bare direction, or a one or two element list of
/// direction plus flag block.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum PolicySpec {
    /// `"asc"`
    Order(SortOrder),
    /// `["asc"]`
    OrderOnly([SortOrder; 1]),
    /// `["asc", { caseSensitive: false }]`
    OrderWithParams(SortOrder, PolicyParams),
}

impl PolicySpec {
    /// Resolve into a full policy, missing parts filled with defaults
    pub fn policy(&self) -> SortPolicy {
        match *self {
            PolicySpec::Order(order) | PolicySpec::OrderOnly([order]) => {
                SortPolicy::from_parts(Some(order), None)
            }
            PolicySpec::OrderWithParams(order, params) => {
                SortPolicy::from_parts(Some(order), Some(params))
            }
        }
    }
}

/// Runner configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Enabled rules mapped to their options; a null value enables the
    /// rule with default options
    #[serde(default)]
    pub rules: BTreeMap<String, Option<PolicySpec>>,
    /// Globs for files to check; empty means every `.ts` file
    #[serde(default)]
    pub include: Vec<String>,
    /// Globs and path prefixes to skip during discovery
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let mut rules = BTreeMap::new();
        for name in RuleRegistry::new().all_names() {
            rules.insert(name.to_string(), None);
        }
        Self {
            rules,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        logging::log_config_load(path);

        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;

        logging::log_config_summary(
            config.rules.len(),
            config.include.len(),
            config.exclude.len(),
        );

        Ok(config)
    }

    /// Parse and validate a YAML config document
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let known = RuleRegistry::new().all_names();
        for name in self.rules.keys() {
            if !known.contains(&name.as_str()) {
                return Err(ConfigError::UnknownRule(name.clone()));
            }
        }
        for pattern in self.include.iter().chain(&self.exclude) {
            glob::Pattern::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Find sortkeys.yaml or sortkeys.yml in the given directory
    pub fn find_config(dir: &Path) -> Option<PathBuf> {
        let candidates = ["sortkeys.yaml", "sortkeys.yml"];
        for name in &candidates {
            let path = dir.join(name);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Resolve the enabled rules into their effective policies
    pub fn policies(&self) -> HashMap<String, SortPolicy> {
        self.rules
            .iter()
            .map(|(name, spec)| {
                let policy = spec.as_ref().map(PolicySpec::policy).unwrap_or_default();
                (name.clone(), policy)
            })
            .collect()
    }

    /// Check if a path matches the include globs
    pub fn is_included(&self, path: &Path) -> bool {
        if self.include.is_empty() {
            return true;
        }
        self.include.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches_path(path))
                .unwrap_or(false)
        })
    }

    /// Check if a path should be excluded
    pub fn is_excluded(&self, path: &Path) -> bool {
        for exclude in &self.exclude {
            if path.starts_with(exclude) {
                logging::log(&format!(
                    "EXCLUDED: {} (matched prefix: {})",
                    path.display(),
                    exclude
                ));
                return true;
            }
            // Check glob patterns
            if exclude.contains('*') {
                if let Ok(pattern) = glob::Pattern::new(exclude) {
                    if pattern.matches_path(path) {
                        logging::log(&format!(
                            "EXCLUDED: {} (matched glob: {})",
                            path.display(),
                            exclude
                        ));
                        return true;
                    }
                }
            }
        }
        false
    }
}
