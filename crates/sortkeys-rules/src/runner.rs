//! Parallel multi-file check and fix runs
//!
//! Walks directory trees, filters candidates through the config's include
//! and exclude patterns, and runs the registry over each file in parallel.
//! Per-file failures are isolated into the report instead of aborting the
//! run.

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::logging;
use crate::registry::{RuleError, RuleRegistry};
use rayon::prelude::*;
use serde::Serialize;
use sortkeys_engine::{SharedPermutationCache, SortPolicy};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors that can occur while checking a single file
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Diagnostics for a single checked file
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of a run over a set of paths
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files with at least one diagnostic, sorted by path
    pub files: Vec<FileReport>,
    /// Number of files that were checked
    pub checked_files: usize,
    /// Number of files rewritten by a fix run
    pub fixed_files: usize,
    /// Per-file failures, in path order
    pub errors: Vec<(PathBuf, String)>,
}

#[derive(Serialize)]
struct JsonOutput {
    totals: Totals,
    files: BTreeMap<String, FileDiagnostics>,
    errors: Vec<String>,
}

#[derive(Serialize)]
struct Totals {
    diagnostics: usize,
    files: usize,
}

#[derive(Serialize)]
struct FileDiagnostics {
    diagnostics: usize,
    messages: Vec<serde_json::Value>,
}

impl RunReport {
    pub fn diagnostic_count(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.files.is_empty() && self.errors.is_empty()
    }

    /// Render the report as pretty-printed JSON, grouped by file
    pub fn to_json_string(&self) -> String {
        let mut files: BTreeMap<String, FileDiagnostics> = BTreeMap::new();
        for file in &self.files {
            let messages: Vec<serde_json::Value> =
                file.diagnostics.iter().map(Diagnostic::to_json).collect();
            files.insert(
                file.path.display().to_string(),
                FileDiagnostics {
                    diagnostics: messages.len(),
                    messages,
                },
            );
        }

        let output = JsonOutput {
            totals: Totals {
                diagnostics: self.diagnostic_count(),
                files: files.len(),
            },
            files,
            errors: self
                .errors
                .iter()
                .map(|(path, error)| format!("{}: {}", path.display(), error))
                .collect(),
        };

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn sort(&mut self) {
        self.files.sort_by(|a, b| a.path.cmp(&b.path));
        for file in &mut self.files {
            file.diagnostics.sort_by_key(|d| (d.span.start, d.span.end));
        }
        self.errors.sort();
    }
}

/// Main runner that checks and fixes files under the configured rules
pub struct Runner {
    config: Config,
    registry: RuleRegistry,
    policies: HashMap<String, SortPolicy>,
    cache: SharedPermutationCache,
}

impl Runner {
    /// Create a new runner with the given configuration
    pub fn new(config: Config) -> Self {
        let policies = config.policies();
        Self {
            config,
            registry: RuleRegistry::new(),
            policies,
            cache: SharedPermutationCache::new(),
        }
    }

    /// Create a runner with default configuration
    pub fn with_defaults() -> Self {
        Self::new(Config::default())
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The permutation memo shared across this runner's files
    pub fn cache(&self) -> &SharedPermutationCache {
        &self.cache
    }

    /// Check a single file
    pub fn check_file(&self, path: &Path) -> Result<Vec<Diagnostic>, RunnerError> {
        let source = fs::read_to_string(path)?;
        let diagnostics = self
            .registry
            .check_all(&source, &self.policies, Some(&self.cache))?;
        Ok(diagnostics)
    }

    /// Fix a single file in place.
    ///
    /// Returns whether the file was rewritten and the diagnostics that
    /// remain after the fix passes.
    pub fn fix_file(&self, path: &Path) -> Result<(bool, Vec<Diagnostic>), RunnerError> {
        let source = fs::read_to_string(path)?;
        let (fixed, remaining) = self
            .registry
            .fix_all(&source, &self.policies, Some(&self.cache))?;

        let changed = fixed != source;
        if changed {
            fs::write(path, &fixed)?;
        }
        Ok((changed, remaining))
    }

    /// Check multiple paths (files or directories)
    pub fn check_paths(&self, paths: &[&Path]) -> RunReport {
        let files = self.collect_files(paths);
        logging::log_run_start(files.len());

        let results: Vec<_> = files
            .par_iter()
            .map(|file| (file.as_path(), self.check_file(file)))
            .collect();

        let mut report = RunReport {
            checked_files: files.len(),
            ..RunReport::default()
        };

        for (file, result) in results {
            match result {
                Ok(diagnostics) => {
                    logging::log_file_result(file, diagnostics.len());
                    if !diagnostics.is_empty() {
                        report.files.push(FileReport {
                            path: file.to_path_buf(),
                            diagnostics,
                        });
                    }
                }
                Err(e) => {
                    // Log error but continue
                    eprintln!("Warning: {}: {}", file.display(), e);
                    logging::log_file_error(file, &e.to_string());
                    report.errors.push((file.to_path_buf(), e.to_string()));
                }
            }
        }

        report.sort();
        logging::log_run_complete(report.diagnostic_count(), report.errors.len());
        report
    }

    /// Fix multiple paths in place
    pub fn fix_paths(&self, paths: &[&Path]) -> RunReport {
        let files = self.collect_files(paths);
        logging::log_run_start(files.len());

        let results: Vec<_> = files
            .par_iter()
            .map(|file| (file.as_path(), self.fix_file(file)))
            .collect();

        let mut report = RunReport {
            checked_files: files.len(),
            ..RunReport::default()
        };

        for (file, result) in results {
            match result {
                Ok((changed, remaining)) => {
                    logging::log_fix_result(file, changed, remaining.len());
                    if changed {
                        report.fixed_files += 1;
                    }
                    if !remaining.is_empty() {
                        report.files.push(FileReport {
                            path: file.to_path_buf(),
                            diagnostics: remaining,
                        });
                    }
                }
                Err(e) => {
                    eprintln!("Warning: {}: {}", file.display(), e);
                    logging::log_file_error(file, &e.to_string());
                    report.errors.push((file.to_path_buf(), e.to_string()));
                }
            }
        }

        report.sort();
        logging::log_run_complete(report.diagnostic_count(), report.errors.len());
        report
    }

    /// Collect the `.ts` files under the given paths.
    ///
    /// Directory walks honor the config's include and exclude patterns,
    /// matched against paths relative to the walked root; explicitly
    /// listed files bypass filtering.
    fn collect_files(&self, paths: &[&Path]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in paths {
            if path.is_file() {
                files.push(path.to_path_buf());
            } else if path.is_dir() {
                for entry in WalkDir::new(path)
                    .follow_links(true)
                    .into_iter()
                    .filter_map(|e| e.ok())
                {
                    let entry_path = entry.path();
                    if entry_path.is_file()
                        && entry_path.extension().map(|e| e == "ts").unwrap_or(false)
                    {
                        let relative = entry_path.strip_prefix(path).unwrap_or(entry_path);
                        if self.config.is_included(relative) && !self.config.is_excluded(relative)
                        {
                            files.push(entry_path.to_path_buf());
                        }
                    }
                }
            }
        }

        files.sort();
        files
    }
}
