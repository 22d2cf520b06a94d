//! sortkeys-rules: sorted-member lint rules for TypeScript declarations
//!
//! This crate hosts the TypeScript side of the linter:
//!
//! - Declaration discovery over tree-sitter (interfaces, type literals,
//!   string enums)
//! - The `interface-keys` and `string-enum-keys` rules
//! - YAML configuration with per-rule sort policies
//! - A parallel multi-file runner with JSON report output
//!
//! # Example
//!
//! ```no_run
//! use sortkeys_rules::{Config, Runner};
//! use std::path::Path;
//!
//! // Load configuration
//! let config = Config::load(Path::new("sortkeys.yaml")).unwrap();
//!
//! // Create the runner
//! let runner = Runner::new(config);
//!
//! // Check a tree and print the report
//! let report = runner.check_paths(&[Path::new("src/")]);
//! println!("{}", report.to_json_string());
//! ```

pub mod config;
pub mod diagnostic;
pub mod discover;
pub mod interface_keys;
pub mod logging;
pub mod registry;
pub mod runner;
pub mod string_enum_keys;

pub use config::{Config, ConfigError, PolicySpec};
pub use diagnostic::{collect_fix_edits, Diagnostic};
pub use discover::{discover, DeclSource, DiscoverError, DiscoveredBody};
pub use interface_keys::InterfaceKeysRule;
pub use registry::{Rule, RuleError, RuleRegistry, MAX_FIX_PASSES};
pub use runner::{FileReport, RunReport, Runner, RunnerError};
pub use string_enum_keys::StringEnumKeysRule;

pub use sortkeys_core::{Edit, EditError, Span};
pub use sortkeys_engine::{SortOrder, SortPolicy};

/// Check one source string under a configuration's policies.
pub fn check_source(
    source: &str,
    registry: &RuleRegistry,
    config: &Config,
) -> Result<Vec<Diagnostic>, RuleError> {
    registry.check_all(source, &config.policies(), None)
}

/// Apply every fix carried by a diagnostic batch to the source.
///
/// Single application pass: fixes for bodies nested inside an already
/// rewritten body are dropped here and reappear when the result is
/// re-checked.
pub fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> Result<String, EditError> {
    sortkeys_core::apply_edits(source, &collect_fix_edits(diagnostics))
}
