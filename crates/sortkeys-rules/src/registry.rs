//! Rule trait and registry for the sortkeys lint rules

use std::collections::HashMap;

use sortkeys_core::apply_edits;
use sortkeys_engine::{EngineError, SharedPermutationCache, SortPolicy};
use thiserror::Error;

use crate::diagnostic::{collect_fix_edits, Diagnostic};
use crate::discover::DiscoverError;
use crate::interface_keys::InterfaceKeysRule;
use crate::string_enum_keys::StringEnumKeysRule;

/// Upper bound on repair passes; each pass of nesting settles one level.
pub const MAX_FIX_PASSES: usize = 10;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error(transparent)]
    Discover(#[from] DiscoverError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed to apply fixes: {0}")]
    Fix(#[from] sortkeys_core::EditError),
}

/// A lint rule that checks TypeScript source under a sort policy
pub trait Rule: Send + Sync {
    /// The unique identifier for this rule (e.g., "interface-keys")
    fn name(&self) -> &'static str;

    /// A short description of what this rule checks
    fn description(&self) -> &'static str;

    /// Check one source file and return diagnostics with fixes attached
    fn check(
        &self,
        source: &str,
        policy: &SortPolicy,
        cache: Option<&SharedPermutationCache>,
    ) -> Result<Vec<Diagnostic>, RuleError>;
}

/// Registry of all available lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        let mut registry = Self { rules: Vec::new() };
        registry.register(Box::new(InterfaceKeysRule));
        registry.register(Box::new(StringEnumKeysRule));
        registry
    }

    /// Register a new rule
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Get all rule names
    pub fn all_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Get a rule by name
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|r| r.name() == name)
            .map(|r| r.as_ref())
    }

    /// Get all rules with their descriptions (for listings and logs)
    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules
            .iter()
            .map(|r| (r.name(), r.description()))
            .collect()
    }

    /// Run the configured rules over one source, each under its policy
    pub fn check_all(
        &self,
        source: &str,
        policies: &HashMap<String, SortPolicy>,
        cache: Option<&SharedPermutationCache>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let mut diagnostics = Vec::new();
        for rule in &self.rules {
            if let Some(policy) = policies.get(rule.name()) {
                diagnostics.extend(rule.check(source, policy, cache)?);
            }
        }
        Ok(diagnostics)
    }

    /// Check and repair a source until it is clean.
    ///
    /// Each pass applies the non-overlapping fixes and re-checks; when
    /// bodies nest, the inner fix surfaces on the pass after its outer
    /// body settles. Returns the repaired source and whatever
    /// diagnostics remain.
    pub fn fix_all(
        &self,
        source: &str,
        policies: &HashMap<String, SortPolicy>,
        cache: Option<&SharedPermutationCache>,
    ) -> Result<(String, Vec<Diagnostic>), RuleError> {
        let mut current = source.to_string();

        for _ in 0..MAX_FIX_PASSES {
            let diagnostics = self.check_all(&current, policies, cache)?;
            let edits = collect_fix_edits(&diagnostics);
            if edits.is_empty() {
                return Ok((current, diagnostics));
            }
            current = apply_edits(&current, &edits)?;
        }

        let diagnostics = self.check_all(&current, policies, cache)?;
        Ok((current, diagnostics))
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
