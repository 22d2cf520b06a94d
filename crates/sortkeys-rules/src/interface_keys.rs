//! Rule: require interface keys to be sorted.
//!
//! Applies to `interface` declaration bodies and to inline object type
//! literals anywhere in a type position. Index signatures sort ahead of
//! named keys, unnamed members (call and construct signatures) after
//! them; the `requiredFirst` option partitions required keys ahead of
//! optional ones.

use sortkeys_core::LineIndex;
use sortkeys_engine::{check_body, SharedPermutationCache, SortPolicy};

use crate::diagnostic::{push_violation, Diagnostic};
use crate::discover::{discover, DeclSource};
use crate::registry::{Rule, RuleError};

pub struct InterfaceKeysRule;

impl Rule for InterfaceKeysRule {
    fn name(&self) -> &'static str {
        "interface-keys"
    }

    fn description(&self) -> &'static str {
        "require interface keys to be sorted"
    }

    fn check(
        &self,
        source: &str,
        policy: &SortPolicy,
        cache: Option<&SharedPermutationCache>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let lines = LineIndex::new(source);
        let mut diagnostics = Vec::new();

        for found in discover(source)? {
            if !matches!(
                found.source_kind,
                DeclSource::Interface | DeclSource::TypeLiteral
            ) {
                continue;
            }
            if let Some(violation) = check_body(source, &found.body, policy, cache)? {
                push_violation(self.name(), &lines, &violation, &mut diagnostics);
            }
        }
        Ok(diagnostics)
    }
}
