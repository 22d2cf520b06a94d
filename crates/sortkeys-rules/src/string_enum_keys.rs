//! Rule: require string enum members to be sorted.
//!
//! Applies only to enums whose every member is initialized with a string
//! literal. Numeric, computed, bare and mixed enums are left alone since
//! reordering them can change runtime values.

use sortkeys_core::LineIndex;
use sortkeys_engine::{check_body, SharedPermutationCache, SortPolicy};

use crate::diagnostic::{push_violation, Diagnostic};
use crate::discover::{discover, DeclSource};
use crate::registry::{Rule, RuleError};

pub struct StringEnumKeysRule;

impl Rule for StringEnumKeysRule {
    fn name(&self) -> &'static str {
        "string-enum-keys"
    }

    fn description(&self) -> &'static str {
        "require string enum members to be sorted"
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
            if found.source_kind != DeclSource::StringEnum {
                continue;
            }
            if let Some(violation) = check_body(source, &found.body, policy, cache)? {
                push_violation(self.name(), &lines, &violation, &mut diagnostics);
            }
        }
        Ok(diagnostics)
    }
}
