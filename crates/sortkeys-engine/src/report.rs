//! Violation assembly: per-member messages, the aggregate parent message,
//! and the single whole-body edit they all share.

use sortkeys_core::{Edit, Span};

use crate::analyze::Analysis;
use crate::member::{Body, BodyKind};
use crate::policy::SortPolicy;

/// Diagnostic for one displaced member.
#[derive(Debug, Clone)]
pub struct MemberDiagnostic {
    /// Position of the member in the source body
    pub initial_index: usize,
    /// Position the member belongs at
    pub final_index: usize,
    /// The member's own text span
    pub span: Span,
    pub message: String,
}

/// Everything reported for one unsorted body.
///
/// All member diagnostics and the parent diagnostic share `edit`; applying
/// it once repairs the entire body.
#[derive(Debug, Clone)]
pub struct BodyViolation {
    /// Anchor for the aggregate diagnostic
    pub parent_span: Span,
    pub parent_message: String,
    /// Number of members reported, after successor suppression
    pub unsorted_count: usize,
    pub members: Vec<MemberDiagnostic>,
    pub edit: Edit,
}

/// The noun phrase for this body flavor, as it appears mid-sentence.
fn subject(kind: BodyKind) -> &'static str {
    match kind {
        BodyKind::InterfaceLike => "interface keys",
        BodyKind::Enum => "string enum members",
    }
}

/// "required first insensitive natural asc" style option phrase. Enum
/// bodies never mention required-first; optionality does not exist there.
fn order_phrase(policy: &SortPolicy, kind: BodyKind) -> String {
    let mut phrase = String::new();
    if kind == BodyKind::InterfaceLike && policy.required_first {
        phrase.push_str("required first ");
    }
    if !policy.case_sensitive {
        phrase.push_str("insensitive ");
    }
    if policy.natural {
        phrase.push_str("natural ");
    }
    phrase.push_str(policy.order.as_str());
    phrase
}

fn parent_message(kind: BodyKind, unsorted_count: usize) -> String {
    match kind {
        BodyKind::InterfaceLike => format!("Found {unsorted_count} keys out of order."),
        BodyKind::Enum => format!("Found {unsorted_count} members out of order."),
    }
}

fn member_message(kind: BodyKind, policy: &SortPolicy, name: &str, place: &str) -> String {
    format!(
        "Expected {} to be in {}ending order. '{}' should be {}. Run autofix to sort entire body.",
        subject(kind),
        order_phrase(policy, kind),
        name,
        place
    )
}

/// Assemble the violation for a body whose permutation moved members.
///
/// The caller has already decided the body is unsorted; members are
/// reported per `analysis.reportable`, each naming the sorted successor
/// it should precede (or "at the end").
pub fn build_violation(
    source: &str,
    body: &Body,
    policy: &SortPolicy,
    permutation: &[usize],
    analysis: &Analysis,
    replacement: String,
) -> BodyViolation {
    let n = body.members.len();
    let mut members = Vec::with_capacity(analysis.reportable_count);

    for (initial, record) in analysis.records.iter().enumerate() {
        if !analysis.reportable[initial] {
            continue;
        }
        let member = &body.members[initial];
        let place = if record.final_index + 1 == n {
            "at the end".to_string()
        } else {
            let successor = &body.members[permutation[record.final_index + 1]];
            format!("before '{}'", successor.name_for_message(source))
        };
        members.push(MemberDiagnostic {
            initial_index: initial,
            final_index: record.final_index,
            span: member.span,
            message: member_message(
                body.kind,
                policy,
                member.name_for_message(source),
                &place,
            ),
        });
    }

    BodyViolation {
        parent_span: body.parent_span,
        parent_message: parent_message(body.kind, analysis.reportable_count),
        unsorted_count: analysis.reportable_count,
        members,
        edit: Edit::new(body.span, replacement, "Sort body members"),
    }
}
