//! Diagnostics produced by rules, plus fix-edit collection.

use serde_json::json;
use sortkeys_core::{Edit, LineIndex, Span};
use sortkeys_engine::BodyViolation;

/// One reported problem at a source location.
///
/// Every diagnostic belonging to the same body carries a clone of that
/// body's whole-span edit, so fixing any of them fixes all of them.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub rule: &'static str,
    pub message: String,
    pub span: Span,
    /// 1-based line of the span start
    pub line: usize,
    /// 1-based column of the span start
    pub column: usize,
    pub fix: Option<Edit>,
}

impl Diagnostic {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "rule": self.rule,
            "message": self.message,
            "span": { "start": self.span.start, "end": self.span.end },
            "line": self.line,
            "column": self.column,
            "fixable": self.fix.is_some(),
            "fix_span": self.fix.as_ref().map(|fix| json!({
                "start": fix.span.start,
                "end": fix.span.end,
            })),
        })
    }
}

/// Flatten a body violation into diagnostics: the aggregate first, then
/// one per displaced member, in source order.
pub fn push_violation(
    rule: &'static str,
    lines: &LineIndex,
    violation: &BodyViolation,
    out: &mut Vec<Diagnostic>,
) {
    let (line, column) = lines.line_col(violation.parent_span.start);
    out.push(Diagnostic {
        rule,
        message: violation.parent_message.clone(),
        span: violation.parent_span,
        line,
        column,
        fix: Some(violation.edit.clone()),
    });

    for member in &violation.members {
        let (line, column) = lines.line_col(member.span.start);
        out.push(Diagnostic {
            rule,
            message: member.message.clone(),
            span: member.span,
            line,
            column,
            fix: Some(violation.edit.clone()),
        });
    }
}

/// Gather the fix edits of a diagnostic batch for one application pass.
///
/// Diagnostics sharing a body carry identical edits; those collapse to
/// one. When bodies nest, the inner body's edit overlaps the outer one
/// and is dropped; re-checking the rewritten source picks it up again.
pub fn collect_fix_edits(diagnostics: &[Diagnostic]) -> Vec<Edit> {
    let mut edits: Vec<&Edit> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();
    edits.sort_by_key(|edit| (edit.span.start, edit.span.end));
    edits.dedup_by(|a, b| a.span == b.span);

    let mut kept: Vec<Edit> = Vec::new();
    for edit in edits {
        let clear = kept
            .last()
            .map_or(true, |prev| prev.span.end <= edit.span.start);
        if clear {
            kept.push(edit.clone());
        }
    }
    kept
}
