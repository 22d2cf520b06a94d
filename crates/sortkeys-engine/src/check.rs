//! Pipeline entry point: validate a body, sort it, and report.

use sortkeys_core::LineIndex;
use thiserror::Error;

use crate::analyze::analyze;
use crate::cache::{fingerprint, SharedPermutationCache};
use crate::member::Body;
use crate::order::sorted_permutation;
use crate::policy::SortPolicy;
use crate::report::{build_violation, BodyViolation};
use crate::synthesize::synthesize;
use crate::trivia::{attach, scan_comments};

/// Errors for bodies whose spans do not line up with the source text
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Body span {start}..{end} out of bounds for source length {len}")]
    BodyOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Body span {start}..{end} does not fall on character boundaries")]
    BodyNotCharBoundary { start: usize, end: usize },

    #[error("Member {index} lies outside the body span")]
    MemberOutsideBody { index: usize },

    #[error("Member {index} does not fall on character boundaries")]
    MemberNotCharBoundary { index: usize },

    #[error("Member {index} overlaps the preceding member")]
    MembersOutOfOrder { index: usize },
}

/// Check one declaration body against a policy.
///
/// Returns `Ok(None)` when the body has fewer than two members or is
/// already in order. Otherwise the violation carries per-member
/// diagnostics and one whole-body edit that repairs everything at once.
///
/// With a cache, the sort permutation is memoized by member texts and
/// policy, so repeated generated bodies skip the collation work.
pub fn check_body(
    source: &str,
    body: &Body,
    policy: &SortPolicy,
    cache: Option<&SharedPermutationCache>,
) -> Result<Option<BodyViolation>, EngineError> {
    let n = body.members.len();
    if n < 2 {
        return Ok(None);
    }
    validate_body(source, body)?;

    let permutation = match cache {
        Some(shared) => {
            let key = fingerprint(source, body, policy);
            match shared.lookup(key).filter(|p| p.len() == n) {
                Some(found) => found,
                None => {
                    let computed = sorted_permutation(&body.members, policy);
                    shared.store(key, &computed);
                    computed
                }
            }
        }
        None => sorted_permutation(&body.members, policy),
    };

    let analysis = analyze(&permutation);
    if analysis.displaced_count == 0 {
        return Ok(None);
    }

    let lines = LineIndex::new(source);
    let comments = scan_comments(source, body.span);
    let attachments = attach(body, &comments, &lines);
    let replacement = synthesize(source, body, &permutation, &attachments);

    Ok(Some(build_violation(
        source,
        body,
        policy,
        &permutation,
        &analysis,
        replacement,
    )))
}

/// Reject bodies whose spans would make source slicing unsound.
fn validate_body(source: &str, body: &Body) -> Result<(), EngineError> {
    let len = source.len();
    let span = body.span;
    if span.end > len || span.start > span.end {
        return Err(EngineError::BodyOutOfBounds {
            start: span.start,
            end: span.end,
            len,
        });
    }
    if !source.is_char_boundary(span.start) || !source.is_char_boundary(span.end) {
        return Err(EngineError::BodyNotCharBoundary {
            start: span.start,
            end: span.end,
        });
    }

    let mut prev_end = span.start;
    for (index, member) in body.members.iter().enumerate() {
        if member.span.start < prev_end {
            return Err(EngineError::MembersOutOfOrder { index });
        }
        if member.span.end > span.end {
            return Err(EngineError::MemberOutsideBody { index });
        }
        if !source.is_char_boundary(member.span.start)
            || !source.is_char_boundary(member.span.end)
        {
            return Err(EngineError::MemberNotCharBoundary { index });
        }
        prev_end = member.span.end;

        if let Some(sep) = member.separator {
            if sep.span.start < prev_end {
                return Err(EngineError::MembersOutOfOrder { index });
            }
            if sep.span.end > span.end {
                return Err(EngineError::MemberOutsideBody { index });
            }
            prev_end = sep.span.end;
        }
    }
    Ok(())
}
