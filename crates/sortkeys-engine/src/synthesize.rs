//! Rewrite synthesis: emits the sorted body text through the slot model.
//!
//! Each original member position is a slot. Slots keep their leading gap
//! and their separator token; members (with their attached comments) move
//! between slots. Everything is copied byte-for-byte from the source, so
//! the rewrite conserves member text, comment text, and the tail.

use crate::member::Body;
use crate::trivia::{Attachments, CommentStyle};

/// Build the replacement text for the whole body span.
///
/// `permutation[slot]` is the original index of the member that lands in
/// `slot`. Member spans must be validated against the body before calling.
pub fn synthesize(
    source: &str,
    body: &Body,
    permutation: &[usize],
    attachments: &Attachments,
) -> String {
    let members = &body.members;
    let n = members.len();

    // Group bounds per original index: a member's group covers its leading
    // comments through its separator and trailing comments.
    let mut group_start = Vec::with_capacity(n);
    let mut group_end = Vec::with_capacity(n);
    for j in 0..n {
        let start = attachments.before[j]
            .first()
            .map_or(members[j].span.start, |c| c.span.start);
        let mut end = members[j].span.end;
        if let Some(sep) = members[j].separator {
            end = end.max(sep.span.end);
        }
        if let Some(last) = attachments.after[j].last() {
            end = end.max(last.span.end);
        }
        group_start.push(start);
        group_end.push(end);
    }

    let mut out = String::with_capacity(body.span.len() + n);

    for slot in 0..n {
        let gap_start = if slot == 0 {
            body.span.start
        } else {
            group_end[slot - 1]
        };
        out.push_str(&source[gap_start..group_start[slot]]);

        let j = permutation[slot];
        let m = &members[j];

        // Leading comments: the first one rides the slot gap, the rest
        // keep their original spacing, then the gap down to the text.
        let before = &attachments.before[j];
        for (idx, c) in before.iter().enumerate() {
            if idx > 0 {
                out.push_str(&source[before[idx - 1].span.end..c.span.start]);
            }
            out.push_str(c.span.slice(source));
        }
        if let Some(last) = before.last() {
            out.push_str(&source[last.span.end..m.span.start]);
        }

        out.push_str(m.span.slice(source));

        // Original spacing before each trailing comment, measured against
        // whatever preceded it in the source (text, separator, or the
        // previous trailing comment).
        let after = &attachments.after[j];
        let mut gaps = Vec::with_capacity(after.len());
        let mut prev_end = m.span.end;
        for c in after {
            if let Some(sep) = m.separator {
                if sep.span.end <= c.span.start && sep.span.end > prev_end {
                    prev_end = sep.span.end;
                }
            }
            gaps.push(&source[prev_end..c.span.start]);
            prev_end = c.span.end;
        }

        // Block-style trailing comments sit between the text and the
        // separator so the separator stays outermost.
        for (c, gap) in after.iter().zip(&gaps) {
            if c.style == CommentStyle::Block {
                out.push_str(gap);
                out.push_str(c.span.slice(source));
            }
        }

        // The separator is a slot property: whatever token the slot had
        // originally. A moved member never carries its own separator, and
        // a separator-less non-final slot gets the body's fallback token.
        match members[slot].separator {
            Some(sep) => out.push_str(sep.kind.as_str()),
            None if slot + 1 < n => out.push_str(body.kind.fallback_separator().as_str()),
            None => {}
        }

        let mut emitted_line_comment = false;
        for (c, gap) in after.iter().zip(&gaps) {
            if c.style == CommentStyle::Line {
                out.push_str(gap);
                out.push_str(c.span.slice(source));
                emitted_line_comment = true;
            }
        }

        // A line comment swallows everything to the next line break; if
        // the upcoming text does not start with one, add it.
        if emitted_line_comment {
            let next_text = if slot + 1 < n {
                &source[group_end[slot]..group_start[slot + 1]]
            } else {
                &source[group_end[n - 1]..body.span.end]
            };
            if !next_text.starts_with('\n') && !next_text.starts_with('\r') {
                out.push('\n');
            }
        }
    }

    out.push_str(&source[group_end[n - 1]..body.span.end]);
    out
}
