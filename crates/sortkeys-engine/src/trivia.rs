//! Comment scanning and comment-to-member attachment

use crate::member::Body;
use sortkeys_core::{LineIndex, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// ...` up to (not including) the line break
    Line,
    /// `/* ... */` including the closing delimiter
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment {
    pub span: Span,
    pub style: CommentStyle,
}

/// Scan the comments inside `within`, skipping string literals.
pub fn scan_comments(source: &str, within: Span) -> Vec<Comment> {
    let bytes = source.as_bytes();
    let mut comments = Vec::new();
    let mut i = within.start;

    while i < within.end {
        match bytes[i] {
            b'/' if i + 1 < within.end && bytes[i + 1] == b'/' => {
                let start = i;
                while i < within.end && bytes[i] != b'\n' && bytes[i] != b'\r' {
                    i += 1;
                }
                comments.push(Comment {
                    span: Span::new(start, i),
                    style: CommentStyle::Line,
                });
            }
            b'/' if i + 1 < within.end && bytes[i + 1] == b'*' => {
                let start = i;
                i += 2;
                while i < within.end {
                    if bytes[i] == b'*' && i + 1 < within.end && bytes[i + 1] == b'/' {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
                comments.push(Comment {
                    span: Span::new(start, i.min(within.end)),
                    style: CommentStyle::Block,
                });
            }
            quote @ (b'"' | b'\'' | b'`') => {
                i += 1;
                while i < within.end {
                    match bytes[i] {
                        b'\\' => i += 2,
                        b if b == quote => {
                            i += 1;
                            break;
                        }
                        _ => i += 1,
                    }
                }
            }
            _ => i += 1,
        }
    }
    comments
}

/// Comments owned by each member, indexed by original member position.
/// Comments claimed by nobody stay in the gap or tail slices and are
/// carried through positionally.
#[derive(Debug, Clone)]
pub struct Attachments {
    pub before: Vec<Vec<Comment>>,
    pub after: Vec<Vec<Comment>>,
}

impl Attachments {
    pub fn empty(member_count: usize) -> Self {
        Self {
            before: vec![Vec::new(); member_count],
            after: vec![Vec::new(); member_count],
        }
    }
}

/// Where member `k`'s leading-comment region begins: after the previous
/// member's separator (or text when it has none), or at the body start.
fn region_start(body: &Body, k: usize) -> usize {
    if k == 0 {
        body.span.start
    } else {
        let prev = &body.members[k - 1];
        match prev.separator {
            Some(sep) => sep.span.end,
            None => prev.span.end,
        }
    }
}

/// Line of the previous sibling's text end; the opening brace line for
/// the first member.
fn prev_end_line(body: &Body, k: usize, lines: &LineIndex) -> usize {
    if k == 0 {
        lines.line_of(body.span.start)
    } else {
        lines.line_of(body.members[k - 1].span.end - 1)
    }
}

fn is_before(body: &Body, k: usize, c: &Comment, lines: &LineIndex) -> bool {
    let m = &body.members[k];
    if c.span.start < region_start(body, k) || c.span.end > m.span.start {
        return false;
    }
    let start_line = lines.line_of(c.span.start);
    let end_line = lines.line_of(c.span.end - 1);
    let member_line = lines.line_of(m.span.start);

    start_line == member_line
        || (start_line > prev_end_line(body, k, lines) && end_line <= member_line)
}

fn is_after(body: &Body, k: usize, c: &Comment, lines: &LineIndex) -> bool {
    let m = &body.members[k];
    if c.span.start < m.span.end {
        return false;
    }
    if lines.line_of(c.span.start) != lines.line_of(m.span.end - 1) {
        return false;
    }
    // The last member only owns comments between its text and separator;
    // anything past the final separator belongs to the tail.
    let limit = if k + 1 < body.members.len() {
        body.members[k + 1].span.start
    } else {
        match m.separator {
            Some(sep) => sep.span.start,
            None => return false,
        }
    };
    c.span.end <= limit
}

/// Attach comments to members. A comment eligible as both the trailing
/// comment of one member and the leading comment of the next goes to the
/// next (leading wins).
pub fn attach(body: &Body, comments: &[Comment], lines: &LineIndex) -> Attachments {
    let n = body.members.len();
    let mut attachments = Attachments::empty(n);

    for c in comments {
        // Comments inside a member's own text travel with it verbatim
        if body.members.iter().any(|m| m.span.overlaps(c.span)) {
            continue;
        }

        let next = body
            .members
            .partition_point(|m| m.span.start < c.span.end);

        if next < n && is_before(body, next, c, lines) {
            attachments.before[next].push(*c);
        } else if next > 0 && is_after(body, next - 1, c, lines) {
            attachments.after[next - 1].push(*c);
        }
    }
    attachments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::{BodyKind, Member, MemberKind, Separator, SeparatorKind};

    // Builds a body from simple sources where members look like "x: T"
    // and the separator search skips whitespace and block comments, the
    // same way real discovery records the punctuator token.
    fn body_from(source: &str) -> Body {
        let open = source.find('{').unwrap();
        let close = source.rfind('}').unwrap();
        let mut members = Vec::new();

        for (i, _) in source.match_indices(": T") {
            if i <= open || i >= close {
                continue;
            }
            let name_start = i - 1;
            let name_char = source.as_bytes()[name_start] as char;
            if !(name_char.is_ascii_alphanumeric() || name_char == '_' || name_char == '$') {
                continue;
            }
            let text_end = i + 3;
            members.push(Member {
                kind: MemberKind::Property,
                name: Some(source[name_start..i].to_string()),
                optional: false,
                span: Span::new(name_start, text_end),
                separator: find_separator(source, text_end, close),
            });
        }

        Body {
            kind: BodyKind::InterfaceLike,
            span: Span::new(open + 1, close),
            members,
            parent_span: Span::new(open, open + 1),
        }
    }

    fn find_separator(source: &str, from: usize, limit: usize) -> Option<Separator> {
        let bytes = source.as_bytes();
        let mut i = from;
        while i < limit {
            match bytes[i] {
                b' ' | b'\t' => i += 1,
                b'/' if i + 1 < limit && bytes[i + 1] == b'*' => {
                    i += 2;
                    while i + 1 < limit && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                        i += 1;
                    }
                    i += 2;
                }
                b';' => {
                    return Some(Separator {
                        kind: SeparatorKind::Semicolon,
                        span: Span::new(i, i + 1),
                    })
                }
                b',' => {
                    return Some(Separator {
                        kind: SeparatorKind::Comma,
                        span: Span::new(i, i + 1),
                    })
                }
                _ => return None,
            }
        }
        None
    }

    fn attachments_for(source: &str) -> (Body, Attachments, Vec<Comment>) {
        let body = body_from(source);
        let lines = LineIndex::new(source);
        let comments = scan_comments(source, body.span);
        let attachments = attach(&body, &comments, &lines);
        (body, attachments, comments)
    }

    fn texts<'a>(source: &'a str, comments: &[Comment]) -> Vec<&'a str> {
        comments.iter().map(|c| c.span.slice(source)).collect()
    }

    // ==================== Scanning ====================

    #[test]
    fn test_scan_line_and_block() {
        let source = "{ // one\n/* two */ }";
        let comments = scan_comments(source, Span::new(1, source.len() - 1));
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].style, CommentStyle::Line);
        assert_eq!(comments[0].span.slice(source), "// one");
        assert_eq!(comments[1].style, CommentStyle::Block);
        assert_eq!(comments[1].span.slice(source), "/* two */");
    }

    #[test]
    fn test_scan_skips_string_contents() {
        let source = r#"{ a = "// not a comment", b = '/* nope */' }"#;
        let comments = scan_comments(source, Span::new(1, source.len() - 1));
        assert!(comments.is_empty());
    }

    #[test]
    fn test_scan_line_comment_excludes_newline() {
        let source = "// x\ny";
        let comments = scan_comments(source, Span::new(0, source.len()));
        assert_eq!(comments[0].span.slice(source), "// x");
    }

    // ==================== Leading attachment ====================

    #[test]
    fn test_own_line_comment_leads_next_member() {
        let source = "interface U {\n  // doc\n  b: T;\n  a: T;\n}";
        let (_, attachments, _) = attachments_for(source);
        assert_eq!(attachments.before[0].len(), 1);
        assert!(attachments.before[1].is_empty());
        assert!(attachments.after[0].is_empty());
    }

    #[test]
    fn test_same_line_comment_leads_member() {
        let source = "interface U { a: T; /* x */ b: T; }";
        let (_, attachments, _) = attachments_for(source);
        assert!(attachments.before[0].is_empty());
        assert_eq!(attachments.before[1].len(), 1);
        assert!(attachments.after[0].is_empty());
    }

    #[test]
    fn test_blank_line_does_not_break_leading() {
        let source = "interface U {\n  a: T;\n  // doc\n\n  b: T;\n}";
        let (_, attachments, _) = attachments_for(source);
        assert_eq!(texts(source, &attachments.before[1]), vec!["// doc"]);
    }

    #[test]
    fn test_open_brace_line_comment_is_unattached() {
        let source = "interface U { // header\n  a: T;\n  b: T;\n}";
        let (_, attachments, comments) = attachments_for(source);
        assert_eq!(comments.len(), 1);
        assert!(attachments.before[0].is_empty());
        assert!(attachments.after.iter().all(|a| a.is_empty()));
    }

    #[test]
    fn test_multi_line_block_leads_member() {
        let source = "interface U {\n  /* one\n     two */\n  a: T;\n  b: T;\n}";
        let (_, attachments, _) = attachments_for(source);
        assert_eq!(attachments.before[0].len(), 1);
    }

    // ==================== Trailing attachment ====================

    #[test]
    fn test_end_of_line_comment_trails_member() {
        let source = "interface U {\n  b: T; // about b\n  a: T;\n}";
        let (_, attachments, _) = attachments_for(source);
        assert_eq!(attachments.after[0].len(), 1);
        assert!(attachments.before[1].is_empty());
    }

    #[test]
    fn test_comment_between_text_and_separator_trails() {
        let source = "interface U { b: T /* x */; a: T; }";
        let (body, attachments, _) = attachments_for(source);
        assert_eq!(body.members[0].separator.unwrap().span.start, 26);
        assert_eq!(attachments.after[0].len(), 1);
        assert!(attachments.before[1].is_empty());
    }

    #[test]
    fn test_block_spanning_lines_trails_previous() {
        let source = "interface U {\n  b: T; /* long\n  note */\n  a: T;\n}";
        let (_, attachments, _) = attachments_for(source);
        assert_eq!(attachments.after[0].len(), 1);
        assert!(attachments.before[1].is_empty());
    }

    #[test]
    fn test_trailing_comment_of_last_member_before_separator() {
        let source = "interface U {\n  b: T;\n  a: T /* x */;\n}";
        let (_, attachments, _) = attachments_for(source);
        assert_eq!(attachments.after[1].len(), 1);
    }

    // ==================== Tail ====================

    #[test]
    fn test_comment_after_last_separator_is_unattached() {
        let source = "interface U {\n  b: T;\n  a: T; // tail note\n}";
        let (_, attachments, comments) = attachments_for(source);
        assert_eq!(comments.len(), 1);
        assert!(attachments.after[1].is_empty());
    }

    #[test]
    fn test_comment_inside_member_span_is_ignored() {
        let source = "interface U { a /* mid */ : T; b: T; }";
        let body = Body {
            kind: BodyKind::InterfaceLike,
            span: Span::new(13, 37),
            members: vec![
                Member {
                    kind: MemberKind::Property,
                    name: Some("a".into()),
                    optional: false,
                    span: Span::new(14, 29),
                    separator: Some(Separator {
                        kind: SeparatorKind::Semicolon,
                        span: Span::new(29, 30),
                    }),
                },
                Member {
                    kind: MemberKind::Property,
                    name: Some("b".into()),
                    optional: false,
                    span: Span::new(31, 35),
                    separator: Some(Separator {
                        kind: SeparatorKind::Semicolon,
                        span: Span::new(35, 36),
                    }),
                },
            ],
            parent_span: Span::new(12, 13),
        };
        let lines = LineIndex::new(source);
        let comments = scan_comments(source, body.span);
        assert_eq!(comments.len(), 1);
        let attachments = attach(&body, &comments, &lines);
        assert!(attachments.before.iter().all(|b| b.is_empty()));
        assert!(attachments.after.iter().all(|a| a.is_empty()));
    }
}
