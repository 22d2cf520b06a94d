//! Test-only body builders for literal sources.
//!
//! These scan a fixed member shape (`name: T` for interfaces, `NAME = '<v>'`
//! for enums) so engine tests can build a `Body` without a real parser.

use crate::member::{Body, BodyKind, Member, MemberKind, Separator, SeparatorKind};
use sortkeys_core::Span;

fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
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

/// Build an interface-like body from a source whose members all look
/// like `name: T` or `name?: T`.
pub(crate) fn interface_body(source: &str) -> Body {
    let open = source.find('{').unwrap();
    let close = source.rfind('}').unwrap();
    let bytes = source.as_bytes();
    let mut members = Vec::new();

    for (i, _) in source.match_indices(": T") {
        if i <= open || i >= close {
            continue;
        }
        let mut name_end = i;
        let mut optional = false;
        if bytes[name_end - 1] == b'?' {
            optional = true;
            name_end -= 1;
        }
        let mut name_start = name_end;
        while name_start > open + 1 && is_name_char(bytes[name_start - 1]) {
            name_start -= 1;
        }
        if name_start == name_end {
            continue;
        }
        let text_end = i + 3;
        members.push(Member {
            kind: MemberKind::Property,
            name: Some(source[name_start..name_end].to_string()),
            optional,
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

/// Build an enum body from a source whose members all look like
/// `NAME = '<value>'`.
pub(crate) fn enum_body(source: &str) -> Body {
    let open = source.find('{').unwrap();
    let close = source.rfind('}').unwrap();
    let bytes = source.as_bytes();
    let mut members = Vec::new();

    for (i, _) in source.match_indices(" = '") {
        if i <= open || i >= close {
            continue;
        }
        let name_end = i;
        let mut name_start = name_end;
        while name_start > open + 1 && is_name_char(bytes[name_start - 1]) {
            name_start -= 1;
        }
        if name_start == name_end {
            continue;
        }
        let value_start = i + 4;
        let value_len = source[value_start..close].find('\'').unwrap();
        let text_end = value_start + value_len + 1;
        members.push(Member {
            kind: MemberKind::EnumEntry,
            name: Some(source[name_start..name_end].to_string()),
            optional: false,
            span: Span::new(name_start, text_end),
            separator: find_separator(source, text_end, close),
        });
    }

    Body {
        kind: BodyKind::Enum,
        span: Span::new(open + 1, close),
        members,
        parent_span: Span::new(open, open + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_body_members() {
        let source = "interface U { b: T; a?: T; }";
        let body = interface_body(source);
        assert_eq!(body.members.len(), 2);
        assert_eq!(body.members[0].name.as_deref(), Some("b"));
        assert!(!body.members[0].optional);
        assert_eq!(body.members[0].span.slice(source), "b: T");
        assert_eq!(body.members[1].name.as_deref(), Some("a"));
        assert!(body.members[1].optional);
        assert_eq!(body.members[1].span.slice(source), "a?: T");
        assert!(body.members[1].separator.is_some());
    }

    #[test]
    fn test_enum_body_members() {
        let source = "enum E { B = 'b', A = 'a' }";
        let body = enum_body(source);
        assert_eq!(body.members.len(), 2);
        assert_eq!(body.members[0].span.slice(source), "B = 'b'");
        assert_eq!(
            body.members[0].separator.unwrap().kind,
            SeparatorKind::Comma
        );
        assert_eq!(body.members[1].span.slice(source), "A = 'a'");
        assert!(body.members[1].separator.is_none());
    }
}
