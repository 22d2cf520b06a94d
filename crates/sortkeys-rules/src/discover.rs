//! TypeScript host: parses source text and lowers every sortable
//! declaration body into the engine's `Body` model.
//!
//! Three syntaxes produce bodies: `interface` declarations, inline object
//! type literals, and `enum` declarations. Bodies whose direct children
//! contain parse errors are dropped; a rewrite is only safe when every
//! member and separator token is accounted for.

use sortkeys_core::Span;
use sortkeys_engine::{Body, BodyKind, Member, MemberKind, Separator, SeparatorKind};
use thiserror::Error;
use tree_sitter::{Node, Parser};

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("Failed to load TypeScript grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
}

/// Which declaration syntax produced a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclSource {
    Interface,
    TypeLiteral,
    /// Enum whose members all carry string literal initializers
    StringEnum,
    /// Enum with a missing or non-string initializer somewhere
    MixedEnum,
}

/// One lowered body plus the syntax it came from
#[derive(Debug, Clone)]
pub struct DiscoveredBody {
    pub source_kind: DeclSource,
    pub body: Body,
}

/// Parse `source` as TypeScript and lower all declaration bodies, outermost
/// first within any nesting chain.
pub fn discover(source: &str) -> Result<Vec<DiscoveredBody>, DiscoverError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())?;

    let Some(tree) = parser.parse(source, None) else {
        return Ok(Vec::new());
    };

    let mut bodies = Vec::new();
    walk(tree.root_node(), source, &mut bodies);
    Ok(bodies)
}

fn walk(node: Node, source: &str, out: &mut Vec<DiscoveredBody>) {
    match node.kind() {
        "interface_declaration" => {
            if let Some(found) = lower_interface(node, source) {
                out.push(found);
            }
        }
        "object_type" => {
            // Older grammars hang an object_type body directly off the
            // interface declaration; that body was lowered above.
            let interface_body = node
                .parent()
                .is_some_and(|parent| parent.kind() == "interface_declaration");
            if !interface_body {
                if let Some(found) =
                    lower_interface_like(node, DeclSource::TypeLiteral, brace_span(node), source)
                {
                    out.push(found);
                }
            }
        }
        "enum_declaration" => {
            if let Some(found) = lower_enum(node, source) {
                out.push(found);
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, source, out);
    }
}

fn lower_interface(node: Node, source: &str) -> Option<DiscoveredBody> {
    let body_node = node.child_by_field_name("body")?;
    let parent_span = node
        .child_by_field_name("name")
        .map(node_span)
        .unwrap_or_else(|| brace_span(body_node));
    lower_interface_like(body_node, DeclSource::Interface, parent_span, source)
}

fn lower_interface_like(
    body_node: Node,
    source_kind: DeclSource,
    parent_span: Span,
    source: &str,
) -> Option<DiscoveredBody> {
    let (open, close) = body_braces(body_node)?;
    let mut members = Vec::new();

    let mut cursor = body_node.walk();
    for child in body_node.children(&mut cursor) {
        if child.is_error() || child.is_missing() {
            return None;
        }
        match child.kind() {
            "{" | "}" | "comment" => {}
            "," | ";" => attach_separator(&mut members, child),
            "property_signature" => members.push(Member {
                kind: MemberKind::Property,
                name: member_name(child, source),
                optional: has_optional_marker(child),
                span: node_span(child),
                separator: None,
            }),
            "method_signature" => members.push(Member {
                kind: MemberKind::Method,
                name: member_name(child, source),
                optional: has_optional_marker(child),
                span: node_span(child),
                separator: None,
            }),
            "index_signature" => members.push(index_member(child, source)),
            "call_signature" | "construct_signature" => members.push(Member {
                kind: MemberKind::Method,
                name: None,
                optional: false,
                span: node_span(child),
                separator: None,
            }),
            _ => return None,
        }
    }

    Some(DiscoveredBody {
        source_kind,
        body: Body {
            kind: BodyKind::InterfaceLike,
            span: Span::new(open, close),
            members,
            parent_span,
        },
    })
}

fn lower_enum(node: Node, source: &str) -> Option<DiscoveredBody> {
    let body_node = node.child_by_field_name("body")?;
    let parent_span = node
        .child_by_field_name("name")
        .map(node_span)
        .unwrap_or_else(|| brace_span(body_node));
    let (open, close) = body_braces(body_node)?;

    let mut members = Vec::new();
    let mut all_string = true;

    let mut cursor = body_node.walk();
    for child in body_node.children(&mut cursor) {
        if child.is_error() || child.is_missing() {
            return None;
        }
        match child.kind() {
            "{" | "}" | "comment" => {}
            "," | ";" => attach_separator(&mut members, child),
            "enum_assignment" => {
                let string_init = child
                    .child_by_field_name("value")
                    .is_some_and(|value| value.kind() == "string");
                if !string_init {
                    all_string = false;
                }
                members.push(enum_member(child, member_name(child, source)));
            }
            // A bare name is a member without an initializer
            "property_identifier" | "string" | "number" | "computed_property_name" => {
                all_string = false;
                members.push(enum_member(child, name_key(child, source)));
            }
            _ => return None,
        }
    }

    let source_kind = if all_string && !members.is_empty() {
        DeclSource::StringEnum
    } else {
        DeclSource::MixedEnum
    };

    Some(DiscoveredBody {
        source_kind,
        body: Body {
            kind: BodyKind::Enum,
            span: Span::new(open, close),
            members,
            parent_span,
        },
    })
}

fn enum_member(node: Node, name: Option<String>) -> Member {
    Member {
        kind: MemberKind::EnumEntry,
        name,
        optional: false,
        span: node_span(node),
        separator: None,
    }
}

fn index_member(node: Node, source: &str) -> Member {
    // `[skey: string]: T` collates and reports as "[index: skey]"
    let name = node
        .child_by_field_name("name")
        .map(|param| format!("[index: {}]", node_text(param, source)));
    Member {
        kind: MemberKind::IndexSignature,
        name,
        optional: false,
        span: node_span(node),
        separator: None,
    }
}

/// Inner span of the braces, or `None` when either brace is absent.
fn body_braces(body_node: Node) -> Option<(usize, usize)> {
    let mut open = None;
    let mut close = None;
    let mut cursor = body_node.walk();
    for child in body_node.children(&mut cursor) {
        match child.kind() {
            "{" if open.is_none() => open = Some(child.end_byte()),
            "}" => close = Some(child.start_byte()),
            _ => {}
        }
    }
    match (open, close) {
        (Some(open), Some(close)) if open <= close => Some((open, close)),
        _ => None,
    }
}

/// A separator token belongs to the nearest preceding member. Doubled
/// tokens stay unattached and ride the slot gaps instead.
fn attach_separator(members: &mut [Member], token: Node) {
    let kind = match token.kind() {
        "," => SeparatorKind::Comma,
        _ => SeparatorKind::Semicolon,
    };
    if let Some(last) = members.last_mut() {
        if last.separator.is_none() {
            last.separator = Some(Separator {
                kind,
                span: node_span(token),
            });
        }
    }
}

fn member_name(node: Node, source: &str) -> Option<String> {
    let name_node = node.child_by_field_name("name")?;
    name_key(name_node, source)
}

/// Statically derivable key of a name node. Computed keys resolve only
/// for literal expressions; anything else is unnamed and sorts last.
fn name_key(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "property_identifier" | "identifier" | "type_identifier" => {
            Some(node_text(node, source).to_string())
        }
        "string" => Some(string_value(node, source)),
        "number" => Some(node_text(node, source).to_string()),
        "computed_property_name" => {
            let mut cursor = node.walk();
            let inner = node.children(&mut cursor).find(|child| child.is_named())?;
            match inner.kind() {
                "string" => Some(string_value(inner, source)),
                "number" => Some(node_text(inner, source).to_string()),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Literal value of a string node with escape sequences decoded.
fn string_value(node: Node, source: &str) -> String {
    let mut value = String::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "string_fragment" => value.push_str(node_text(child, source)),
            "escape_sequence" => value.push_str(&decode_escape(node_text(child, source))),
            _ => {}
        }
    }
    value
}

fn decode_escape(text: &str) -> String {
    let mut chars = text.chars();
    if chars.next() != Some('\\') {
        return text.to_string();
    }
    match chars.next() {
        Some('n') => "\n".to_string(),
        Some('t') => "\t".to_string(),
        Some('r') => "\r".to_string(),
        Some('0') => "\0".to_string(),
        Some('b') => "\u{8}".to_string(),
        Some('f') => "\u{c}".to_string(),
        Some('v') => "\u{b}".to_string(),
        Some('u') | Some('x') => {
            let rest: String = chars.collect();
            let hex = rest.trim_start_matches('{').trim_end_matches('}');
            u32::from_str_radix(hex, 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| text.to_string())
        }
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn has_optional_marker(node: Node) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == "?");
    found
}

fn node_span(node: Node) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

fn brace_span(body_node: Node) -> Span {
    Span::new(body_node.start_byte(), body_node.start_byte() + 1)
}

fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}
