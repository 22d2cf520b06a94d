//! Member and body model produced by a host and consumed by the pipeline

use sortkeys_core::Span;

/// What kind of declaration a member is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Property,
    Method,
    IndexSignature,
    EnumEntry,
}

/// The token kind of a member separator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorKind {
    Comma,
    Semicolon,
}

impl SeparatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeparatorKind::Comma => ",",
            SeparatorKind::Semicolon => ";",
        }
    }
}

/// The `,` or `;` token following a member's text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator {
    pub kind: SeparatorKind,
    pub span: Span,
}

/// One member of a declaration body.
///
/// `span` covers the member's own text only; the separator token and any
/// surrounding trivia are outside it.
#[derive(Debug, Clone)]
pub struct Member {
    pub kind: MemberKind,
    /// Statically derivable display name; `None` for computed keys with
    /// non-literal expressions and other unnamed members
    pub name: Option<String>,
    /// The `?` optionality marker; always false for enum entries
    pub optional: bool,
    pub span: Span,
    pub separator: Option<Separator>,
}

impl Member {
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name shown in diagnostics: the derived name, or the raw member text
    pub fn name_for_message<'a>(&'a self, source: &'a str) -> &'a str {
        match &self.name {
            Some(name) => name,
            None => self.span.slice(source),
        }
    }

    pub fn is_required(&self) -> bool {
        !self.optional
    }
}

/// Which flavor of body this is; decides the separator fallback and the
/// diagnostic wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    InterfaceLike,
    Enum,
}

impl BodyKind {
    /// Separator inserted when a non-final slot has no original token
    pub fn fallback_separator(&self) -> SeparatorKind {
        match self {
            BodyKind::InterfaceLike => SeparatorKind::Semicolon,
            BodyKind::Enum => SeparatorKind::Comma,
        }
    }
}

/// A declaration body: the region between `{` and `}` plus its members.
#[derive(Debug, Clone)]
pub struct Body {
    pub kind: BodyKind,
    /// The replaceable span: just after `{` to just before `}`
    pub span: Span,
    /// Members in source order
    pub members: Vec<Member>,
    /// Where the aggregate diagnostic points (declaration name, or the
    /// opening brace for anonymous type literals)
    pub parent_span: Span,
}
