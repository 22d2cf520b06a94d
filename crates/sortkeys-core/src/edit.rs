//! Span-based source code editing

use crate::span::Span;
use thiserror::Error;

/// Errors that can occur during edit application
#[derive(Error, Debug)]
pub enum EditError {
    #[error("Overlapping edits detected at offset {0}")]
    OverlappingEdits(usize),

    #[error("Edit span {start}..{end} out of bounds for source length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Edit span {start}..{end} does not fall on character boundaries")]
    SpanNotCharBoundary { start: usize, end: usize },
}

/// Represents a single code edit operation
#[derive(Debug, Clone)]
pub struct Edit {
    /// The source span to replace
    pub span: Span,
    /// The replacement text
    pub replacement: String,
    /// Human-readable description of the edit
    pub message: String,
}

impl Edit {
    /// Create a new edit
    pub fn new(span: Span, replacement: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
            message: message.into(),
        }
    }

    /// Get the byte offset where this edit starts
    pub fn start_offset(&self) -> usize {
        self.span.start
    }

    /// Get the byte offset where this edit ends
    pub fn end_offset(&self) -> usize {
        self.span.end
    }
}

/// Apply edits to source code.
///
/// Edits are applied in reverse order (from end to start) to maintain
/// valid offsets throughout the process. Replacement text is inserted
/// byte-for-byte; the caller is responsible for any whitespace inside it.
///
/// # Arguments
/// * `source` - The original source code
/// * `edits` - Slice of edits to apply
///
/// # Returns
/// * `Ok(String)` - The modified source code
/// * `Err(EditError)` - If edits overlap or are out of bounds
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String, EditError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    // Sort edits by start position (descending) for safe replacement
    let mut sorted_edits: Vec<&Edit> = edits.iter().collect();
    sorted_edits.sort_by(|a, b| b.start_offset().cmp(&a.start_offset()));

    // Validate: check for overlapping edits and bounds
    let source_len = source.len();
    let mut prev_start: Option<usize> = None;

    for edit in &sorted_edits {
        let start = edit.start_offset();
        let end = edit.end_offset();

        // Check bounds
        if end > source_len {
            return Err(EditError::SpanOutOfBounds {
                start,
                end,
                len: source_len,
            });
        }

        if !source.is_char_boundary(start) || !source.is_char_boundary(end) {
            return Err(EditError::SpanNotCharBoundary { start, end });
        }

        // Check for overlap with previous edit
        if let Some(prev) = prev_start {
            if end > prev {
                return Err(EditError::OverlappingEdits(start));
            }
        }

        prev_start = Some(start);
    }

    // Apply edits from end to start
    let mut result = source.to_string();

    for edit in sorted_edits {
        let start = edit.start_offset();
        let end = edit.end_offset();
        result.replace_range(start..end, &edit.replacement);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_span(start: usize, end: usize) -> Span {
        Span::new(start, end)
    }

    #[test]
    fn test_simple_replacement() {
        let source = "enum Color { Red = 'r' }";
        let edit = Edit::new(make_span(13, 22), "Blue = 'b'", "Replace member");

        let result = apply_edits(source, &[edit]).unwrap();
        assert_eq!(result, "enum Color { Blue = 'b' }");
    }

    #[test]
    fn test_multiple_edits() {
        let source = "aaa bbb ccc";
        let edits = vec![
            Edit::new(make_span(0, 3), "xxx", "first"),
            Edit::new(make_span(8, 11), "yyy", "second"),
        ];

        let result = apply_edits(source, &edits).unwrap();
        assert_eq!(result, "xxx bbb yyy");
    }

    #[test]
    fn test_empty_edits() {
        let source = "unchanged";
        let result = apply_edits(source, &[]).unwrap();
        assert_eq!(result, "unchanged");
    }

    #[test]
    fn test_replacement_is_byte_exact() {
        // Leading whitespace in the replacement must be preserved as-is
        let source = "{x}";
        let edit = Edit::new(make_span(1, 2), "\n  y\n", "body");

        let result = apply_edits(source, &[edit]).unwrap();
        assert_eq!(result, "{\n  y\n}");
    }

    #[test]
    fn test_out_of_bounds() {
        let source = "short";
        let edit = Edit::new(make_span(0, 100), "replacement", "oob");

        let result = apply_edits(source, &[edit]);
        assert!(matches!(result, Err(EditError::SpanOutOfBounds { .. })));
    }

    #[test]
    fn test_overlapping_edits() {
        let source = "abcdefgh";
        let edits = vec![
            Edit::new(make_span(0, 5), "x", "first"),
            Edit::new(make_span(3, 8), "y", "second"),
        ];

        let result = apply_edits(source, &edits);
        assert!(matches!(result, Err(EditError::OverlappingEdits(_))));
    }

    #[test]
    fn test_adjacent_edits_do_not_overlap() {
        let source = "abcdef";
        let edits = vec![
            Edit::new(make_span(0, 3), "x", "first"),
            Edit::new(make_span(3, 6), "y", "second"),
        ];

        let result = apply_edits(source, &edits).unwrap();
        assert_eq!(result, "xy");
    }

    #[test]
    fn test_non_char_boundary() {
        let source = "é b";
        let edit = Edit::new(make_span(1, 3), "x", "split");

        let result = apply_edits(source, &[edit]);
        assert!(matches!(result, Err(EditError::SpanNotCharBoundary { .. })));
    }
}
