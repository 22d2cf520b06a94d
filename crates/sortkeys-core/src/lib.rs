//! sortkeys-core: Core abstractions for source rewriting
//!
//! This crate provides:
//! - `Span`: A byte range into a source string
//! - `Edit`: A span-based code modification
//! - `apply_edits()`: Function to apply edits preserving surrounding text
//! - `LineIndex`: Byte offset to line/column translation

mod edit;
mod lines;
mod span;

pub use edit::{apply_edits, Edit, EditError};
pub use lines::LineIndex;
pub use span::Span;
