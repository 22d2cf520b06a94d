//! sortkeys-engine: Host-agnostic member ordering pipeline
//!
//! A host parses source text and lowers each declaration body into a
//! [`Body`]; everything after that lives here:
//! - `SortPolicy`: direction plus case, natural, and required-first options
//! - `sorted_permutation()`: stable collation of members under a policy
//! - `analyze()`: displacement records and successor suppression
//! - `scan_comments()` / `attach()`: comment ownership around members
//! - `synthesize()`: byte-exact sorted rewrite of the body span
//! - `check_body()`: the whole pipeline, one body in, one violation out

pub mod analyze;
pub mod cache;
pub mod check;
pub mod collate;
pub mod member;
pub mod order;
pub mod policy;
pub mod report;
pub mod synthesize;
pub mod trivia;

#[cfg(test)]
mod testutil;

pub use analyze::{analyze, Analysis, DisplacementRecord};
pub use cache::{
    fingerprint, PermutationCache, SharedPermutationCache, DEFAULT_CACHE_CAPACITY,
};
pub use check::{check_body, EngineError};
pub use collate::compare_names;
pub use member::{Body, BodyKind, Member, MemberKind, Separator, SeparatorKind};
pub use order::sorted_permutation;
pub use policy::{PolicyParams, SortOrder, SortPolicy};
pub use report::{BodyViolation, MemberDiagnostic};
pub use synthesize::synthesize;
pub use trivia::{attach, scan_comments, Attachments, Comment, CommentStyle};
