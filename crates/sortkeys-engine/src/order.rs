//! Sequence ordering: computes the target permutation for a member list

use crate::collate::compare_names;
use crate::member::{Member, MemberKind};
use crate::policy::{SortOrder, SortPolicy};
use std::cmp::Ordering;

/// Index signatures sort before named members (pre-inversion)
fn kind_rank(kind: MemberKind) -> u8 {
    match kind {
        MemberKind::IndexSignature => 0,
        _ => 1,
    }
}

/// Members without a derivable name sort after named ones (pre-inversion)
fn unnamed_rank(member: &Member) -> u8 {
    if member.name.is_some() {
        0
    } else {
        1
    }
}

/// The full sort key comparison in ascending form. Descending policies
/// invert the whole key, not just the name component.
fn member_cmp(a: &Member, b: &Member, policy: &SortPolicy) -> Ordering {
    let ord = kind_rank(a.kind)
        .cmp(&kind_rank(b.kind))
        .then_with(|| unnamed_rank(a).cmp(&unnamed_rank(b)))
        .then_with(|| match (a.display_name(), b.display_name()) {
            (Some(x), Some(y)) => compare_names(x, y, policy),
            // Unnamed members compare equal; stability keeps their order
            _ => Ordering::Equal,
        });

    match policy.order {
        SortOrder::Ascending => ord,
        SortOrder::Descending => ord.reverse(),
    }
}

fn stable_sort_indices(members: &[Member], indices: &mut [usize], policy: &SortPolicy) {
    indices.sort_by(|&a, &b| member_cmp(&members[a], &members[b], policy));
}

/// Compute the target permutation: `result[slot] = original_index`.
///
/// With `required_first`, required members are partitioned ahead of
/// optional ones and each partition is sorted independently; the
/// boundary is absolute regardless of names.
pub fn sorted_permutation(members: &[Member], policy: &SortPolicy) -> Vec<usize> {
    if policy.required_first {
        let mut required: Vec<usize> = (0..members.len())
            .filter(|&i| members[i].is_required())
            .collect();
        let mut optional: Vec<usize> = (0..members.len())
            .filter(|&i| !members[i].is_required())
            .collect();

        stable_sort_indices(members, &mut required, policy);
        stable_sort_indices(members, &mut optional, policy);

        required.extend(optional);
        required
    } else {
        let mut indices: Vec<usize> = (0..members.len()).collect();
        stable_sort_indices(members, &mut indices, policy);
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortkeys_core::Span;

    fn named(name: &str) -> Member {
        Member {
            kind: MemberKind::Property,
            name: Some(name.to_string()),
            optional: false,
            span: Span::new(0, 0),
            separator: None,
        }
    }

    fn optional(name: &str) -> Member {
        Member {
            optional: true,
            ..named(name)
        }
    }

    fn index_sig(name: &str) -> Member {
        Member {
            kind: MemberKind::IndexSignature,
            ..named(name)
        }
    }

    fn unnamed() -> Member {
        Member {
            name: None,
            ..named("")
        }
    }

    fn perm(members: &[Member], policy: &SortPolicy) -> Vec<usize> {
        sorted_permutation(members, policy)
    }

    // ==================== Basic ordering ====================

    #[test]
    fn test_ascending() {
        let members = [named("b"), named("a"), named("c")];
        assert_eq!(perm(&members, &SortPolicy::default()), vec![1, 0, 2]);
    }

    #[test]
    fn test_descending() {
        let members = [named("b"), named("a"), named("c")];
        assert_eq!(perm(&members, &SortPolicy::descending()), vec![2, 0, 1]);
    }

    #[test]
    fn test_already_sorted_is_identity() {
        let members = [named("a"), named("b"), named("c")];
        assert_eq!(perm(&members, &SortPolicy::default()), vec![0, 1, 2]);
    }

    // ==================== Stability ====================

    #[test]
    fn test_equal_names_keep_original_order() {
        let members = [named("b"), named("a"), named("a")];
        assert_eq!(perm(&members, &SortPolicy::default()), vec![1, 2, 0]);
    }

    #[test]
    fn test_insensitive_ties_keep_original_order() {
        // "C" and "c" fold together; the earlier one stays first
        let members = [named("C"), named("c"), named("b")];
        let policy = SortPolicy::default().with_insensitive();
        assert_eq!(perm(&members, &policy), vec![2, 0, 1]);
    }

    #[test]
    fn test_descending_ties_keep_original_order() {
        let members = [named("a"), named("A"), named("b")];
        let policy = SortPolicy::descending().with_insensitive();
        assert_eq!(perm(&members, &policy), vec![2, 0, 1]);
    }

    // ==================== Index signatures ====================

    #[test]
    fn test_index_signatures_first_when_ascending() {
        let members = [named("A"), index_sig("[index: skey]"), named("_")];
        assert_eq!(perm(&members, &SortPolicy::default()), vec![1, 0, 2]);
    }

    #[test]
    fn test_index_signatures_last_when_descending() {
        let members = [named("_"), index_sig("[index: skey]"), named("A")];
        assert_eq!(perm(&members, &SortPolicy::descending()), vec![0, 2, 1]);
    }

    #[test]
    fn test_index_signatures_sort_among_themselves() {
        let members = [
            index_sig("[index: skey]"),
            index_sig("[index: nkey]"),
            named("a"),
        ];
        assert_eq!(perm(&members, &SortPolicy::default()), vec![1, 0, 2]);
    }

    // ==================== Unnamed members ====================

    #[test]
    fn test_unnamed_after_named_when_ascending() {
        let members = [unnamed(), named("z"), named("a")];
        assert_eq!(perm(&members, &SortPolicy::default()), vec![2, 1, 0]);
    }

    #[test]
    fn test_unnamed_members_keep_relative_order() {
        let members = [unnamed(), unnamed(), named("a")];
        assert_eq!(perm(&members, &SortPolicy::default()), vec![2, 0, 1]);
    }

    // ==================== Required first ====================

    #[test]
    fn test_required_first_partitions() {
        let members = [optional("a"), named("c"), named("b")];
        let policy = SortPolicy::default().with_required_first();
        assert_eq!(perm(&members, &policy), vec![2, 1, 0]);
    }

    #[test]
    fn test_required_first_sorts_each_partition() {
        let members = [optional("b"), optional("a"), named("d"), named("c")];
        let policy = SortPolicy::default().with_required_first();
        assert_eq!(perm(&members, &policy), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_required_first_descending() {
        let members = [named("9"), named("11"), named("1"), optional("111")];
        let policy = SortPolicy::descending().with_required_first();
        // Code-point descending among required: "9" > "11" > "1"
        assert_eq!(perm(&members, &policy), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_without_required_first_optionality_is_ignored() {
        let members = [optional("a"), named("c"), named("b")];
        assert_eq!(perm(&members, &SortPolicy::default()), vec![0, 2, 1]);
    }
}
