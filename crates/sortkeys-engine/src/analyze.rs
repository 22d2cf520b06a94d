//! Position analysis: displacement records and the reportable subset

/// Where one member sits before and after sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplacementRecord {
    pub initial_index: usize,
    pub final_index: usize,
}

impl DisplacementRecord {
    pub fn is_displaced(&self) -> bool {
        self.initial_index != self.final_index
    }
}

/// Result of analyzing a permutation
#[derive(Debug, Clone)]
pub struct Analysis {
    /// One record per member, indexed by original position
    pub records: Vec<DisplacementRecord>,
    /// Number of members whose position changes
    pub displaced_count: usize,
    /// Whether each member (by original position) gets its own diagnostic
    pub reportable: Vec<bool>,
    /// Number of reportable members; this is the aggregate count shown in
    /// the parent diagnostic
    pub reportable_count: usize,
}

/// Analyze `permutation` (`slot -> original index`).
///
/// A displaced member is suppressed when the member following it in
/// sorted order is the same member that followed it originally: the
/// move is then already implied by a neighbor's diagnostic.
pub fn analyze(permutation: &[usize]) -> Analysis {
    let n = permutation.len();
    let mut final_of = vec![0usize; n];
    for (slot, &original) in permutation.iter().enumerate() {
        final_of[original] = slot;
    }

    let mut records = Vec::with_capacity(n);
    let mut reportable = vec![false; n];
    let mut displaced_count = 0;
    let mut reportable_count = 0;

    for initial in 0..n {
        let final_index = final_of[initial];
        records.push(DisplacementRecord {
            initial_index: initial,
            final_index,
        });

        if initial == final_index {
            continue;
        }
        displaced_count += 1;

        let is_last_sorted = final_index + 1 == n;
        let same_successor = !is_last_sorted && permutation[final_index + 1] == initial + 1;
        if !same_successor {
            reportable[initial] = true;
            reportable_count += 1;
        }
    }

    Analysis {
        records,
        displaced_count,
        reportable,
        reportable_count,
    }
}
