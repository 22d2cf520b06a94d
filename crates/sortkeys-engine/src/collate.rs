//! Name collation: the pure comparator behind every ordering decision

use crate::policy::SortPolicy;
use std::cmp::Ordering;

/// Compare two member names under the policy's folding and natural flags.
///
/// Direction is not applied here; the orderer inverts the full sort key
/// for descending policies.
pub fn compare_names(a: &str, b: &str, policy: &SortPolicy) -> Ordering {
    if policy.case_sensitive {
        compare_folded(a, b, policy)
    } else {
        compare_folded(&a.to_lowercase(), &b.to_lowercase(), policy)
    }
}

fn compare_folded(a: &str, b: &str, policy: &SortPolicy) -> Ordering {
    if policy.natural {
        natural_cmp(a, b)
    } else {
        a.cmp(b)
    }
}

/// One maximal run of a name: either all ASCII digits or no digits at all
#[derive(Debug, PartialEq, Eq)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn split_runs(s: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_digits = None::<bool>;

    for (i, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        match in_digits {
            None => in_digits = Some(digit),
            Some(prev) if prev != digit => {
                runs.push(make_run(&s[start..i], prev));
                start = i;
                in_digits = Some(digit);
            }
            Some(_) => {}
        }
    }
    if let Some(prev) = in_digits {
        runs.push(make_run(&s[start..], prev));
    }
    runs
}

fn make_run(text: &str, digits: bool) -> Run<'_> {
    if digits {
        Run::Digits(text)
    } else {
        Run::Text(text)
    }
}

/// Compare two digit runs by numeric value; equal values (differing only
/// in leading zeros) tie-break by code point so the ordering stays total.
fn digit_run_cmp(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        .then_with(|| a.cmp(b))
}

/// Natural comparison: corresponding digit runs compare numerically,
/// other runs by code point, and a digit run sorts before a text run.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_runs = split_runs(a);
    let b_runs = split_runs(b);

    for (x, y) in a_runs.iter().zip(b_runs.iter()) {
        let ord = match (x, y) {
            (Run::Digits(dx), Run::Digits(dy)) => digit_run_cmp(dx, dy),
            (Run::Digits(_), Run::Text(_)) => Ordering::Less,
            (Run::Text(_), Run::Digits(_)) => Ordering::Greater,
            (Run::Text(tx), Run::Text(ty)) => tx.cmp(ty),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a_runs.len().cmp(&b_runs.len())
}
