//! k-subset generation used for pairwise exclusion clauses

/// All `k`-element subsets of `elements`.
///
/// `k == 0` yields a single empty subset; fewer than `k` elements yields
/// none. Each subset keeps the relative order of `elements`, but callers
/// should not rely on the order in which subsets are produced.
pub fn combinations<T: Clone>(elements: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if elements.len() < k {
        return Vec::new();
    }

    let mut result = Vec::new();
    for (i, head) in elements.iter().enumerate() {
        for mut tail in combinations(&elements[i + 1..], k - 1) {
            tail.insert(0, head.clone());
            result.push(tail);
        }
    }
    result
}
