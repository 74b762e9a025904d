//! Triangular slot addressing for unordered item pairs.

use crate::error::{OrderError, Result};

/// Maps an unordered pair `{i, j}`, `i != j`, of `n` items onto a single
/// slot in `[0, n(n-1)/2)`.
///
/// The slot of `{lo, hi}` with `lo < hi` is `lo + hi(hi-1)/2`, so slots are
/// laid out row by row of the strict lower triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairwiseIndex {
    n: usize,
}

impl PairwiseIndex {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Number of items covered.
    pub fn items(&self) -> usize {
        self.n
    }

    /// Number of unordered pairs, `n(n-1)/2`.
    pub fn len(&self) -> usize {
        self.n * self.n.saturating_sub(1) / 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the slot of `{i, j}`. Argument order does not matter.
    ///
    /// # Errors
    /// [`OrderError::InvalidArgument`] if `i == j` or either index is `>= n`.
    pub fn index(&self, i: usize, j: usize) -> Result<usize> {
        if i == j {
            return Err(OrderError::InvalidArgument(format!(
                "pair index requires distinct items, got ({i}, {j})"
            )));
        }
        if i >= self.n || j >= self.n {
            return Err(OrderError::InvalidArgument(format!(
                "pair ({i}, {j}) out of range for {} items",
                self.n
            )));
        }
        Ok(slot(i, j))
    }

    /// Inverse of [`index`](Self::index): returns `(lo, hi)` with `lo < hi`.
    pub fn pair(&self, slot: usize) -> Result<(usize, usize)> {
        if slot >= self.len() {
            return Err(OrderError::InvalidArgument(format!(
                "slot {slot} out of range for {} pairs",
                self.len()
            )));
        }
        // Largest hi with hi(hi-1)/2 <= slot.
        let mut hi = ((1.0 + (1.0 + 8.0 * slot as f64).sqrt()) / 2.0) as usize;
        while hi * (hi - 1) / 2 > slot {
            hi -= 1;
        }
        while (hi + 1) * hi / 2 <= slot {
            hi += 1;
        }
        Ok((slot - hi * (hi - 1) / 2, hi))
    }

    /// Iterates `(lo, hi)` pairs in slot order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        (1..self.n).flat_map(|hi| (0..hi).map(move |lo| (lo, hi)))
    }
}

/// Unchecked slot formula.
#[inline]
pub(crate) fn slot(i: usize, j: usize) -> usize {
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    lo + hi * (hi - 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_len() {
        assert_eq!(PairwiseIndex::new(0).len(), 0);
        assert_eq!(PairwiseIndex::new(1).len(), 0);
        assert_eq!(PairwiseIndex::new(2).len(), 1);
        assert_eq!(PairwiseIndex::new(5).len(), 10);
    }

    #[test]
    fn test_symmetric() {
        let idx = PairwiseIndex::new(6);
        assert_eq!(idx.index(1, 4).unwrap(), idx.index(4, 1).unwrap());
        assert_eq!(idx.index(0, 1).unwrap(), 0);
    }

    #[test]
    fn test_rejects_diagonal_and_out_of_range() {
        let idx = PairwiseIndex::new(4);
        assert!(matches!(idx.index(2, 2), Err(OrderError::InvalidArgument(_))));
        assert!(matches!(idx.index(0, 4), Err(OrderError::InvalidArgument(_))));
        assert!(idx.pair(6).is_err());
    }

    #[test]
    fn test_pairs_follow_slot_order() {
        let idx = PairwiseIndex::new(7);
        for (expected, (lo, hi)) in idx.pairs().enumerate() {
            assert_eq!(idx.index(lo, hi).unwrap(), expected);
            assert_eq!(idx.pair(expected).unwrap(), (lo, hi));
        }
    }

    proptest! {
        #[test]
        fn prop_index_is_bijection(n in 2usize..60) {
            let idx = PairwiseIndex::new(n);
            let mut seen = vec![false; idx.len()];
            for i in 0..n {
                for j in (i + 1)..n {
                    let s = idx.index(i, j).unwrap();
                    prop_assert!(s < idx.len());
                    prop_assert!(!seen[s]);
                    seen[s] = true;
                    prop_assert_eq!(s, idx.index(j, i).unwrap());
                    prop_assert_eq!(idx.pair(s).unwrap(), (i, j));
                }
            }
            prop_assert!(seen.iter().all(|&v| v));
        }
    }
}
