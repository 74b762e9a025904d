//! Visiting orders over an item set.

use crate::error::{OrderError, Result};
use crate::pairwise::CostSource;

/// Whether the last item of a tour connects back to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TourKind {
    /// A path: `n - 1` edges.
    Open,
    /// A cycle: `n` edges, the last closing back to the first item.
    Closed,
}

/// A permutation of item indices `[0, n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    order: Vec<usize>,
    kind: TourKind,
}

impl Tour {
    /// Wraps `order` after checking it is a permutation of `[0, order.len())`.
    pub fn new(order: Vec<usize>, kind: TourKind) -> Result<Self> {
        validate_permutation(&order, order.len())?;
        Ok(Self { order, kind })
    }

    /// `[0, 1, ..., n-1]`.
    pub fn identity(n: usize, kind: TourKind) -> Self {
        Self {
            order: (0..n).collect(),
            kind,
        }
    }

    pub(crate) fn from_validated(order: Vec<usize>, kind: TourKind) -> Self {
        debug_assert!(validate_permutation(&order, order.len()).is_ok());
        Self { order, kind }
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    pub fn kind(&self) -> TourKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn first(&self) -> Option<usize> {
        self.order.first().copied()
    }

    /// Consecutive item pairs, including the closing edge for closed tours.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let closing = match (self.kind, self.order.len()) {
            (TourKind::Closed, n) if n >= 2 => Some((self.order[n - 1], self.order[0])),
            _ => None,
        };
        self.order
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }

    /// Sum of edge costs.
    pub fn cost<S: CostSource + ?Sized>(&self, costs: &mut S) -> Result<f64> {
        self.edges()
            .try_fold(0.0, |acc, (a, b)| Ok(acc + costs.cost(a, b)?))
    }
}

/// Checks that `order` holds each of `[0, n)` exactly once.
pub fn validate_permutation(order: &[usize], n: usize) -> Result<()> {
    if order.len() != n {
        return Err(OrderError::InvalidArgument(format!(
            "tour has {} entries, expected {n}",
            order.len()
        )));
    }
    let mut seen = vec![false; n];
    for &item in order {
        if item >= n {
            return Err(OrderError::InvalidArgument(format!(
                "tour entry {item} out of range for {n} items"
            )));
        }
        if seen[item] {
            return Err(OrderError::InvalidArgument(format!(
                "item {item} appears more than once in tour"
            )));
        }
        seen[item] = true;
    }
    Ok(())
}
