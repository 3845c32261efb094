//! Sequence storage and the algorithm-facing [`SortArray`] trait.

use std::cmp::Ordering;
use std::ops::Range;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SortResult;

/// The interface sort algorithms are written against.
///
/// Elements can be compared and swapped, but their values cannot be read.
/// Instrumented implementations may refuse an operation with
/// [`Cancelled`](crate::Cancelled), which algorithms propagate with `?`.
///
/// The annotation methods let an algorithm narrate its progress (for
/// example marking a finished partition as done). They default to no-ops
/// for implementations without a visual representation.
///
/// # Panics
///
/// Implementations panic when an index is out of bounds.
pub trait SortArray {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns true if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compares the elements at `i` and `j`.
    fn compare(&mut self, i: usize, j: usize) -> SortResult<Ordering>;

    /// Exchanges the elements at `i` and `j`.
    fn swap(&mut self, i: usize, j: usize) -> SortResult<()>;

    /// Marks one element as part of the active working set.
    fn set_active(&mut self, _index: usize) {}

    /// Marks one element as outside the current working set.
    fn set_inactive(&mut self, _index: usize) {}

    /// Marks one element as in its final position.
    fn set_done(&mut self, _index: usize) {}

    /// Marks a range of elements as active.
    fn set_active_range(&mut self, _range: Range<usize>) {}

    /// Marks a range of elements as inactive.
    fn set_inactive_range(&mut self, _range: Range<usize>) {}

    /// Marks a range of elements as done.
    fn set_done_range(&mut self, _range: Range<usize>) {}
}

/// A permutation of `0..n` that only exposes ordering and exchange.
///
/// The raw values are private to this crate so that algorithms cannot
/// bypass instrumentation by reading them.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use sortvis_array::Sequence;
///
/// let mut seq = Sequence::ordered(3);
/// assert_eq!(seq.compare(0, 2), Ordering::Less);
/// seq.swap(0, 2);
/// assert_eq!(seq.compare(0, 2), Ordering::Greater);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    values: Vec<usize>,
}

impl Sequence {
    /// Creates the identity permutation `0, 1, .., n - 1`.
    pub fn ordered(n: usize) -> Self {
        Self {
            values: (0..n).collect(),
        }
    }

    /// Creates a uniformly random permutation of `0..n`.
    pub fn shuffled<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut seq = Self::ordered(n);
        seq.values.shuffle(rng);
        seq
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the ordering of the element at `i` relative to the one at `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    #[inline]
    pub fn compare(&self, i: usize, j: usize) -> Ordering {
        self.values[i].cmp(&self.values[j])
    }

    /// Exchanges the elements at `i` and `j`. `i == j` is allowed.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
    }

    /// Returns the first index `i` with `value[i - 1] > value[i]`.
    pub fn first_inversion(&self) -> Option<usize> {
        self.values
            .windows(2)
            .position(|pair| pair[0] > pair[1])
            .map(|pos| pos + 1)
    }

    /// Returns true if the sequence is non-decreasing.
    pub fn is_sorted(&self) -> bool {
        self.first_inversion().is_none()
    }

    /// Returns the value at `index`, for drawing and verification only.
    #[inline]
    pub(crate) fn value(&self, index: usize) -> usize {
        self.values[index]
    }

    #[cfg(test)]
    pub(crate) fn values(&self) -> &[usize] {
        &self.values
    }

    #[cfg(test)]
    pub(crate) fn from_values(values: Vec<usize>) -> Self {
        Self { values }
    }
}

impl SortArray for Sequence {
    fn len(&self) -> usize {
        Sequence::len(self)
    }

    fn compare(&mut self, i: usize, j: usize) -> SortResult<Ordering> {
        Ok(Sequence::compare(self, i, j))
    }

    fn swap(&mut self, i: usize, j: usize) -> SortResult<()> {
        Sequence::swap(self, i, j);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted_copy(values: &[usize]) -> Vec<usize> {
        let mut copy = values.to_vec();
        copy.sort_unstable();
        copy
    }

    #[test]
    fn test_ordered_is_identity() {
        let seq = Sequence::ordered(5);
        assert_eq!(seq.values(), &[0, 1, 2, 3, 4]);
        assert!(seq.is_sorted());
    }

    #[test]
    fn test_shuffled_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let seq = Sequence::shuffled(64, &mut rng);
        assert_eq!(seq.len(), 64);
        assert_eq!(sorted_copy(seq.values()), (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffled_is_deterministic_per_seed() {
        let a = Sequence::shuffled(32, &mut StdRng::seed_from_u64(99));
        let b = Sequence::shuffled(32, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_compare_reports_ordering_only() {
        let seq = Sequence::from_values(vec![2, 0, 1]);
        assert_eq!(seq.compare(0, 1), Ordering::Greater);
        assert_eq!(seq.compare(1, 2), Ordering::Less);
        assert_eq!(seq.compare(2, 2), Ordering::Equal);
    }

    #[test]
    fn test_swap_exchanges_two_positions() {
        let mut seq = Sequence::from_values(vec![3, 1, 0, 2]);
        seq.swap(0, 2);
        assert_eq!(seq.values(), &[0, 1, 3, 2]);
    }

    #[test]
    fn test_swap_same_index_is_noop() {
        let mut seq = Sequence::from_values(vec![1, 0]);
        seq.swap(1, 1);
        assert_eq!(seq.values(), &[1, 0]);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_compare_panics() {
        let seq = Sequence::ordered(3);
        let _ = seq.compare(0, 3);
    }

    #[test]
    fn test_first_inversion() {
        assert_eq!(Sequence::from_values(vec![0, 1, 2]).first_inversion(), None);
        assert_eq!(
            Sequence::from_values(vec![0, 2, 1, 3]).first_inversion(),
            Some(2)
        );
        assert_eq!(Sequence::from_values(vec![1, 0]).first_inversion(), Some(1));
        assert!(Sequence::ordered(1).is_sorted());
        assert!(Sequence::ordered(0).is_sorted());
    }

    #[test]
    fn test_sort_array_impl_never_cancels() {
        let mut seq = Sequence::from_values(vec![1, 0]);
        let arr: &mut dyn SortArray = &mut seq;
        assert_eq!(arr.compare(0, 1), Ok(Ordering::Greater));
        assert_eq!(arr.swap(0, 1), Ok(()));
        arr.set_done_range(0..2);
        assert!(seq.is_sorted());
    }
}
