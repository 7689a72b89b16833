//! Stateless helper extensions on iterators and slices.
//!
//! These are standalone utility collaborators with no relation to the
//! table core.

/// Iterator extension: maximum with a fallback for empty iterators.
pub trait MaxOrDefault: Iterator + Sized {
    /// Returns the maximum of the iterator,
    /// or `Default::default()` if the iterator is empty.
    fn max_or_default(self) -> Self::Item
    where
        Self::Item: Ord + Default,
    {
        self.max().unwrap_or_default()
    }

    /// Returns the maximum of the iterator, or `default` if it is empty.
    fn max_or(self, default: Self::Item) -> Self::Item
    where
        Self::Item: Ord,
    {
        self.max().unwrap_or(default)
    }

    /// Maps every item through `f` and returns the maximum of the
    /// results, or `default` if the iterator is empty.
    ///
    /// Note that this maximizes the *mapped* values, not the items:
    /// `[-1, 3, 0, 1]` mapped through `to_string` yields `"3"`
    /// by string comparison.
    fn max_of_or<T: Ord>(self, default: T, f: impl FnMut(Self::Item) -> T) -> T {
        self.map(f).max().unwrap_or(default)
    }
}

impl<I: Iterator> MaxOrDefault for I {}

/// Slice extension: membership tests pinned to the first or last position.
///
/// All four tests locate the *first* occurrence of `target`, so for a
/// slice with duplicates, `contains_last` holds only when the first
/// occurrence is also the final element.
pub trait PositionExt<T> {
    /// Returns whether `target` occurs and its first occurrence is the
    /// first element.
    fn contains_first(&self, target: &T) -> bool;

    /// Returns whether `target` occurs and its first occurrence is the
    /// last element.
    fn contains_last(&self, target: &T) -> bool;

    /// Returns whether `target` occurs somewhere past the first element.
    fn contains_not_first(&self, target: &T) -> bool;

    /// Returns whether `target` occurs and its first occurrence is not
    /// the last element.
    fn contains_not_last(&self, target: &T) -> bool;
}

impl<T: PartialEq> PositionExt<T> for [T] {
    fn contains_first(&self, target: &T) -> bool {
        self.iter().position(|x| x == target) == Some(0)
    }

    fn contains_last(&self, target: &T) -> bool {
        match self.iter().position(|x| x == target) {
            Some(idx) => idx == self.len() - 1,
            None => false,
        }
    }

    fn contains_not_first(&self, target: &T) -> bool {
        matches!(self.iter().position(|x| x == target), Some(idx) if idx > 0)
    }

    fn contains_not_last(&self, target: &T) -> bool {
        matches!(self.iter().position(|x| x == target), Some(idx) if idx < self.len() - 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn max_or_default_returns_the_max_when_nonempty() {
        assert_eq!([-1, 3, 0, 1].into_iter().max_or_default(), 3);
    }

    #[test]
    fn max_or_default_falls_back_on_empty() {
        assert_eq!(core::iter::empty::<i32>().max_or_default(), 0);
    }

    #[test]
    fn max_or_uses_the_given_fallback() {
        assert_eq!([-1, 3, 0, 1].into_iter().max_or(7), 3);
        assert_eq!(core::iter::empty::<i32>().max_or(7), 7);
    }

    #[test]
    fn max_of_or_maximizes_the_mapped_values() {
        let max = [-1, 3, 0, 1].into_iter().max_of_or(String::new(), |n| n.to_string());
        assert_eq!(max, "3");
    }

    #[test]
    fn max_of_or_falls_back_on_empty() {
        let max = core::iter::empty::<i32>().max_of_or(String::new(), |n| n.to_string());
        assert_eq!(max, "");
    }

    #[test]
    fn contains_first_checks_the_first_position() {
        assert!([1, 2, 3].contains_first(&1));
        assert!(![1, 2, 3].contains_first(&2));
        assert!(![1, 2, 3].contains_first(&9));
        let empty: [i32; 0] = [];
        assert!(!empty.contains_first(&1));
    }

    #[test]
    fn contains_last_checks_the_last_position() {
        assert!([1, 2, 3].contains_last(&3));
        assert!(![1, 2, 3].contains_last(&2));
        assert!(![1, 2, 3].contains_last(&9));
        let empty: [i32; 0] = [];
        assert!(!empty.contains_last(&1));
        // The first occurrence of 1 is not the last element.
        assert!(![1, 2, 1].contains_last(&1));
    }

    #[test]
    fn contains_not_first_requires_a_later_occurrence() {
        assert!([1, 2, 3].contains_not_first(&2));
        assert!([1, 2, 3].contains_not_first(&3));
        assert!(![1, 2, 3].contains_not_first(&1));
        assert!(![1, 2, 3].contains_not_first(&9));
        let empty: [i32; 0] = [];
        assert!(!empty.contains_not_first(&1));
    }

    #[test]
    fn contains_not_last_requires_an_earlier_occurrence() {
        assert!([1, 2, 3].contains_not_last(&1));
        assert!([1, 2, 3].contains_not_last(&2));
        assert!(![1, 2, 3].contains_not_last(&3));
        assert!(![1, 2, 3].contains_not_last(&9));
        let empty: [i32; 0] = [];
        assert!(!empty.contains_not_last(&1));
        // The single element is both first and last.
        assert!(![1].contains_not_last(&1));
    }
}
