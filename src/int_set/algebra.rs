//! Relational queries and set algebra over two sorted sets.
//!
//! Every operation here is a single forward co-scan of the two element
//! sequences, so it runs in O(n + m) where n and m are the sizes of the
//! two sets.
use super::IntSet;
use crate::{AllocationError, Memory};
use std::cmp::Ordering;

impl<M: Memory> IntSet<M> {
    /// Returns `true` if both sets contain the same elements.
    ///
    /// Capacities are not compared: a set without a buffer equals a set
    /// whose buffer holds no elements.
    ///
    /// # Complexity
    /// O(n)
    pub fn equals<N: Memory>(&self, other: &IntSet<N>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }

    /// Returns `true` if every element of this set is also an element of
    /// `other`.
    ///
    /// # Complexity
    /// O(n + m)
    ///
    /// # Example
    ///
    /// ```rust
    /// use sorted_int_set::{DefaultMemoryImpl, IntSet};
    ///
    /// let mut a = IntSet::new(DefaultMemoryImpl::default());
    /// let mut b = IntSet::new(DefaultMemoryImpl::default());
    /// for v in [2, 3, 4] {
    ///     a.insert(v).unwrap();
    /// }
    /// for v in [2, 3, 4, 5, 6] {
    ///     b.insert(v).unwrap();
    /// }
    ///
    /// assert!(a.is_subset_of(&b));
    /// assert!(!b.is_subset_of(&a));
    /// ```
    pub fn is_subset_of<N: Memory>(&self, other: &IntSet<N>) -> bool {
        if self.len() > other.len() {
            return false;
        }

        let mut self_iter = self.iter();
        let mut other_iter = other.iter();
        let mut self_next = self_iter.next();
        let mut other_next = other_iter.next();

        while let Some(self_key) = self_next {
            match other_next {
                Some(other_key) => match self_key.cmp(&other_key) {
                    Ordering::Equal => {
                        self_next = self_iter.next();
                        other_next = other_iter.next();
                    }
                    Ordering::Greater => other_next = other_iter.next(),
                    // `self_key` is below every remaining element of `other`.
                    Ordering::Less => return false,
                },
                None => return false,
            }
        }

        true
    }

    /// Returns `true` if every element of `other` is also an element of
    /// this set.
    ///
    /// # Complexity
    /// O(n + m)
    pub fn is_superset_of<N: Memory>(&self, other: &IntSet<N>) -> bool {
        other.is_subset_of(self)
    }

    /// Returns `true` if the sets have no element in common.
    ///
    /// # Complexity
    /// O(n + m)
    pub fn is_disjoint<N: Memory>(&self, other: &IntSet<N>) -> bool {
        let mut iter_self = self.iter();
        let mut iter_other = other.iter();
        let mut next_self = iter_self.next();
        let mut next_other = iter_other.next();

        while let (Some(a), Some(b)) = (next_self, next_other) {
            match a.cmp(&b) {
                Ordering::Less => next_self = iter_self.next(),
                Ordering::Greater => next_other = iter_other.next(),
                Ordering::Equal => return false,
            }
        }

        true
    }

    /// Returns an iterator over the elements that are in either set, in
    /// ascending order.
    ///
    /// # Complexity
    /// O(n + m)
    pub fn union<'a, N: Memory>(&'a self, other: &'a IntSet<N>) -> impl Iterator<Item = i32> + 'a {
        let mut iter_self = self.iter();
        let mut iter_other = other.iter();
        let mut next_self = iter_self.next();
        let mut next_other = iter_other.next();

        std::iter::from_fn(move || match (next_self, next_other) {
            (Some(a), Some(b)) => match a.cmp(&b) {
                Ordering::Less => {
                    next_self = iter_self.next();
                    Some(a)
                }
                Ordering::Greater => {
                    next_other = iter_other.next();
                    Some(b)
                }
                Ordering::Equal => {
                    next_self = iter_self.next();
                    next_other = iter_other.next();
                    Some(a)
                }
            },
            (Some(a), None) => {
                next_self = iter_self.next();
                Some(a)
            }
            (None, Some(b)) => {
                next_other = iter_other.next();
                Some(b)
            }
            (None, None) => None,
        })
    }

    /// Returns an iterator over the elements that are in both sets, in
    /// ascending order.
    ///
    /// # Complexity
    /// O(n + m)
    pub fn intersection<'a, N: Memory>(
        &'a self,
        other: &'a IntSet<N>,
    ) -> impl Iterator<Item = i32> + 'a {
        let mut iter_self = self.iter();
        let mut iter_other = other.iter();
        let mut next_self = iter_self.next();
        let mut next_other = iter_other.next();

        std::iter::from_fn(move || {
            while let (Some(a), Some(b)) = (next_self, next_other) {
                match a.cmp(&b) {
                    Ordering::Less => next_self = iter_self.next(),
                    Ordering::Greater => next_other = iter_other.next(),
                    Ordering::Equal => {
                        next_self = iter_self.next();
                        next_other = iter_other.next();
                        return Some(a);
                    }
                }
            }
            None
        })
    }

    /// Returns an iterator over the elements of this set that are not in
    /// `other`, in ascending order.
    ///
    /// # Complexity
    /// O(n + m)
    pub fn difference<'a, N: Memory>(
        &'a self,
        other: &'a IntSet<N>,
    ) -> impl Iterator<Item = i32> + 'a {
        let mut iter_self = self.iter();
        let mut iter_other = other.iter();
        let mut next_self = iter_self.next();
        let mut next_other = iter_other.next();

        std::iter::from_fn(move || loop {
            return match (next_self, next_other) {
                (Some(a), Some(b)) => match a.cmp(&b) {
                    Ordering::Less => {
                        next_self = iter_self.next();
                        Some(a)
                    }
                    Ordering::Greater => {
                        next_other = iter_other.next();
                        continue;
                    }
                    Ordering::Equal => {
                        next_self = iter_self.next();
                        next_other = iter_other.next();
                        continue;
                    }
                },
                (Some(a), None) => {
                    next_self = iter_self.next();
                    Some(a)
                }
                (None, _) => None,
            };
        })
    }

    /// Replaces the contents of this set with the union of `a` and `b`.
    ///
    /// The result has capacity `a.capacity() + b.capacity()`.
    ///
    /// # Complexity
    /// O(n + m)
    ///
    /// # Example
    ///
    /// ```rust
    /// use sorted_int_set::{DefaultMemoryImpl, IntSet};
    ///
    /// let mut a = IntSet::new(DefaultMemoryImpl::default());
    /// let mut b = IntSet::new(DefaultMemoryImpl::default());
    /// a.insert(1).unwrap();
    /// a.insert(2).unwrap();
    /// b.insert(2).unwrap();
    /// b.insert(3).unwrap();
    ///
    /// let mut union = IntSet::new(DefaultMemoryImpl::default());
    /// union.union_of(&a, &b).unwrap();
    /// assert_eq!(union.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(union.capacity(), 20);
    /// ```
    ///
    /// On failure the set is left empty, without a buffer.
    pub fn union_of<A: Memory, B: Memory>(
        &mut self,
        a: &IntSet<A>,
        b: &IntSet<B>,
    ) -> Result<(), AllocationError> {
        tracing::trace!(a = a.len(), b = b.len(), "computing union");
        self.init(a.capacity() + b.capacity())?;
        self.extend_from(a.union(b))
    }

    /// Replaces the contents of this set with the intersection of `a`
    /// and `b`.
    ///
    /// The result has capacity `max(a.capacity(), b.capacity())`.
    ///
    /// # Complexity
    /// O(n + m)
    ///
    /// On failure the set is left empty, without a buffer.
    pub fn intersection_of<A: Memory, B: Memory>(
        &mut self,
        a: &IntSet<A>,
        b: &IntSet<B>,
    ) -> Result<(), AllocationError> {
        tracing::trace!(a = a.len(), b = b.len(), "computing intersection");
        self.init(a.capacity().max(b.capacity()))?;
        self.extend_from(a.intersection(b))
    }

    /// Replaces the contents of this set with the elements of `a` that
    /// are not in `b`.
    ///
    /// The result has capacity `a.capacity()`.
    ///
    /// # Complexity
    /// O(n + m)
    ///
    /// On failure the set is left empty, without a buffer.
    pub fn difference_of<A: Memory, B: Memory>(
        &mut self,
        a: &IntSet<A>,
        b: &IntSet<B>,
    ) -> Result<(), AllocationError> {
        tracing::trace!(a = a.len(), b = b.len(), "computing difference");
        self.init(a.capacity())?;
        self.extend_from(a.difference(b))
    }

    /// Inserts every value of `values`, resetting the set to empty if an
    /// insertion fails.
    fn extend_from(&mut self, values: impl Iterator<Item = i32>) -> Result<(), AllocationError> {
        for value in values {
            if let Err(err) = self.insert(value) {
                self.make_empty();
                return Err(err);
            }
        }
        Ok(())
    }
}

impl<M: Memory, N: Memory> PartialEq<IntSet<N>> for IntSet<M> {
    fn eq(&self, other: &IntSet<N>) -> bool {
        self.equals(other)
    }
}

impl<M: Memory> Eq for IntSet<M> {}
