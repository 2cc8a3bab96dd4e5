//! This module implements a set of `i32` values kept in a sorted array.
use crate::buffer::{self, read_slot, write_slot};
use crate::{AllocationError, DefaultMemoryImpl, Memory, DEFAULT_CAPACITY, SENTINEL};
use std::fmt;
use std::ops::Range;

mod algebra;
#[cfg(test)]
mod proptests;

/// A set of `i32` values stored as a sorted, duplicate-free array.
///
/// # Overview
///
/// The elements live in the prefix of a slot buffer provided by a
/// [`Memory`], in strictly ascending order. Every slot past the last
/// element holds [`SENTINEL`], which is therefore not a valid element.
/// Lookups use binary search, insertions and removals shift the tail
/// of the buffer, and the set algebra merges two sorted sequences in
/// linear time.
///
/// The capacity of a set is the size of its memory. A set without a
/// buffer has capacity 0; the first insertion allocates
/// [`DEFAULT_CAPACITY`] slots, and the buffer doubles whenever an
/// insertion would leave fewer than one spare slot.
///
/// # Errors
///
/// Every operation that allocates returns an [`AllocationError`] when
/// the memory refuses to grow. Unless noted otherwise, a failed
/// operation leaves the set unchanged.
///
/// # Example
///
/// ```rust
/// use sorted_int_set::{DefaultMemoryImpl, IntSet};
///
/// let mut set = IntSet::new(DefaultMemoryImpl::default());
/// assert_eq!(set.insert(42), Ok(true));
/// assert_eq!(set.insert(42), Ok(false)); // Already a member.
/// assert!(set.contains(42));
/// assert_eq!(set.capacity(), 10);
/// ```
pub struct IntSet<M: Memory = DefaultMemoryImpl> {
    memory: M,
    len: u64,
}

impl<M: Memory> IntSet<M> {
    /// Creates a new empty set without a buffer, releasing whatever
    /// the memory contained previously.
    ///
    /// Complexity: O(1)
    pub fn new(mut memory: M) -> Self {
        buffer::release(&mut memory);
        Self { memory, len: 0 }
    }

    /// Creates a new empty set with `capacity` reserved slots.
    ///
    /// Complexity: O(capacity)
    pub fn with_capacity(memory: M, capacity: u64) -> Result<Self, AllocationError> {
        let mut set = Self::new(memory);
        set.init(capacity)?;
        Ok(set)
    }

    /// Replaces the contents of the set with an empty buffer of exactly
    /// `capacity` slots, or with no buffer if `capacity` is 0.
    ///
    /// Complexity: O(capacity)
    ///
    /// Unlike the other operations, a failure does not preserve the
    /// previous contents: the set is left empty, without a buffer.
    pub fn init(&mut self, capacity: u64) -> Result<(), AllocationError> {
        self.len = 0;
        buffer::release(&mut self.memory);
        buffer::allocate(&mut self.memory, capacity)
    }

    /// Replaces the contents of the set with `values`, copied verbatim
    /// into a buffer of exactly `capacity` slots.
    ///
    /// Complexity: O(capacity)
    ///
    /// PRECONDITION: values.len() <= capacity
    ///
    /// PRECONDITION: `values` is strictly ascending and does not contain
    /// [`SENTINEL`]. The values are neither sorted nor deduplicated;
    /// searching and merging a set loaded from other input gives
    /// unspecified results.
    ///
    /// If the buffer cannot be allocated, the set is unchanged.
    pub fn load(&mut self, capacity: u64, values: &[i32]) -> Result<(), AllocationError> {
        assert!(
            values.len() as u64 <= capacity,
            "cannot load {} values into {} slots",
            values.len(),
            capacity
        );

        buffer::allocate(&mut self.memory, capacity)?;
        self.memory.write(0, values);
        self.len = values.len() as u64;
        Ok(())
    }

    /// Makes `self` a deep copy of `source`: same capacity, same
    /// elements, in a buffer owned by `self`.
    ///
    /// Complexity: O(capacity)
    ///
    /// If the buffer cannot be resized, `self` is unchanged.
    pub fn copy_from<N: Memory>(&mut self, source: &IntSet<N>) -> Result<(), AllocationError> {
        buffer::grow(&mut self.memory, 0, source.capacity())?;
        buffer::copy_prefix(&source.memory, &mut self.memory, source.len);
        self.len = source.len;
        Ok(())
    }

    /// Adds `value` to the set. Returns `true` if the value was not a
    /// member before, and `false` if it was, in which case the set is
    /// unchanged.
    ///
    /// Complexity: O(n)
    ///
    /// PRECONDITION: value != SENTINEL
    ///
    /// If the buffer needs to grow and cannot, the set is unchanged.
    pub fn insert(&mut self, value: i32) -> Result<bool, AllocationError> {
        assert_ne!(value, SENTINEL, "the sentinel value cannot be stored");

        let index = match self.locate(value) {
            Ok(_) => return Ok(false),
            Err(index) => index,
        };

        let capacity = self.capacity();
        if capacity == 0 {
            buffer::allocate(&mut self.memory, DEFAULT_CAPACITY)?;
        } else if self.len + 1 >= capacity {
            // Capacities are bounded by MAX_CAPACITY, so doubling cannot overflow.
            buffer::grow(&mut self.memory, self.len, capacity * 2)?;
        }

        buffer::shift_right(&mut self.memory, index, self.len);
        write_slot(&mut self.memory, index, value);
        self.len += 1;
        Ok(true)
    }

    /// Returns `true` if `value` is a member of the set.
    ///
    /// Complexity: O(log n)
    pub fn contains(&self, value: i32) -> bool {
        self.capacity() > 0 && self.locate(value).is_ok()
    }

    /// Removes `value` from the set. Returns `true` if it was a member.
    /// The capacity is never reduced.
    ///
    /// Complexity: O(n)
    pub fn remove(&mut self, value: i32) -> bool {
        match self.locate(value) {
            Ok(index) => {
                buffer::shift_left(&mut self.memory, index, self.len);
                self.len -= 1;
                true
            }
            Err(_) => false,
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// Complexity: O(1)
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// Complexity: O(1)
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if every allocated slot holds an element.
    ///
    /// A set without a buffer is both empty and full. Insertions grow
    /// the buffer before it fills up, so otherwise only a set loaded to
    /// its capacity is ever observed full.
    ///
    /// Complexity: O(1)
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Returns the number of allocated slots.
    ///
    /// Complexity: O(1)
    pub fn capacity(&self) -> u64 {
        self.memory.size()
    }

    /// Removes all elements and releases the buffer.
    ///
    /// Complexity: O(1)
    pub fn make_empty(&mut self) {
        buffer::release(&mut self.memory);
        self.len = 0;
    }

    /// Returns the smallest element, if any.
    pub fn first(&self) -> Option<i32> {
        (self.len > 0).then(|| read_slot(&self.memory, 0))
    }

    /// Returns the largest element, if any.
    pub fn last(&self) -> Option<i32> {
        (self.len > 0).then(|| read_slot(&self.memory, self.len - 1))
    }

    /// Returns an iterator over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, M> {
        Iter {
            set: self,
            range: Range {
                start: 0,
                end: self.len,
            },
        }
    }

    /// Returns the elements in ascending order.
    pub fn to_vec(&self) -> Vec<i32> {
        buffer::read_prefix(&self.memory, self.len)
    }

    /// Returns the underlying memory instance.
    pub fn into_memory(self) -> M {
        self.memory
    }

    /// Binary search over the live elements.
    ///
    /// Returns `Ok(index)` if `value` is stored at `index`, and
    /// `Err(index)` with the position where `value` would have to be
    /// inserted to keep the elements sorted otherwise. An empty set
    /// yields `Err(0)`.
    pub(crate) fn locate(&self, value: i32) -> Result<u64, u64> {
        let mut low = 0;
        let mut high = self.len;
        while low < high {
            let mid = low + (high - low) / 2;
            let candidate = read_slot(&self.memory, mid);
            match candidate.cmp(&value) {
                std::cmp::Ordering::Less => low = mid + 1,
                std::cmp::Ordering::Greater => high = mid,
                std::cmp::Ordering::Equal => return Ok(mid),
            }
        }
        Err(low)
    }
}

impl<M: Memory> fmt::Debug for IntSet<M> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

/// An iterator over the elements of an [`IntSet`], in ascending order.
pub struct Iter<'a, M: Memory> {
    set: &'a IntSet<M>,
    range: Range<u64>,
}

impl<M: Memory> Iterator for Iter<'_, M> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.range.is_empty() {
            return None;
        }
        let value = read_slot(&self.set.memory, self.range.start);
        self.range.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.range.end - self.range.start) as usize;
        (n, Some(n))
    }
}

impl<M: Memory> DoubleEndedIterator for Iter<'_, M> {
    fn next_back(&mut self) -> Option<i32> {
        if self.range.is_empty() {
            return None;
        }
        self.range.end -= 1;
        Some(read_slot(&self.set.memory, self.range.end))
    }
}

impl<M: Memory> ExactSizeIterator for Iter<'_, M> {}

impl<'a, M: Memory> IntoIterator for &'a IntSet<M> {
    type Item = i32;
    type IntoIter = Iter<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
