#![doc = include_str!("../README.md")]
mod buffer;
pub mod int_set;
pub mod vec_mem;
pub use int_set::{IntSet, Iter};
use std::error;
use std::fmt::{Display, Formatter};
pub use vec_mem::VectorMemory;

pub type DefaultMemoryImpl = VectorMemory;

/// The value stored in every slot that does not hold a live element.
///
/// Because of this, `SENTINEL` itself can never be a member of an [`IntSet`].
pub const SENTINEL: i32 = i32::MAX;

/// The capacity allocated by the first insertion into a set without a buffer.
pub const DEFAULT_CAPACITY: u64 = 10;

/// The maximum number of slots a set can allocate.
pub const MAX_CAPACITY: u64 = u32::MAX as u64;

/// Storage for the slots of a set.
///
/// A memory is a contiguous array of `i32` slots addressed from zero. Every
/// [`IntSet`] owns exactly one memory, so no two sets ever share slots.
pub trait Memory {
    /// Returns the current size of the memory in slots.
    fn size(&self) -> u64;

    /// Tries to grow the memory by `delta` many slots containing
    /// zeroes.  If successful, returns the previous size of the
    /// memory (in slots).  Otherwise, returns -1 and leaves the
    /// memory untouched.
    fn grow(&mut self, delta: u64) -> i64;

    /// Releases every slot at or past `new_size`.
    ///
    /// PRECONDITION: new_size <= self.size()
    fn shrink(&mut self, new_size: u64);

    /// Copies the slots starting at `offset` into `dst`.
    fn read(&self, offset: u64, dst: &mut [i32]);

    /// Copies `src` into the slots starting at `offset`.
    fn write(&mut self, offset: u64, src: &[i32]);
}

/// A buffer allocation or reallocation request could not be satisfied.
#[derive(Debug, PartialEq, Eq)]
pub struct AllocationError {
    current_capacity: u64,
    requested: u64,
}

impl AllocationError {
    pub(crate) fn new(current_capacity: u64, requested: u64) -> Self {
        Self {
            current_capacity,
            requested,
        }
    }

    /// The capacity of the set when the request failed.
    pub fn current_capacity(&self) -> u64 {
        self.current_capacity
    }

    /// The capacity that was requested.
    pub fn requested(&self) -> u64 {
        self.requested
    }
}

impl Display for AllocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed to allocate set buffer: current capacity={}, requested={}",
            self.current_capacity, self.requested
        )
    }
}

impl error::Error for AllocationError {}

/// RestrictedMemory caps the number of slots another memory may grow
/// to. Growth requests past the limit fail as if the allocator had
/// refused them.
#[derive(Clone, Debug)]
pub struct RestrictedMemory<M: Memory> {
    limit: u64,
    memory: M,
}

impl<M: Memory> RestrictedMemory<M> {
    /// Wraps `memory`, refusing any growth past `limit` slots.
    ///
    /// PRECONDITION: limit <= MAX_CAPACITY
    pub fn new(memory: M, limit: u64) -> Self {
        assert!(limit <= MAX_CAPACITY);
        Self { limit, memory }
    }

    /// Returns the maximum number of slots this memory can hold.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns the wrapped memory.
    pub fn into_inner(self) -> M {
        self.memory
    }
}

impl<M: Memory> Memory for RestrictedMemory<M> {
    fn size(&self) -> u64 {
        self.memory.size()
    }

    fn grow(&mut self, delta: u64) -> i64 {
        let slots_left = self.limit.saturating_sub(self.memory.size());
        if slots_left < delta {
            -1
        } else {
            self.memory.grow(delta)
        }
    }

    fn shrink(&mut self, new_size: u64) {
        self.memory.shrink(new_size)
    }

    fn read(&self, offset: u64, dst: &mut [i32]) {
        self.memory.read(offset, dst)
    }

    fn write(&mut self, offset: u64, src: &[i32]) {
        self.memory.write(offset, src)
    }
}
