//! Slot buffer management shared by every set operation.
//!
//! # Layout
//!
//! ```text
//! ---------------------------------------- <- Slot 0
//! E_0                    ↕ 1 slot
//! ----------------------------------------
//! ...
//! ----------------------------------------
//! E_(L-1)                ↕ 1 slot
//! ---------------------------------------- <- Slot L (usage)
//! SENTINEL               ↕ C - L slots
//! ---------------------------------------- <- Slot C (capacity)
//! ```
//!
//! The live elements `E_0 < E_1 < ... < E_(L-1)` occupy the prefix of the
//! memory and every slot past them holds [`SENTINEL`]. The capacity of a
//! set is the size of its memory.
use crate::{AllocationError, Memory, MAX_CAPACITY, SENTINEL};

/// The number of slots moved per memory call when filling, shifting or
/// copying a range.
const CHUNK: usize = 1024;

/// Resizes `memory` to exactly `capacity` slots, every one of them
/// holding [`SENTINEL`].
///
/// Complexity: O(capacity)
///
/// If the request fails, the memory is left untouched.
pub(crate) fn allocate<M: Memory>(memory: &mut M, capacity: u64) -> Result<(), AllocationError> {
    grow(memory, 0, capacity)?;
    fill_sentinel(memory, 0, capacity);
    Ok(())
}

/// Resizes `memory` to exactly `capacity` slots, preserving slots
/// `[0, usage)` and setting every other slot to [`SENTINEL`].
///
/// Complexity: O(capacity - usage)
///
/// PRECONDITION: usage <= capacity
///
/// If the request fails, the memory is left untouched.
pub(crate) fn grow<M: Memory>(
    memory: &mut M,
    usage: u64,
    capacity: u64,
) -> Result<(), AllocationError> {
    debug_assert!(usage <= capacity);

    let current = memory.size();
    if capacity > MAX_CAPACITY {
        tracing::debug!(current, capacity, "requested capacity exceeds the maximum");
        return Err(AllocationError::new(current, capacity));
    }

    if capacity > current {
        if memory.grow(capacity - current) == -1 {
            tracing::debug!(current, capacity, "failed to grow set buffer");
            return Err(AllocationError::new(current, capacity));
        }
        tracing::debug!(current, capacity, "grew set buffer");
        fill_sentinel(memory, usage.min(current), capacity);
    } else {
        if capacity < current {
            memory.shrink(capacity);
            tracing::debug!(current, capacity, "shrank set buffer");
        }
        fill_sentinel(memory, usage, capacity);
    }
    Ok(())
}

/// Releases every slot of `memory`.
pub(crate) fn release<M: Memory>(memory: &mut M) {
    let current = memory.size();
    if current > 0 {
        memory.shrink(0);
        tracing::debug!(current, "released set buffer");
    }
}

/// Reads the slot at `index` without any bound checks beyond the memory's own.
#[inline]
pub(crate) fn read_slot<M: Memory>(memory: &M, index: u64) -> i32 {
    let mut buf = [0; 1];
    memory.read(index, &mut buf);
    buf[0]
}

#[inline]
pub(crate) fn write_slot<M: Memory>(memory: &mut M, index: u64, value: i32) {
    memory.write(index, &[value]);
}

/// Reads the slots `[0, len)` into a vector.
pub(crate) fn read_prefix<M: Memory>(memory: &M, len: u64) -> Vec<i32> {
    let mut buf = vec![0; len as usize];
    memory.read(0, &mut buf);
    buf
}

/// Moves slots `[from, usage)` one slot to the right, leaving slot `from`
/// free for a new element.
///
/// Slots are moved through a fixed stack chunk, back to front, so the
/// shift never allocates.
///
/// PRECONDITION: usage < memory.size()
pub(crate) fn shift_right<M: Memory>(memory: &mut M, from: u64, usage: u64) {
    debug_assert!(usage < memory.size());
    let mut chunk = [0; CHUNK];
    let mut end = usage;
    while end > from {
        let n = (end - from).min(CHUNK as u64);
        let start = end - n;
        let buf = &mut chunk[..n as usize];
        memory.read(start, buf);
        memory.write(start + 1, buf);
        end = start;
    }
}

/// Moves slots `(at, usage)` one slot to the left, overwriting slot `at`,
/// and marks the vacated slot `usage - 1` with [`SENTINEL`].
///
/// Slots are moved through a fixed stack chunk, front to back.
///
/// PRECONDITION: at < usage <= memory.size()
pub(crate) fn shift_left<M: Memory>(memory: &mut M, at: u64, usage: u64) {
    debug_assert!(at < usage && usage <= memory.size());
    let mut chunk = [0; CHUNK];
    let mut start = at + 1;
    while start < usage {
        let n = (usage - start).min(CHUNK as u64);
        let buf = &mut chunk[..n as usize];
        memory.read(start, buf);
        memory.write(start - 1, buf);
        start += n;
    }
    write_slot(memory, usage - 1, SENTINEL);
}

/// Copies the slots `[0, len)` of `src` into the same slots of `dst`.
///
/// PRECONDITION: len <= src.size() && len <= dst.size()
pub(crate) fn copy_prefix<M: Memory, N: Memory>(src: &N, dst: &mut M, len: u64) {
    let mut chunk = [0; CHUNK];
    let mut offset = 0;
    while offset < len {
        let n = (len - offset).min(CHUNK as u64);
        let buf = &mut chunk[..n as usize];
        src.read(offset, buf);
        dst.write(offset, buf);
        offset += n;
    }
}

/// Writes [`SENTINEL`] into the slots `[from, to)`.
fn fill_sentinel<M: Memory>(memory: &mut M, from: u64, to: u64) {
    let chunk = [SENTINEL; CHUNK];
    let mut offset = from;
    while offset < to {
        let n = (to - offset).min(CHUNK as u64);
        memory.write(offset, &chunk[..n as usize]);
        offset += n;
    }
}
