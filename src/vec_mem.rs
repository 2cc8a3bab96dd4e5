use crate::Memory;

/// A `Memory` backed by a heap-allocated `Vec<i32>`.
///
/// The size of the memory is exactly the length of the vector: growing
/// reserves the new slots up front with `try_reserve_exact`, so an
/// allocator refusal is reported instead of aborting the process.
#[derive(Clone, Debug, Default)]
pub struct VectorMemory(Vec<i32>);

impl VectorMemory {
    /// Creates an empty memory with no slots.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Memory for VectorMemory {
    fn size(&self) -> u64 {
        self.0.len() as u64
    }

    fn grow(&mut self, delta: u64) -> i64 {
        let previous_size = self.0.len();
        let Ok(delta) = usize::try_from(delta) else {
            return -1;
        };
        let Some(new_size) = previous_size.checked_add(delta) else {
            return -1;
        };
        if self.0.try_reserve_exact(delta).is_err() {
            return -1;
        }
        self.0.resize(new_size, 0);
        previous_size as i64
    }

    fn shrink(&mut self, new_size: u64) {
        assert!(new_size <= self.size(), "cannot shrink past the current size");
        self.0.truncate(new_size as usize);
        self.0.shrink_to_fit();
    }

    fn read(&self, offset: u64, dst: &mut [i32]) {
        let n = offset
            .checked_add(dst.len() as u64)
            .expect("read: out of bounds");

        if n > self.size() {
            panic!("read: out of bounds");
        }

        let offset = offset as usize;
        dst.copy_from_slice(&self.0[offset..offset + dst.len()]);
    }

    fn write(&mut self, offset: u64, src: &[i32]) {
        let n = offset
            .checked_add(src.len() as u64)
            .expect("write: out of bounds");

        if n > self.size() {
            panic!("write: out of bounds");
        }

        let offset = offset as usize;
        self.0[offset..offset + src.len()].copy_from_slice(src);
    }
}
