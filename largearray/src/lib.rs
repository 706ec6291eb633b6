//! Numeric arrays whose length may exceed the bound of managed arrays.
//!
//! An array is backed by a vector as long as its length stays within
//! the managed limit. Longer arrays are allocated from native memory
//! and addressed by base pointer plus offset. Both backends expose the
//! same element access, bulk extraction, copy and clone operations.
//!
//! Native allocations are charged to a process-wide counter, see
//! [`native_memory_bytes`], and released exactly once when the owning
//! array is dropped.
pub mod array;
pub mod config;
pub mod copy;
pub mod counter;
pub mod element;
pub mod extract;
pub mod kind;
pub mod native;
pub mod ops;

pub use array::LargeArray;
pub use config::{LargeArrayConfig, LARGEST_MANAGED_LEN};
pub use copy::arraycopy;
pub use counter::{native_memory_bytes, MemoryCounter, NATIVE_MEMORY};
pub use element::{ComplexF32, Element, Logic};
pub use kind::ElementKind;
pub use largearray_common::error::{Error, Result};
pub use ops::{create, create_with_config, LargeArrayOps};

pub type LogicLargeArray = LargeArray<Logic>;
pub type ByteLargeArray = LargeArray<i8>;
pub type ShortLargeArray = LargeArray<i16>;
pub type IntLargeArray = LargeArray<i32>;
pub type LongLargeArray = LargeArray<i64>;
pub type FloatLargeArray = LargeArray<f32>;
pub type DoubleLargeArray = LargeArray<f64>;
pub type ComplexFloatLargeArray = LargeArray<ComplexF32>;

#[cfg(test)]
pub(crate) mod tests {
    use largearray_common::alloc::RawMemory;
    use largearray_common::error::{Error, Result};
    use std::ptr::NonNull;

    /// Memory that refuses every allocation.
    pub struct FailingMemory;

    impl RawMemory for FailingMemory {
        fn allocate(&self, bytes: usize) -> Result<NonNull<u8>> {
            Err(Error::InsufficientMemory(bytes))
        }

        unsafe fn free(&self, _ptr: NonNull<u8>, _bytes: usize) {
            unreachable!("nothing is ever allocated")
        }
    }
}
