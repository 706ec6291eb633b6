use crate::counter::{MemoryCounter, NATIVE_MEMORY};
use largearray_common::alloc::{RawMemory, SYSTEM_MEMORY};
use std::fmt;

/// Largest length of a managed array.
/// Arrays longer than this are stored in native memory.
pub const LARGEST_MANAGED_LEN: usize = i32::MAX as usize - 1024;

/// Configuration of large arrays.
///
/// Each array captures its configuration at construction, so
/// clones follow the same storage policy as their source.
#[derive(Clone, Copy)]
pub struct LargeArrayConfig {
    /// Threshold of managed storage, in elements.
    /// It also caps the output length of bulk extraction.
    pub managed_limit: usize,
    /// Memory to allocate native storage from.
    pub memory: &'static dyn RawMemory,
    /// Counter charged with native allocations.
    pub counter: &'static MemoryCounter,
}

impl LargeArrayConfig {
    #[inline]
    pub fn new(managed_limit: usize) -> Self {
        LargeArrayConfig {
            managed_limit,
            memory: &SYSTEM_MEMORY,
            counter: &NATIVE_MEMORY,
        }
    }

    #[inline]
    pub fn with_memory(mut self, memory: &'static dyn RawMemory) -> Self {
        self.memory = memory;
        self
    }

    #[inline]
    pub fn with_counter(mut self, counter: &'static MemoryCounter) -> Self {
        self.counter = counter;
        self
    }
}

impl Default for LargeArrayConfig {
    #[inline]
    fn default() -> Self {
        LargeArrayConfig::new(LARGEST_MANAGED_LEN)
    }
}

impl fmt::Debug for LargeArrayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LargeArrayConfig")
            .field("managed_limit", &self.managed_limit)
            .field("counter", &self.counter.get())
            .finish()
    }
}
