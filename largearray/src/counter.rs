use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter of bytes held by native arrays.
pub static NATIVE_MEMORY: MemoryCounter = MemoryCounter::new();

/// Returns bytes currently held by native arrays charged to
/// the process-wide counter.
#[inline]
pub fn native_memory_bytes() -> u64 {
    NATIVE_MEMORY.get()
}

/// MemoryCounter tracks bytes of live native allocations.
///
/// Both directions saturate: the total sticks at `u64::MAX` instead
/// of wrapping, and never drops below zero.
#[derive(Debug, Default)]
pub struct MemoryCounter {
    bytes: AtomicU64,
}

impl MemoryCounter {
    #[inline]
    pub const fn new() -> Self {
        MemoryCounter {
            bytes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.bytes.load(Ordering::Acquire)
    }

    #[inline]
    pub fn increase(&self, bytes: u64) {
        // The closure always returns Some, so the update never fails.
        self.bytes
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| {
                Some(v.saturating_add(bytes))
            })
            .ok();
    }

    #[inline]
    pub fn decrease(&self, bytes: u64) {
        // The closure always returns Some, so the update never fails.
        self.bytes
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| {
                Some(v.saturating_sub(bytes))
            })
            .ok();
    }
}
