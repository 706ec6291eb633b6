use crate::config::LargeArrayConfig;
use crate::counter::MemoryCounter;
use largearray_common::alloc::{self, RawMemory};
use largearray_common::error::{Error, Result};
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicPtr, Ordering};

/// Deallocator releases one native allocation.
///
/// It fires at most once, either explicitly or when dropped.
/// Firing frees the memory and takes the bytes off the counter,
/// any further call is a no-op. It can fire on any thread.
pub struct Deallocator {
    ptr: AtomicPtr<u8>,
    len: usize,
    width: usize,
    memory: &'static dyn RawMemory,
    counter: &'static MemoryCounter,
}

impl Deallocator {
    #[inline]
    fn new(
        ptr: NonNull<u8>,
        len: usize,
        width: usize,
        memory: &'static dyn RawMemory,
        counter: &'static MemoryCounter,
    ) -> Self {
        Deallocator {
            ptr: AtomicPtr::new(ptr.as_ptr()),
            len,
            width,
            memory,
            counter,
        }
    }

    #[inline]
    pub fn bytes(&self) -> usize {
        self.len * self.width
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.ptr.load(Ordering::Acquire).is_null()
    }

    /// Release the allocation. Returns whether this call freed it.
    ///
    /// The owning region must not access its memory afterwards.
    #[inline]
    pub(crate) fn release(&self) -> bool {
        let ptr = self.ptr.swap(ptr::null_mut(), Ordering::AcqRel);
        match NonNull::new(ptr) {
            Some(ptr) => {
                let bytes = self.bytes();
                // # SAFETY
                //
                // Pointer was swapped out, so only this call can free it.
                unsafe { self.memory.free(ptr, bytes) };
                self.counter.decrease(bytes as u64);
                log::debug!("released {} bytes of native memory", bytes);
                true
            }
            None => false,
        }
    }
}

impl Drop for Deallocator {
    #[inline]
    fn drop(&mut self) {
        self.release();
    }
}

/// NativeRegion is a raw memory block holding `len` elements
/// of `width` bytes, addressed by base pointer plus offset.
pub struct NativeRegion {
    base: NonNull<u8>,
    width: usize,
    dealloc: Deallocator,
}

// The region exclusively owns its block.
unsafe impl Send for NativeRegion {}
unsafe impl Sync for NativeRegion {}

impl NativeRegion {
    /// Allocate a zeroed region and charge its bytes to the
    /// configured counter.
    #[inline]
    pub fn allocate(len: usize, width: usize, config: &LargeArrayConfig) -> Result<Self> {
        Self::alloc(len, width, true, config)
    }

    /// Allocate a region without initializing its content.
    ///
    /// # Safety
    ///
    /// Every element must be written before it is read, including
    /// reads through [`NativeRegion::as_bytes`].
    #[inline]
    pub unsafe fn allocate_uninit(
        len: usize,
        width: usize,
        config: &LargeArrayConfig,
    ) -> Result<Self> {
        Self::alloc(len, width, false, config)
    }

    fn alloc(len: usize, width: usize, zero: bool, config: &LargeArrayConfig) -> Result<Self> {
        let bytes = len.checked_mul(width).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "{} elements of width {} overflow byte address range",
                len, width
            ))
        })?;
        let base = config.memory.allocate(bytes)?;
        if zero {
            // # SAFETY
            //
            // The block is just allocated with exactly this size.
            unsafe { alloc::zero(base.as_ptr(), bytes) };
        }
        let dealloc = Deallocator::new(base, len, width, config.memory, config.counter);
        config.counter.increase(bytes as u64);
        log::debug!(
            "allocated {} bytes of native memory for {} elements, zeroed={}",
            bytes,
            len,
            zero
        );
        Ok(NativeRegion {
            base,
            width,
            dealloc,
        })
    }

    #[inline]
    pub fn bytes(&self) -> usize {
        self.dealloc.bytes()
    }

    #[inline]
    pub fn deallocator(&self) -> &Deallocator {
        &self.dealloc
    }

    /// Returns address of element at given index.
    ///
    /// # Safety
    ///
    /// Index must be less than or equal to length.
    #[inline]
    pub unsafe fn addr(&self, idx: usize) -> *mut u8 {
        self.base.as_ptr().add(idx * self.width)
    }

    /// Read element at given index.
    ///
    /// # Safety
    ///
    /// Index must be within bound, and T must have the width of
    /// the region and accept any bit pattern.
    #[inline]
    pub unsafe fn read<T: Copy>(&self, idx: usize) -> T {
        alloc::read::<T>(self.addr(idx))
    }

    /// Write element at given index.
    ///
    /// # Safety
    ///
    /// Index must be within bound, and T must have the width of
    /// the region.
    #[inline]
    pub unsafe fn write<T: Copy>(&mut self, idx: usize, val: T) {
        alloc::write::<T>(self.addr(idx), val)
    }

    /// Returns the whole region as bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        // # SAFETY
        //
        // Region is never reallocated, and remains valid until dropped.
        unsafe { std::slice::from_raw_parts(self.base.as_ptr(), self.bytes()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::FailingMemory;

    static COUNTER: MemoryCounter = MemoryCounter::new();
    static FAILING: FailingMemory = FailingMemory;
    static FAILING_COUNTER: MemoryCounter = MemoryCounter::new();

    #[test]
    fn test_native_region_lifecycle() -> Result<()> {
        let config = LargeArrayConfig::new(0).with_counter(&COUNTER);
        let before = COUNTER.get();
        {
            let mut region = NativeRegion::allocate(16, 8, &config)?;
            assert_eq!(128, region.bytes());
            assert!(region.as_bytes().iter().all(|b| *b == 0));
            unsafe {
                region.write::<i64>(3, -5);
                assert_eq!(-5i64, region.read::<i64>(3));
            }
            assert_eq!(before + 128, COUNTER.get());
        }
        assert_eq!(before, COUNTER.get());
        Ok(())
    }

    #[test]
    fn test_allocate_zeroes_reused_memory() -> Result<()> {
        static LOCAL: MemoryCounter = MemoryCounter::new();
        let config = LargeArrayConfig::new(0).with_counter(&LOCAL);
        for _ in 0..20 {
            let mut region = NativeRegion::allocate(64, 8, &config)?;
            assert!(region.as_bytes().iter().all(|b| *b == 0));
            for i in 0..64 {
                unsafe { region.write::<u64>(i, 0x5a5a_5a5a_5a5a_5a5a) };
            }
        }
        assert_eq!(0, LOCAL.get());
        Ok(())
    }

    #[test]
    fn test_deallocator_idempotent() -> Result<()> {
        static LOCAL: MemoryCounter = MemoryCounter::new();
        let config = LargeArrayConfig::new(0).with_counter(&LOCAL);
        let region = unsafe { NativeRegion::allocate_uninit(10, 4, &config)? };
        assert_eq!(40, LOCAL.get());
        let dealloc = region.deallocator();
        assert!(!dealloc.is_released());
        assert!(dealloc.release());
        assert_eq!(0, LOCAL.get());
        assert!(!dealloc.release());
        assert!(dealloc.is_released());
        assert_eq!(0, LOCAL.get());
        // dropping the region must not free again.
        drop(region);
        assert_eq!(0, LOCAL.get());
        Ok(())
    }

    #[test]
    fn test_release_on_other_thread() -> Result<()> {
        static LOCAL: MemoryCounter = MemoryCounter::new();
        let config = LargeArrayConfig::new(0).with_counter(&LOCAL);
        let region = NativeRegion::allocate(100, 2, &config)?;
        assert_eq!(200, LOCAL.get());
        std::thread::spawn(move || drop(region)).join().unwrap();
        assert_eq!(0, LOCAL.get());
        Ok(())
    }

    #[test]
    fn test_allocation_failure() {
        let config = LargeArrayConfig::new(0)
            .with_memory(&FAILING)
            .with_counter(&FAILING_COUNTER);
        let res = NativeRegion::allocate(100, 8, &config);
        assert!(matches!(res, Err(Error::InsufficientMemory(800))));
        assert_eq!(0, FAILING_COUNTER.get());
    }

    #[test]
    fn test_byte_size_overflow() {
        let config = LargeArrayConfig::new(0).with_counter(&FAILING_COUNTER);
        let res = NativeRegion::allocate(usize::MAX / 2, 8, &config);
        assert!(matches!(res, Err(Error::InvalidArgument(_))));
        assert_eq!(0, FAILING_COUNTER.get());
    }
}
