use crate::error::{Error, Result};
use libc::{c_void, posix_memalign};
use std::mem::align_of;
use std::ptr::{self, NonNull};

/// All native blocks are aligned to 16 bytes, which covers every
/// primitive element width.
pub const ALIGNMENT: usize = 16;

/// RawMemory is the platform capability behind native arrays.
///
/// Implementations only allocate and release untyped blocks.
/// Typed access goes through [`read`] and [`write`] on addresses
/// derived from the returned base pointer.
pub trait RawMemory: Send + Sync {
    /// Allocate a block of given bytes, aligned to [`ALIGNMENT`].
    /// Content of the block is unspecified.
    fn allocate(&self, bytes: usize) -> Result<NonNull<u8>>;

    /// Release a block returned by [`RawMemory::allocate`].
    ///
    /// # Safety
    ///
    /// Caller must guarantee the pointer and size are identical to
    /// the allocation, and only call this method once. After this
    /// call, the memory must not be used.
    unsafe fn free(&self, ptr: NonNull<u8>, bytes: usize);
}

/// SystemMemory allocates from the process heap via libc.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMemory;

pub static SYSTEM_MEMORY: SystemMemory = SystemMemory;

impl RawMemory for SystemMemory {
    #[inline]
    fn allocate(&self, bytes: usize) -> Result<NonNull<u8>> {
        // posix_memalign may return null or a unique pointer for zero size.
        let size = usize::max(bytes, ALIGNMENT);
        let mut ptr: *mut c_void = ptr::null_mut();
        let ret = unsafe { posix_memalign(&mut ptr, ALIGNMENT, size) };
        if ret != 0 {
            log::warn!("failed to allocate {} bytes of native memory, errno {}", bytes, ret);
            return Err(Error::InsufficientMemory(bytes));
        }
        NonNull::new(ptr as *mut u8).ok_or(Error::InsufficientMemory(bytes))
    }

    #[inline]
    unsafe fn free(&self, ptr: NonNull<u8>, _bytes: usize) {
        libc::free(ptr.as_ptr() as *mut c_void)
    }
}

/// Read a value of type T at given address.
///
/// # Safety
///
/// The address must be valid for reads of `size_of::<T>()` bytes,
/// aligned for T, and hold a valid bit pattern of T.
#[inline]
pub unsafe fn read<T: Copy>(addr: *const u8) -> T {
    debug_assert!(addr as usize % align_of::<T>() == 0);
    ptr::read(addr as *const T)
}

/// Write a value of type T at given address.
///
/// # Safety
///
/// The address must be valid for writes of `size_of::<T>()` bytes
/// and aligned for T.
#[inline]
pub unsafe fn write<T: Copy>(addr: *mut u8, val: T) {
    debug_assert!(addr as usize % align_of::<T>() == 0);
    ptr::write(addr as *mut T, val)
}

/// Overwrite given number of bytes with zero.
///
/// # Safety
///
/// The address must be valid for writes of `bytes` bytes.
#[inline]
pub unsafe fn zero(addr: *mut u8, bytes: usize) {
    ptr::write_bytes(addr, 0, bytes)
}

/// Copy bytes between two blocks. The blocks may overlap.
///
/// # Safety
///
/// Source must be valid for reads and target must be valid for
/// writes of `bytes` bytes.
#[inline]
pub unsafe fn copy(src: *const u8, tgt: *mut u8, bytes: usize) {
    ptr::copy(src, tgt, bytes)
}

/// Copy bytes between two disjoint blocks.
///
/// # Safety
///
/// Same as [`copy`], and the blocks must not overlap.
#[inline]
pub unsafe fn copy_nonoverlapping(src: *const u8, tgt: *mut u8, bytes: usize) {
    ptr::copy_nonoverlapping(src, tgt, bytes)
}
