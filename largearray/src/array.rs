use crate::config::LargeArrayConfig;
use crate::copy::arraycopy;
use crate::element::Element;
use crate::kind::ElementKind;
use crate::native::NativeRegion;
use largearray_common::alloc;
use largearray_common::error::{Error, Result};
use std::fmt;

/// Storage of a large array, either a managed vector or a
/// native region. Exactly one is populated.
pub(crate) enum Storage<T> {
    Managed(Vec<T>),
    Native(NativeRegion),
}

/// LargeArray is an array of primitive elements whose length may
/// exceed the bound of managed arrays.
///
/// Short arrays are backed by a vector. Arrays longer than the
/// configured managed limit live in a native region, which is freed
/// exactly once when the array is dropped.
pub struct LargeArray<T> {
    storage: Storage<T>,
    len: usize,
    config: LargeArrayConfig,
}

#[allow(clippy::len_without_is_empty)]
impl<T: Element> LargeArray<T> {
    /// Create a zero-initialized array with given length.
    #[inline]
    pub fn new(len: i64) -> Result<Self> {
        Self::with_config(len, LargeArrayConfig::default())
    }

    /// Create a zero-initialized array with given length and configuration.
    #[inline]
    pub fn with_config(len: i64, config: LargeArrayConfig) -> Result<Self> {
        Self::alloc(checked_len(len)?, true, config)
    }

    /// Create an array with given length, leaving native storage
    /// uninitialized. Managed storage is always zero-initialized.
    ///
    /// # Safety
    ///
    /// Every element must be written before it is read, through
    /// element access, bulk extraction, byte view or copy.
    #[inline]
    pub unsafe fn new_uninit(len: i64) -> Result<Self> {
        Self::with_config_uninit(len, LargeArrayConfig::default())
    }

    /// Create an array with given configuration, leaving native
    /// storage uninitialized.
    ///
    /// # Safety
    ///
    /// Same as [`LargeArray::new_uninit`].
    #[inline]
    pub unsafe fn with_config_uninit(len: i64, config: LargeArrayConfig) -> Result<Self> {
        Self::alloc(checked_len(len)?, false, config)
    }

    /// Wrap given vector without copying. The array is always
    /// managed, regardless of the managed limit.
    #[inline]
    pub fn from_vec(data: Vec<T>) -> Result<Self> {
        Self::from_vec_with_config(data, LargeArrayConfig::default())
    }

    #[inline]
    pub fn from_vec_with_config(data: Vec<T>, config: LargeArrayConfig) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::InvalidArgument(
                "0 is not a positive length".to_string(),
            ));
        }
        Ok(LargeArray {
            len: data.len(),
            storage: Storage::Managed(data),
            config,
        })
    }

    /// Allocate storage by the managed limit of `config`. Native
    /// storage is left uninitialized if `zero` is false, so callers
    /// passing false must overwrite all elements before any read.
    fn alloc(len: usize, zero: bool, config: LargeArrayConfig) -> Result<Self> {
        let storage = if len > config.managed_limit {
            let width = T::KIND.width();
            let region = if zero {
                NativeRegion::allocate(len, width, &config)?
            } else {
                // # SAFETY
                //
                // Callers either write every element or come through
                // an unsafe constructor with the same contract.
                unsafe { NativeRegion::allocate_uninit(len, width, &config)? }
            };
            Storage::Native(region)
        } else {
            Storage::Managed(vec![T::default(); len])
        };
        Ok(LargeArray {
            storage,
            len,
            config,
        })
    }

    #[inline]
    pub fn kind(&self) -> ElementKind {
        T::KIND
    }

    #[inline]
    pub fn element_width(&self) -> usize {
        T::KIND.width()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the array is stored in native memory.
    #[inline]
    pub fn is_large(&self) -> bool {
        matches!(self.storage, Storage::Native(_))
    }

    #[inline]
    pub fn config(&self) -> &LargeArrayConfig {
        &self.config
    }

    #[inline]
    pub(crate) fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    #[inline]
    pub(crate) fn storage_mut(&mut self) -> &mut Storage<T> {
        &mut self.storage
    }

    /// Returns element at given index.
    ///
    /// Panics if index is out of bound.
    #[inline]
    pub fn get(&self, idx: usize) -> T {
        match &self.storage {
            Storage::Managed(data) => data[idx],
            Storage::Native(region) => {
                assert!(idx < self.len, "index {} out of bound {}", idx, self.len);
                // # SAFETY
                //
                // Index is checked, and element width matches the region.
                unsafe { region.read::<T>(idx) }
            }
        }
    }

    /// Returns element at given index without bound check.
    ///
    /// # Safety
    ///
    /// Index must be less than length.
    #[inline]
    pub unsafe fn get_unchecked(&self, idx: usize) -> T {
        match &self.storage {
            Storage::Managed(data) => *data.get_unchecked(idx),
            Storage::Native(region) => region.read::<T>(idx),
        }
    }

    /// Update element at given index.
    ///
    /// Panics if index is out of bound.
    #[inline]
    pub fn set(&mut self, idx: usize, val: T) {
        match &mut self.storage {
            Storage::Managed(data) => data[idx] = val,
            Storage::Native(region) => {
                assert!(idx < self.len, "index {} out of bound {}", idx, self.len);
                // # SAFETY
                //
                // Index is checked, and element width matches the region.
                unsafe { region.write::<T>(idx, val) }
            }
        }
    }

    /// Update element at given index without bound check.
    ///
    /// # Safety
    ///
    /// Index must be less than length.
    #[inline]
    pub unsafe fn set_unchecked(&mut self, idx: usize, val: T) {
        match &mut self.storage {
            Storage::Managed(data) => *data.get_unchecked_mut(idx) = val,
            Storage::Native(region) => region.write::<T>(idx, val),
        }
    }

    /// Returns the managed vector by reference.
    /// Native arrays return None.
    #[inline]
    pub fn get_data(&self) -> Option<&[T]> {
        match &self.storage {
            Storage::Managed(data) => Some(data),
            Storage::Native(_) => None,
        }
    }

    /// Consume the array and return the managed vector.
    /// Native arrays are handed back unchanged.
    #[inline]
    pub fn into_vec(self) -> std::result::Result<Vec<T>, Self> {
        match self.storage {
            Storage::Managed(data) => Ok(data),
            storage => Err(LargeArray {
                storage,
                len: self.len,
                config: self.config,
            }),
        }
    }

    /// Returns all elements as raw bytes in native endianness.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.storage {
            Storage::Managed(data) => bytemuck::cast_slice(data),
            Storage::Native(region) => region.as_bytes(),
        }
    }

    /// Returns an independent copy of the array.
    ///
    /// The clone is allocated by the same configuration, so a native
    /// array yields a native clone. Content is copied byte by byte.
    pub fn try_clone(&self) -> Result<Self> {
        // The full range is copied right away.
        let mut res = Self::alloc(self.len, false, self.config)?;
        arraycopy(self, 0, &mut res, 0, self.len)?;
        Ok(res)
    }

    /// Copy `count` elements from `src_pos` to `dst_pos` within
    /// this array. The ranges may overlap.
    pub fn copy_within(&mut self, src_pos: usize, dst_pos: usize, count: usize) -> Result<()> {
        check_copy_range(src_pos, count, self.len)?;
        check_copy_range(dst_pos, count, self.len)?;
        match &mut self.storage {
            Storage::Managed(data) => data.copy_within(src_pos..src_pos + count, dst_pos),
            Storage::Native(region) => {
                // # SAFETY
                //
                // Both ranges are checked to be within the region.
                unsafe {
                    let src = region.addr(src_pos);
                    let dst = region.addr(dst_pos);
                    alloc::copy(src, dst, count * T::KIND.width());
                }
            }
        }
        Ok(())
    }
}

#[inline]
fn checked_len(len: i64) -> Result<usize> {
    if len <= 0 {
        return Err(Error::InvalidArgument(format!(
            "{} is not a positive length",
            len
        )));
    }
    usize::try_from(len)
        .map_err(|_| Error::InvalidArgument(format!("{} exceeds address space of platform", len)))
}

#[inline]
pub(crate) fn check_copy_range(pos: usize, count: usize, len: usize) -> Result<()> {
    match pos.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        _ => Err(Error::IndexOutOfBound(format!(
            "range {}+{} exceeds length {}",
            pos, count, len
        ))),
    }
}

impl<T: Element> fmt::Debug for LargeArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LargeArray")
            .field("kind", &T::KIND)
            .field("len", &self.len)
            .field("large", &self.is_large())
            .finish()
    }
}
