use crate::array::{check_copy_range, LargeArray, Storage};
use crate::element::Element;
use largearray_common::alloc;
use largearray_common::error::{Error, Result};

/// Copy `count` elements from `src` starting at `src_pos` to `dst`
/// starting at `dst_pos`.
///
/// Both arrays must have the same element width. Elements are copied
/// bit by bit, so copying between kinds of equal width reinterprets
/// the bits instead of converting values.
pub fn arraycopy<S: Element, D: Element>(
    src: &LargeArray<S>,
    src_pos: usize,
    dst: &mut LargeArray<D>,
    dst_pos: usize,
    count: usize,
) -> Result<()> {
    let width = S::KIND.width();
    if width != D::KIND.width() {
        return Err(Error::InvalidArgument(format!(
            "element width mismatch: {} of {} and {} of {}",
            width,
            S::KIND.to_lower(),
            D::KIND.width(),
            D::KIND.to_lower()
        )));
    }
    check_copy_range(src_pos, count, src.len())?;
    check_copy_range(dst_pos, count, dst.len())?;
    if count == 0 {
        return Ok(());
    }
    let src_start = src_pos * width;
    let dst_start = dst_pos * width;
    let bytes = count * width;
    match (src.storage(), dst.storage_mut()) {
        (Storage::Managed(s), Storage::Managed(d)) => {
            let s: &[u8] = bytemuck::cast_slice(s);
            let d: &mut [u8] = bytemuck::cast_slice_mut(d);
            d[dst_start..dst_start + bytes].copy_from_slice(&s[src_start..src_start + bytes]);
        }
        // # SAFETY
        //
        // Ranges of both sides are checked above, and two arrays
        // never share storage.
        (Storage::Managed(s), Storage::Native(d)) => unsafe {
            let s: &[u8] = bytemuck::cast_slice(s);
            alloc::copy_nonoverlapping(s.as_ptr().add(src_start), d.addr(dst_pos), bytes);
        },
        (Storage::Native(s), Storage::Managed(d)) => unsafe {
            let d: &mut [u8] = bytemuck::cast_slice_mut(d);
            alloc::copy_nonoverlapping(s.addr(src_pos), d.as_mut_ptr().add(dst_start), bytes);
        },
        (Storage::Native(s), Storage::Native(d)) => unsafe {
            alloc::copy_nonoverlapping(s.addr(src_pos), d.addr(dst_pos), bytes);
        },
    }
    Ok(())
}
