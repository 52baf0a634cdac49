//! Concatenation kernel

use crate::dtype::Element;

/// Copy each source, in order, into consecutive ranges of `out`
///
/// `sources` holds `(address, len)` pairs.
///
/// # Safety
/// - Each source address must be valid for `len` reads of `T`
/// - `out` must be valid for the sum of all `len` writes and must not overlap any source
pub unsafe fn append_kernel<T: Element>(sources: &[(u64, usize)], out: *mut T) {
    let mut offset = 0usize;
    for &(addr, len) in sources {
        if len > 0 {
            unsafe {
                std::ptr::copy_nonoverlapping(addr as *const T, out.add(offset), len);
            }
        }
        offset += len;
    }
}
