//! Exclusive prefix-sum kernel

use crate::dtype::Element;
use crate::runtime::kernel::ScanInput;

/// Running-sum exclusive scan
///
/// Writes `out[k] = input[0] + ... + input[k - 1]` for every `k < num_items`,
/// so `out[0]` is zero. Only `input[0..num_items - 1]` is read: the last
/// input never contributes to an output.
///
/// # Safety
/// - `input` must be readable for indices `0..num_items - 1`
/// - `out` must be valid for `num_items` writes
pub unsafe fn exclusive_sum_kernel<I: ScanInput>(input: I, num_items: usize, out: *mut I::Item) {
    let mut acc = <I::Item as Element>::zero();
    for k in 0..num_items {
        // Read before write so an in-place scan stays correct
        let next = if k + 1 < num_items {
            Some(unsafe { input.get(k) })
        } else {
            None
        };
        unsafe { *out.add(k) = acc };
        if let Some(v) = next {
            acc = acc + v;
        }
    }
}
