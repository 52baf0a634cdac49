//! Generic implementation of the per-axis matrix scan.
//!
//! ```text
//! axis 1:  dest.row(i) = exclusive_sum(src.row(i))      for every row
//! axis 0:  src ──transpose──► src_t ──rows──► dest_t ──transpose──► dest
//! ```
//!
//! The axis-0 path reuses the row scan on a transposed copy instead of a
//! column-strided scan kernel. `src_t` is allocated one element longer than
//! the matrix it holds.

use crate::array::{Array2, Region};
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::TransposeOps;
use crate::ops::common::validate_exclusive_sum_2d;
use crate::runtime::{Runtime, RuntimeClient};
use std::mem::size_of;

/// Backend hook: exclusive scan of every row of a strided matrix
///
/// Row `i` reads `cols - 1` elements from `src + i * src_stride0` and writes
/// `cols` elements to `dest + i * dest_stride0` (element strides). No checks
/// are performed.
pub trait ExclusiveSumRows<R: Runtime> {
    /// Scan `rows` rows, one after another
    ///
    /// # Safety
    /// Both strided footprints must be valid for the accesses described
    /// above and must not overlap.
    unsafe fn exclusive_sum_rows<T: Element>(
        &self,
        rows: usize,
        cols: usize,
        src: u64,
        src_stride0: usize,
        dest: u64,
        dest_stride0: usize,
    ) -> Result<()>;
}

/// Exclusive sum of `src` along `axis` into `dest`
pub fn exclusive_sum_2d_impl<R, C, T>(
    client: &C,
    src: &Array2<R, T>,
    dest: &mut Array2<R, T>,
    axis: usize,
) -> Result<()>
where
    R: Runtime,
    C: RuntimeClient<R> + TransposeOps<R> + ExclusiveSumRows<R>,
    T: Element,
{
    validate_exclusive_sum_2d(client, src, dest, axis)?;

    if axis == 1 {
        unsafe {
            client.exclusive_sum_rows::<T>(
                dest.dim0(),
                dest.dim1(),
                src.data_ptr(),
                src.elem_stride0(),
                dest.data_ptr(),
                dest.elem_stride0(),
            )?;
        }
        return client.synchronize();
    }

    let (rows, cols) = (src.dim0(), src.dim1());
    let out_rows = dest.dim0();
    let device = client.device();
    log::debug!(
        "exclusive_sum_2d: axis 0 of {}x{} through a transposed copy",
        rows,
        cols
    );

    let src_t_region = Region::<R>::new((rows * cols + 1) * size_of::<T>(), device)?;
    let mut src_t = Array2::from_region(src_t_region, 0, cols, rows, rows)?;
    client.transpose(src, &mut src_t)?;

    let dest_t = Array2::<R, T>::new(cols, out_rows, device)?;
    unsafe {
        client.exclusive_sum_rows::<T>(
            cols,
            out_rows,
            src_t.data_ptr(),
            src_t.elem_stride0(),
            dest_t.data_ptr(),
            dest_t.elem_stride0(),
        )?;
    }
    client.transpose(&dest_t, dest)
}
