//! Shared precondition checks for array operations.
//!
//! Every backend runs the same checks before issuing any work, so a call
//! that fails here has touched nothing.

use crate::array::{Array1, Array2, PtrArray, Ragged, Region};
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::{Runtime, RuntimeClient};
use std::mem::size_of;

/// Check that `client` can operate on memory of `device`
///
/// # Errors
///
/// - `DeviceMismatch` if the device is not the client's
pub fn ensure_compatible<R, C>(client: &C, device: &R::Device, op: &'static str) -> Result<()>
where
    R: Runtime,
    C: RuntimeClient<R>,
{
    if client.is_compatible(device) {
        Ok(())
    } else {
        Err(Error::DeviceMismatch { op })
    }
}

/// Check that two device byte ranges `[begin, end)` do not overlap
///
/// Empty ranges never overlap anything.
///
/// # Errors
///
/// - `Aliasing` if the ranges share at least one byte
pub fn ensure_disjoint(a: (u64, u64), b: (u64, u64), op: &'static str) -> Result<()> {
    let a_empty = a.0 >= a.1;
    let b_empty = b.0 >= b.1;
    if a_empty || b_empty || a.1 <= b.0 || b.1 <= a.0 {
        Ok(())
    } else {
        Err(Error::Aliasing { op })
    }
}

/// Check that `region` holds `needed` bytes from `byte_offset`
///
/// # Errors
///
/// - `InsufficientCapacity` if the region ends earlier
pub fn ensure_region_holds<R: Runtime>(
    region: &Region<R>,
    byte_offset: usize,
    needed: usize,
    op: &'static str,
) -> Result<()> {
    let available = region.bytes_available(byte_offset);
    if available < needed {
        return Err(Error::InsufficientCapacity {
            op,
            needed,
            available,
        });
    }
    Ok(())
}

/// Check a scan's output length against its input length
///
/// Returns true when the output carries a trailing total.
///
/// # Errors
///
/// - `ShapeMismatch` unless `dest_dim` is `src_dim` or `src_dim + 1`
pub fn scan_has_total(src_dim: usize, dest_dim: usize) -> Result<bool> {
    if dest_dim == src_dim {
        Ok(false)
    } else if dest_dim == src_dim + 1 {
        Ok(true)
    } else {
        Err(Error::shape_mismatch(&[src_dim + 1], &[dest_dim]))
    }
}

/// Validate a transpose of `src` into `dest`
pub fn validate_transpose<R, C, T>(client: &C, src: &Array2<R, T>, dest: &Array2<R, T>) -> Result<()>
where
    R: Runtime,
    C: RuntimeClient<R>,
    T: Element,
{
    const OP: &str = "transpose";
    ensure_compatible::<R, C>(client, src.device(), OP)?;
    ensure_compatible::<R, C>(client, dest.device(), OP)?;
    if dest.dim0() != src.dim1() || dest.dim1() != src.dim0() {
        return Err(Error::shape_mismatch(
            &[src.dim1(), src.dim0()],
            &[dest.dim0(), dest.dim1()],
        ));
    }
    ensure_disjoint(src.footprint(), dest.footprint(), OP)
}

/// Validate a sequence scan of `src` into `dest`
pub fn validate_exclusive_sum<R, C, T>(
    client: &C,
    src: &Array1<R, T>,
    dest: &Array1<R, T>,
) -> Result<()>
where
    R: Runtime,
    C: RuntimeClient<R>,
    T: Element,
{
    const OP: &str = "exclusive_sum";
    ensure_compatible::<R, C>(client, src.device(), OP)?;
    ensure_compatible::<R, C>(client, dest.device(), OP)?;
    if scan_has_total(src.dim(), dest.dim())? {
        ensure_region_holds(
            src.region(),
            src.byte_offset(),
            dest.dim() * size_of::<T>(),
            OP,
        )?;
    }
    ensure_disjoint(src.footprint(), dest.footprint(), OP)
}

/// Validate a dereferencing scan of the table `src` into `dest`
///
/// Only the table itself is checked against `dest`; the pointed-to elements
/// are the caller's responsibility.
pub fn validate_exclusive_sum_deref<R, C, T>(
    client: &C,
    src: &PtrArray<R, T>,
    dest: &Array1<R, T>,
) -> Result<()>
where
    R: Runtime,
    C: RuntimeClient<R>,
    T: Element,
{
    const OP: &str = "exclusive_sum_deref";
    let table = src.addrs();
    ensure_compatible::<R, C>(client, table.device(), OP)?;
    ensure_compatible::<R, C>(client, dest.device(), OP)?;
    if scan_has_total(table.dim(), dest.dim())? {
        ensure_region_holds(
            table.region(),
            table.byte_offset(),
            dest.dim() * size_of::<u64>(),
            OP,
        )?;
    }
    ensure_disjoint(table.footprint(), dest.footprint(), OP)
}

/// Validate a per-axis scan of `src` into `dest`
pub fn validate_exclusive_sum_2d<R, C, T>(
    client: &C,
    src: &Array2<R, T>,
    dest: &Array2<R, T>,
    axis: usize,
) -> Result<()>
where
    R: Runtime,
    C: RuntimeClient<R>,
    T: Element,
{
    const OP: &str = "exclusive_sum_2d";
    ensure_compatible::<R, C>(client, src.device(), OP)?;
    ensure_compatible::<R, C>(client, dest.device(), OP)?;

    // (scanned, other) dimensions of each side
    let (src_major, src_minor, dest_major, dest_minor) = match axis {
        0 => (src.dim0(), src.dim1(), dest.dim0(), dest.dim1()),
        1 => (src.dim1(), src.dim0(), dest.dim1(), dest.dim0()),
        _ => {
            return Err(Error::invalid_argument(
                "axis",
                format!("axis {axis} is invalid for a 2-D array"),
            ));
        }
    };
    if dest_minor != src_minor {
        return Err(Error::shape_mismatch(&[src_minor], &[dest_minor]));
    }
    if scan_has_total(src_major, dest_major)? {
        ensure_region_holds(
            src.region(),
            src.byte_offset(),
            (src_major * src_minor + 1) * size_of::<T>(),
            OP,
        )?;
    }
    ensure_disjoint(src.footprint(), dest.footprint(), OP)
}

/// Validate the sources of a concatenation and return their lengths
pub fn validate_append<R, C, T>(client: &C, srcs: &[&Array1<R, T>]) -> Result<Vec<usize>>
where
    R: Runtime,
    C: RuntimeClient<R>,
    T: Element,
{
    if srcs.is_empty() {
        return Err(Error::invalid_argument(
            "srcs",
            "append needs at least one array",
        ));
    }
    srcs.iter()
        .map(|src| {
            ensure_compatible::<R, C>(client, src.device(), "append")?;
            Ok(src.dim())
        })
        .collect()
}

/// Validate a per-row maximum of `src` into `out`
pub fn validate_max_per_sublist<R, C, T>(
    client: &C,
    src: &Ragged<R, T>,
    out: &Array1<R, T>,
) -> Result<()>
where
    R: Runtime,
    C: RuntimeClient<R>,
    T: Element,
{
    const OP: &str = "max_per_sublist";
    if src.num_axes() != 2 {
        return Err(Error::invalid_argument(
            "src",
            format!("expected 2 axes, got {}", src.num_axes()),
        ));
    }
    ensure_compatible::<R, C>(client, src.device(), OP)?;
    ensure_compatible::<R, C>(client, src.shape().device(), OP)?;
    ensure_compatible::<R, C>(client, out.device(), OP)?;
    if out.dim() != src.num_rows() {
        return Err(Error::shape_mismatch(&[src.num_rows()], &[out.dim()]));
    }
    ensure_disjoint(src.shape().row_splits().footprint(), out.footprint(), OP)?;
    ensure_disjoint(src.values().footprint(), out.footprint(), OP)
}

/// Validate the bounds of a uniform draw
pub fn validate_rand_bounds<T: Element>(min_value: T, max_value: T) -> Result<()> {
    if max_value < min_value {
        return Err(Error::invalid_argument(
            "max_value",
            format!("max_value {max_value:?} is below min_value {min_value:?}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_ensure_disjoint() {
        assert!(ensure_disjoint((0, 8), (8, 16), "t").is_ok());
        assert!(ensure_disjoint((0, 8), (4, 4), "t").is_ok());
        assert!(matches!(
            ensure_disjoint((0, 9), (8, 16), "t"),
            Err(Error::Aliasing { op: "t" })
        ));
    }

    #[test]
    fn test_scan_has_total() {
        assert!(!scan_has_total(4, 4).unwrap());
        assert!(scan_has_total(4, 5).unwrap());
        assert!(scan_has_total(4, 6).is_err());
        assert!(scan_has_total(4, 3).is_err());
    }

    #[test]
    fn test_rand_bounds() {
        assert!(validate_rand_bounds(1.0f32, 1.0).is_ok());
        assert!(validate_rand_bounds(2i32, 1).is_err());
    }

    #[test]
    fn test_region_capacity() {
        let device = CpuDevice::new();
        let region = Region::<CpuRuntime>::new(16, &device).unwrap();
        assert!(ensure_region_holds(&region, 4, 12, "t").is_ok());
        assert!(matches!(
            ensure_region_holds(&region, 8, 12, "t"),
            Err(Error::InsufficientCapacity {
                needed: 12,
                available: 8,
                ..
            })
        ));
    }
}
