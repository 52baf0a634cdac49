//! Flat (1-D) array view

use super::region::Region;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::{Runtime, RuntimeClient};
use std::marker::PhantomData;
use std::mem::size_of;

/// One-dimensional view of `dim` elements starting at a byte offset of a region
///
/// The view never outgrows its region: every constructor checks that
/// `[byte_offset, byte_offset + dim * size_of::<T>())` lies inside the region.
/// Bytes of the region past the view stay reachable through
/// [`capacity`](Self::capacity), which is what trailing-total scans rely on.
pub struct Array1<R: Runtime, T: Element> {
    region: Region<R>,
    byte_offset: usize,
    dim: usize,
    _marker: PhantomData<T>,
}

impl<R: Runtime, T: Element> Array1<R, T> {
    /// Allocate `dim` zeroed elements
    pub fn new(dim: usize, device: &R::Device) -> Result<Self> {
        Self::with_capacity(dim, dim, device)
    }

    /// Allocate `dim` zeroed elements backed by room for `capacity`
    pub fn with_capacity(dim: usize, capacity: usize, device: &R::Device) -> Result<Self> {
        if capacity < dim {
            return Err(Error::invalid_argument(
                "capacity",
                format!("capacity {capacity} is smaller than dim {dim}"),
            ));
        }
        let region = Region::new(capacity * size_of::<T>(), device)?;
        Ok(Self {
            region,
            byte_offset: 0,
            dim,
            _marker: PhantomData,
        })
    }

    /// Copy `data` to a new array on `device`
    pub fn from_slice(data: &[T], device: &R::Device) -> Result<Self> {
        let region = Region::from_bytes(bytemuck::cast_slice(data), device)?;
        Ok(Self {
            region,
            byte_offset: 0,
            dim: data.len(),
            _marker: PhantomData,
        })
    }

    /// View `dim` elements of `region` starting at `byte_offset`
    pub fn from_region(region: Region<R>, byte_offset: usize, dim: usize) -> Result<Self> {
        if byte_offset % std::mem::align_of::<T>() != 0 {
            return Err(Error::invalid_argument(
                "byte_offset",
                format!("{byte_offset} is not aligned for {}", T::DTYPE),
            ));
        }
        let needed = dim * size_of::<T>();
        let available = region.bytes_available(byte_offset);
        if byte_offset > region.num_bytes() || needed > available {
            return Err(Error::InsufficientCapacity {
                op: "Array1::from_region",
                needed,
                available,
            });
        }
        Ok(Self {
            region,
            byte_offset,
            dim,
            _marker: PhantomData,
        })
    }

    /// Number of elements
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of elements (alias of [`dim`](Self::dim))
    #[inline]
    pub fn len(&self) -> usize {
        self.dim
    }

    /// Check if the view has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// Backing region
    #[inline]
    pub fn region(&self) -> &Region<R> {
        &self.region
    }

    /// Offset of element 0 within the region, in bytes
    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Device of the backing region
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.region.device()
    }

    /// Device address of element 0
    #[inline]
    pub fn data_ptr(&self) -> u64 {
        self.region.ptr() + self.byte_offset as u64
    }

    /// Elements that fit between element 0 and the end of the region
    #[inline]
    pub fn capacity(&self) -> usize {
        self.region.bytes_available(self.byte_offset) / size_of::<T>()
    }

    /// Device address of element `i`
    pub fn element_addr(&self, i: usize) -> Result<u64> {
        if i >= self.dim {
            return Err(Error::IndexOutOfBounds {
                index: i,
                size: self.dim,
            });
        }
        Ok(self.data_ptr() + (i * size_of::<T>()) as u64)
    }

    /// Sub-view of `len` elements starting at element `start`
    pub fn range(&self, start: usize, len: usize) -> Result<Self> {
        let end = start.checked_add(len).unwrap_or(usize::MAX);
        if end > self.dim {
            return Err(Error::IndexOutOfBounds {
                index: end,
                size: self.dim,
            });
        }
        Ok(Self {
            region: self.region.clone(),
            byte_offset: self.byte_offset + start * size_of::<T>(),
            dim: len,
            _marker: PhantomData,
        })
    }

    /// Whether `client` can operate on this array's memory
    #[inline]
    pub fn is_compatible(&self, client: &R::Client) -> bool {
        client.is_compatible(self.device())
    }

    /// Device byte range `[begin, end)` covered by the view
    #[inline]
    pub fn footprint(&self) -> (u64, u64) {
        let begin = self.data_ptr();
        (begin, begin + (self.dim * size_of::<T>()) as u64)
    }

    /// Copy the elements to the host
    pub fn to_vec(&self) -> Result<Vec<T>> {
        let mut out = vec![T::zero(); self.dim];
        if self.dim > 0 {
            R::copy_from_device(
                self.data_ptr(),
                bytemuck::cast_slice_mut(&mut out),
                self.device(),
            )?;
        }
        Ok(out)
    }

    /// Copy the elements to a new array on another backend's device
    pub fn to_device<R2: Runtime>(&self, device: &R2::Device) -> Result<Array1<R2, T>> {
        Array1::from_slice(&self.to_vec()?, device)
    }
}

impl<R: Runtime, T: Element> Clone for Array1<R, T> {
    /// Clone shares the region (zero-copy)
    fn clone(&self) -> Self {
        Self {
            region: self.region.clone(),
            byte_offset: self.byte_offset,
            dim: self.dim,
            _marker: PhantomData,
        }
    }
}

impl<R: Runtime, T: Element> std::fmt::Debug for Array1<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Array1")
            .field("dtype", &T::DTYPE)
            .field("dim", &self.dim)
            .field("byte_offset", &self.byte_offset)
            .field("region", &self.region)
            .finish()
    }
}
