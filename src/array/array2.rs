//! Matrix (2-D) array view with a row stride

use super::array1::Array1;
use super::region::Region;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::{Runtime, RuntimeClient};
use std::marker::PhantomData;
use std::mem::size_of;

/// Row-major `dim0 x dim1` view with `elem_stride0` elements between row starts
///
/// Element `(i, j)` lives at `data[i * elem_stride0 + j]`. The view is
/// contiguous when `elem_stride0 == dim1`; column sub-views keep the parent
/// stride and are therefore strided.
pub struct Array2<R: Runtime, T: Element> {
    region: Region<R>,
    byte_offset: usize,
    dim0: usize,
    dim1: usize,
    elem_stride0: usize,
    _marker: PhantomData<T>,
}

impl<R: Runtime, T: Element> Array2<R, T> {
    /// Allocate a zeroed contiguous `dim0 x dim1` matrix
    pub fn new(dim0: usize, dim1: usize, device: &R::Device) -> Result<Self> {
        let region = Region::new(dim0 * dim1 * size_of::<T>(), device)?;
        Ok(Self {
            region,
            byte_offset: 0,
            dim0,
            dim1,
            elem_stride0: dim1,
            _marker: PhantomData,
        })
    }

    /// Copy row-major `data` into a new contiguous matrix
    pub fn from_slice(data: &[T], dim0: usize, dim1: usize, device: &R::Device) -> Result<Self> {
        if data.len() != dim0 * dim1 {
            return Err(Error::shape_mismatch(&[dim0 * dim1], &[data.len()]));
        }
        let region = Region::from_bytes(bytemuck::cast_slice(data), device)?;
        Ok(Self {
            region,
            byte_offset: 0,
            dim0,
            dim1,
            elem_stride0: dim1,
            _marker: PhantomData,
        })
    }

    /// View a strided matrix inside `region`
    ///
    /// Requires `elem_stride0 >= dim1` and the whole footprint
    /// `((dim0 - 1) * elem_stride0 + dim1)` elements inside the region.
    pub fn from_region(
        region: Region<R>,
        byte_offset: usize,
        dim0: usize,
        dim1: usize,
        elem_stride0: usize,
    ) -> Result<Self> {
        if elem_stride0 < dim1 {
            return Err(Error::invalid_argument(
                "elem_stride0",
                format!("row stride {elem_stride0} is smaller than dim1 {dim1}"),
            ));
        }
        if byte_offset % std::mem::align_of::<T>() != 0 {
            return Err(Error::invalid_argument(
                "byte_offset",
                format!("{byte_offset} is not aligned for {}", T::DTYPE),
            ));
        }
        let needed = footprint_elems(dim0, dim1, elem_stride0) * size_of::<T>();
        let available = region.bytes_available(byte_offset);
        if byte_offset > region.num_bytes() || needed > available {
            return Err(Error::InsufficientCapacity {
                op: "Array2::from_region",
                needed,
                available,
            });
        }
        Ok(Self {
            region,
            byte_offset,
            dim0,
            dim1,
            elem_stride0,
            _marker: PhantomData,
        })
    }

    /// View a flat array as a contiguous `dim0 x dim1` matrix
    pub fn from_array1(array: &Array1<R, T>, dim0: usize, dim1: usize) -> Result<Self> {
        if array.dim() != dim0 * dim1 {
            return Err(Error::shape_mismatch(&[dim0, dim1], &[array.dim()]));
        }
        Self::from_region(array.region().clone(), array.byte_offset(), dim0, dim1, dim1)
    }

    /// Number of rows
    #[inline]
    pub fn dim0(&self) -> usize {
        self.dim0
    }

    /// Number of columns
    #[inline]
    pub fn dim1(&self) -> usize {
        self.dim1
    }

    /// Elements between consecutive row starts
    #[inline]
    pub fn elem_stride0(&self) -> usize {
        self.elem_stride0
    }

    /// Number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.dim0 * self.dim1
    }

    /// True if rows follow each other with no gap
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.elem_stride0 == self.dim1
    }

    /// Backing region
    #[inline]
    pub fn region(&self) -> &Region<R> {
        &self.region
    }

    /// Offset of element `(0, 0)` within the region, in bytes
    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Device of the backing region
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.region.device()
    }

    /// Device address of element `(0, 0)`
    #[inline]
    pub fn data_ptr(&self) -> u64 {
        self.region.ptr() + self.byte_offset as u64
    }

    /// Whether `client` can operate on this array's memory
    #[inline]
    pub fn is_compatible(&self, client: &R::Client) -> bool {
        client.is_compatible(self.device())
    }

    /// Device byte range `[begin, end)` spanned by the view, gaps included
    #[inline]
    pub fn footprint(&self) -> (u64, u64) {
        let begin = self.data_ptr();
        let len = footprint_elems(self.dim0, self.dim1, self.elem_stride0) * size_of::<T>();
        (begin, begin + len as u64)
    }

    /// Row `i` as a flat view
    pub fn row(&self, i: usize) -> Result<Array1<R, T>> {
        if i >= self.dim0 {
            return Err(Error::IndexOutOfBounds {
                index: i,
                size: self.dim0,
            });
        }
        Array1::from_region(
            self.region.clone(),
            self.byte_offset + i * self.elem_stride0 * size_of::<T>(),
            self.dim1,
        )
    }

    /// Columns `start..start + len` as a strided view
    pub fn col_range(&self, start: usize, len: usize) -> Result<Self> {
        let end = start.checked_add(len).unwrap_or(usize::MAX);
        if end > self.dim1 {
            return Err(Error::IndexOutOfBounds {
                index: end,
                size: self.dim1,
            });
        }
        Ok(Self {
            region: self.region.clone(),
            byte_offset: self.byte_offset + start * size_of::<T>(),
            dim0: self.dim0,
            dim1: len,
            elem_stride0: self.elem_stride0,
            _marker: PhantomData,
        })
    }

    /// Contiguous flat view of all elements, if the matrix is packed
    pub fn flatten(&self) -> Result<Array1<R, T>> {
        if !self.is_contiguous() && self.dim0 > 1 {
            return Err(Error::invalid_argument(
                "self",
                "flatten requires a contiguous matrix",
            ));
        }
        Array1::from_region(self.region.clone(), self.byte_offset, self.numel())
    }

    /// Copy the elements to the host in packed row-major order
    pub fn to_vec(&self) -> Result<Vec<T>> {
        let footprint = footprint_elems(self.dim0, self.dim1, self.elem_stride0);
        let mut raw = vec![T::zero(); footprint];
        if footprint > 0 {
            R::copy_from_device(
                self.data_ptr(),
                bytemuck::cast_slice_mut(&mut raw),
                self.device(),
            )?;
        }
        if self.is_contiguous() {
            return Ok(raw);
        }

        let mut out = Vec::with_capacity(self.numel());
        for i in 0..self.dim0 {
            let row = i * self.elem_stride0;
            out.extend_from_slice(&raw[row..row + self.dim1]);
        }
        Ok(out)
    }

    /// Copy to a new contiguous matrix on another backend's device
    pub fn to_device<R2: Runtime>(&self, device: &R2::Device) -> Result<Array2<R2, T>> {
        Array2::from_slice(&self.to_vec()?, self.dim0, self.dim1, device)
    }
}

/// Elements from `(0, 0)` through `(dim0 - 1, dim1 - 1)` inclusive
#[inline]
pub(crate) fn footprint_elems(dim0: usize, dim1: usize, elem_stride0: usize) -> usize {
    if dim0 == 0 || dim1 == 0 {
        0
    } else {
        (dim0 - 1) * elem_stride0 + dim1
    }
}

impl<R: Runtime, T: Element> Clone for Array2<R, T> {
    /// Clone shares the region (zero-copy)
    fn clone(&self) -> Self {
        Self {
            region: self.region.clone(),
            byte_offset: self.byte_offset,
            dim0: self.dim0,
            dim1: self.dim1,
            elem_stride0: self.elem_stride0,
            _marker: PhantomData,
        }
    }
}

impl<R: Runtime, T: Element> std::fmt::Debug for Array2<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Array2")
            .field("dtype", &T::DTYPE)
            .field("dim0", &self.dim0)
            .field("dim1", &self.dim1)
            .field("elem_stride0", &self.elem_stride0)
            .field("byte_offset", &self.byte_offset)
            .finish()
    }
}
