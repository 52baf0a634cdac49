//! Region: device memory shared by every array that views it

use crate::error::Result;
use crate::runtime::Runtime;
use std::sync::Arc;

/// Reference-counted device allocation
///
/// Arrays are offset views into a region. Cloning a region (or an array)
/// shares the allocation; the memory is released when the last view drops.
pub struct Region<R: Runtime> {
    inner: Arc<RegionInner<R>>,
}

struct RegionInner<R: Runtime> {
    /// Raw device pointer
    ptr: u64,
    /// Capacity in bytes
    num_bytes: usize,
    /// Device where memory is allocated
    device: R::Device,
    /// If true, we own this memory and should deallocate on drop
    owned: bool,
}

impl<R: Runtime> Region<R> {
    /// Allocate `num_bytes` of zeroed memory on `device`
    pub fn new(num_bytes: usize, device: &R::Device) -> Result<Self> {
        let ptr = R::allocate(num_bytes, device)?;
        Ok(Self::wrap(ptr, num_bytes, device, true))
    }

    /// Allocate a region holding a copy of `data`
    pub fn from_bytes(data: &[u8], device: &R::Device) -> Result<Self> {
        let region = Self::new(data.len(), device)?;
        if !data.is_empty() {
            R::copy_to_device(data, region.ptr(), device)?;
        }
        Ok(region)
    }

    /// Wrap existing device memory without taking ownership
    ///
    /// # Safety
    /// - `ptr` must point to `num_bytes` of valid memory on `device`
    /// - The memory must outlive every view of this region
    pub unsafe fn from_ptr(ptr: u64, num_bytes: usize, device: &R::Device) -> Self {
        Self::wrap(ptr, num_bytes, device, false)
    }

    fn wrap(ptr: u64, num_bytes: usize, device: &R::Device, owned: bool) -> Self {
        Self {
            inner: Arc::new(RegionInner {
                ptr,
                num_bytes,
                device: device.clone(),
                owned,
            }),
        }
    }

    /// Get the raw device pointer
    #[inline]
    pub fn ptr(&self) -> u64 {
        self.inner.ptr
    }

    /// Capacity in bytes
    #[inline]
    pub fn num_bytes(&self) -> usize {
        self.inner.num_bytes
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.inner.device
    }

    /// Bytes addressable from `byte_offset` to the end of the region
    #[inline]
    pub fn bytes_available(&self, byte_offset: usize) -> usize {
        self.inner.num_bytes.saturating_sub(byte_offset)
    }

    /// Whether two handles share one allocation
    #[inline]
    pub fn same_region(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Get the reference count
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if this is the only reference
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }
}

impl<R: Runtime> Clone for Region<R> {
    /// Clone increments the reference count (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Runtime> Drop for RegionInner<R> {
    fn drop(&mut self) {
        if self.owned && self.ptr != 0 {
            R::deallocate(self.ptr, self.num_bytes, &self.device);
        }
    }
}

impl<R: Runtime> std::fmt::Debug for Region<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region")
            .field("ptr", &format!("0x{:x}", self.inner.ptr))
            .field("num_bytes", &self.inner.num_bytes)
            .field("owned", &self.inner.owned)
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_region_sharing() {
        let device = CpuDevice::new();
        let a = Region::<CpuRuntime>::new(64, &device).unwrap();
        assert!(a.is_unique());
        let b = a.clone();
        assert_eq!(a.ref_count(), 2);
        assert!(a.same_region(&b));
        assert_eq!(b.ptr(), a.ptr());
    }

    #[test]
    fn test_bytes_available() {
        let device = CpuDevice::new();
        let region = Region::<CpuRuntime>::new(100, &device).unwrap();
        assert_eq!(region.bytes_available(0), 100);
        assert_eq!(region.bytes_available(40), 60);
        assert_eq!(region.bytes_available(140), 0);
    }

    #[test]
    fn test_unowned_region_is_not_freed() {
        let device = CpuDevice::new();
        let mut backing = [7u8; 16];
        let region =
            unsafe { Region::<CpuRuntime>::from_ptr(backing.as_mut_ptr() as u64, 16, &device) };
        drop(region);
        assert_eq!(backing[0], 7);
    }
}
