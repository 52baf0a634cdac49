//! CPU runtime implementation

use super::client::{CpuAllocator, CpuClient};
use super::device::CpuDevice;
use crate::error::{Error, Result};
use crate::runtime::{DeviceType, Runtime};
use std::alloc::{Layout as AllocLayout, alloc_zeroed, dealloc};

/// Alignment of every host allocation (one cache line)
pub(crate) const HOST_ALIGN: usize = 64;

/// CPU compute runtime
///
/// This is the sequential reference backend that works on any platform.
/// Memory is allocated on the heap using the system allocator.
#[derive(Clone, Debug, Default)]
pub struct CpuRuntime;

impl Runtime for CpuRuntime {
    type Device = CpuDevice;
    type Client = CpuClient;
    type Allocator = CpuAllocator;

    fn name() -> &'static str {
        "cpu"
    }

    fn device_type() -> DeviceType {
        DeviceType::Cpu
    }

    fn allocate(size_bytes: usize, _device: &Self::Device) -> Result<u64> {
        host_allocate(size_bytes)
    }

    fn deallocate(ptr: u64, size_bytes: usize, _device: &Self::Device) {
        host_deallocate(ptr, size_bytes);
    }

    fn copy_to_device(src: &[u8], dst: u64, _device: &Self::Device) -> Result<()> {
        host_copy(src.as_ptr() as u64, dst, src.len());
        Ok(())
    }

    fn copy_from_device(src: u64, dst: &mut [u8], _device: &Self::Device) -> Result<()> {
        host_copy(src, dst.as_mut_ptr() as u64, dst.len());
        Ok(())
    }

    fn default_device() -> Self::Device {
        CpuDevice::new()
    }

    fn default_client(device: &Self::Device) -> Self::Client {
        CpuClient::new(device.clone())
    }
}

/// Allocate zeroed, cache-line aligned host memory
pub(crate) fn host_allocate(size_bytes: usize) -> Result<u64> {
    if size_bytes == 0 {
        return Ok(0);
    }

    let layout = AllocLayout::from_size_align(size_bytes, HOST_ALIGN)
        .map_err(|_| Error::OutOfMemory { size: size_bytes })?;

    let ptr = unsafe { alloc_zeroed(layout) };

    if ptr.is_null() {
        return Err(Error::OutOfMemory { size: size_bytes });
    }

    Ok(ptr as u64)
}

/// Release memory obtained from [`host_allocate`]
pub(crate) fn host_deallocate(ptr: u64, size_bytes: usize) {
    if ptr == 0 || size_bytes == 0 {
        return;
    }

    // The layout was valid when the block was allocated
    if let Ok(layout) = AllocLayout::from_size_align(size_bytes, HOST_ALIGN) {
        unsafe {
            dealloc(ptr as *mut u8, layout);
        }
    }
}

/// Copy bytes between host addresses
pub(crate) fn host_copy(src: u64, dst: u64, size_bytes: usize) {
    if size_bytes == 0 || src == 0 || dst == 0 {
        return;
    }

    unsafe {
        // Use copy (not copy_nonoverlapping) in case src and dst overlap
        std::ptr::copy(src as *const u8, dst as *mut u8, size_bytes);
    }
}
