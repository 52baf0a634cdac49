//! Parallel runtime implementation

use super::client::{ParallelAllocator, ParallelClient};
use super::device::ParallelDevice;
use crate::error::Result;
use crate::runtime::cpu::{host_allocate, host_copy, host_deallocate};
use crate::runtime::{DeviceType, Runtime};

/// Bulk-parallel compute runtime
///
/// Device memory is host memory addressed through `u64` device pointers;
/// kernels run on the device's worker pool behind its in-order stream.
#[derive(Clone, Debug, Default)]
pub struct ParallelRuntime;

impl Runtime for ParallelRuntime {
    type Device = ParallelDevice;
    type Client = ParallelClient;
    type Allocator = ParallelAllocator;

    fn name() -> &'static str {
        "parallel"
    }

    fn device_type() -> DeviceType {
        DeviceType::Parallel
    }

    fn allocate(size_bytes: usize, _device: &Self::Device) -> Result<u64> {
        host_allocate(size_bytes)
    }

    /// Release `ptr` once every kernel queued before this call has finished
    fn deallocate(ptr: u64, size_bytes: usize, device: &Self::Device) {
        if ptr == 0 || size_bytes == 0 {
            return;
        }
        device
            .stream()
            .enqueue_host("free", move || host_deallocate(ptr, size_bytes));
    }

    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device) -> Result<()> {
        device.stream().synchronize()?;
        host_copy(src.as_ptr() as u64, dst, src.len());
        Ok(())
    }

    fn copy_from_device(src: u64, dst: &mut [u8], device: &Self::Device) -> Result<()> {
        device.stream().synchronize()?;
        host_copy(src, dst.as_mut_ptr() as u64, dst.len());
        Ok(())
    }

    fn default_device() -> Self::Device {
        ParallelDevice::new(0)
    }

    fn default_client(device: &Self::Device) -> Self::Client {
        ParallelClient::new(device.clone())
    }
}
