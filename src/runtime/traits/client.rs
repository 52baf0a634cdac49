//! Trait for runtime clients that handle operation dispatch

use super::{Device, Runtime};
use crate::error::Result;
use crate::runtime::DeviceType;

/// Trait for runtime clients that handle operation dispatch
///
/// A client is the execution context every operation runs in: it names the
/// device, owns the allocator used for per-call temporaries, and orders work
/// on the device's execution stream.
pub trait RuntimeClient<R: Runtime>: Clone + Send + Sync {
    /// Get the device this client operates on
    fn device(&self) -> &R::Device;

    /// Execution model of this client's device
    fn device_type(&self) -> DeviceType {
        R::device_type()
    }

    /// Check whether memory on `device` can be used by this client
    fn is_compatible(&self, device: &R::Device) -> bool {
        self.device().is_same(device)
    }

    /// Synchronize: wait for all pending operations to complete
    ///
    /// Returns the first device-side failure recorded since the last call.
    fn synchronize(&self) -> Result<()>;

    /// Get the allocator for this client
    fn allocator(&self) -> &R::Allocator;
}
