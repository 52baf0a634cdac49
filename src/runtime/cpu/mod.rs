//! CPU runtime implementation
//!
//! The CPU runtime executes every operation as a sequential loop on the
//! calling thread. It is the reference backend: the parallel backend must
//! produce the same results for every operation.

mod client;
mod device;
pub(crate) mod kernels;
mod runtime;

pub use client::{CpuAllocator, CpuClient};
pub use device::CpuDevice;
pub use runtime::CpuRuntime;

#[cfg(feature = "parallel")]
pub(crate) use runtime::{host_allocate, host_copy, host_deallocate};
