//! Bulk-parallel runtime
//!
//! An accelerator-style backend: each device owns a worker pool and an
//! in-order execution stream. Operations validate on the calling thread,
//! enqueue kernel launches, and synchronize before returning. Memory freed
//! through the runtime is released in stream order.
//!
//! ```text
//! ParallelDevice(id) ──► DeviceContext (process-wide, one per id)
//!                         ├── rayon::ThreadPool  (blocks run here)
//!                         └── Stream             (launches + frees, in order)
//! ```

mod client;
mod device;
pub mod kernels;
pub mod launch;
mod runtime;
mod stream;

pub use client::{ParallelAllocator, ParallelClient};
pub use device::ParallelDevice;
pub use launch::{BlockCtx, Dim2, LaunchConfig};
pub use runtime::ParallelRuntime;
pub use stream::Stream;
