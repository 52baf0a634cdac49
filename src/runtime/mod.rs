//! Runtime backends for array computation
//!
//! This module defines the `Runtime` trait and provides implementations
//! for the two execution models (sequential CPU, bulk-parallel accelerator).
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a specific compute unit)
//! ├── Client (dispatches operations, owns the execution stream)
//! └── Allocator (scratch memory with live-byte tracking)
//! ```
//!
//! Operations are implemented once per client type, so the choice between the
//! sequential loop and the parallel kernel is made once per call, at compile time.

mod allocator;
pub mod kernel;
pub mod traits;

pub mod cpu;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use allocator::{Allocator, DefaultAllocator, ScratchBuffer};
pub use traits::{Device, Runtime, RuntimeClient};

use std::fmt;

/// Execution model of a device
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// Single-threaded sequential host execution
    Cpu,
    /// Bulk-parallel dispatch onto an in-order execution stream
    Parallel,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}

/// Number of blocks of `block_size` needed to cover `n` items
#[inline]
pub fn num_blocks(n: usize, block_size: usize) -> usize {
    n.div_ceil(block_size)
}
