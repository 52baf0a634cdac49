//! # ragarray
//!
//! **Device-portable array primitives for ragged-array and automaton algorithms.**
//!
//! ragarray provides a small set of bulk operations over 1-D, 2-D and ragged
//! arrays that behave identically on a sequential CPU backend and on a
//! bulk-parallel accelerator backend:
//!
//! - **Transpose**: tiled block transpose of strided matrices
//! - **Exclusive sum**: over a sequence, over dereferenced pointers, and per axis of a matrix
//! - **Append**: concatenation of many sequences with a skew-aware parallel strategy
//! - **Segmented max**: maximum of every row of a ragged array
//! - **Generators**: arithmetic ranges, uniform random fills, contiguity normalization
//!
//! ## Quick Start
//!
//! ```rust
//! use ragarray::prelude::*;
//!
//! let device = CpuDevice::new();
//! let client = CpuRuntime::default_client(&device);
//!
//! let src = Array1::<CpuRuntime, i32>::from_slice(&[3, 1, 4, 1, 5], &device)?;
//! let mut dest = Array1::<CpuRuntime, i32>::new(5, &device)?;
//! client.exclusive_sum(&src, &mut dest)?;
//! assert_eq!(dest.to_vec()?, vec![0, 3, 4, 8, 9]);
//! # Ok::<(), ragarray::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cpu` (default): sequential host backend
//! - `parallel` (default): bulk-parallel backend (worker pool + in-order stream)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod array;
pub mod dtype;
pub mod error;
pub mod ops;
pub mod runtime;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::array::{Array1, Array2, PtrArray, Ragged, RaggedShape, Region};
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{AppendOps, CumulativeOps, ReduceOps, TransposeOps, UtilityOps};
    pub use crate::runtime::{Device, DeviceType, Runtime, RuntimeClient};

    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};

    #[cfg(feature = "parallel")]
    pub use crate::runtime::parallel::{ParallelClient, ParallelDevice, ParallelRuntime};
}

/// Default runtime based on enabled features
///
/// - With `parallel` feature: `ParallelRuntime`
/// - Otherwise: `CpuRuntime`
#[cfg(feature = "parallel")]
pub type DefaultRuntime = runtime::parallel::ParallelRuntime;

/// Default runtime based on enabled features
#[cfg(not(feature = "parallel"))]
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
