//! Generic implementations of composite operations.
//!
//! Backend-agnostic algorithms shared by the CPU and parallel clients. Each
//! backend provides the primitive hooks (transpose, row scan) and delegates
//! here, so both produce the same results by construction.
//!
//! ```text
//! impl_generic/cumulative.rs
//!     └── exclusive_sum_2d_impl<R, C, T>()
//!             ├── ops/cpu/cumulative.rs delegates here
//!             └── ops/parallel/cumulative.rs delegates here
//! ```

pub mod cumulative;
pub mod utility;

pub use cumulative::{ExclusiveSumRows, exclusive_sum_2d_impl};
pub use utility::rand_uniform_impl;
