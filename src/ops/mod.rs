//! Array operations
//!
//! Operations are traits implemented by each runtime client. The client is
//! the execution context: it names the device, owns the allocator used for
//! temporaries and orders work on the device stream.
//!
//! ```text
//! RuntimeClient<R>
//!   ├── TransposeOps   transpose
//!   ├── CumulativeOps  exclusive_sum, exclusive_sum_deref, exclusive_sum_2d
//!   ├── AppendOps      append
//!   ├── ReduceOps      max_per_sublist
//!   └── UtilityOps     range, rand_uniform, to_contiguous
//! ```
//!
//! # Backend layout
//!
//! - [`common`] - precondition checks shared by every backend
//! - `impl_generic` - composites built on backend primitives
//! - `cpu`, `parallel` - trait implementations per client type
//!
//! The backend is picked by the client type, so each call branches between
//! the sequential loop and the parallel kernel once, at compile time.

pub mod common;
pub(crate) mod impl_generic;
mod traits;

mod cpu;
#[cfg(feature = "parallel")]
mod parallel;

pub use traits::{AppendOps, CumulativeOps, ReduceOps, TransposeOps, UtilityOps};

#[cfg(feature = "parallel")]
pub use crate::runtime::parallel::kernels::{
    APPEND_SKEW_FACTOR, APPEND_SKEW_SLACK, AppendStrategy, choose_append_strategy,
};
