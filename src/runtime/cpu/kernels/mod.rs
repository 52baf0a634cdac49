//! Sequential CPU kernels
//!
//! Each kernel is a plain loop over raw element pointers. Callers (the
//! `ops::cpu` implementations) validate shapes, devices and capacities before
//! calling in, so kernels only document the pointer ranges they touch.

pub mod append;
pub mod fill;
pub mod random;
pub mod reduce;
pub mod scan;
pub mod transpose;

pub use append::append_kernel;
pub use fill::{range_kernel, strided_copy_kernel};
pub use random::{RAND_MAX, rand_uniform_kernel};
pub use reduce::max_per_sublist_kernel;
pub use scan::exclusive_sum_kernel;
pub use transpose::transpose_kernel;
