//! Parallel implementation of array operations.
//!
//! Every operation validates on the calling thread, enqueues its kernels on
//! the device stream and synchronizes before returning, so callers never see
//! a partially written result.

pub mod append;
pub mod cumulative;
pub mod reduce;
pub mod transpose;
pub mod utility;
