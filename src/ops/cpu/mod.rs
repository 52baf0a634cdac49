//! CPU implementation of array operations.
//!
//! Every operation validates, then runs its sequential kernel to completion
//! on the calling thread.

pub mod append;
pub mod cumulative;
pub mod reduce;
pub mod transpose;
pub mod utility;
